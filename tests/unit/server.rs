use super::*;
use tiny_http::Method;

fn config(logo: PathBuf, program: &str, args: &[&str]) -> ServerConfig {
    ServerConfig {
        logo_path: logo,
        program: PathBuf::from(program),
        args: args.iter().map(|a| a.to_string()).collect(),
        ..ServerConfig::default()
    }
}

fn with_logo() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("logo.jpg");
    std::fs::write(&logo, b"logo").unwrap();
    (dir, logo)
}

#[test]
fn missing_logo_is_a_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path().join("absent.jpg"), "true", &[]);
    let res = handle(&cfg, &Method::Get, "/render");
    assert_eq!(res.status, 400);
    assert!(res.body.contains("absent.jpg"));
}

#[cfg(unix)]
#[test]
fn successful_job_is_ok() {
    let (_dir, logo) = with_logo();
    let res = handle(&config(logo, "true", &[]), &Method::Get, "/render?now=1");
    assert_eq!(res.status, 200);
    assert_eq!(res.body, "render complete");
}

#[cfg(unix)]
#[test]
fn failing_job_returns_its_stderr() {
    let (_dir, logo) = with_logo();
    let cfg = config(logo, "sh", &["-c", "echo 'frame 40 exploded' >&2; exit 1"]);
    let res = handle(&cfg, &Method::Get, "/render");
    assert_eq!(res.status, 500);
    assert!(res.body.contains("frame 40 exploded"));
}

#[test]
fn unknown_program_is_a_server_error() {
    let (_dir, logo) = with_logo();
    let res = handle(
        &config(logo, "reveal-no-such-program", &[]),
        &Method::Get,
        "/render",
    );
    assert_eq!(res.status, 500);
}

#[test]
fn other_routes_and_methods_are_rejected() {
    let cfg = ServerConfig::default();
    assert_eq!(handle(&cfg, &Method::Get, "/").status, 404);
    assert_eq!(handle(&cfg, &Method::Post, "/render").status, 405);
}
