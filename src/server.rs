//! `GET /render` trigger endpoint.
//!
//! Each accepted request runs the pipeline as a child process and answers once it exits.
//! Requests are served one at a time, so jobs never overlap in the output directory.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::foundation::error::{RevealError, RevealResult};

/// Where to listen and what to launch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Asset checked before launching a job.
    pub logo_path: PathBuf,
    /// Job executable.
    pub program: PathBuf,
    /// Job arguments.
    pub args: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            logo_path: PathBuf::from("CVPRk7F2_400x400.jpg"),
            program: PathBuf::from("reveal"),
            args: vec!["render".to_string()],
        }
    }
}

/// Status code and plain-text body for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response text; the render job's stderr on failure.
    pub body: String,
}

impl TriggerResponse {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

fn run_job(cfg: &ServerConfig) -> TriggerResponse {
    tracing::info!(program = %cfg.program.display(), args = ?cfg.args, "starting render job");
    let output = Command::new(&cfg.program)
        .args(&cfg.args)
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            tracing::info!("render job finished");
            TriggerResponse::new(200, "render complete")
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            tracing::warn!(status = %out.status, "render job failed");
            TriggerResponse::new(500, format!("render failed ({}):\n{stderr}", out.status))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to launch render job");
            TriggerResponse::new(
                500,
                format!("failed to launch '{}': {e}", cfg.program.display()),
            )
        }
    }
}

/// Route one request.
pub fn handle(cfg: &ServerConfig, method: &tiny_http::Method, url: &str) -> TriggerResponse {
    let path = url.split_once('?').map_or(url, |(p, _)| p);
    if path != "/render" {
        return TriggerResponse::new(404, "not found");
    }
    if *method != tiny_http::Method::Get {
        return TriggerResponse::new(405, "method not allowed");
    }
    if !cfg.logo_path.is_file() {
        tracing::warn!(logo = %cfg.logo_path.display(), "logo missing; job not started");
        return TriggerResponse::new(
            400,
            format!("logo file '{}' not found", cfg.logo_path.display()),
        );
    }
    run_job(cfg)
}

/// Bind and serve until the process is killed.
pub fn serve(cfg: &ServerConfig) -> RevealResult<()> {
    let addr = format!("{}:{}", cfg.host, cfg.port);
    let server = tiny_http::Server::http(&addr)
        .map_err(|e| RevealError::validation(format!("failed to bind '{addr}': {e}")))?;
    tracing::info!(%addr, "listening");

    for request in server.incoming_requests() {
        let res = handle(cfg, request.method(), request.url());
        tracing::info!(method = %request.method(), url = request.url(), status = res.status, "request");
        let response = tiny_http::Response::from_string(res.body).with_status_code(res.status);
        if let Err(e) = request.respond(response) {
            tracing::warn!(error = %e, "failed to send response");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/server.rs"]
mod tests;
