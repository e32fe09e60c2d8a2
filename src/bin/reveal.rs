use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "reveal", version, about)]
struct Cli {
    /// Default log level (overridden by `RUST_LOG`).
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full clip: frames, padding and MP4.
    Render(RenderArgs),
    /// Render a single frame as a PNG into the output directory.
    Frame(FrameArgs),
    /// Serve `GET /render`, running one render job per request.
    Serve(ServeArgs),
}

#[derive(Parser, Debug, Clone)]
struct ConfigArgs {
    /// Pipeline config JSON. Defaults apply to anything it leaves out.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the logo image path.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Override the output directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Override the render engine.
    #[arg(long, value_enum)]
    engine: Option<EngineArg>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Stop after the frame sequence is complete.
    #[arg(long, default_value_t = false)]
    no_encode: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Frame index (1-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Pipeline config JSON handed to every job.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind host.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bind port.
    #[arg(long, env = "PORT", default_value_t = 10000)]
    port: u16,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum EngineArg {
    Preview,
    Process,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_directive()));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<reveal::PipelineConfig> {
    let mut cfg = match &args.config {
        Some(path) => reveal::PipelineConfig::from_path(path)?,
        None => reveal::PipelineConfig::default(),
    };
    if let Some(logo) = &args.logo {
        cfg.logo_path = logo.clone();
    }
    if let Some(dir) = &args.output_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(engine) = args.engine {
        cfg.engine.kind = match engine {
            EngineArg::Preview => reveal::EngineKind::Preview,
            EngineArg::Process => reveal::EngineKind::Process,
        };
    }
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.config)?;
    if args.no_encode {
        cfg.encode.enabled = false;
    }
    let pipeline = reveal::Pipeline::new(cfg)?;
    let mut engine = reveal::create_engine(&pipeline.config().engine)?;

    let report = pipeline.run(engine.as_mut())?;
    eprintln!(
        "rendered {} frames, padded to {} in '{}' ({:.1}s)",
        report.frames_rendered,
        report.frames_total,
        report.frame_dir.display(),
        report.elapsed.as_secs_f64()
    );
    match report.encode {
        reveal::EncodeOutcome::Encoded { path } => eprintln!("wrote {}", path.display()),
        reveal::EncodeOutcome::Failed { frame_dir, message } => eprintln!(
            "encoding failed: {message}\nframes are in '{}'",
            frame_dir.display()
        ),
        reveal::EncodeOutcome::Skipped => {}
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let pipeline = reveal::Pipeline::new(cfg)?;
    let mut engine = reveal::create_engine(&pipeline.config().engine)?;

    let path = pipeline.render_single(reveal::FrameIndex(args.frame), engine.as_mut())?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => reveal::PipelineConfig::from_path(path)?,
        None => reveal::PipelineConfig::default(),
    };
    let program = std::env::current_exe().context("locate the reveal executable")?;

    let mut job_args = vec!["render".to_string()];
    if let Some(path) = &args.config {
        let path = path
            .canonicalize()
            .with_context(|| format!("resolve config path '{}'", path.display()))?;
        job_args.push("--config".to_string());
        job_args.push(path.to_string_lossy().into_owned());
    }

    let server = reveal::ServerConfig {
        host: args.host,
        port: args.port,
        logo_path: cfg.logo_path,
        program,
        args: job_args,
    };
    reveal::serve(&server)?;
    Ok(())
}
