use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::foundation::core::Fps;
use crate::foundation::error::{RevealError, RevealResult};
use crate::sequence::layout::FrameLayout;

/// Encoder program and quality knobs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Encoder executable, looked up on `PATH` when relative.
    pub program: PathBuf,
    /// Video codec.
    pub codec: String,
    /// Output pixel format.
    pub pix_fmt: String,
    /// x264 speed preset.
    pub preset: String,
    /// Constant rate factor (lower is better quality).
    pub crf: u8,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            codec: "libx264".to_string(),
            pix_fmt: "yuv420p".to_string(),
            preset: "fast".to_string(),
            crf: 18,
            overwrite: true,
        }
    }
}

impl EncodeConfig {
    /// Reject empty knobs and out-of-range CRF.
    pub fn validate(&self) -> RevealResult<()> {
        if self.program.as_os_str().is_empty() {
            return Err(RevealError::validation("encoder program must be set"));
        }
        for (name, value) in [
            ("codec", &self.codec),
            ("pix_fmt", &self.pix_fmt),
            ("preset", &self.preset),
        ] {
            if value.trim().is_empty() {
                return Err(RevealError::validation(format!("encoder {name} must be set")));
            }
        }
        if self.crf > 51 {
            return Err(RevealError::validation("encoder crf must be in 0..=51"));
        }
        Ok(())
    }
}

/// Result of a successful encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeReport {
    /// Video written.
    pub out_path: PathBuf,
    /// Frames fed to the encoder.
    pub frames: u64,
    /// Wall time spent in the encoder.
    pub elapsed: Duration,
}

pub(crate) fn build_command(
    layout: &FrameLayout,
    fps: Fps,
    out_path: &Path,
    cfg: &EncodeConfig,
) -> Command {
    let mut cmd = Command::new(&cfg.program);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    cmd.arg(if cfg.overwrite { "-y" } else { "-n" });
    cmd.args(["-loglevel", "error"]);
    // Image-sequence input: the rate must precede `-i`.
    cmd.args(["-framerate", &fps.to_ffmpeg_rate(), "-start_number", "1", "-i"])
        .arg(layout.ffmpeg_pattern());
    cmd.args([
        "-c:v",
        &cfg.codec,
        "-pix_fmt",
        &cfg.pix_fmt,
        "-preset",
        &cfg.preset,
        "-crf",
        &cfg.crf.to_string(),
    ])
    .arg(out_path);
    cmd
}

/// Encode the contiguous sequence `[1, total_frames]` in `layout` into `out_path`.
///
/// Every failure is an [`RevealError::Encode`] naming the frame directory. Frames are left in
/// place whatever the outcome.
#[tracing::instrument(skip(layout, cfg), fields(frame_dir = %layout.dir().display(), out = %out_path.display()))]
pub fn encode_sequence(
    layout: &FrameLayout,
    total_frames: u64,
    fps: Fps,
    out_path: &Path,
    cfg: &EncodeConfig,
) -> RevealResult<EncodeReport> {
    let fail = |msg: String| RevealError::encode(layout.dir(), msg);

    cfg.validate().map_err(|e| fail(e.to_string()))?;
    layout
        .verify_contiguous(total_frames)
        .map_err(|e| fail(e.to_string()))?;
    ensure_parent_dir(out_path).map_err(|e| fail(e.to_string()))?;
    if !cfg.overwrite && out_path.exists() {
        return Err(fail(format!(
            "output file '{}' already exists",
            out_path.display()
        )));
    }

    let mut cmd = build_command(layout, fps, out_path, cfg);
    tracing::debug!(command = ?cmd, "launching encoder");
    let started = Instant::now();

    let mut child = cmd.spawn().map_err(|e| {
        fail(format!(
            "failed to spawn '{}' (is it installed and on PATH?): {e}",
            cfg.program.display()
        ))
    })?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| fail("failed to open encoder stderr (unexpected)".to_string()))?;
    let stderr_drain = std::thread::spawn(move || {
        let mut stderr_bytes = Vec::new();
        stderr.read_to_end(&mut stderr_bytes)?;
        Ok::<_, std::io::Error>(stderr_bytes)
    });

    let status = child
        .wait()
        .map_err(|e| fail(format!("failed to wait for encoder to finish: {e}")))?;
    let stderr_bytes = stderr_drain
        .join()
        .map_err(|_| fail("encoder stderr drain thread panicked".to_string()))?
        .map_err(|e| fail(format!("encoder stderr read failed: {e}")))?;

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr_bytes);
        return Err(fail(format!(
            "encoder exited with status {}: {}",
            status,
            stderr.trim()
        )));
    }

    let report = EncodeReport {
        out_path: out_path.to_path_buf(),
        frames: total_frames,
        elapsed: started.elapsed(),
    };
    tracing::info!(frames = report.frames, elapsed_ms = report.elapsed.as_millis() as u64, "encoded video");
    Ok(report)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> RevealResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
