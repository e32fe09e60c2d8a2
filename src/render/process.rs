use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::{
    foundation::error::{RevealError, RevealResult},
    render::engine::{RenderEngine, RenderSettings},
    render::projection::RenderableScene,
};

/// External renderer launched once per frame.
///
/// Arguments may contain `{frame}`, `{output}`, `{width}`, `{height}` and `{samples}`
/// placeholders. The [`RenderableScene`] is written to the child's stdin as JSON.
#[derive(Clone, Debug)]
pub struct ProcessEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessEngine {
    /// Create an engine running `program` with argument templates `args`.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn expand(
        &self,
        scene: &RenderableScene,
        settings: &RenderSettings,
        out_path: &Path,
    ) -> Vec<String> {
        let output = out_path.to_string_lossy();
        self.args
            .iter()
            .map(|a| {
                a.replace("{frame}", &scene.frame.0.to_string())
                    .replace("{output}", &output)
                    .replace("{width}", &settings.resolution.width.to_string())
                    .replace("{height}", &settings.resolution.height.to_string())
                    .replace("{samples}", &settings.samples.to_string())
            })
            .collect()
    }
}

impl RenderEngine for ProcessEngine {
    fn name(&self) -> &str {
        "process"
    }

    fn render_frame(
        &mut self,
        scene: &RenderableScene,
        settings: &RenderSettings,
        out_path: &Path,
    ) -> RevealResult<()> {
        let frame = scene.frame.0;
        let payload = serde_json::to_vec(scene)
            .map_err(|e| RevealError::serde(format!("failed to encode scene snapshot: {e}")))?;
        let args = self.expand(scene, settings, out_path);
        tracing::debug!(program = %self.program.display(), ?args, "launching renderer");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                RevealError::render_engine(
                    frame,
                    format!("failed to spawn '{}': {e}", self.program.display()),
                )
            })?;

        let mut stderr = child.stderr.take().ok_or_else(|| {
            RevealError::render_engine(frame, "failed to open renderer stderr (unexpected)")
        })?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok::<_, std::io::Error>(stderr_bytes)
        });

        if let Some(mut stdin) = child.stdin.take() {
            // Renderers that take the scene from elsewhere may close stdin early.
            match stdin.write_all(&payload) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => {
                    reap(&mut child);
                    return Err(RevealError::render_engine(
                        frame,
                        format!("failed to write scene to renderer stdin: {e}"),
                    ));
                }
            }
        }

        let status = child.wait().map_err(|e| {
            RevealError::render_engine(frame, format!("failed to wait for renderer: {e}"))
        })?;
        let stderr_bytes = stderr_drain
            .join()
            .map_err(|_| RevealError::render_engine(frame, "renderer stderr drain thread panicked"))?
            .map_err(|e| RevealError::render_engine(frame, format!("renderer stderr read failed: {e}")))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(RevealError::render_engine(
                frame,
                format!("renderer exited with status {}: {}", status, stderr.trim()),
            ));
        }
        if !out_path.is_file() {
            return Err(RevealError::render_engine(
                frame,
                format!("renderer succeeded but wrote no file at '{}'", out_path.display()),
            ));
        }
        Ok(())
    }
}

/// Kill a renderer that will not be waited on normally, and collect its exit status.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
#[path = "../../tests/unit/render/process.rs"]
mod tests;
