use std::path::Path;

use crate::{
    foundation::core::Resolution,
    foundation::error::{RevealError, RevealResult},
    render::projection::RenderableScene,
};

/// Bloom post-process parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bloom {
    /// Luminance above which pixels bloom.
    pub threshold: f64,
    /// Bloom intensity.
    pub intensity: f64,
}

/// Quality settings handed to the engine with every frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output resolution.
    pub resolution: Resolution,
    /// Anti-aliasing samples per pixel.
    pub samples: u32,
    /// Bloom, if enabled.
    pub bloom: Option<Bloom>,
    /// Screen-space reflections.
    pub screen_space_reflections: bool,
    /// Ambient occlusion.
    pub ambient_occlusion: bool,
    /// Soft shadows.
    pub soft_shadows: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            samples: 16,
            bloom: Some(Bloom {
                threshold: 0.8,
                intensity: 0.6,
            }),
            screen_space_reflections: true,
            ambient_occlusion: true,
            soft_shadows: true,
        }
    }
}

impl RenderSettings {
    /// Validate resolution and sample count.
    pub fn validate(&self) -> RevealResult<()> {
        let Resolution { width, height } = self.resolution;
        if width == 0 || height == 0 {
            return Err(RevealError::validation("render width/height must be non-zero"));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            // Frames are encoded as yuv420p, which needs even dimensions.
            return Err(RevealError::validation(
                "render width/height must be even (required for yuv420p output)",
            ));
        }
        if self.samples == 0 {
            return Err(RevealError::validation("render samples must be > 0"));
        }
        Ok(())
    }
}

/// Image-producing collaborator: one synchronous call per frame.
///
/// Engines get exclusive use of the snapshot for the duration of the call and must have written
/// `out_path` when they return `Ok`.
pub trait RenderEngine {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Rasterize `scene` into an image file at `out_path`.
    fn render_frame(
        &mut self,
        scene: &RenderableScene,
        settings: &RenderSettings,
        out_path: &Path,
    ) -> RevealResult<()>;
}

/// Available engine kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Built-in CPU preview rasterizer.
    #[default]
    Preview,
    /// External renderer launched once per frame.
    Process,
}

/// Engine selection as found in configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which engine to use.
    pub kind: EngineKind,
    /// External renderer program and arguments (`process` only).
    pub command: Vec<String>,
}

/// Create a rendering engine.
pub fn create_engine(cfg: &EngineConfig) -> RevealResult<Box<dyn RenderEngine>> {
    match cfg.kind {
        EngineKind::Preview => Ok(Box::new(crate::render::preview::PreviewEngine::default())),
        EngineKind::Process => {
            let (program, args) = cfg.command.split_first().ok_or_else(|| {
                RevealError::validation("process engine needs a command (program and arguments)")
            })?;
            Ok(Box::new(crate::render::process::ProcessEngine::new(
                program,
                args.to_vec(),
            )))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
