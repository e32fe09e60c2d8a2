use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::{
    encode::ffmpeg::EncodeConfig,
    foundation::core::{ClipSpec, Fps, RenderRange},
    foundation::error::{RevealError, RevealResult},
    render::engine::{EngineConfig, EngineKind, RenderSettings},
    sequence::layout::FrameLayout,
};

/// Encoder settings plus an on/off switch.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeStage {
    /// Run the encoder after the sequence is complete.
    pub enabled: bool,
    /// Encoder program and quality knobs.
    #[serde(flatten)]
    pub encoder: EncodeConfig,
}

impl Default for EncodeStage {
    fn default() -> Self {
        Self {
            enabled: true,
            encoder: EncodeConfig::default(),
        }
    }
}

/// Everything a pipeline run needs. Every field has a default, so a partial JSON file is enough.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Logo image shown on the hologram plane. Must exist before a run starts.
    pub logo_path: PathBuf,
    /// Directory receiving the frame sequence and the video.
    pub output_dir: PathBuf,
    /// Video file name inside `output_dir`.
    pub video_name: String,
    /// Integer frame rate.
    pub fps: u32,
    /// First rendered frame (1-based).
    pub render_start: u64,
    /// Last rendered frame, inclusive.
    pub render_end: u64,
    /// Length of the finished sequence; frames past `render_end` repeat the last one.
    pub total_frames: u64,
    /// Quality settings passed to the engine.
    pub render: RenderSettings,
    /// Engine selection.
    pub engine: EngineConfig,
    /// Encode stage.
    pub encode: EncodeStage,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            logo_path: PathBuf::from("CVPRk7F2_400x400.jpg"),
            output_dir: PathBuf::from("imback_output"),
            video_name: "imback.mp4".to_string(),
            fps: 30,
            render_start: 1,
            render_end: 70,
            total_frames: 150,
            render: RenderSettings::default(),
            engine: EngineConfig::default(),
            encode: EncodeStage::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RevealResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RevealError::serde(format!("parse pipeline config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RevealError::validation(format!("open pipeline config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ranges, resolution, engine and encoder settings. Does not touch the filesystem.
    pub fn validate(&self) -> RevealResult<()> {
        self.clip_spec()?;
        if self.render_start != 1 {
            // The encoder reads a sequence starting at frame_..1.
            return Err(RevealError::validation(format!(
                "render_start must be 1 for a full run (got {})",
                self.render_start
            )));
        }
        self.render.validate()?;
        if self.video_name.trim().is_empty() {
            return Err(RevealError::validation("video_name must not be empty"));
        }
        if self.engine.kind == EngineKind::Process && self.engine.command.is_empty() {
            return Err(RevealError::validation(
                "engine.command is required for the process engine",
            ));
        }
        if self.encode.enabled {
            self.encode.encoder.validate()?;
        }
        Ok(())
    }

    /// Frames handed to the render engine.
    pub fn render_range(&self) -> RevealResult<RenderRange> {
        RenderRange::new(self.render_start, self.render_end, Fps::integer(self.fps)?)
    }

    /// Length of the finished sequence.
    pub fn clip_spec(&self) -> RevealResult<ClipSpec> {
        ClipSpec::new(self.total_frames, self.render_range()?)
    }

    /// Frame naming for this run.
    pub fn frame_layout(&self) -> FrameLayout {
        FrameLayout::new(&self.output_dir, self.total_frames)
    }

    /// Where the encoded video goes.
    pub fn video_path(&self) -> PathBuf {
        self.output_dir.join(&self.video_name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
