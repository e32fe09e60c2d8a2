use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::{
    encode::ffmpeg::encode_sequence,
    foundation::core::FrameIndex,
    foundation::error::{RevealError, RevealResult},
    render::engine::RenderEngine,
    render::sampler::{render_frame_to, render_range},
    scene::logo_reveal::build_logo_reveal,
    sequence::extend::extend,
    session::config::PipelineConfig,
};

/// What happened in the encode stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// Video written to `path`.
    Encoded {
        /// Encoded video.
        path: PathBuf,
    },
    /// Encoder failed; the complete frame sequence is still in `frame_dir`.
    Failed {
        /// Directory with the frames, for manual recovery.
        frame_dir: PathBuf,
        /// Encoder failure description.
        message: String,
    },
    /// Encoding disabled in config.
    Skipped,
}

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    /// Frames produced by the engine.
    pub frames_rendered: u64,
    /// Frames in the finished sequence, including replicated ones.
    pub frames_total: u64,
    /// Directory with the frame sequence.
    pub frame_dir: PathBuf,
    /// Encode stage result.
    pub encode: EncodeOutcome,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}

/// One configured logo-reveal job.
///
/// A run checks assets, builds the scene, renders the range, pads to the full length, verifies
/// the sequence and encodes it. Render and extension failures abort the run. Encode failures do
/// not: they are reported in [`PipelineReport::encode`].
#[derive(Clone, Debug)]
pub struct Pipeline {
    cfg: PipelineConfig,
}

impl Pipeline {
    /// Validate `cfg` and wrap it.
    pub fn new(cfg: PipelineConfig) -> RevealResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Configuration this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Fail with [`RevealError::MissingAsset`] if a required input is absent.
    pub fn check_assets(&self) -> RevealResult<()> {
        if !self.cfg.logo_path.is_file() {
            return Err(RevealError::missing_asset(&self.cfg.logo_path));
        }
        Ok(())
    }

    /// Run the whole job with `engine`.
    #[tracing::instrument(skip_all, fields(engine = engine.name(), out = %self.cfg.output_dir.display()))]
    pub fn run(&self, engine: &mut dyn RenderEngine) -> RevealResult<PipelineReport> {
        let started = Instant::now();
        self.check_assets()?;

        let range = self.cfg.render_range()?;
        let clip = self.cfg.clip_spec()?;
        let layout = self.cfg.frame_layout();
        layout.ensure_dir()?;
        layout.prune_beyond(clip.target_total_frames)?;

        let (scene, tracks) = build_logo_reveal(&self.cfg.logo_path)?;
        tracing::info!(
            objects = scene.objects().len(),
            tracks = tracks.len(),
            "scene built"
        );

        let stats = render_range(&scene, &tracks, range, engine, &self.cfg.render, &layout)?;
        tracing::info!(
            frames = stats.frames_rendered,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "render finished"
        );

        let padded = extend(&layout, range.end, clip.target_total_frames)?;
        layout.verify_contiguous(clip.target_total_frames)?;
        tracing::info!(padded, total = clip.target_total_frames, "sequence complete");

        let encode = if self.cfg.encode.enabled {
            match encode_sequence(
                &layout,
                clip.target_total_frames,
                clip.fps,
                &self.cfg.video_path(),
                &self.cfg.encode.encoder,
            ) {
                Ok(report) => EncodeOutcome::Encoded {
                    path: report.out_path,
                },
                Err(RevealError::Encode { frame_dir, message }) => {
                    tracing::warn!(
                        frame_dir = %frame_dir.display(),
                        error = %message,
                        "encoding failed; frames kept for manual recovery"
                    );
                    EncodeOutcome::Failed { frame_dir, message }
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::info!("encoding disabled");
            EncodeOutcome::Skipped
        };

        Ok(PipelineReport {
            frames_rendered: stats.frames_rendered,
            frames_total: clip.target_total_frames,
            frame_dir: layout.dir().to_path_buf(),
            encode,
            elapsed: started.elapsed(),
        })
    }

    /// Render a single frame into the output directory, for previews.
    ///
    /// Returns the path of the written image.
    #[tracing::instrument(skip(self, engine), fields(engine = engine.name()))]
    pub fn render_single(
        &self,
        frame: FrameIndex,
        engine: &mut dyn RenderEngine,
    ) -> RevealResult<PathBuf> {
        self.check_assets()?;
        if frame.0 == 0 || frame.0 > self.cfg.total_frames {
            return Err(RevealError::validation(format!(
                "frame {frame} is outside 1..={}",
                self.cfg.total_frames
            )));
        }
        let layout = self.cfg.frame_layout();
        layout.ensure_dir()?;
        let (scene, tracks) = build_logo_reveal(&self.cfg.logo_path)?;
        render_frame_to(&scene, &tracks, frame, engine, &self.cfg.render, &layout)?;
        Ok(layout.path_for(frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/pipeline.rs"]
mod tests;
