use std::io::ErrorKind;
use std::time::{Duration, Instant};

use crate::{
    animation::track::TrackStore,
    foundation::core::{FrameIndex, RenderRange},
    foundation::error::{RevealError, RevealResult},
    render::engine::{RenderEngine, RenderSettings},
    render::projection::project,
    scene::model::SceneModel,
    sequence::layout::FrameLayout,
};

/// Counters for one [`render_range`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames the engine completed.
    pub frames_rendered: u64,
    /// Wall time spent in the loop.
    pub elapsed: Duration,
}

/// Project and render a single frame to its frame-indexed path.
///
/// A file left at the frame path by an earlier run is removed first, so only what the engine
/// writes now can satisfy the output check. Any failure is reported as
/// [`RevealError::RenderEngine`] for `frame`.
pub fn render_frame_to(
    scene: &SceneModel,
    tracks: &TrackStore,
    frame: FrameIndex,
    engine: &mut dyn RenderEngine,
    settings: &RenderSettings,
    layout: &FrameLayout,
) -> RevealResult<()> {
    let out_path = layout.path_for(frame);
    match std::fs::remove_file(&out_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(RevealError::render_engine(
                frame.0,
                format!("failed to clear stale frame '{}': {e}", out_path.display()),
            ));
        }
    }

    let result = project(scene, tracks, frame)
        .and_then(|snapshot| engine.render_frame(&snapshot, settings, &out_path));

    match result {
        Ok(()) if out_path.is_file() => Ok(()),
        Ok(()) => Err(RevealError::render_engine(
            frame.0,
            format!(
                "engine '{}' reported success but '{}' does not exist",
                engine.name(),
                out_path.display()
            ),
        )),
        Err(e @ RevealError::RenderEngine { .. }) => Err(e),
        Err(e) => Err(RevealError::render_engine(frame.0, e.to_string())),
    }
}

/// Render every frame of `range` in ascending order.
///
/// Stops at the first failing frame. Frames written before it stay on disk.
#[tracing::instrument(
    skip(scene, tracks, engine, settings, layout),
    fields(engine = engine.name(), start = range.start.0, end = range.end.0)
)]
pub fn render_range(
    scene: &SceneModel,
    tracks: &TrackStore,
    range: RenderRange,
    engine: &mut dyn RenderEngine,
    settings: &RenderSettings,
    layout: &FrameLayout,
) -> RevealResult<RenderStats> {
    settings.validate()?;
    layout.ensure_dir()?;

    let started = Instant::now();
    let total = range.len_frames();
    let mut stats = RenderStats::default();

    for frame in range.frames() {
        render_frame_to(scene, tracks, frame, engine, settings, layout).inspect_err(|e| {
            tracing::error!(frame = frame.0, error = %e, "frame render failed");
        })?;
        stats.frames_rendered += 1;
        tracing::info!(
            frame = frame.0,
            done = stats.frames_rendered,
            total,
            "rendered frame"
        );
    }

    stats.elapsed = started.elapsed();
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/sampler.rs"]
mod tests;
