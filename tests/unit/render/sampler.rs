use std::path::Path;

use super::*;
use crate::render::projection::RenderableScene;
use crate::scene::logo_reveal::build_logo_reveal;

/// Writes the frame number into the output file; fails on `fail_at` if set.
struct StubEngine {
    fail_at: Option<u64>,
    seen: Vec<u64>,
}

impl RenderEngine for StubEngine {
    fn name(&self) -> &str {
        "stub"
    }

    fn render_frame(
        &mut self,
        scene: &RenderableScene,
        _settings: &RenderSettings,
        out_path: &Path,
    ) -> RevealResult<()> {
        self.seen.push(scene.frame.0);
        if self.fail_at == Some(scene.frame.0) {
            return Err(RevealError::render_engine(scene.frame.0, "stub failure"));
        }
        std::fs::write(out_path, scene.frame.0.to_string()).unwrap();
        Ok(())
    }
}

/// Claims success without writing anything.
struct LazyEngine;

impl RenderEngine for LazyEngine {
    fn name(&self) -> &str {
        "lazy"
    }

    fn render_frame(&mut self, _: &RenderableScene, _: &RenderSettings, _: &Path) -> RevealResult<()> {
        Ok(())
    }
}

fn setup() -> (SceneModel, TrackStore, RenderRange) {
    let (scene, tracks) = build_logo_reveal(Path::new("logo.png")).unwrap();
    let range = RenderRange::new(1, 70, Default::default()).unwrap();
    (scene, tracks, range)
}

#[test]
fn renders_every_frame_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 150);
    let (scene, tracks, range) = setup();
    let mut engine = StubEngine {
        fail_at: None,
        seen: Vec::new(),
    };

    let stats = render_range(
        &scene,
        &tracks,
        range,
        &mut engine,
        &RenderSettings::default(),
        &layout,
    )
    .unwrap();

    assert_eq!(stats.frames_rendered, 70);
    assert_eq!(engine.seen, (1..=70).collect::<Vec<_>>());
    layout.verify_contiguous(70).unwrap();
}

#[test]
fn stops_at_first_failing_frame() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 150);
    let (scene, tracks, range) = setup();
    let mut engine = StubEngine {
        fail_at: Some(40),
        seen: Vec::new(),
    };

    let err = render_range(
        &scene,
        &tracks,
        range,
        &mut engine,
        &RenderSettings::default(),
        &layout,
    )
    .unwrap_err();

    assert!(matches!(err, RevealError::RenderEngine { frame: 40, .. }));
    assert_eq!(engine.seen.last(), Some(&40));
    assert!(layout.missing_frames(39).is_empty());
    assert!(!layout.path_for(FrameIndex(40)).exists());
    assert!(!layout.path_for(FrameIndex(41)).exists());
}

#[test]
fn missing_output_file_counts_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 150);
    let (scene, tracks, _) = setup();

    let err = render_frame_to(
        &scene,
        &tracks,
        FrameIndex(3),
        &mut LazyEngine,
        &RenderSettings::default(),
        &layout,
    )
    .unwrap_err();
    assert!(matches!(err, RevealError::RenderEngine { frame: 3, .. }));
}

#[test]
fn frame_from_an_earlier_run_does_not_satisfy_the_output_check() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 150);
    layout.ensure_dir().unwrap();
    let stale = layout.path_for(FrameIndex(5));
    std::fs::write(&stale, "old").unwrap();
    let (scene, tracks, _) = setup();

    let err = render_frame_to(
        &scene,
        &tracks,
        FrameIndex(5),
        &mut LazyEngine,
        &RenderSettings::default(),
        &layout,
    )
    .unwrap_err();
    assert!(matches!(err, RevealError::RenderEngine { frame: 5, .. }));
    assert!(!stale.exists());
}

#[test]
fn rerender_overwrites_an_existing_frame() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path(), 150);
    layout.ensure_dir().unwrap();
    std::fs::write(layout.path_for(FrameIndex(8)), "old").unwrap();
    let (scene, tracks, _) = setup();
    let mut engine = StubEngine {
        fail_at: None,
        seen: Vec::new(),
    };

    render_frame_to(
        &scene,
        &tracks,
        FrameIndex(8),
        &mut engine,
        &RenderSettings::default(),
        &layout,
    )
    .unwrap();
    assert_eq!(std::fs::read_to_string(layout.path_for(FrameIndex(8))).unwrap(), "8");
}
