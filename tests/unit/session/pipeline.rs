use std::path::Path;

use super::*;
use crate::render::engine::RenderSettings;
use crate::render::projection::RenderableScene;
use crate::sequence::layout::FrameLayout;

struct StubEngine {
    fail_at: Option<u64>,
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
        if self.fail_at == Some(scene.frame.0) {
            return Err(RevealError::render_engine(scene.frame.0, "stub failure"));
        }
        std::fs::write(out_path, format!("frame {}", scene.frame.0)).unwrap();
        Ok(())
    }
}

fn config_in(dir: &Path) -> PipelineConfig {
    let logo = dir.join("logo.jpg");
    std::fs::write(&logo, b"logo").unwrap();
    let mut cfg = PipelineConfig {
        logo_path: logo,
        output_dir: dir.join("out"),
        ..PipelineConfig::default()
    };
    cfg.encode.enabled = false;
    cfg
}

#[test]
fn full_run_pads_to_total_and_skips_disabled_encode() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(config_in(dir.path())).unwrap();

    let report = pipeline.run(&mut StubEngine { fail_at: None }).unwrap();

    assert_eq!(report.frames_rendered, 70);
    assert_eq!(report.frames_total, 150);
    assert_eq!(report.encode, EncodeOutcome::Skipped);
    let layout = FrameLayout::new(&report.frame_dir, 150);
    layout.verify_contiguous(150).unwrap();
    assert_eq!(
        std::fs::read(layout.path_for(FrameIndex(150))).unwrap(),
        b"frame 70"
    );
}

#[cfg(unix)]
#[test]
fn encoder_failure_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config_in(dir.path());
    cfg.encode.enabled = true;
    cfg.encode.encoder.program = PathBuf::from("false");
    let pipeline = Pipeline::new(cfg).unwrap();

    let report = pipeline.run(&mut StubEngine { fail_at: None }).unwrap();

    match &report.encode {
        EncodeOutcome::Failed { frame_dir, .. } => assert_eq!(frame_dir, &report.frame_dir),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(
        FrameLayout::new(&report.frame_dir, 150)
            .missing_frames(150)
            .is_empty()
    );
}

#[test]
fn missing_logo_aborts_before_creating_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config_in(dir.path());
    cfg.logo_path = dir.path().join("absent.jpg");
    let pipeline = Pipeline::new(cfg).unwrap();

    let err = pipeline.run(&mut StubEngine { fail_at: None }).unwrap_err();

    assert!(matches!(err, RevealError::MissingAsset { .. }));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn render_failure_stops_before_extension() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(config_in(dir.path())).unwrap();

    let err = pipeline
        .run(&mut StubEngine { fail_at: Some(40) })
        .unwrap_err();

    assert!(matches!(err, RevealError::RenderEngine { frame: 40, .. }));
    let layout = pipeline.config().frame_layout();
    assert!(layout.missing_frames(39).is_empty());
    assert_eq!(layout.missing_frames(150).len(), 111);
}

#[test]
fn stale_frames_from_longer_runs_are_pruned() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let layout = cfg.frame_layout();
    layout.ensure_dir().unwrap();
    std::fs::write(layout.path_for(FrameIndex(151)), b"old").unwrap();
    std::fs::write(layout.path_for(FrameIndex(300)), b"old").unwrap();

    let report = Pipeline::new(cfg)
        .unwrap()
        .run(&mut StubEngine { fail_at: None })
        .unwrap();

    assert!(!layout.path_for(FrameIndex(151)).exists());
    assert!(!layout.path_for(FrameIndex(300)).exists());
    assert_eq!(report.frames_total, 150);
}

#[test]
fn single_frame_render_writes_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(config_in(dir.path())).unwrap();

    let path = pipeline
        .render_single(FrameIndex(65), &mut StubEngine { fail_at: None })
        .unwrap();
    assert_eq!(path, pipeline.config().frame_layout().path_for(FrameIndex(65)));
    assert!(path.is_file());

    assert!(
        pipeline
            .render_single(FrameIndex(151), &mut StubEngine { fail_at: None })
            .is_err()
    );
}
