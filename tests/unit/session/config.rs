use super::*;

#[test]
fn defaults_describe_the_five_second_clip() {
    let cfg = PipelineConfig::default();
    cfg.validate().unwrap();

    let range = cfg.render_range().unwrap();
    assert_eq!(range.len_frames(), 70);
    let clip = cfg.clip_spec().unwrap();
    assert_eq!(clip.target_total_frames, 150);
    assert_eq!(clip.padding_frames(range), 80);
    assert_eq!(cfg.video_path(), Path::new("imback_output").join("imback.mp4"));
    assert_eq!(cfg.render.resolution.width, 1920);
    assert_eq!(cfg.encode.encoder.crf, 18);
    assert!(cfg.encode.enabled);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg = PipelineConfig::from_reader(
        br#"{
            "output_dir": "out",
            "total_frames": 90,
            "render": { "resolution": { "width": 640, "height": 360 } },
            "encode": { "enabled": false, "crf": 23 }
        }"#
        .as_slice(),
    )
    .unwrap();

    assert_eq!(cfg.output_dir, PathBuf::from("out"));
    assert_eq!(cfg.total_frames, 90);
    assert_eq!(cfg.render_end, 70);
    assert_eq!(cfg.render.resolution.width, 640);
    assert_eq!(cfg.render.samples, 16);
    assert!(!cfg.encode.enabled);
    assert_eq!(cfg.encode.encoder.crf, 23);
    assert_eq!(cfg.encode.encoder.preset, "fast");
    cfg.validate().unwrap();
}

#[test]
fn validation_rejects_inconsistent_ranges() {
    let short = PipelineConfig {
        total_frames: 60,
        ..PipelineConfig::default()
    };
    assert!(matches!(short.validate(), Err(RevealError::Validation(_))));

    let reversed = PipelineConfig {
        render_start: 10,
        render_end: 5,
        ..PipelineConfig::default()
    };
    assert!(reversed.validate().is_err());

    let offset = PipelineConfig {
        render_start: 2,
        ..PipelineConfig::default()
    };
    assert!(offset.validate().is_err());

    let no_fps = PipelineConfig {
        fps: 0,
        ..PipelineConfig::default()
    };
    assert!(no_fps.validate().is_err());
}

#[test]
fn process_engine_needs_a_command() {
    let mut cfg = PipelineConfig::default();
    cfg.engine.kind = EngineKind::Process;
    assert!(cfg.validate().is_err());
    cfg.engine.command = vec!["renderer".into(), "{output}".into()];
    cfg.validate().unwrap();
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PipelineConfig::from_reader(b"{ not json".as_slice()).unwrap_err();
    assert!(matches!(err, RevealError::Serde(_)));
    assert!(matches!(
        PipelineConfig::from_path("/nonexistent/reveal.json"),
        Err(RevealError::Validation(_))
    ));
}
