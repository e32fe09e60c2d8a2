use super::*;

#[test]
fn default_settings_match_the_reveal_look() {
    let s = RenderSettings::default();
    assert_eq!(s.resolution, Resolution { width: 1920, height: 1080 });
    assert_eq!(s.samples, 16);
    assert_eq!(
        s.bloom,
        Some(Bloom {
            threshold: 0.8,
            intensity: 0.6
        })
    );
    assert!(s.screen_space_reflections && s.ambient_occlusion && s.soft_shadows);
    s.validate().unwrap();
}

#[test]
fn odd_or_empty_resolution_is_rejected() {
    let odd = RenderSettings {
        resolution: Resolution { width: 1921, height: 1080 },
        ..RenderSettings::default()
    };
    assert!(odd.validate().is_err());
    let empty = RenderSettings {
        resolution: Resolution { width: 0, height: 1080 },
        ..RenderSettings::default()
    };
    assert!(empty.validate().is_err());
    let no_samples = RenderSettings {
        samples: 0,
        ..RenderSettings::default()
    };
    assert!(no_samples.validate().is_err());
}

#[test]
fn factory_builds_each_kind() {
    let preview = create_engine(&EngineConfig::default()).unwrap();
    assert_eq!(preview.name(), "preview");

    let process = create_engine(&EngineConfig {
        kind: EngineKind::Process,
        command: vec!["blender".into(), "--frame".into(), "{frame}".into()],
    })
    .unwrap();
    assert_eq!(process.name(), "process");

    let err = create_engine(&EngineConfig {
        kind: EngineKind::Process,
        command: Vec::new(),
    })
    .err()
    .unwrap();
    assert!(matches!(err, RevealError::Validation(_)));
}

#[test]
fn engine_kind_uses_snake_case_in_json() {
    let cfg: EngineConfig =
        serde_json::from_str(r#"{"kind":"process","command":["r","{output}"]}"#).unwrap();
    assert_eq!(cfg.kind, EngineKind::Process);
    assert_eq!(serde_json::to_string(&EngineKind::Preview).unwrap(), "\"preview\"");
}
