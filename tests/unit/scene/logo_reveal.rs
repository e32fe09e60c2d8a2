use super::*;
use crate::animation::value::Value;
use crate::foundation::core::FrameIndex;

fn build() -> (SceneModel, TrackStore) {
    build_logo_reveal(Path::new("logo.jpg")).unwrap()
}

#[test]
fn cast_is_complete() {
    let (scene, tracks) = build();
    for name in [ROAD, CAMERA, HEAD, TITLE, HOLOGRAM, "Sun", "RimLight", "FillLight"] {
        assert!(scene.object_by_name(name).is_some(), "missing {name}");
    }
    assert_eq!(scene.objects().len(), 8);
    assert_eq!(scene.materials().len(), 4);
    assert_eq!(tracks.len(), 5);
    assert_eq!(tracks.last_keyed_frame(), Some(FrameIndex(70)));

    let cam = scene.object_by_name(CAMERA).unwrap();
    assert_eq!(scene.active_camera(), Some(cam.id));
}

#[test]
fn camera_swings_round_to_the_head() {
    let (scene, tracks) = build();
    let cam = Target::Object(scene.object_by_name(CAMERA).unwrap().id);

    let at = |f: u64, p: &ParamPath| {
        tracks
            .evaluate(&scene, cam, p, FrameIndex(f))
            .unwrap()
            .as_vec3()
            .unwrap()
    };
    assert_eq!(at(1, &ParamPath::Location), Vec3::new(0.0, -10.0, 1.5));
    assert_eq!(at(30, &ParamPath::Location), Vec3::new(0.0, 0.0, 1.5));
    assert_eq!(at(45, &ParamPath::Location), Vec3::new(3.5, 0.0, 1.5));
    assert_eq!(at(70, &ParamPath::Location), Vec3::new(7.0, 0.0, 1.5));
    assert!((at(60, &ParamPath::Rotation).z - deg(-90.0)).abs() < 1e-12);
}

#[test]
fn smirk_and_hologram_pulse_timing() {
    let (scene, tracks) = build();
    let head = Target::Object(scene.object_by_name(HEAD).unwrap().id);
    let smirk = ParamPath::ShapeWeight(SMIRK.to_string());
    let w = |f: u64| tracks.evaluate(&scene, head, &smirk, FrameIndex(f)).unwrap();
    assert_eq!(w(1), Value::Scalar(0.0));
    assert_eq!(w(60), Value::Scalar(0.0));
    assert_eq!(w(65), Value::Scalar(1.0));
    assert_eq!(w(70), Value::Scalar(1.0));

    let holo = scene.object_by_name(HOLOGRAM).unwrap();
    let mat = Target::Material(holo.material.unwrap());
    let s = |f: u64| {
        tracks
            .evaluate(&scene, mat, &ParamPath::EmissionStrength, FrameIndex(f))
            .unwrap()
    };
    assert_eq!(s(10), Value::Scalar(3.0));
    assert_eq!(s(65), Value::Scalar(5.0));
    assert_eq!(s(70), Value::Scalar(3.0));
}

#[test]
fn hologram_uses_the_logo_texture() {
    let (scene, _) = build();
    let holo = scene.object_by_name(HOLOGRAM).unwrap();
    let mat = scene.material(holo.material.unwrap()).unwrap();
    assert_eq!(mat.blend, BlendMode::AlphaBlend);
    assert_eq!(mat.texture.as_deref(), Some(Path::new("logo.jpg")));
}
