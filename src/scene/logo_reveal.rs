//! The hand-authored "Im Back" logo reveal: a dolly along a dark road that swings round to a
//! smirking head, a glowing title and a hologram of the logo.

use std::path::Path;

use crate::{
    animation::track::TrackStore,
    animation::value::{ParamPath, Target},
    foundation::core::{Rgba, Vec3},
    foundation::error::RevealResult,
    scene::material::{BlendMode, Material},
    scene::mesh::{DisplacementRule, Mesh},
    scene::model::{
        Camera, ImagePlane, Light, LightType, ObjectKind, SceneModel, Text, TextAlign, Transform,
    },
};

/// Road plane name.
pub const ROAD: &str = "Road";
/// Camera name.
pub const CAMERA: &str = "Camera";
/// Head mesh name.
pub const HEAD: &str = "MainMonkey";
/// Title text name.
pub const TITLE: &str = "ImBackText";
/// Hologram plane name.
pub const HOLOGRAM: &str = "CoveX_Hologram";
/// Smirk shape channel.
pub const SMIRK: &str = "Smirk_Left";
/// Head tilt shape channel.
pub const TILT: &str = "Head_Tilt";

fn deg(d: f64) -> f64 {
    d.to_radians()
}

/// Build the scene and its keyframes. `logo` is the image shown on the hologram.
#[tracing::instrument(skip_all, fields(logo = %logo.display()))]
pub fn build_logo_reveal(logo: &Path) -> RevealResult<(SceneModel, TrackStore)> {
    let mut scene = SceneModel::new();
    let mut tracks = TrackStore::new();

    let road_mat = scene
        .add_material(Material::surface("RoadMat", Rgba::rgb(0.12, 0.12, 0.12)).with_roughness(0.9));
    scene.add_object(
        ROAD,
        ObjectKind::Mesh(Mesh::plane(2.0)),
        Transform::at(Vec3::new(0.0, 0.0, -0.01)).scaled(Vec3::new(30.0, 3.0, 1.0)),
        Some(road_mat),
    )?;

    // Dolly down the road, swing right, settle on the head.
    let camera = scene.add_object(
        CAMERA,
        ObjectKind::Camera(Camera::default()),
        Transform::at(Vec3::new(0.0, -10.0, 1.5)).rotated(Vec3::new(deg(90.0), 0.0, 0.0)),
        None,
    )?;
    scene.set_active_camera(camera)?;
    let cam = Target::Object(camera);
    for (frame, location, yaw) in [
        (1, Vec3::new(0.0, -10.0, 1.5), 0.0),
        (30, Vec3::new(0.0, 0.0, 1.5), -30.0),
        (60, Vec3::new(7.0, 0.0, 1.5), -90.0),
        (70, Vec3::new(7.0, 0.0, 1.5), -90.0),
    ] {
        tracks.set_keyframe(&scene, cam, ParamPath::Location, frame, location)?;
        tracks.set_keyframe(
            &scene,
            cam,
            ParamPath::Rotation,
            frame,
            Vec3::new(deg(90.0), 0.0, deg(yaw)),
        )?;
    }

    let head_mat = scene.add_material(Material::surface("MonkeyMat", Rgba::rgb(0.3, 0.3, 0.3)));
    let head = scene.add_object(
        HEAD,
        ObjectKind::Mesh(Mesh::head(0.8)),
        Transform::at(Vec3::new(7.5, 0.0, 0.4)),
        Some(head_mat),
    )?;
    scene.attach_shape_channel(head, SMIRK, DisplacementRule::smirk_left())?;
    scene.attach_shape_channel(head, TILT, DisplacementRule::head_tilt())?;
    for channel in [SMIRK, TILT] {
        let path = ParamPath::ShapeWeight(channel.to_string());
        for (frame, weight) in [(60, 0.0), (65, 1.0), (70, 1.0)] {
            tracks.set_keyframe(&scene, Target::Object(head), path.clone(), frame, weight)?;
        }
    }

    let title_mat = scene.add_material(
        Material::surface("TextMat", Rgba::WHITE)
            .with_roughness(0.1)
            .with_metallic(0.9)
            .with_emission(Rgba::rgb(0.0, 0.8, 1.0), 2.0, 0.3),
    );
    scene.add_object(
        TITLE,
        ObjectKind::Text(Text {
            body: "Im Back".to_string(),
            size: 1.5,
            align: TextAlign::Left,
            extrude: 0.05,
        }),
        Transform::at(Vec3::new(9.0, 0.0, 0.5)),
        Some(title_mat),
    )?;

    let holo_mat = scene.add_material(
        Material::textured_emission("HologramMat", logo, 5.0).with_blend(BlendMode::AlphaBlend),
    );
    scene.add_object(
        HOLOGRAM,
        ObjectKind::ImagePlane(ImagePlane {
            size: 1.0,
            image: logo.to_path_buf(),
        }),
        Transform::at(Vec3::new(10.5, 0.0, 0.5)),
        Some(holo_mat),
    )?;
    // Pulse: dim, flare, dim.
    for (frame, strength) in [(60, 3.0), (65, 5.0), (70, 3.0)] {
        tracks.set_keyframe(
            &scene,
            Target::Material(holo_mat),
            ParamPath::EmissionStrength,
            frame,
            strength,
        )?;
    }

    for (name, light_type, energy, transform) in [
        (
            "Sun",
            LightType::Sun,
            1.5,
            Transform::at(Vec3::new(0.0, 0.0, 10.0)),
        ),
        (
            "RimLight",
            LightType::Area,
            300.0,
            Transform::at(Vec3::new(-5.0, 0.0, 2.0)).rotated(Vec3::new(0.0, deg(90.0), 0.0)),
        ),
        (
            "FillLight",
            LightType::Area,
            200.0,
            Transform::at(Vec3::new(5.0, 0.0, 2.0)),
        ),
    ] {
        scene.add_object(
            name,
            ObjectKind::Light(Light { light_type, energy }),
            transform,
            None,
        )?;
    }

    tracing::debug!(
        objects = scene.objects().len(),
        tracks = tracks.len(),
        "logo reveal scene built"
    );
    Ok((scene, tracks))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/logo_reveal.rs"]
mod tests;
