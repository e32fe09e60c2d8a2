use std::collections::BTreeMap;

use crate::{
    animation::track::TrackStore,
    foundation::core::{FrameIndex, Vec3},
    foundation::error::RevealResult,
    scene::material::Material,
    scene::mesh::MeshPrimitive,
    scene::model::{Camera, ImagePlane, Light, ObjectKind, SceneModel, SceneObject, Text, Transform},
};

/// Self-contained snapshot of the scene at one frame, handed to a render engine.
///
/// Built fresh for every frame; nothing carries over between frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderableScene {
    /// Frame this snapshot was projected for.
    pub frame: FrameIndex,
    /// Index of the active camera in `objects`.
    pub camera: Option<usize>,
    /// Objects with every animated parameter resolved.
    pub objects: Vec<RenderObject>,
    /// Materials with every animated parameter resolved.
    pub materials: Vec<Material>,
}

/// Resolved object.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderObject {
    /// Object name.
    pub name: String,
    /// Resolved payload.
    pub kind: RenderKind,
    /// Resolved transform.
    pub transform: Transform,
    /// Index into [`RenderableScene::materials`].
    pub material: Option<usize>,
}

/// Resolved object payload. Meshes carry their deformed vertices.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RenderKind {
    /// Mesh after shape channels are blended.
    Mesh {
        /// Source primitive.
        primitive: MeshPrimitive,
        /// Object-space vertices after deformation.
        vertices: Vec<Vec3>,
        /// Shape channel weights used for `vertices`.
        shape_weights: BTreeMap<String, f64>,
    },
    /// Camera.
    Camera(Camera),
    /// Light.
    Light(Light),
    /// Text.
    Text(Text),
    /// Image plane.
    ImagePlane(ImagePlane),
}

impl RenderableScene {
    /// Active camera object, if the scene has one.
    pub fn camera(&self) -> Option<&RenderObject> {
        self.camera.and_then(|i| self.objects.get(i))
    }

    /// Object by name.
    pub fn object(&self, name: &str) -> Option<&RenderObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Material of `obj`, if assigned.
    pub fn material_of(&self, obj: &RenderObject) -> Option<&Material> {
        obj.material.and_then(|i| self.materials.get(i))
    }

    fn from_live(live: &SceneModel, frame: FrameIndex) -> Self {
        let objects = live.objects().iter().map(RenderObject::from_live).collect();
        let camera = live.active_camera().map(|id| id.0 as usize);
        Self {
            frame,
            camera,
            objects,
            materials: live.materials().to_vec(),
        }
    }
}

impl RenderObject {
    fn from_live(obj: &SceneObject) -> Self {
        let kind = match &obj.kind {
            ObjectKind::Mesh(mesh) => RenderKind::Mesh {
                primitive: mesh.primitive,
                vertices: mesh.deformed_vertices(),
                shape_weights: mesh
                    .channels
                    .iter()
                    .map(|c| (c.name.clone(), c.weight))
                    .collect(),
            },
            ObjectKind::Camera(c) => RenderKind::Camera(*c),
            ObjectKind::Light(l) => RenderKind::Light(*l),
            ObjectKind::Text(t) => RenderKind::Text(t.clone()),
            ObjectKind::ImagePlane(p) => RenderKind::ImagePlane(p.clone()),
        };
        Self {
            name: obj.name.clone(),
            kind,
            transform: obj.transform,
            material: obj.material.map(|m| m.0 as usize),
        }
    }
}

/// Evaluate every track at `frame` and write the values into a fresh copy of `scene`.
pub fn project(
    scene: &SceneModel,
    tracks: &TrackStore,
    frame: FrameIndex,
) -> RevealResult<RenderableScene> {
    let mut live = scene.clone();
    for track in tracks.tracks() {
        let value = tracks.evaluate(scene, track.target(), track.path(), frame)?;
        live.apply(track.target(), track.path(), value)?;
    }
    Ok(RenderableScene::from_live(&live, frame))
}

#[cfg(test)]
#[path = "../../tests/unit/render/projection.rs"]
mod tests;
