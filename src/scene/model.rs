use std::path::PathBuf;

use crate::{
    animation::value::{ParamPath, Target, Value},
    foundation::core::Vec3,
    foundation::error::{RevealError, RevealResult},
    scene::material::Material,
    scene::mesh::{DisplacementRule, Mesh},
};

/// Handle to an object owned by a [`SceneModel`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObjectId(pub(crate) u32);

/// Handle to a material owned by a [`SceneModel`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MaterialId(pub(crate) u32);

/// Handle to a shape channel on a mesh object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId {
    /// Owning mesh object.
    pub object: ObjectId,
    /// Channel position on the mesh.
    pub index: u32,
}

/// Location, XYZ Euler rotation (radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Translation.
    pub location: Vec3,
    /// XYZ Euler rotation in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity rotation and scale at `location`.
    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// Set the rotation.
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale.
    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Pinhole camera.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    /// Focal length in millimetres.
    pub focal_length_mm: f64,
    /// Sensor width in millimetres.
    pub sensor_width_mm: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            focal_length_mm: 50.0,
            sensor_width_mm: 36.0,
        }
    }
}

/// Light source type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LightType {
    /// Directional light.
    Sun,
    /// Rectangular area light.
    Area,
    /// Omnidirectional point light.
    Point,
}

/// Light source.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Light {
    /// Light type.
    pub light_type: LightType,
    /// Energy (W, or irradiance for suns).
    pub energy: f64,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAlign {
    /// Anchor at the left edge.
    #[default]
    Left,
    /// Anchor at the center.
    Center,
    /// Anchor at the right edge.
    Right,
}

/// Extruded 3D text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Text {
    /// Text content.
    pub body: String,
    /// Glyph size in scene units.
    pub size: f64,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Extrusion depth.
    pub extrude: f64,
}

/// Plane displaying an image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImagePlane {
    /// Edge length.
    pub size: f64,
    /// Displayed image.
    pub image: PathBuf,
}

/// Object payload by kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ObjectKind {
    /// Polygon mesh.
    Mesh(Mesh),
    /// Camera.
    Camera(Camera),
    /// Light source.
    Light(Light),
    /// Extruded text.
    Text(Text),
    /// Image plane.
    ImagePlane(ImagePlane),
}

impl ObjectKind {
    /// Short kind label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mesh(_) => "mesh",
            Self::Camera(_) => "camera",
            Self::Light(_) => "light",
            Self::Text(_) => "text",
            Self::ImagePlane(_) => "image-plane",
        }
    }
}

/// Object in the scene graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneObject {
    /// Handle of this object.
    pub id: ObjectId,
    /// Unique name.
    pub name: String,
    /// Kind-specific payload.
    pub kind: ObjectKind,
    /// Object transform.
    pub transform: Transform,
    /// Assigned material.
    pub material: Option<MaterialId>,
}

impl SceneObject {
    pub(crate) fn param(&self, path: &ParamPath) -> Option<Value> {
        match (path, &self.kind) {
            (ParamPath::Location, _) => Some(Value::Vec3(self.transform.location)),
            (ParamPath::Rotation, _) => Some(Value::Vec3(self.transform.rotation)),
            (ParamPath::Scale, _) => Some(Value::Vec3(self.transform.scale)),
            (ParamPath::ShapeWeight(name), ObjectKind::Mesh(mesh)) => {
                mesh.channel(name).map(|c| Value::Scalar(c.weight))
            }
            (ParamPath::LightEnergy, ObjectKind::Light(light)) => Some(Value::Scalar(light.energy)),
            _ => None,
        }
    }

    pub(crate) fn set_param(&mut self, path: &ParamPath, value: Value) -> bool {
        match (path, value, &mut self.kind) {
            (ParamPath::Location, Value::Vec3(v), _) => self.transform.location = v,
            (ParamPath::Rotation, Value::Vec3(v), _) => self.transform.rotation = v,
            (ParamPath::Scale, Value::Vec3(v), _) => self.transform.scale = v,
            (ParamPath::ShapeWeight(name), Value::Scalar(w), ObjectKind::Mesh(mesh)) => {
                match mesh.channel_mut(name) {
                    Some(ch) => ch.weight = w.clamp(0.0, 1.0),
                    None => return false,
                }
            }
            (ParamPath::LightEnergy, Value::Scalar(e), ObjectKind::Light(light)) => {
                light.energy = e
            }
            _ => return false,
        }
        true
    }
}

/// Fixed cast of objects and materials, built once before animation is applied.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneModel {
    objects: Vec<SceneObject>,
    materials: Vec<Material>,
    active_camera: Option<ObjectId>,
}

impl SceneModel {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId((self.materials.len() - 1) as u32)
    }

    /// Add an object. Names must be unique.
    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        kind: ObjectKind,
        transform: Transform,
        material: Option<MaterialId>,
    ) -> RevealResult<ObjectId> {
        let name = name.into();
        if self.object_by_name(&name).is_some() {
            return Err(RevealError::validation(format!(
                "object name '{name}' is already taken"
            )));
        }
        if let Some(m) = material {
            self.material(m)?;
        }

        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(SceneObject {
            id,
            name,
            kind,
            transform,
            material,
        });
        Ok(id)
    }

    /// Bake a shape channel on a mesh from `rule` evaluated against its rest pose.
    pub fn attach_shape_channel(
        &mut self,
        mesh: ObjectId,
        name: impl Into<String>,
        rule: DisplacementRule,
    ) -> RevealResult<ChannelId> {
        let name = name.into();
        let obj = self.object_mut(mesh)?;
        let ObjectKind::Mesh(m) = &mut obj.kind else {
            return Err(RevealError::validation(format!(
                "shape channel '{name}' needs a mesh, '{}' is a {}",
                obj.name,
                obj.kind.label()
            )));
        };
        if m.channel(&name).is_some() {
            return Err(RevealError::validation(format!(
                "mesh '{}' already has a shape channel named '{name}'",
                obj.name
            )));
        }

        let index = m.bake_channel(name, &rule);
        Ok(ChannelId {
            object: mesh,
            index: index as u32,
        })
    }

    /// Assign `material` to `object`.
    pub fn set_material(&mut self, object: ObjectId, material: MaterialId) -> RevealResult<()> {
        self.material(material)?;
        self.object_mut(object)?.material = Some(material);
        Ok(())
    }

    /// Select the camera the scene is rendered through.
    pub fn set_active_camera(&mut self, camera: ObjectId) -> RevealResult<()> {
        let obj = self.object(camera)?;
        if !matches!(obj.kind, ObjectKind::Camera(_)) {
            return Err(RevealError::validation(format!(
                "'{}' is a {}, not a camera",
                obj.name,
                obj.kind.label()
            )));
        }
        self.active_camera = Some(camera);
        Ok(())
    }

    /// Camera the scene is rendered through.
    pub fn active_camera(&self) -> Option<ObjectId> {
        self.active_camera
    }

    /// Object by handle.
    pub fn object(&self, id: ObjectId) -> RevealResult<&SceneObject> {
        self.objects
            .get(id.0 as usize)
            .ok_or_else(|| RevealError::validation(format!("unknown object handle {id:?}")))
    }

    fn object_mut(&mut self, id: ObjectId) -> RevealResult<&mut SceneObject> {
        self.objects
            .get_mut(id.0 as usize)
            .ok_or_else(|| RevealError::validation(format!("unknown object handle {id:?}")))
    }

    /// Object by name.
    pub fn object_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Material by handle.
    pub fn material(&self, id: MaterialId) -> RevealResult<&Material> {
        self.materials
            .get(id.0 as usize)
            .ok_or_else(|| RevealError::validation(format!("unknown material handle {id:?}")))
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Materials in insertion order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Static (non-animated) value of `path` on `target`.
    pub fn static_value(&self, target: Target, path: &ParamPath) -> RevealResult<Value> {
        let (found, owner) = match target {
            Target::Object(id) => {
                let obj = self.object(id)?;
                (obj.param(path), obj.name.as_str())
            }
            Target::Material(id) => {
                let mat = self.material(id)?;
                (mat.param(path), mat.name.as_str())
            }
        };
        found.ok_or_else(|| {
            RevealError::evaluation(format!("'{owner}' has no parameter '{path}'"))
        })
    }

    /// Write `value` into the live copy of `target`. Used by projection only.
    pub(crate) fn apply(&mut self, target: Target, path: &ParamPath, value: Value) -> RevealResult<()> {
        let applied = match target {
            Target::Object(id) => self.object_mut(id)?.set_param(path, value),
            Target::Material(id) => self
                .materials
                .get_mut(id.0 as usize)
                .ok_or_else(|| RevealError::validation(format!("unknown material handle {id:?}")))?
                .set_param(path, value),
        };
        if !applied {
            return Err(RevealError::evaluation(format!(
                "cannot write '{path}' on {target:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
