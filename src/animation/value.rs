use crate::foundation::core::Vec3;
use crate::scene::model::{MaterialId, ObjectId};

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
            <f64 as Lerp>::lerp(&a.z, &b.z, t),
        )
    }
}

/// Shape of an animatable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ValueKind {
    /// Single `f64`.
    Scalar,
    /// Three `f64` components.
    Vec3,
}

/// Value stored in a keyframe sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// Scalar value.
    Scalar(f64),
    /// Vector value, interpolated component-wise.
    Vec3(Vec3),
}

impl Value {
    /// Kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Vec3(_) => ValueKind::Vec3,
        }
    }

    /// Return the scalar payload, if any.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Vec3(_) => None,
        }
    }

    /// Return the vector payload, if any.
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            Self::Scalar(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl Lerp for Value {
    // Mixed kinds cannot occur inside one track; hold `a` if they ever do.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(<f64 as Lerp>::lerp(a, b, t)),
            (Self::Vec3(a), Self::Vec3(b)) => Self::Vec3(<Vec3 as Lerp>::lerp(a, b, t)),
            _ => *a,
        }
    }
}

/// Entity an animated parameter belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Target {
    /// A scene object.
    Object(ObjectId),
    /// A shared material.
    Material(MaterialId),
}

/// Path of an animatable parameter on a [`Target`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum ParamPath {
    /// Object location (Vec3).
    Location,
    /// Object XYZ Euler rotation in radians (Vec3).
    Rotation,
    /// Object scale (Vec3).
    Scale,
    /// Weight of a named shape channel on a mesh (Scalar in `[0, 1]`).
    ShapeWeight(String),
    /// Light energy (Scalar).
    LightEnergy,
    /// Material emission strength (Scalar).
    EmissionStrength,
    /// Material surface/emission mix factor (Scalar).
    EmissionMix,
    /// Material roughness (Scalar).
    Roughness,
    /// Material metallic factor (Scalar).
    Metallic,
}

impl ParamPath {
    /// Value kind the parameter holds.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Location | Self::Rotation | Self::Scale => ValueKind::Vec3,
            Self::ShapeWeight(_)
            | Self::LightEnergy
            | Self::EmissionStrength
            | Self::EmissionMix
            | Self::Roughness
            | Self::Metallic => ValueKind::Scalar,
        }
    }
}

impl std::fmt::Display for ParamPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Location => f.write_str("location"),
            Self::Rotation => f.write_str("rotation_euler"),
            Self::Scale => f.write_str("scale"),
            Self::ShapeWeight(name) => write!(f, "shape_keys[\"{name}\"].value"),
            Self::LightEnergy => f.write_str("energy"),
            Self::EmissionStrength => f.write_str("emission_strength"),
            Self::EmissionMix => f.write_str("emission_mix"),
            Self::Roughness => f.write_str("roughness"),
            Self::Metallic => f.write_str("metallic"),
        }
    }
}
