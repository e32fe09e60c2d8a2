use std::path::PathBuf;

use crate::animation::value::{ParamPath, Value};
use crate::foundation::core::Rgba;

/// How a material composites with what is behind it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BlendMode {
    /// Fully covers what is behind.
    #[default]
    Opaque,
    /// Alpha-blended over what is behind.
    AlphaBlend,
}

/// Principled surface with an optional emission layer.
///
/// `emission_mix` blends the surface (0.0) with pure emission (1.0). Emission color is replaced by
/// the texture sample when `texture` is set.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Material {
    /// Display name.
    pub name: String,
    /// Surface base color.
    pub base_color: Rgba,
    /// Surface roughness in `[0, 1]`.
    pub roughness: f64,
    /// Metallic factor in `[0, 1]`.
    pub metallic: f64,
    /// Emitted color.
    pub emission_color: Rgba,
    /// Emission strength multiplier.
    pub emission_strength: f64,
    /// Surface/emission mix factor.
    pub emission_mix: f64,
    /// Blend mode.
    pub blend: BlendMode,
    /// Image sampled for the emission color.
    pub texture: Option<PathBuf>,
}

impl Material {
    /// Plain non-emissive surface.
    pub fn surface(name: impl Into<String>, base_color: Rgba) -> Self {
        Self {
            name: name.into(),
            base_color,
            roughness: 0.5,
            metallic: 0.0,
            emission_color: Rgba::BLACK,
            emission_strength: 0.0,
            emission_mix: 0.0,
            blend: BlendMode::Opaque,
            texture: None,
        }
    }

    /// Pure emission shader driven by an image texture.
    pub fn textured_emission(
        name: impl Into<String>,
        texture: impl Into<PathBuf>,
        strength: f64,
    ) -> Self {
        Self {
            emission_color: Rgba::WHITE,
            emission_strength: strength,
            emission_mix: 1.0,
            texture: Some(texture.into()),
            ..Self::surface(name, Rgba::BLACK)
        }
    }

    /// Set roughness.
    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness;
        self
    }

    /// Set metallic factor.
    pub fn with_metallic(mut self, metallic: f64) -> Self {
        self.metallic = metallic;
        self
    }

    /// Add an emission layer mixed over the surface by `mix`.
    pub fn with_emission(mut self, color: Rgba, strength: f64, mix: f64) -> Self {
        self.emission_color = color;
        self.emission_strength = strength;
        self.emission_mix = mix;
        self
    }

    /// Set the blend mode.
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub(crate) fn param(&self, path: &ParamPath) -> Option<Value> {
        let v = match path {
            ParamPath::EmissionStrength => self.emission_strength,
            ParamPath::EmissionMix => self.emission_mix,
            ParamPath::Roughness => self.roughness,
            ParamPath::Metallic => self.metallic,
            _ => return None,
        };
        Some(Value::Scalar(v))
    }

    pub(crate) fn set_param(&mut self, path: &ParamPath, value: Value) -> bool {
        let Some(v) = value.as_scalar() else {
            return false;
        };
        let slot = match path {
            ParamPath::EmissionStrength => &mut self.emission_strength,
            ParamPath::EmissionMix => &mut self.emission_mix,
            ParamPath::Roughness => &mut self.roughness,
            ParamPath::Metallic => &mut self.metallic,
            _ => return false,
        };
        *slot = v;
        true
    }
}
