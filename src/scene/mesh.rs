use std::f64::consts::{PI, TAU};

use crate::foundation::core::Vec3;

/// Primitive a mesh was generated from. Renderers use it to rebuild faces.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MeshPrimitive {
    /// Square in the XY plane, centered at the origin.
    Plane {
        /// Edge length.
        size: f64,
    },
    /// Head-proportioned UV ellipsoid (rings of `segments` vertices plus two poles).
    Head {
        /// Overall size; the widest axis spans `1.367 * size`.
        size: f64,
        /// Vertices per ring.
        segments: u32,
        /// Latitude bands.
        rings: u32,
    },
    /// Vertices supplied directly.
    Custom,
}

/// Displacement derived from rest-pose coordinates: vertices matching `predicate` move by
/// `offset(rest)`.
///
/// Rules are plain functions so they stay pure and are evaluated exactly once per vertex when a
/// channel is attached.
#[derive(Clone, Copy)]
pub struct DisplacementRule {
    predicate: fn(Vec3) -> bool,
    offset: fn(Vec3) -> Vec3,
}

impl DisplacementRule {
    /// Create a rule from a vertex predicate and an offset function.
    pub fn new(predicate: fn(Vec3) -> bool, offset: fn(Vec3) -> Vec3) -> Self {
        Self { predicate, offset }
    }

    /// Lower-left mouth corner raised by 0.02.
    pub fn smirk_left() -> Self {
        Self::new(
            |v| v.x > 0.4 && v.y.abs() < 0.1 && v.z < -0.1,
            |_| Vec3::new(0.0, 0.0, 0.02),
        )
    }

    /// Upper half sheared along +X in proportion to height.
    pub fn head_tilt() -> Self {
        Self::new(|v| v.z > 0.0, |v| Vec3::new(v.z * 0.03, 0.0, 0.0))
    }

    /// Offset for `rest`, or `None` when the vertex is unaffected.
    pub fn displace(&self, rest: Vec3) -> Option<Vec3> {
        (self.predicate)(rest).then(|| (self.offset)(rest))
    }
}

impl std::fmt::Debug for DisplacementRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplacementRule").finish_non_exhaustive()
    }
}

/// Named, weighted per-vertex displacement field. Only displaced vertices are stored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeChannel {
    /// Channel name, unique per mesh.
    pub name: String,
    /// Blend weight in `[0, 1]`.
    pub weight: f64,
    /// `(vertex index, delta)` pairs.
    pub deltas: Vec<(u32, Vec3)>,
}

/// Mesh geometry in rest pose plus its shape channels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    /// Source primitive.
    pub primitive: MeshPrimitive,
    /// Rest-pose vertex positions in object space.
    pub rest: Vec<Vec3>,
    /// Attached channels in attach order.
    pub channels: Vec<ShapeChannel>,
}

impl Mesh {
    /// Mesh from explicit vertices.
    pub fn new(primitive: MeshPrimitive, rest: Vec<Vec3>) -> Self {
        Self {
            primitive,
            rest,
            channels: Vec::new(),
        }
    }

    /// Square plane of edge `size` in the XY plane.
    pub fn plane(size: f64) -> Self {
        let h = size * 0.5;
        Self::new(
            MeshPrimitive::Plane { size },
            vec![
                Vec3::new(-h, -h, 0.0),
                Vec3::new(h, -h, 0.0),
                Vec3::new(-h, h, 0.0),
                Vec3::new(h, h, 0.0),
            ],
        )
    }

    /// Head-shaped ellipsoid; half extents follow the stock monkey head proportions.
    pub fn head(size: f64) -> Self {
        const SEGMENTS: u32 = 16;
        const RINGS: u32 = 12;
        let radii = Vec3::new(0.684, 0.425, 0.49) * size;

        let mut rest = Vec::with_capacity((SEGMENTS * (RINGS - 1) + 2) as usize);
        rest.push(Vec3::new(0.0, 0.0, -radii.z));
        for ring in 1..RINGS {
            let lat = -PI / 2.0 + PI * f64::from(ring) / f64::from(RINGS);
            for seg in 0..SEGMENTS {
                let lon = TAU * f64::from(seg) / f64::from(SEGMENTS);
                rest.push(Vec3::new(
                    radii.x * lat.cos() * lon.cos(),
                    radii.y * lat.cos() * lon.sin(),
                    radii.z * lat.sin(),
                ));
            }
        }
        rest.push(Vec3::new(0.0, 0.0, radii.z));

        Self::new(
            MeshPrimitive::Head {
                size,
                segments: SEGMENTS,
                rings: RINGS,
            },
            rest,
        )
    }

    /// Channel by name.
    pub fn channel(&self, name: &str) -> Option<&ShapeChannel> {
        self.channels.iter().find(|c| c.name == name)
    }

    pub(crate) fn channel_mut(&mut self, name: &str) -> Option<&mut ShapeChannel> {
        self.channels.iter_mut().find(|c| c.name == name)
    }

    /// Evaluate `rule` over the rest pose and cache the resulting field. Returns its index.
    pub(crate) fn bake_channel(&mut self, name: String, rule: &DisplacementRule) -> usize {
        let deltas = self
            .rest
            .iter()
            .enumerate()
            .filter_map(|(i, v)| rule.displace(*v).map(|d| (i as u32, d)))
            .collect();
        self.channels.push(ShapeChannel {
            name,
            weight: 0.0,
            deltas,
        });
        self.channels.len() - 1
    }

    /// Rest pose plus every channel's deltas scaled by its weight.
    pub fn deformed_vertices(&self) -> Vec<Vec3> {
        let mut out = self.rest.clone();
        for ch in &self.channels {
            if ch.weight == 0.0 {
                continue;
            }
            for (i, d) in &ch.deltas {
                out[*i as usize] += *d * ch.weight;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mesh.rs"]
mod tests;
