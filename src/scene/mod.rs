//! Scene model: objects, materials, meshes with shape channels, and the logo-reveal cast.

pub(crate) mod logo_reveal;
pub(crate) mod material;
pub(crate) mod mesh;
pub(crate) mod model;
