//! Procedural logo-reveal pipeline.
//!
//! A fixed scene (road, camera dolly, smirking head, glowing title, logo hologram) is described
//! as a [`SceneModel`] plus keyframe tracks in a [`TrackStore`]. A run then:
//!
//! - projects the scene at every frame of the render range and hands each snapshot to a
//!   [`RenderEngine`]
//! - pads the sequence to its full length by repeating the last frame
//! - encodes the contiguous sequence with the system `ffmpeg`
//!
//! [`Pipeline`] ties the stages together; the `reveal` binary and the `GET /render` trigger
//! endpoint in [`serve`] drive it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod encode;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod sequence;
pub(crate) mod session;

mod server;

pub use crate::foundation::core::{
    ClipSpec, Fps, FrameIndex, RenderRange, Resolution, Rgba, Vec3,
};
pub use crate::foundation::error::{RevealError, RevealResult};

pub use crate::animation::track::{Keyframe, KeyframeTrack, TrackStore};
pub use crate::animation::value::{Lerp, ParamPath, Target, Value, ValueKind};
pub use crate::encode::ffmpeg::{EncodeConfig, EncodeReport, encode_sequence};
pub use crate::render::engine::{
    Bloom, EngineConfig, EngineKind, RenderEngine, RenderSettings, create_engine,
};
pub use crate::render::preview::PreviewEngine;
pub use crate::render::process::ProcessEngine;
pub use crate::render::projection::{RenderKind, RenderObject, RenderableScene, project};
pub use crate::render::sampler::{RenderStats, render_frame_to, render_range};
pub use crate::scene::logo_reveal::{
    CAMERA, HEAD, HOLOGRAM, ROAD, SMIRK, TILT, TITLE, build_logo_reveal,
};
pub use crate::scene::material::{BlendMode, Material};
pub use crate::scene::mesh::{DisplacementRule, Mesh, MeshPrimitive, ShapeChannel};
pub use crate::scene::model::{
    Camera, ChannelId, ImagePlane, Light, LightType, MaterialId, ObjectId, ObjectKind, SceneModel,
    SceneObject, Text, TextAlign, Transform,
};
pub use crate::sequence::extend::extend;
pub use crate::sequence::layout::FrameLayout;
pub use crate::server::{ServerConfig, TriggerResponse, handle, serve};
pub use crate::session::config::{EncodeStage, PipelineConfig};
pub use crate::session::pipeline::{EncodeOutcome, Pipeline, PipelineReport};
