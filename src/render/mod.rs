//! Per-frame projection and the render engines that turn snapshots into images.

pub(crate) mod engine;
pub(crate) mod preview;
pub(crate) mod process;
pub(crate) mod projection;
pub(crate) mod sampler;
