//! Keyframe animation: value types, parameter paths and the track store.

pub(crate) mod track;
pub(crate) mod value;
