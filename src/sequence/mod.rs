//! Frame-indexed image sequences on disk: naming, contiguity checks and duration extension.

pub(crate) mod extend;
pub(crate) mod layout;
