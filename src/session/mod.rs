//! Configured pipeline runs: asset check, render, extend, verify, encode.

pub(crate) mod config;
pub(crate) mod pipeline;
