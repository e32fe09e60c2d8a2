//! Encoding of the finished frame sequence through the system `ffmpeg`.

pub(crate) mod ffmpeg;
