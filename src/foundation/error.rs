use std::path::PathBuf;

/// Convenience result type used across the pipeline.
pub type RevealResult<T> = Result<T, RevealError>;

/// Error taxonomy for scene construction, animation sampling, rendering and encoding.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Invalid configuration, handles or paths.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid keyframe data (unresolvable parameter path, value kind mismatch).
    #[error("animation error: {0}")]
    Animation(String),

    /// A parameter could not be evaluated for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// A required input asset is absent. Raised before any output is created.
    #[error("missing asset: '{}'", path.display())]
    MissingAsset {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// The render engine failed to produce a frame.
    #[error("render engine error at frame {frame}: {message}")]
    RenderEngine {
        /// 1-based frame index that failed.
        frame: u64,
        /// Engine-level failure description.
        message: String,
    },

    /// The source frame for duration extension does not exist.
    #[error("extension error: source frame '{}' is missing", path.display())]
    Extension {
        /// Path of the missing source frame.
        path: PathBuf,
    },

    /// The video encoder failed. Rendered frames stay in `frame_dir`.
    #[error("encode error: {message} (frames kept in '{}')", frame_dir.display())]
    Encode {
        /// Directory holding the complete frame sequence.
        frame_dir: PathBuf,
        /// Encoder failure description, including captured stderr.
        message: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`RevealError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`RevealError::MissingAsset`] value.
    pub fn missing_asset(path: impl Into<PathBuf>) -> Self {
        Self::MissingAsset { path: path.into() }
    }

    /// Build a [`RevealError::RenderEngine`] value.
    pub fn render_engine(frame: u64, msg: impl Into<String>) -> Self {
        Self::RenderEngine {
            frame,
            message: msg.into(),
        }
    }

    /// Build a [`RevealError::Extension`] value.
    pub fn extension(path: impl Into<PathBuf>) -> Self {
        Self::Extension { path: path.into() }
    }

    /// Build a [`RevealError::Encode`] value.
    pub fn encode(frame_dir: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Encode {
            frame_dir: frame_dir.into(),
            message: msg.into(),
        }
    }

    /// Build a [`RevealError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
