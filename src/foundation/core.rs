use crate::foundation::error::{RevealError, RevealResult};

pub use glam::DVec3 as Vec3;

/// 1-based frame index, matching the numbering of the on-disk frame sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> RevealResult<Self> {
        if den == 0 {
            return Err(RevealError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(RevealError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number frame rate.
    pub fn integer(fps: u32) -> RevealResult<Self> {
        Self::new(fps, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert seconds to frame count using round-to-nearest semantics.
    pub fn secs_to_frames(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }

    /// `num/den` form accepted by `ffmpeg -framerate`.
    pub fn to_ffmpeg_rate(self) -> String {
        format!("{}/{}", self.num, self.den)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Inclusive frame range `[start, end]` rendered by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderRange {
    /// First rendered frame (>= 1).
    pub start: FrameIndex,
    /// Last rendered frame, inclusive.
    pub end: FrameIndex,
    /// Playback rate of the rendered frames.
    pub fps: Fps,
}

impl RenderRange {
    /// Create a validated range with `1 <= start <= end`.
    pub fn new(start: u64, end: u64, fps: Fps) -> RevealResult<Self> {
        if start == 0 || end == 0 {
            return Err(RevealError::validation(
                "RenderRange frames are 1-based and must be >= 1",
            ));
        }
        if start > end {
            return Err(RevealError::validation("RenderRange start must be <= end"));
        }
        Ok(Self {
            start: FrameIndex(start),
            end: FrameIndex(end),
            fps,
        })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0 - self.start.0 + 1
    }

    /// Iterate frame indices in ascending order.
    pub fn frames(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..=self.end.0).map(FrameIndex)
    }
}

/// Target length of the final clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClipSpec {
    /// Total number of frames in the finished sequence.
    pub target_total_frames: u64,
    /// Playback rate of the finished clip.
    pub fps: Fps,
}

impl ClipSpec {
    /// Create a clip spec that must cover `range`.
    pub fn new(target_total_frames: u64, range: RenderRange) -> RevealResult<Self> {
        if target_total_frames < range.end.0 {
            return Err(RevealError::validation(format!(
                "target total frames ({target_total_frames}) must be >= last rendered frame ({})",
                range.end.0
            )));
        }
        Ok(Self {
            target_total_frames,
            fps: range.fps,
        })
    }

    /// Derive the target frame count from a duration in seconds.
    pub fn from_seconds(secs: f64, range: RenderRange) -> RevealResult<Self> {
        Self::new(range.fps.secs_to_frames(secs), range)
    }

    /// Number of frames produced by replication rather than rendering.
    pub fn padding_frames(self, range: RenderRange) -> u64 {
        self.target_total_frames.saturating_sub(range.end.0)
    }
}

/// Output resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Straight-alpha linear RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Rgba {
    /// Build a color from components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Quantize to 8-bit straight RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(c: f64) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
