use crate::foundation::error::{PolytraceError, PolytraceResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// 0-based position of a frame in the output animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
///
/// The frame rate only drives timing metadata in sinks; it never changes frame content or count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated rational frame rate.
    pub fn new(num: u32, den: u32) -> PolytraceResult<Self> {
        if den == 0 {
            return Err(PolytraceError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PolytraceError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Create an integer frame rate (`fps/1`).
    pub fn whole(fps: u32) -> PolytraceResult<Self> {
        Self::new(fps, 1)
    }

    /// Duration of one frame in whole milliseconds, rounded down and never below 1.
    pub fn frame_duration_ms(self) -> u32 {
        let ms = (1000u64 * u64::from(self.den)) / u64::from(self.num.max(1));
        ms.clamp(1, u64::from(u32::MAX)) as u32
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 20, den: 1 }
    }
}

/// Output pixel size, fixed for every frame of one render call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Validate the canvas against the raster backend limits (non-zero, fits in `u16`).
    pub fn validate(self) -> PolytraceResult<(u16, u16)> {
        if self.width == 0 || self.height == 0 {
            return Err(PolytraceError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        let w: u16 = self.width.try_into().map_err(|_| {
            PolytraceError::validation(format!("canvas width exceeds u16: {}", self.width))
        })?;
        let h: u16 = self.height.try_into().map_err(|_| {
            PolytraceError::validation(format!("canvas height exceeds u16: {}", self.height))
        })?;
        Ok((w, h))
    }

    /// Number of bytes in one tightly packed RGBA8 frame.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
        }
    }
}
