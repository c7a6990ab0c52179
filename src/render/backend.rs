use crate::foundation::core::Canvas;
use crate::foundation::error::{PolytraceError, PolytraceResult};
use crate::render::state::RenderState;
use crate::render::viewport::Viewport;

/// A rendered frame as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, tightly packed, row-major. With the default opaque
/// background every pixel has `a == 255`, so the bytes are also valid straight RGBA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Pixel size of this frame.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied RGBA8 at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert to straight (non-premultiplied) RGBA8.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub(crate) fn check_len(&self) -> PolytraceResult<()> {
        if self.data.len() != self.canvas().rgba_len() {
            return Err(PolytraceError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }
}

/// A rasterizer that turns the current [`RenderState`] into one frame.
///
/// Backends are created per render call and never shared between calls.
pub trait RasterBackend {
    /// Draw the background, every finished shape and the in-progress prefix, in paint order.
    fn rasterize(
        &mut self,
        viewport: &Viewport,
        state: &RenderState<'_>,
    ) -> PolytraceResult<FrameRGBA>;
}

/// Backend-agnostic settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Output pixel size.
    pub canvas: Canvas,
    /// Straight RGBA8 color every frame is cleared to before drawing.
    pub clear_rgba: [u8; 4],
}

/// Create a fresh `vello_cpu` rendering backend.
pub fn create_backend(settings: &RenderSettings) -> PolytraceResult<Box<dyn RasterBackend>> {
    Ok(Box::new(crate::render::cpu::CpuBackend::new(*settings)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_lookup_and_bounds() {
        let f = FrameRGBA {
            width: 2,
            height: 1,
            data: vec![1, 2, 3, 255, 4, 5, 6, 255],
        };
        assert_eq!(f.pixel(1, 0), Some([4, 5, 6, 255]));
        assert_eq!(f.pixel(2, 0), None);
        assert!(f.check_len().is_ok());
    }

    #[test]
    fn straight_conversion_unpremultiplies() {
        let f = FrameRGBA {
            width: 2,
            height: 1,
            data: vec![64, 0, 32, 128, 0, 0, 0, 0],
        };
        assert_eq!(f.to_straight_rgba8(), vec![128, 0, 64, 128, 0, 0, 0, 0]);
    }
}
