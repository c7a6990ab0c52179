use crate::encode::gif::ensure_parent_dir;
use crate::foundation::error::{PolytraceError, PolytraceResult};
use crate::render::backend::FrameRGBA;
use std::path::Path;

/// Write a single frame as a straight-alpha RGBA PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> PolytraceResult<()> {
    frame.check_len()?;
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| PolytraceError::encode(format!("write png '{}': {e}", path.display())))
}
