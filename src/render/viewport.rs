use crate::foundation::core::{Affine, Canvas, Point, Rect, Vec2};
use crate::foundation::error::{PolytraceError, PolytraceResult};
use crate::model::{Drawing, to_render_space};

/// Fixed world-to-pixel mapping shared by every frame of one render call.
///
/// World space is render space (document y inverted, y up). The drawing's bounding box is
/// scaled uniformly to fit the canvas minus `margin_px` on each side, and centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    canvas: Canvas,
    bounds: Rect,
    scale: f64,
    world_to_pixel: Affine,
}

impl Viewport {
    /// Fit `bounds` (render space) into `canvas`.
    pub fn fit(bounds: Rect, canvas: Canvas, margin_px: u32) -> PolytraceResult<Self> {
        canvas.validate()?;
        if ![bounds.x0, bounds.y0, bounds.x1, bounds.y1]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(PolytraceError::validation("drawing bounds must be finite"));
        }

        let margin = f64::from(margin_px) * 2.0;
        let avail_w = f64::from(canvas.width) - margin;
        let avail_h = f64::from(canvas.height) - margin;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return Err(PolytraceError::validation(format!(
                "margin {margin_px}px leaves no drawable area on a {}x{} canvas",
                canvas.width, canvas.height
            )));
        }

        // Half extents and midpoints stay finite for any finite bounds; full widths may not.
        let half_w = bounds.x1 * 0.5 - bounds.x0 * 0.5;
        let half_h = bounds.y1 * 0.5 - bounds.y0 * 0.5;
        let axis_scale = |avail: f64, half: f64| {
            let s = (avail * 0.5) / half;
            (half > 0.0 && s.is_finite() && s > 0.0).then_some(s)
        };
        // An axis with zero (or subnormal) extent does not constrain the scale.
        let scale = match (axis_scale(avail_w, half_w), axis_scale(avail_h, half_h)) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => 1.0,
        };

        let center = midpoint(bounds);
        let pixel_center = Vec2::new(f64::from(canvas.width), f64::from(canvas.height)) * 0.5;
        let world_to_pixel = Affine::translate(pixel_center)
            * Affine::scale_non_uniform(scale, -scale)
            * Affine::translate(-center.to_vec2());

        Ok(Self {
            canvas,
            bounds,
            scale,
            world_to_pixel,
        })
    }

    /// Fit every point of `drawing`; a drawing without points is [`PolytraceError::EmptyDrawing`].
    pub fn for_drawing(drawing: &Drawing, canvas: Canvas, margin_px: u32) -> PolytraceResult<Self> {
        let bounds = drawing.render_bounds().ok_or(PolytraceError::EmptyDrawing)?;
        Self::fit(bounds, canvas, margin_px)
    }

    /// Output pixel size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Bounding box of the drawing in render space, without margin.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// World-space rectangle covered by the whole canvas (bounds plus margin and letterboxing).
    pub fn extents(&self) -> Rect {
        let half = Vec2::new(
            f64::from(self.canvas.width) / (2.0 * self.scale),
            f64::from(self.canvas.height) / (2.0 * self.scale),
        );
        let c = midpoint(self.bounds);
        Rect::new(c.x - half.x, c.y - half.y, c.x + half.x, c.y + half.y)
    }

    /// Pixels per world unit (identical on both axes).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Transform from render space to pixel space (y down).
    pub fn world_to_pixel(&self) -> Affine {
        self.world_to_pixel
    }

    /// Transform from document space straight to pixel space.
    pub fn document_to_pixel(&self) -> Affine {
        self.world_to_pixel * Affine::FLIP_Y
    }

    /// Pixel position of a document-space point.
    pub fn pixel_of(&self, doc: Point) -> Point {
        self.world_to_pixel * to_render_space(doc)
    }
}

fn midpoint(r: Rect) -> Point {
    Point::new(r.x0 * 0.5 + r.x1 * 0.5, r.y0 * 0.5 + r.y1 * 0.5)
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;
