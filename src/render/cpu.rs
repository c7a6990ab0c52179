use crate::foundation::core::{Affine, Canvas, Point};
use crate::foundation::error::{PolytraceError, PolytraceResult};
use crate::render::backend::{FrameRGBA, RasterBackend, RenderSettings};
use crate::render::state::RenderState;
use crate::render::viewport::Viewport;

/// CPU backend powered by `vello_cpu`.
///
/// Owns one target pixmap sized to the canvas. Every call to [`RasterBackend::rasterize`]
/// redraws the full scene from the accumulator, so no pixels carry over between frames except
/// through the accumulator itself.
pub struct CpuBackend {
    settings: RenderSettings,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    /// Allocate the target pixmap for `settings.canvas`.
    pub fn new(settings: RenderSettings) -> PolytraceResult<Self> {
        let (w, h) = settings.canvas.validate()?;
        Ok(Self {
            settings,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Canvas this backend renders into.
    pub fn canvas(&self) -> Canvas {
        self.settings.canvas
    }
}

impl RasterBackend for CpuBackend {
    fn rasterize(
        &mut self,
        viewport: &Viewport,
        state: &RenderState<'_>,
    ) -> PolytraceResult<FrameRGBA> {
        let canvas = self.settings.canvas;
        if viewport.canvas() != canvas {
            return Err(PolytraceError::render_backend(format!(
                "viewport canvas {}x{} does not match backend canvas {}x{}",
                viewport.canvas().width,
                viewport.canvas().height,
                canvas.width,
                canvas.height
            )));
        }
        let doc_to_pixel = viewport.document_to_pixel();
        if !doc_to_pixel.is_finite() {
            return Err(PolytraceError::render_backend(
                "non-finite document-to-pixel transform",
            ));
        }

        let mut ctx = vello_cpu::RenderContext::new(self.pixmap.width(), self.pixmap.height());

        let [r, g, b, a] = self.settings.clear_rgba;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));

        ctx.set_transform(affine_to_cpu(doc_to_pixel));
        for layer in state.layers() {
            if layer.points.is_empty() {
                continue;
            }
            let [r, g, b, a] = layer.color.to_rgba8();
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_path(&polygon_to_cpu(layer.points));
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        let frame = FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
        };
        frame
            .check_len()
            .map_err(|e| PolytraceError::render_backend(e.to_string()))?;
        Ok(frame)
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

// Open prefixes are closed implicitly, same as a finished polygon.
fn polygon_to_cpu(points: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        out.move_to(vello_cpu::kurbo::Point::new(first.x, first.y));
        for p in it {
            out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y));
        }
        out.close_path();
    }
    out
}
