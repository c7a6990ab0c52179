use crate::foundation::core::Point;
use crate::foundation::error::{PolytraceError, PolytraceResult};
use crate::model::{Rgb, Shape};

/// One filled polygon to rasterize, in document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer<'a> {
    /// Polygon vertices; the fill path is closed implicitly.
    pub points: &'a [Point],
    /// Fill color.
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy)]
struct InProgress<'a> {
    shape: &'a Shape,
    drawn: usize,
}

/// Accumulator threaded through one render call.
///
/// Holds the shapes already traced to completion and the prefix of the shape currently being
/// traced. Finished shapes are only ever appended, so nothing once drawn disappears from later
/// frames.
#[derive(Debug, Clone, Default)]
pub struct RenderState<'a> {
    finished: Vec<&'a Shape>,
    current: Option<InProgress<'a>>,
}

impl<'a> RenderState<'a> {
    /// Empty state: nothing finished, nothing in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes traced to completion, in paint order.
    pub fn finished(&self) -> &[&'a Shape] {
        &self.finished
    }

    /// Current shape and how many of its points are drawn, if a shape is in progress.
    pub fn current(&self) -> Option<(&'a Shape, usize)> {
        self.current.map(|c| (c.shape, c.drawn))
    }

    /// Start tracing `shape` with zero points drawn.
    pub fn begin(&mut self, shape: &'a Shape) -> PolytraceResult<()> {
        if self.current.is_some() {
            return Err(PolytraceError::render_backend(
                "cannot begin a shape while another is in progress",
            ));
        }
        self.current = Some(InProgress { shape, drawn: 0 });
        Ok(())
    }

    /// Draw one more point of the current shape.
    ///
    /// Returns the new prefix length, or `None` once the whole shape is drawn (or no shape is in
    /// progress).
    pub fn advance(&mut self) -> Option<usize> {
        let cur = self.current.as_mut()?;
        if cur.drawn >= cur.shape.len() {
            return None;
        }
        cur.drawn += 1;
        Some(cur.drawn)
    }

    /// Move the current shape, complete, into the finished set.
    pub fn finish(&mut self) {
        if let Some(cur) = self.current.take() {
            self.finished.push(cur.shape);
        }
    }

    /// Everything visible in the next frame: finished shapes, then the in-progress prefix.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'a>> + '_ {
        let finished = self.finished.iter().map(|&s| Layer {
            points: s.points(),
            color: s.color(),
        });
        let current = self.current.map(|c| Layer {
            points: &c.shape.points()[..c.drawn],
            color: c.shape.color(),
        });
        finished.chain(current)
    }
}
