use crate::foundation::core::{Point, Rect};
use crate::foundation::math::unit_to_u8;

/// Straight RGB fill color with components nominally in `[0, 1]`.
///
/// Values are kept exactly as extracted; clamping happens only when converting to pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Build a color from its three channels.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Return `true` when every channel lies in `[0, 1]`.
    pub fn is_in_unit_range(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Opaque RGBA8, channels clamped to `[0, 1]` first.
    pub fn to_rgba8(self) -> [u8; 4] {
        [unit_to_u8(self.r), unit_to_u8(self.g), unit_to_u8(self.b), 255]
    }
}

/// One filled polygon path, extracted from a single text block.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    points: Vec<Point>,
    color: Rgb,
}

impl Shape {
    /// Build a shape from its path (document coordinates) and fill color.
    pub fn new(points: Vec<Point>, color: Rgb) -> Self {
        Self { points, color }
    }

    /// Path points in document order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Fill color.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Number of path points, which is also the number of frames this shape contributes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A shape without points is degenerate; it renders as a no-op.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Shapes in paint order (order of appearance in the source text).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Drawing {
    shapes: Vec<Shape>,
}

impl Drawing {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of the ones already present.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes, including degenerate ones.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Return `true` when the drawing has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total number of points across all shapes (equals the rendered frame count).
    pub fn point_count(&self) -> usize {
        self.shapes.iter().map(Shape::len).sum()
    }

    /// Bounding box of every point in render space (y inverted), or `None` without points.
    pub fn render_bounds(&self) -> Option<Rect> {
        let mut pts = self
            .shapes
            .iter()
            .flat_map(|s| s.points().iter().copied())
            .map(to_render_space);
        let first = pts.next()?;
        let init = Rect::from_points(first, first);
        Some(pts.fold(init, |r, p| r.union_pt(p)))
    }
}

impl FromIterator<Shape> for Drawing {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

/// Document space has y growing down; render space flips it so y grows up.
pub fn to_render_space(p: Point) -> Point {
    Point::new(p.x, -p.y)
}
