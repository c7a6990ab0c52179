//! Text blocks to [`Drawing`].
//!
//! Each block is parsed on its own by [`parse_block`], which never fails: a block either
//! produces one [`Shape`] or is skipped with a [`BlockSkip`] reason. Documents routinely mix
//! prose paragraphs with data paragraphs, so skipping is the normal path rather than an error.

pub(crate) mod scan;
pub(crate) mod source;

use crate::extract::scan::{NumberGrammar, first_tuple, scan_tuples};
use crate::extract::source::TextSource;
use crate::foundation::core::Point;
use crate::foundation::error::PolytraceResult;
use crate::model::{Drawing, Rgb, Shape};

/// Extraction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOpts {
    /// Accept scientific-notation exponents (`1.5e-3`) inside tuples.
    ///
    /// Off by default: the tuple convention uses fixed-point decimals only.
    pub allow_exponent: bool,
}

impl ExtractOpts {
    fn grammar(self) -> NumberGrammar {
        NumberGrammar {
            allow_exponent: self.allow_exponent,
        }
    }
}

/// Why a block contributed no shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSkip {
    /// The block is empty or whitespace only.
    Blank,
    /// The block has no qualifying `(r, g, b)` tuple.
    NoColor,
}

/// Result of parsing a single text block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome {
    /// The block yielded a shape (possibly with zero points).
    Shape(Shape),
    /// The block was skipped.
    Skip(BlockSkip),
}

/// Counters collected while extracting a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Blocks read from the source.
    pub blocks: usize,
    /// Shapes appended to the drawing.
    pub shapes: usize,
    /// Blocks that contributed nothing.
    pub skipped: usize,
    /// Points across all shapes.
    pub points: usize,
}

/// Parse one block: the first `(r, g, b)` tuple is the color, every `(x, y)` tuple a point.
pub fn parse_block(text: &str, opts: ExtractOpts) -> BlockOutcome {
    if text.trim().is_empty() {
        return BlockOutcome::Skip(BlockSkip::Blank);
    }

    let grammar = opts.grammar();
    let Some(color) = first_tuple::<3>(text, grammar) else {
        return BlockOutcome::Skip(BlockSkip::NoColor);
    };
    tracing::trace!(
        start = color.span.start,
        end = color.span.end,
        "color tuple"
    );
    let [r, g, b] = color.values;
    let color = Rgb::new(r, g, b);

    let points = scan_tuples::<2>(text, grammar)
        .into_iter()
        .map(|m| Point::new(m.values[0], m.values[1]))
        .collect();

    BlockOutcome::Shape(Shape::new(points, color))
}

/// Build a [`Drawing`] from blocks in document order.
pub fn extract<I, S>(blocks: I, opts: ExtractOpts) -> Drawing
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extract_report(blocks, opts).0
}

/// Like [`extract`], also returning per-document counters.
pub fn extract_report<I, S>(blocks: I, opts: ExtractOpts) -> (Drawing, ExtractStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    blocks.into_iter().enumerate().fold(
        (Drawing::new(), ExtractStats::default()),
        |(mut drawing, mut stats), (idx, block)| {
            stats.blocks += 1;
            match parse_block(block.as_ref(), opts) {
                BlockOutcome::Shape(shape) => {
                    let color = shape.color();
                    if !color.is_in_unit_range() {
                        tracing::warn!(
                            block = idx,
                            r = color.r,
                            g = color.g,
                            b = color.b,
                            "fill color outside [0, 1]; it will be clamped when rendered"
                        );
                    }
                    stats.shapes += 1;
                    stats.points += shape.len();
                    drawing.push(shape);
                }
                BlockOutcome::Skip(reason) => {
                    tracing::debug!(block = idx, ?reason, "skipping block");
                    stats.skipped += 1;
                }
            }
            (drawing, stats)
        },
    )
}

/// Read every block from `source` and extract the drawing.
///
/// Source failures are fatal and no partial drawing is returned.
#[tracing::instrument(skip(source))]
pub fn extract_from<T: TextSource + ?Sized>(
    source: &mut T,
    opts: ExtractOpts,
) -> PolytraceResult<Drawing> {
    let blocks = source.blocks()?;
    let (drawing, stats) = extract_report(&blocks, opts);
    tracing::debug!(
        blocks = stats.blocks,
        shapes = stats.shapes,
        skipped = stats.skipped,
        points = stats.points,
        "extracted drawing"
    );
    Ok(drawing)
}
