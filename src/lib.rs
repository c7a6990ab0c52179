//! polytrace turns tuple-annotated text into an animation of the drawing being traced.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: text blocks -> [`Drawing`]. Each block contributes at most one [`Shape`]:
//!    its first `(r, g, b)` tuple is the fill color and its `(x, y)` tuples are the path.
//!    Blocks without a color are skipped, never fatal.
//! 2. **Render**: [`Drawing`] -> ordered [`FrameRGBA`]s. Every point of every shape adds one
//!    frame; finished shapes stay on screen while the current one grows point by point.
//!    The viewport is computed once, so all frames share the same size and axes.
//! 3. **Encode** (optional): stream frames into a [`FrameSink`], e.g. an animated GIF.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No shared render state**: each render call owns a fresh raster backend.
//! - **Premultiplied RGBA8** frames; with the default opaque background that is plain RGBA.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod extract;
mod foundation;
mod model;
mod render;

pub mod encode;

pub use crate::extract::source::{PlainTextSource, TextSource};
pub use crate::extract::{
    BlockOutcome, BlockSkip, ExtractOpts, ExtractStats, extract, extract_from, extract_report,
    parse_block,
};
pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rect};
pub use crate::foundation::error::{PolytraceError, PolytraceResult};
pub use crate::model::{Drawing, Rgb, Shape, to_render_space};

pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::png::write_png;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::{FrameRGBA, RasterBackend, RenderSettings, create_backend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{
    Animation, RenderOpts, RenderStats, frame_count, render, render_frame_at, render_frames,
    render_frames_with_stats, render_to_gif, render_to_sink,
};
pub use crate::render::state::{Layer, RenderState};
pub use crate::render::viewport::Viewport;
