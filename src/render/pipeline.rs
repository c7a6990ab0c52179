use std::ops::ControlFlow;
use std::path::PathBuf;

use crate::{
    encode::gif::{GifSink, GifSinkOpts},
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{PolytraceError, PolytraceResult},
    model::{Drawing, Shape},
    render::backend::{FrameRGBA, RasterBackend, RenderSettings, create_backend},
    render::state::RenderState,
    render::viewport::Viewport,
};

/// Options for incremental rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// Output pixel size, identical for every frame.
    pub canvas: Canvas,
    /// Pixels kept free on each side of the canvas around the drawing's bounding box.
    pub margin_px: u32,
    /// Straight RGBA8 background every frame starts from.
    pub background: [u8; 4],
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            margin_px: 12,
            background: [255, 255, 255, 255],
        }
    }
}

impl RenderOpts {
    fn settings(&self) -> RenderSettings {
        RenderSettings {
            canvas: self.canvas,
            clear_rgba: self.background,
        }
    }
}

/// Counters reported by a completed render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames produced (sum of point counts over traced shapes).
    pub frames_rendered: u64,
    /// Shapes traced to completion.
    pub shapes_rendered: u64,
    /// Degenerate shapes (no points) that contributed no frames.
    pub shapes_skipped: u64,
}

/// Fully buffered result of [`render`]: frames plus the rate they are meant to play at.
#[derive(Clone, Debug)]
pub struct Animation {
    /// Playback rate.
    pub fps: Fps,
    /// Frames in order; all share the same dimensions.
    pub frames: Vec<FrameRGBA>,
}

impl Animation {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when there are no frames (never the case for a successful render).
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Playback length in milliseconds using the per-frame delay sinks apply.
    pub fn duration_ms(&self) -> u64 {
        self.frames.len() as u64 * u64::from(self.fps.frame_duration_ms())
    }
}

/// Number of frames a render of `drawing` produces.
pub fn frame_count(drawing: &Drawing) -> u64 {
    drawing.point_count() as u64
}

/// Render every frame of the tracing animation into memory.
///
/// Either all frames are returned or an error; partial sequences are never returned.
#[tracing::instrument(skip(drawing), fields(shapes = drawing.len()))]
pub fn render(drawing: &Drawing, fps: Fps, opts: &RenderOpts) -> PolytraceResult<Animation> {
    let frames = render_frames(drawing, opts)?;
    Ok(Animation { fps, frames })
}

/// Render every frame into a `Vec`.
pub fn render_frames(drawing: &Drawing, opts: &RenderOpts) -> PolytraceResult<Vec<FrameRGBA>> {
    render_frames_with_stats(drawing, opts).map(|(frames, _)| frames)
}

/// Like [`render_frames`], also returning [`RenderStats`].
pub fn render_frames_with_stats(
    drawing: &Drawing,
    opts: &RenderOpts,
) -> PolytraceResult<(Vec<FrameRGBA>, RenderStats)> {
    let viewport = Viewport::for_drawing(drawing, opts.canvas, opts.margin_px)?;
    let backend = create_backend(&opts.settings())?;
    collect_frames(drawing, &viewport, backend)
}

/// Render only frame `idx`, stopping as soon as it is produced.
pub fn render_frame_at(
    drawing: &Drawing,
    idx: FrameIndex,
    opts: &RenderOpts,
) -> PolytraceResult<FrameRGBA> {
    let total = frame_count(drawing);
    let viewport = Viewport::for_drawing(drawing, opts.canvas, opts.margin_px)?;
    if idx.0 >= total {
        return Err(PolytraceError::validation(format!(
            "frame {} out of range: drawing has {total} frames",
            idx.0
        )));
    }

    let mut found = None;
    let backend = create_backend(&opts.settings())?;
    trace_frames(drawing, &viewport, backend, &mut |i, frame| {
        if i == idx {
            found = Some(frame);
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    })?;
    found.ok_or_else(|| PolytraceError::render_backend(format!("frame {} was not produced", idx.0)))
}

/// Stream every frame into `sink`.
///
/// `sink.begin` is called once the viewport is known; `sink.end` only after the last frame
/// rendered successfully.
#[tracing::instrument(skip(drawing, sink), fields(shapes = drawing.len()))]
pub fn render_to_sink(
    drawing: &Drawing,
    fps: Fps,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
) -> PolytraceResult<RenderStats> {
    let viewport = Viewport::for_drawing(drawing, opts.canvas, opts.margin_px)?;
    let backend = create_backend(&opts.settings())?;
    stream_frames(drawing, fps, &viewport, backend, sink)
}

/// Render straight to an animated GIF file.
pub fn render_to_gif(
    drawing: &Drawing,
    fps: Fps,
    opts: &RenderOpts,
    out_path: impl Into<PathBuf>,
) -> PolytraceResult<RenderStats> {
    let mut sink = GifSink::new(GifSinkOpts {
        bg_rgba: opts.background,
        ..GifSinkOpts::new(out_path)
    });
    render_to_sink(drawing, fps, opts, &mut sink)
}

type EmitFn<'e> = dyn FnMut(FrameIndex, FrameRGBA) -> PolytraceResult<ControlFlow<()>> + 'e;

struct Tracer<'v, 'e> {
    backend: Box<dyn RasterBackend>,
    viewport: &'v Viewport,
    next: FrameIndex,
    stats: RenderStats,
    emit: &'e mut EmitFn<'e>,
}

enum Step<'a> {
    Continue(RenderState<'a>),
    Stop,
}

fn collect_frames(
    drawing: &Drawing,
    viewport: &Viewport,
    backend: Box<dyn RasterBackend>,
) -> PolytraceResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut out = Vec::with_capacity(frame_count(drawing).min(4096) as usize);
    let stats = trace_frames(drawing, viewport, backend, &mut |_, frame| {
        out.push(frame);
        Ok(ControlFlow::Continue(()))
    })?;
    Ok((out, stats))
}

fn stream_frames(
    drawing: &Drawing,
    fps: Fps,
    viewport: &Viewport,
    backend: Box<dyn RasterBackend>,
    sink: &mut dyn FrameSink,
) -> PolytraceResult<RenderStats> {
    let canvas = viewport.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
    })?;
    let stats = trace_frames(drawing, viewport, backend, &mut |idx, frame| {
        sink.push_frame(idx, &frame)?;
        Ok(ControlFlow::Continue(()))
    })?;
    sink.end()?;
    Ok(stats)
}

// Takes the backend by value and drops it on return, so every call owns its own surface.
fn trace_frames<'e>(
    drawing: &Drawing,
    viewport: &Viewport,
    backend: Box<dyn RasterBackend>,
    emit: &'e mut EmitFn<'e>,
) -> PolytraceResult<RenderStats> {
    let mut tracer = Tracer {
        backend,
        viewport,
        next: FrameIndex(0),
        stats: RenderStats::default(),
        emit,
    };

    let mut state = RenderState::new();
    for (i, shape) in drawing.shapes().iter().enumerate() {
        match tracer.trace_shape(state, shape)? {
            Step::Continue(s) => state = s,
            Step::Stop => break,
        }
        tracing::debug!(shape = i, points = shape.len(), "traced shape");
    }

    Ok(tracer.stats)
}

impl Tracer<'_, '_> {
    fn trace_shape<'a>(
        &mut self,
        mut state: RenderState<'a>,
        shape: &'a Shape,
    ) -> PolytraceResult<Step<'a>> {
        if shape.is_empty() {
            self.stats.shapes_skipped += 1;
            return Ok(Step::Continue(state));
        }

        state.begin(shape)?;
        while state.advance().is_some() {
            let frame = self.backend.rasterize(self.viewport, &state)?;
            let idx = self.next;
            self.next = FrameIndex(idx.0 + 1);
            self.stats.frames_rendered += 1;
            if (self.emit)(idx, frame)?.is_break() {
                return Ok(Step::Stop);
            }
        }
        state.finish();
        self.stats.shapes_rendered += 1;
        Ok(Step::Continue(state))
    }
}
