use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{PolytraceError, PolytraceResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Playback frame rate. Only timing metadata depends on it.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in animation order.
///
/// Ordering contract: `push_frame` is called with strictly increasing [`FrameIndex`] values,
/// starting at 0. `end` is only called after a render completed successfully.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PolytraceResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PolytraceResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PolytraceResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Return `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PolytraceResult<()> {
        self.cfg = Some(cfg);
        self.order = FrameOrder::default();
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PolytraceResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(PolytraceError::validation("in-memory sink not started"));
        };
        self.order.check(&cfg, idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PolytraceResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Enforces the [`FrameSink`] ordering and size contract for sink implementations.
#[derive(Debug, Default, Clone)]
pub(crate) struct FrameOrder {
    last_idx: Option<FrameIndex>,
}

impl FrameOrder {
    pub(crate) fn check(
        &mut self,
        cfg: &SinkConfig,
        idx: FrameIndex,
        frame: &FrameRGBA,
    ) -> PolytraceResult<()> {
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(PolytraceError::encode(
                "sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PolytraceError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        frame.check_len()?;
        self.last_idx = Some(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SinkConfig {
        SinkConfig {
            width: 1,
            height: 1,
            fps: Fps::whole(10).unwrap(),
        }
    }

    fn px() -> FrameRGBA {
        FrameRGBA {
            width: 1,
            height: 1,
            data: vec![0, 0, 0, 255],
        }
    }

    #[test]
    fn order_rejects_repeats_and_size_mismatch() {
        let mut order = FrameOrder::default();
        order.check(&cfg(), FrameIndex(0), &px()).unwrap();
        assert!(order.check(&cfg(), FrameIndex(0), &px()).is_err());
        order.check(&cfg(), FrameIndex(1), &px()).unwrap();

        let big = FrameRGBA {
            width: 2,
            height: 1,
            data: vec![0; 8],
        };
        assert!(order.check(&cfg(), FrameIndex(2), &big).is_err());
    }

    #[test]
    fn in_memory_sink_requires_begin() {
        let mut sink = InMemorySink::new();
        assert!(sink.push_frame(FrameIndex(0), &px()).is_err());
        sink.begin(cfg()).unwrap();
        sink.push_frame(FrameIndex(0), &px()).unwrap();
        sink.end().unwrap();
        assert_eq!(sink.frames().len(), 1);
        assert!(sink.is_ended());
    }

    #[test]
    fn in_memory_sink_enforces_order_and_size() {
        let mut sink = InMemorySink::new();
        sink.begin(cfg()).unwrap();
        sink.push_frame(FrameIndex(0), &px()).unwrap();
        assert!(matches!(
            sink.push_frame(FrameIndex(0), &px()),
            Err(PolytraceError::Encode(_))
        ));
        let big = FrameRGBA {
            width: 2,
            height: 1,
            data: vec![0; 8],
        };
        assert!(matches!(
            sink.push_frame(FrameIndex(1), &big),
            Err(PolytraceError::Validation(_))
        ));
        assert_eq!(sink.frames().len(), 1);

        // A new run starts the index sequence over.
        sink.begin(cfg()).unwrap();
        sink.push_frame(FrameIndex(0), &px()).unwrap();
        assert_eq!(sink.frames().len(), 1);
    }
}
