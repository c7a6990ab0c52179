use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PolytraceError, PolytraceResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;
use image::codecs::gif::{GifEncoder, Repeat};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output file; `None` keeps the encoded bytes in memory only.
    pub out_path: Option<PathBuf>,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
    /// Palette quantization speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl GifSinkOpts {
    /// Create options for writing a GIF to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: Some(out_path.into()),
            ..Self::default()
        }
    }
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            out_path: None,
            overwrite: true,
            bg_rgba: [255, 255, 255, 255],
            speed: 10,
        }
    }
}

// `GifEncoder` owns its writer and only emits the trailer when dropped, so the bytes are
// collected through a shared handle.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn take(&self) -> PolytraceResult<Vec<u8>> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| PolytraceError::encode("gif buffer lock poisoned"))?;
        Ok(std::mem::take(&mut *guard))
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("gif buffer lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Animated GIF sink: infinite loop, one delay per frame derived from the frame rate.
///
/// Encoded bytes are buffered in memory and written to `out_path` only in [`FrameSink::end`], so
/// a failed render never leaves a truncated file behind.
pub struct GifSink {
    opts: GifSinkOpts,

    encoder: Option<GifEncoder<SharedBuf>>,
    buf: SharedBuf,
    bytes: Vec<u8>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    frames_written: u64,
}

impl GifSink {
    /// Create a new GIF sink.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            buf: SharedBuf::default(),
            bytes: Vec::new(),
            scratch: Vec::new(),
            cfg: None,
            order: FrameOrder::default(),
            frames_written: 0,
        }
    }

    /// Create a sink that keeps the encoded GIF in memory (see [`GifSink::bytes`]).
    pub fn in_memory() -> Self {
        Self::new(GifSinkOpts::default())
    }

    /// Encoded GIF bytes, available after a successful [`FrameSink::end`].
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of frames encoded so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> PolytraceResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(PolytraceError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(PolytraceError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(PolytraceError::validation(
                "gif sink width/height must fit in u16",
            ));
        }
        if !(1..=30).contains(&self.opts.speed) {
            return Err(PolytraceError::validation(
                "gif quantization speed must be in 1..=30",
            ));
        }
        if let Some(path) = self.opts.out_path.as_ref()
            && !self.opts.overwrite
            && path.exists()
        {
            return Err(PolytraceError::validation(format!(
                "output file '{}' already exists",
                path.display()
            )));
        }

        self.buf = SharedBuf::default();
        let mut encoder = GifEncoder::new_with_speed(self.buf.clone(), self.opts.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| PolytraceError::encode(format!("gif set_repeat failed: {e}")))?;

        self.encoder = Some(encoder);
        self.bytes.clear();
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.cfg = Some(cfg);
        self.order = FrameOrder::default();
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PolytraceResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| PolytraceError::encode("gif sink not started"))?;
        self.order.check(&cfg, idx, frame)?;

        // GIF has no partial alpha; flatten premultiplied RGBA8 over the background.
        flatten_premul_over_bg_to_opaque_rgba8(&mut self.scratch, &frame.data, self.opts.bg_rgba)?;

        let img = image::RgbaImage::from_raw(cfg.width, cfg.height, self.scratch.clone())
            .ok_or_else(|| PolytraceError::encode("gif frame buffer has the wrong length"))?;
        let delay = image::Delay::from_numer_denom_ms(cfg.fps.frame_duration_ms(), 1);

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(PolytraceError::encode("gif sink is already finalized"));
        };
        encoder
            .encode_frame(image::Frame::from_parts(img, 0, 0, delay))
            .map_err(|e| PolytraceError::encode(format!("failed to encode gif frame: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> PolytraceResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| PolytraceError::encode("gif sink not started"))?;
        if self.frames_written == 0 {
            return Err(PolytraceError::encode("gif sink received no frames"));
        }
        // Dropping the encoder writes the GIF trailer.
        drop(encoder);
        self.bytes = self.buf.take()?;

        if let Some(path) = self.opts.out_path.as_ref() {
            ensure_parent_dir(path)?;
            std::fs::write(path, &self.bytes).map_err(|e| {
                PolytraceError::encode(format!("failed to write '{}': {e}", path.display()))
            })?;
            tracing::debug!(
                path = %path.display(),
                bytes = self.bytes.len(),
                frames = self.frames_written,
                "wrote gif"
            );
        }

        self.cfg = None;
        Ok(())
    }
}

fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> PolytraceResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(PolytraceError::validation(
            "flatten_premul_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = bg_rgba[0] as u16;
    let bg_g = bg_rgba[1] as u16;
    let bg_b = bg_rgba[2] as u16;

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = (s[0] as u16 + mul_div255_u16(bg_r, inv)).min(255) as u8;
        d[1] = (s[1] as u16 + mul_div255_u16(bg_g, inv)).min(255) as u8;
        d[2] = (s[2] as u16 + mul_div255_u16(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PolytraceResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
