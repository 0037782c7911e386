use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use gif::{Encoder, Repeat};

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, StepIndex};
use crate::foundation::error::{SnowError, SnowResult};
use crate::render::composite::flatten_over_bg;
use crate::render::surface::FrameRGBA;

/// Options for [`GifSink`] output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Quantizer speed in `1..=30`; lower is slower and more accurate.
    pub speed: i32,
}

impl GifSinkOpts {
    /// Options writing to `out_path` at the default quantizer speed.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            speed: 10,
        }
    }
}

/// Animated GIF sink that loops forever with a fixed per-frame delay.
///
/// Frames are quantized and streamed to the file as they arrive. `end` writes the trailer and
/// flushes explicitly, so a failed write is reported instead of being lost on drop.
pub struct GifSink {
    opts: GifSinkOpts,
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    encoder: Option<Encoder<BufWriter<File>>>,
    size: (u16, u16),
    delay_cs: u16,
    scratch: Vec<u8>,
    frames: u64,
}

impl GifSink {
    /// Create a sink; the file is created by `begin`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            order: FrameOrder::default(),
            encoder: None,
            size: (0, 0),
            delay_cs: 0,
            scratch: Vec::new(),
            frames: 0,
        }
    }

    fn write_error(&self, what: &str, e: impl std::fmt::Display) -> SnowError {
        SnowError::sink_write(format!(
            "{what} '{}': {e}",
            self.opts.out_path.display()
        ))
    }
}

/// GIF delays are stored in hundredths of a second; never round a frame down to zero.
fn delay_centis(frame_delay_ms: u32) -> u16 {
    let cs = frame_delay_ms.saturating_add(5) / 10;
    u16::try_from(cs).unwrap_or(u16::MAX).max(1)
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> SnowResult<()> {
        cfg.validate()?;
        if !(1..=30).contains(&self.opts.speed) {
            return Err(SnowError::validation("gif speed must be in 1..=30"));
        }
        let (Ok(width), Ok(height)) = (u16::try_from(cfg.width), u16::try_from(cfg.height)) else {
            return Err(SnowError::validation(format!(
                "gif frames are limited to {max}x{max}, got {}x{}",
                cfg.width,
                cfg.height,
                max = Canvas::MAX_SIDE
            )));
        };

        ensure_parent_dir(&self.opts.out_path)
            .map_err(|e| SnowError::sink_write(format!("{e:#}")))?;
        let file = File::create(&self.opts.out_path).map_err(|e| self.write_error("create", e))?;
        let mut encoder = Encoder::new(BufWriter::new(file), width, height, &[])
            .map_err(|e| self.write_error("gif header for", e))?;
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| self.write_error("gif header for", e))?;

        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.encoder = Some(encoder);
        self.size = (width, height);
        self.delay_cs = delay_centis(cfg.frame_delay_ms);
        self.order.reset();
        self.frames = 0;
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: StepIndex, frame: &FrameRGBA) -> SnowResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SnowError::validation("gif sink not started"))?;
        self.order.accept("gif", cfg, idx, frame)?;
        flatten_over_bg(&mut self.scratch, &frame.data, cfg.background_rgb())?;

        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| SnowError::validation("gif sink is already finalized"))?;
        let (width, height) = self.size;
        let mut gif_frame =
            gif::Frame::from_rgba_speed(width, height, &mut self.scratch, self.opts.speed);
        gif_frame.delay = self.delay_cs;
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| SnowError::sink_write(format!("gif frame {}: {e}", idx.0)))?;
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> SnowResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| SnowError::validation("gif sink not started"))?;
        let writer = encoder
            .into_inner()
            .map_err(|e| self.write_error("gif trailer for", e))?;
        let file = writer
            .into_inner()
            .map_err(|e| self.write_error("flush", e.error()))?;
        file.sync_all().map_err(|e| self.write_error("sync", e))?;

        tracing::debug!(
            path = %self.opts.out_path.display(),
            frames = self.frames,
            "gif written"
        );
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
