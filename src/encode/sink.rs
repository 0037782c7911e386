use crate::assets::color::Color;
use crate::foundation::core::StepIndex;
use crate::foundation::error::{SnowError, SnowResult};
use crate::render::surface::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Display time of every frame in milliseconds.
    pub frame_delay_ms: u32,
    /// Opaque color used to flatten any remaining transparency.
    pub background: Color,
}

impl SinkConfig {
    pub(crate) fn validate(&self) -> SnowResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SnowError::validation("sink width/height must be non-zero"));
        }
        if self.frame_delay_ms == 0 {
            return Err(SnowError::validation("frame delay must be non-zero"));
        }
        Ok(())
    }

    pub(crate) fn background_rgb(&self) -> [u8; 3] {
        [self.background.r, self.background.g, self.background.b]
    }
}

/// Sink contract for consuming rendered frames in step order.
///
/// Ordering contract: `push_frame` is called in strictly increasing [`StepIndex`] order, once per
/// step, between one `begin` and one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SnowResult<()>;
    /// Push one frame in strictly increasing step order.
    fn push_frame(&mut self, idx: StepIndex, frame: &FrameRGBA) -> SnowResult<()>;
    /// Called once after the last frame is pushed; persists the output.
    fn end(&mut self) -> SnowResult<()>;
}

/// Per-sink bookkeeping for the ordering and frame-size contract.
#[derive(Debug, Default)]
pub(crate) struct FrameOrder {
    last: Option<StepIndex>,
}

impl FrameOrder {
    pub(crate) fn reset(&mut self) {
        self.last = None;
    }

    pub(crate) fn accept(
        &mut self,
        sink: &str,
        cfg: &SinkConfig,
        idx: StepIndex,
        frame: &FrameRGBA,
    ) -> SnowResult<()> {
        if let Some(last) = self.last
            && idx <= last
        {
            return Err(SnowError::validation(format!(
                "{sink} sink received out-of-order frame {} after {}",
                idx.0, last.0
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SnowError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last = Some(idx);
        Ok(())
    }
}

/// In-memory sink for tests and single-frame previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    finished: bool,
    frames: Vec<(StepIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(StepIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SnowResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.order.reset();
        self.finished = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: StepIndex, frame: &FrameRGBA) -> SnowResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SnowError::validation("in-memory sink not started"))?;
        self.order.accept("in-memory", cfg, idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SnowResult<()> {
        if self.cfg.is_none() {
            return Err(SnowError::validation("in-memory sink not started"));
        }
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
