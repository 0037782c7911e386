use crate::foundation::core::{Rect, StepIndex};
use crate::foundation::error::{SnowError, SnowResult};

/// Grid layout of equally sized frames inside a sprite sheet image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    /// Frame width in pixels.
    pub frame_width: u32,
    /// Frame height in pixels.
    pub frame_height: u32,
    /// Frames per sheet row.
    pub columns: u32,
    /// Sheet rows.
    pub rows: u32,
}

impl SpriteSheet {
    /// Sheet with explicit frame size.
    pub fn new(frame_width: u32, frame_height: u32, columns: u32, rows: u32) -> SnowResult<Self> {
        if frame_width == 0 || frame_height == 0 {
            return Err(SnowError::validation("sprite frame size must be non-zero"));
        }
        if columns == 0 || rows == 0 {
            return Err(SnowError::validation(
                "sprite sheet must have at least one row and column",
            ));
        }
        Ok(Self {
            frame_width,
            frame_height,
            columns,
            rows,
        })
    }

    /// Sheet whose `columns x rows` frames evenly divide an `image_width x image_height` image.
    ///
    /// Frame sizes round down, so trailing pixels of an uneven sheet are ignored.
    pub fn split(image_width: u32, image_height: u32, columns: u32, rows: u32) -> SnowResult<Self> {
        if columns == 0 || rows == 0 {
            return Err(SnowError::validation(
                "sprite sheet must have at least one row and column",
            ));
        }
        Self::new(image_width / columns, image_height / rows, columns, rows)
    }

    /// Total number of frames.
    pub fn frame_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Frame shown at `step` when cycling through the whole sheet.
    pub fn frame_for_step(&self, step: StepIndex) -> u32 {
        (step.0 % u64::from(self.frame_count())) as u32
    }

    /// Pixel offset of frame `index`: column `index % columns`, row `index / columns`.
    pub fn frame_offset(&self, index: u32) -> (u32, u32) {
        let col = index % self.columns;
        let row = index / self.columns;
        (col * self.frame_width, row * self.frame_height)
    }

    /// Source rectangle of frame `index`.
    pub fn frame_rect(&self, index: u32) -> Rect {
        let (x, y) = self.frame_offset(index);
        Rect::new(
            f64::from(x),
            f64::from(y),
            f64::from(x + self.frame_width),
            f64::from(y + self.frame_height),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sprite.rs"]
mod tests;
