pub use kurbo::{Point, Rect, Vec2};

use crate::foundation::error::{SnowError, SnowResult};

/// Grid coordinate of one activity cell.
///
/// `row` indexes the weekday axis and `col` the week axis of a contribution calendar.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Cell {
    /// Row index (0-based, top to bottom).
    pub row: usize,
    /// Column index (0-based, left to right).
    pub col: usize,
}

impl Cell {
    /// Create a cell coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Top-left pixel corner of this cell for tiles of `cell_px` pixels.
    pub fn origin_px(self, cell_px: u32) -> Point {
        let size = f64::from(cell_px);
        Point::new(self.col as f64 * size, self.row as f64 * size)
    }

    /// Pixel rectangle covered by this cell, shifted by `rows_up` whole rows.
    ///
    /// Scenery anchors one row above its cell, so callers pass `rows_up = 1` for it.
    pub fn rect_px(self, cell_px: u32, rows_up: f64) -> Rect {
        let size = f64::from(cell_px);
        let origin = self.origin_px(cell_px) - Vec2::new(0.0, rows_up * size);
        Rect::from_origin_size(origin, (size, size))
    }
}

/// Index of one animation step; step `n` renders frame `n`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StepIndex(pub u64);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest side any sink can encode (GIF stores dimensions as `u16`).
    pub const MAX_SIDE: u32 = u16::MAX as u32;

    /// Canvas covering a `rows x cols` grid of `cell_px` tiles.
    ///
    /// Fails with [`SnowError::Validation`] when a side does not fit in `u32`.
    pub fn for_grid(rows: usize, cols: usize, cell_px: u32) -> SnowResult<Self> {
        let side = |cells: usize, axis: &str| {
            u32::try_from(cells)
                .ok()
                .and_then(|n| n.checked_mul(cell_px))
                .ok_or_else(|| {
                    SnowError::validation(format!(
                        "{cells} {axis} of {cell_px}px overflow the canvas size"
                    ))
                })
        };
        Ok(Self {
            width: side(cols, "columns")?,
            height: side(rows, "rows")?,
        })
    }

    /// Reject canvases wider or taller than [`Canvas::MAX_SIDE`].
    pub fn ensure_encodable(self) -> SnowResult<Self> {
        if self.width > Self::MAX_SIDE || self.height > Self::MAX_SIDE {
            return Err(SnowError::validation(format!(
                "canvas {}x{} exceeds {max}x{max}",
                self.width,
                self.height,
                max = Self::MAX_SIDE
            )));
        }
        Ok(self)
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
