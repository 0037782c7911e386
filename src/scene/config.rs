use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    assets::color::Color,
    foundation::core::{Canvas, Cell},
    foundation::error::{SnowError, SnowResult},
};

/// Tile and overlay colors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Uniform background fill.
    pub background: Color,
    /// Base tile color of every grid cell.
    pub tile: Color,
    /// Tile color of visited cells.
    pub trail: Color,
    /// Overlay text color.
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xee, 0xfa, 0xff),
            tile: Color::rgb(0xcd, 0xe6, 0xf7),
            trail: Color::rgb(0xbb, 0xde, 0xfb),
            text: Color::rgb(0x00, 0x4d, 0x40),
        }
    }
}

/// Everything tunable about a run. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Tile edge in pixels; the canvas is `cols * cell_px` by `rows * cell_px`.
    pub cell_px: u32,
    /// Display time of each frame in milliseconds.
    pub frame_delay_ms: u32,
    /// GIF quantizer speed, 1 (best) ..= 30 (fastest).
    pub gif_speed: i32,
    /// Seed for every random draw. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Number of randomly placed trees.
    pub tree_count: usize,
    /// Fixed shelter cells; cells outside the grid are skipped.
    pub shelters: Vec<Cell>,
    /// Snowflakes scattered over each frame.
    pub snowflake_count: usize,
    /// Downward drift of the snow field per step, in pixels.
    pub snow_fall_px_per_step: f64,
    /// Colors.
    pub palette: Palette,
    /// Prefix of the elapsed-time overlay (bottom left).
    pub elapsed_label: String,
    /// Prefix of the hit-counter overlay (top right).
    pub hits_label: String,
    /// Overlay font size in pixels.
    pub font_size_px: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cell_px: 32,
            frame_delay_ms: 400,
            gif_speed: 10,
            seed: None,
            tree_count: 6,
            shelters: vec![Cell::new(6, 0), Cell::new(5, 50), Cell::new(0, 25)],
            snowflake_count: 15,
            snow_fall_px_per_step: 2.0,
            palette: Palette::default(),
            elapsed_label: String::new(),
            hits_label: String::new(),
            font_size_px: 20.0,
        }
    }
}

impl SceneConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> SnowResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(text: &str) -> SnowResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| SnowError::validation(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> SnowResult<()> {
        if self.cell_px == 0 || self.cell_px > Canvas::MAX_SIDE {
            return Err(SnowError::validation(format!(
                "cell_px must be in 1..={}",
                Canvas::MAX_SIDE
            )));
        }
        if self.frame_delay_ms == 0 {
            return Err(SnowError::validation("frame_delay_ms must be > 0"));
        }
        if !(1..=30).contains(&self.gif_speed) {
            return Err(SnowError::validation("gif_speed must be in 1..=30"));
        }
        if !self.snow_fall_px_per_step.is_finite() {
            return Err(SnowError::validation("snow_fall_px_per_step must be finite"));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(SnowError::validation("font_size_px must be finite and > 0"));
        }
        Ok(())
    }

    /// Text of the bottom-left overlay.
    pub fn elapsed_text(&self, elapsed_secs: u64) -> String {
        labelled(&self.elapsed_label, format!("{elapsed_secs}s"))
    }

    /// Text of the top-right overlay.
    pub fn hits_text(&self, hits: usize) -> String {
        labelled(&self.hits_label, hits.to_string())
    }
}

fn labelled(label: &str, value: String) -> String {
    if label.is_empty() {
        value
    } else {
        format!("{label}: {value}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
