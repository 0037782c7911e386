use std::time::Duration;

use rand::Rng;

use crate::{
    assets::store::{PreparedImage, SceneAssets, names},
    foundation::core::{Canvas, Cell, Point, Rect, StepIndex},
    foundation::error::{SnowError, SnowResult},
    grid::activity::ActivityGrid,
    render::sprite::SpriteSheet,
    render::surface::FrameRGBA,
    render::text::{TextAnchor, TextRun, draw_text},
    scene::config::SceneConfig,
    scene::decor::{DecorKind, DecorationLayout},
    scene::snow::scatter_snow,
    scene::trail::Trail,
    scene::trigger::TriggerRegistry,
};

/// Character walk-cycle sheet layout.
pub const CHARACTER_SHEET_COLUMNS: u32 = 8;
/// Character walk-cycle sheet layout.
pub const CHARACTER_SHEET_ROWS: u32 = 11;

const SHELTER_SOURCE_PX: (u32, u32) = (192, 64);
const SHELTER_SIZE_CELLS: (f64, f64) = (3.0, 1.0);
const TREE_SOURCE_PX: u32 = 110;
const TREE_FRAME: u32 = 0;
const TREE_SIZE_CELLS: f64 = 1.5;
const SNOWFLAKE_PX: u32 = 9;
const SNOWFLAKE_SHEET: (u32, u32) = (6, 3);
const PARTICLE_SIZE_CELLS: f64 = 0.5;
const TEXT_MARGIN_PX: f64 = 10.0;
const HITS_BASELINE_PX: f64 = 25.0;

/// Read-only view of the animation state at one step.
#[derive(Clone, Copy, Debug)]
pub struct FrameState<'a> {
    /// Step being rendered.
    pub step: StepIndex,
    /// Cell the character stands on.
    pub current: Cell,
    /// Trigger registry after this step's visit and particle advance.
    pub triggers: &'a TriggerRegistry,
    /// Trail including the current cell.
    pub trail: &'a Trail,
    /// Scenery placement.
    pub decorations: &'a DecorationLayout,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
}

/// Turns a [`FrameState`] into pixels.
///
/// Compositing never mutates animation state. Its only randomness is the per-frame snow field,
/// drawn from the caller's RNG.
#[derive(Clone, Debug)]
pub struct FrameCompositor {
    config: SceneConfig,
    assets: SceneAssets,
    canvas: Canvas,
    base: FrameRGBA,
    character: SpriteSheet,
    shelter: SpriteSheet,
    trees: SpriteSheet,
    snowflakes: SpriteSheet,
}

impl FrameCompositor {
    /// Prepare a compositor for `grid`, pre-rendering the static background and tile layers.
    ///
    /// The canvas size is checked before any pixel buffer is allocated.
    pub fn new(config: &SceneConfig, assets: SceneAssets, grid: &ActivityGrid) -> SnowResult<Self> {
        config.validate()?;
        let canvas =
            Canvas::for_grid(grid.rows(), grid.cols(), config.cell_px)?.ensure_encodable()?;

        let character = SpriteSheet::split(
            assets.character.width,
            assets.character.height,
            CHARACTER_SHEET_COLUMNS,
            CHARACTER_SHEET_ROWS,
        )
        .map_err(|e| SnowError::asset_missing(format!("{}: {e}", names::CHARACTER)))?;
        let shelter = SpriteSheet::new(SHELTER_SOURCE_PX.0, SHELTER_SOURCE_PX.1, 1, 1)?;
        let trees = SpriteSheet::new(TREE_SOURCE_PX, TREE_SOURCE_PX, 1, 1)?;
        let snowflakes = SpriteSheet::new(
            SNOWFLAKE_PX,
            SNOWFLAKE_PX,
            SNOWFLAKE_SHEET.0,
            SNOWFLAKE_SHEET.1,
        )?;

        let mut base = FrameRGBA::new(canvas, config.palette.background.to_premul());
        let tile = config.palette.tile.to_premul();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                base.fill_rect(Cell::new(row, col).rect_px(config.cell_px, 0.0), tile)?;
            }
        }

        Ok(Self {
            config: config.clone(),
            assets,
            canvas,
            base,
            character,
            shelter,
            trees,
            snowflakes,
        })
    }

    /// Output frame size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Configuration this compositor renders with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Render one frame. Later layers occlude earlier ones:
    ///
    /// background, tiles, trail, unopened blocks, burst particles, scenery, character, snow, text.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        state: &FrameState<'_>,
        rng: &mut R,
    ) -> SnowResult<FrameRGBA> {
        let cell_px = self.config.cell_px;
        let cell = f64::from(cell_px);
        let mut out = self.base.clone();

        let trail = self.config.palette.trail.to_premul();
        for c in state.trail.iter() {
            out.fill_rect(c.rect_px(cell_px, 0.0), trail)?;
        }

        let block = &self.assets.block;
        for t in state.triggers.iter().filter(|t| !t.is_hit()) {
            out.draw_image_region(block, full_rect(block), t.cell().rect_px(cell_px, 0.0), 1.0)?;
        }

        let coin = &self.assets.coin;
        let coin_px = cell * PARTICLE_SIZE_CELLS;
        for p in state.triggers.iter().flat_map(|t| t.particles()) {
            let dst = Rect::from_origin_size(p.pos, (coin_px, coin_px));
            out.draw_image_region(coin, full_rect(coin), dst, p.alpha as f32)?;
        }

        for d in state.decorations.iter() {
            let anchor = d.cell.rect_px(cell_px, 1.0).origin();
            let (image, src, size) = match d.kind {
                DecorKind::Shelter => (
                    &self.assets.shelter,
                    self.shelter.frame_rect(0),
                    (SHELTER_SIZE_CELLS.0 * cell, SHELTER_SIZE_CELLS.1 * cell),
                ),
                DecorKind::Tree => (
                    &self.assets.trees,
                    self.trees.frame_rect(TREE_FRAME),
                    (TREE_SIZE_CELLS * cell, TREE_SIZE_CELLS * cell),
                ),
            };
            out.draw_image_region(image, src, Rect::from_origin_size(anchor, size), 1.0)?;
        }

        let frame = self.character.frame_for_step(state.step);
        out.draw_image_region(
            &self.assets.character,
            self.character.frame_rect(frame),
            state.current.rect_px(cell_px, 0.0),
            1.0,
        )?;

        let flakes = scatter_snow(
            self.config.snowflake_count,
            self.canvas,
            state.step,
            self.config.snow_fall_px_per_step,
            self.snowflakes.frame_count(),
            rng,
        );
        let flake_px = f64::from(SNOWFLAKE_PX);
        for f in flakes {
            out.draw_image_region(
                &self.assets.snowflakes,
                self.snowflakes.frame_rect(f.variant),
                Rect::from_origin_size(f.pos, (flake_px, flake_px)),
                1.0,
            )?;
        }

        draw_text(
            &mut out,
            &self.overlay_runs(state),
            self.config.font_size_px,
            self.config.palette.text,
            &self.assets.fontdb,
        )?;

        Ok(out)
    }

    /// The two text overlays: elapsed time bottom-left, fired-trigger count top-right.
    pub fn overlay_runs(&self, state: &FrameState<'_>) -> [TextRun; 2] {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        [
            TextRun {
                text: self.config.elapsed_text(state.elapsed.as_secs()),
                pos: Point::new(TEXT_MARGIN_PX, h - TEXT_MARGIN_PX),
                anchor: TextAnchor::Start,
            },
            TextRun {
                text: self.config.hits_text(state.triggers.hit_count()),
                pos: Point::new(w - TEXT_MARGIN_PX, HITS_BASELINE_PX),
                anchor: TextAnchor::End,
            },
        ]
    }
}

fn full_rect(image: &PreparedImage) -> Rect {
    Rect::new(0.0, 0.0, f64::from(image.width), f64::from(image.height))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
