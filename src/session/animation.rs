use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::core::{Cell, StepIndex},
    foundation::error::{SnowError, SnowResult},
    grid::activity::ActivityGrid,
    grid::path::zigzag_path,
    render::compositor::{FrameCompositor, FrameState},
    render::surface::FrameRGBA,
    scene::config::SceneConfig,
    scene::decor::DecorationLayout,
    scene::trail::Trail,
    scene::trigger::TriggerRegistry,
};

/// RNG for scenery placement and particle bursts.
pub(crate) fn scene_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// RNG for the per-frame snow field, independent of the scene stream.
pub(crate) fn ambient_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(1))
}

/// Mutable animation state, advanced one path step at a time.
///
/// Setup computes the path, one trigger per active cell, and the scenery layout. Each
/// [`Animation::advance`] then visits the next cell in a fixed order: trigger visit (which may
/// spawn a burst), trail mark, particle advance.
#[derive(Clone, Debug)]
pub struct Animation {
    grid: ActivityGrid,
    path: Vec<Cell>,
    next: usize,
    triggers: TriggerRegistry,
    trail: Trail,
    decorations: DecorationLayout,
    rng: StdRng,
    seed: u64,
}

impl Animation {
    /// Set up a run over `grid`. Equal seeds give equal scenery and bursts.
    pub fn new(grid: ActivityGrid, config: &SceneConfig, seed: u64) -> SnowResult<Self> {
        config.validate()?;
        let mut rng = scene_rng(seed);
        let path = zigzag_path(grid.rows(), grid.cols());
        let triggers = TriggerRegistry::from_grid(&grid, config.cell_px);
        let decorations = DecorationLayout::place(
            grid.rows(),
            grid.cols(),
            &config.shelters,
            config.tree_count,
            &mut rng,
        );
        tracing::debug!(
            steps = path.len(),
            triggers = triggers.len(),
            decorations = decorations.len(),
            seed,
            "animation set up"
        );

        Ok(Self {
            grid,
            path,
            next: 0,
            triggers,
            trail: Trail::new(),
            decorations,
            rng,
            seed,
        })
    }

    /// Execute the next step and return the cell it moved to, or `None` once the path is done.
    pub fn advance(&mut self) -> Option<Cell> {
        let cell = *self.path.get(self.next)?;
        self.triggers.visit(cell, &mut self.rng);
        self.trail.mark_visited(cell);
        self.triggers.advance_particles();
        self.next += 1;
        Some(cell)
    }

    /// Step most recently executed.
    pub fn step(&self) -> Option<StepIndex> {
        self.next.checked_sub(1).map(|s| StepIndex(s as u64))
    }

    /// Cell of the most recent step.
    pub fn current(&self) -> Option<Cell> {
        self.next.checked_sub(1).map(|s| self.path[s])
    }

    /// Number of steps in the whole run (one per cell).
    pub fn total_steps(&self) -> usize {
        self.path.len()
    }

    /// `true` once every cell has been visited.
    pub fn is_finished(&self) -> bool {
        self.next >= self.path.len()
    }

    /// Snapshot of the current step for compositing.
    pub fn frame_state(&self, elapsed: Duration) -> Option<FrameState<'_>> {
        Some(FrameState {
            step: self.step()?,
            current: self.current()?,
            triggers: &self.triggers,
            trail: &self.trail,
            decorations: &self.decorations,
            elapsed,
        })
    }

    /// Render the current step. Fails before the first [`Animation::advance`].
    pub fn compose<R: Rng + ?Sized>(
        &self,
        compositor: &FrameCompositor,
        elapsed: Duration,
        rng: &mut R,
    ) -> SnowResult<FrameRGBA> {
        let state = self
            .frame_state(elapsed)
            .ok_or_else(|| SnowError::validation("compose called before the first step"))?;
        compositor.compose(&state, rng)
    }

    /// Activity grid being walked.
    pub fn grid(&self) -> &ActivityGrid {
        &self.grid
    }

    /// Traversal order.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Trigger registry.
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    /// Visited cells.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Scenery layout.
    pub fn decorations(&self) -> &DecorationLayout {
        &self.decorations
    }

    /// Seed this run was set up with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/animation.rs"]
mod tests;
