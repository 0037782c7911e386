use std::collections::HashMap;

use rand::Rng;

use crate::{
    foundation::core::{Cell, Point},
    grid::activity::ActivityGrid,
    scene::particle::{self, Particle},
};

/// A cell with positive activity that fires once when the walker reaches it.
#[derive(Clone, Debug)]
pub struct Trigger {
    cell: Cell,
    hit: bool,
    particles: Vec<Particle>,
}

impl Trigger {
    fn new(cell: Cell) -> Self {
        Self {
            cell,
            hit: false,
            particles: Vec::new(),
        }
    }

    /// Cell this trigger sits on.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// `true` once fired. Never goes back to `false`.
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Live particles of this trigger's burst.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Owns every trigger of a run and, through them, every burst particle.
#[derive(Clone, Debug)]
pub struct TriggerRegistry {
    triggers: Vec<Trigger>,
    by_cell: HashMap<Cell, usize>,
    cell_px: u32,
    hits: usize,
}

impl TriggerRegistry {
    /// One unfired trigger per cell with positive activity, in row-major order.
    pub fn from_grid(grid: &ActivityGrid, cell_px: u32) -> Self {
        let triggers: Vec<Trigger> = grid.active_cells().map(Trigger::new).collect();
        let by_cell = triggers
            .iter()
            .enumerate()
            .map(|(i, t)| (t.cell, i))
            .collect();
        Self {
            triggers,
            by_cell,
            cell_px,
            hits: 0,
        }
    }

    /// Visit `cell`: an unfired trigger there fires and spawns its burst.
    ///
    /// Returns `true` only on the visit that fired. Revisits and cells without a trigger are no-ops.
    pub fn visit<R: Rng + ?Sized>(&mut self, cell: Cell, rng: &mut R) -> bool {
        let Some(&i) = self.by_cell.get(&cell) else {
            return false;
        };
        let trigger = &mut self.triggers[i];
        if trigger.hit {
            return false;
        }

        trigger.hit = true;
        trigger.particles = particle::spawn_burst(burst_origin(cell, self.cell_px), rng);
        self.hits += 1;
        tracing::trace!(row = cell.row, col = cell.col, "trigger fired");
        true
    }

    /// Advance the particles of every trigger by one step.
    pub fn advance_particles(&mut self) {
        for t in &mut self.triggers {
            if !t.particles.is_empty() {
                particle::advance_particles(&mut t.particles);
            }
        }
    }

    /// Trigger on `cell`, if any.
    pub fn get(&self, cell: Cell) -> Option<&Trigger> {
        self.by_cell.get(&cell).map(|&i| &self.triggers[i])
    }

    /// All triggers, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.iter()
    }

    /// Number of triggers.
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// `true` when the grid had no activity at all.
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Number of triggers that have fired.
    pub fn hit_count(&self) -> usize {
        self.hits
    }
}

/// Particle sprites are half a cell wide and start centered over the cell's top edge.
fn burst_origin(cell: Cell, cell_px: u32) -> Point {
    let size = f64::from(cell_px);
    let origin = cell.origin_px(cell_px);
    Point::new(origin.x + size / 2.0 - size / 4.0, origin.y)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/trigger.rs"]
mod tests;
