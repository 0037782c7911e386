use std::collections::BTreeSet;

use crate::foundation::core::Cell;

/// Cells the walker has visited so far. Grows monotonically for the whole run.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    visited: BTreeSet<Cell>,
}

impl Trail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Returns `false` when `cell` was already on the trail.
    pub fn mark_visited(&mut self, cell: Cell) -> bool {
        self.visited.insert(cell)
    }

    /// `true` when `cell` has been visited.
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    /// Number of distinct visited cells.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// `true` before the first step.
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Visited cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.visited.iter().copied()
    }
}
