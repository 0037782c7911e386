use crate::foundation::core::Cell;
use crate::foundation::error::{SnowError, SnowResult};

/// Rectangular matrix of non-negative activity counts, immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ActivityGrid {
    rows: usize,
    cols: usize,
    counts: Vec<u32>,
}

impl ActivityGrid {
    /// Build a grid from row-major nested rows.
    ///
    /// Fails with [`SnowError::DataUnavailable`] when there are no rows, no columns, or the rows
    /// differ in length.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> SnowResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(SnowError::data_unavailable(
                "activity grid must have at least one row and one column",
            ));
        }
        if let Some((r, bad)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
            return Err(SnowError::data_unavailable(format!(
                "activity grid is not rectangular: row {r} has {} columns, expected {n_cols}",
                bad.len()
            )));
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            counts: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows (at least 1).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (at least 1).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Return `true` when `cell` lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Activity count at `cell`.
    ///
    /// Panics when `cell` is out of bounds; every caller derives cells from this grid.
    pub fn get(&self, cell: Cell) -> u32 {
        assert!(
            self.contains(cell),
            "cell ({}, {}) outside {}x{} grid",
            cell.row,
            cell.col,
            self.rows,
            self.cols
        );
        self.counts[cell.row * self.cols + cell.col]
    }

    /// Cells with a positive count, in row-major order.
    pub fn active_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(i, _)| Cell::new(i / self.cols, i % self.cols))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/activity.rs"]
mod tests;
