use crate::foundation::core::Cell;

/// Full-coverage column-major zig-zag traversal of a `rows x cols` grid.
///
/// Even columns run top to bottom, odd columns bottom to top, so consecutive steps are always
/// adjacent. The result has exactly `rows * cols` distinct cells and depends only on the inputs.
pub fn zigzag_path(rows: usize, cols: usize) -> Vec<Cell> {
    let mut out = Vec::with_capacity(rows * cols);
    for col in 0..cols {
        if col % 2 == 0 {
            out.extend((0..rows).map(|row| Cell::new(row, col)));
        } else {
            out.extend((0..rows).rev().map(|row| Cell::new(row, col)));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/grid/path.rs"]
mod tests;
