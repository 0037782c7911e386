use std::collections::HashSet;

use super::*;

#[test]
fn three_by_three_matches_expected_order() {
    let got = zigzag_path(3, 3);
    let want: Vec<Cell> = [
        (0, 0),
        (1, 0),
        (2, 0),
        (2, 1),
        (1, 1),
        (0, 1),
        (0, 2),
        (1, 2),
        (2, 2),
    ]
    .into_iter()
    .map(|(r, c)| Cell::new(r, c))
    .collect();
    assert_eq!(got, want);
}

#[test]
fn covers_every_cell_exactly_once() {
    for rows in 1..6 {
        for cols in 1..6 {
            let path = zigzag_path(rows, cols);
            assert_eq!(path.len(), rows * cols);
            let unique: HashSet<Cell> = path.iter().copied().collect();
            assert_eq!(unique.len(), rows * cols);
            assert!(path.iter().all(|c| c.row < rows && c.col < cols));
        }
    }
}

#[test]
fn consecutive_steps_are_adjacent() {
    let path = zigzag_path(7, 53);
    for pair in path.windows(2) {
        let dr = pair[0].row.abs_diff(pair[1].row);
        let dc = pair[0].col.abs_diff(pair[1].col);
        assert_eq!(dr + dc, 1, "{:?} -> {:?}", pair[0], pair[1]);
    }
}

#[test]
fn is_pure() {
    assert_eq!(zigzag_path(4, 9), zigzag_path(4, 9));
}
