use rand::Rng;

use crate::foundation::core::Cell;

/// Kind of non-interactive scenery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorKind {
    /// Fixed shelter, three cells wide.
    Shelter,
    /// Randomly placed tree.
    Tree,
}

/// One placed piece of scenery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoration {
    /// What to draw.
    pub kind: DecorKind,
    /// Anchor cell; the sprite is drawn one row above it.
    pub cell: Cell,
}

/// Scenery placement, chosen once before the first step and never changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecorationLayout {
    items: Vec<Decoration>,
}

impl DecorationLayout {
    /// Place the fixed `shelters` that fall inside a `rows x cols` grid, then `tree_count` trees
    /// on uniformly random cells. Trees may share cells with each other or with shelters.
    pub fn place<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        shelters: &[Cell],
        tree_count: usize,
        rng: &mut R,
    ) -> Self {
        let mut items: Vec<Decoration> = shelters
            .iter()
            .filter(|c| c.row < rows && c.col < cols)
            .map(|&cell| Decoration {
                kind: DecorKind::Shelter,
                cell,
            })
            .collect();

        items.extend((0..tree_count).map(|_| Decoration {
            kind: DecorKind::Tree,
            cell: Cell::new(rng.random_range(0..rows), rng.random_range(0..cols)),
        }));

        Self { items }
    }

    /// All placements: shelters first, then trees, which is also the draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.items.iter()
    }

    /// Placements of one kind.
    pub fn of_kind(&self, kind: DecorKind) -> impl Iterator<Item = Cell> + '_ {
        self.items
            .iter()
            .filter(move |d| d.kind == kind)
            .map(|d| d.cell)
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/decor.rs"]
mod tests;
