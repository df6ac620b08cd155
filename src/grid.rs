use std::cmp::max;

use rand::Rng;

use crate::{Coords, GridInt};

/// Size of the playable area, in cells. Both sides are at least one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: GridInt,
    height: GridInt,
}

impl Grid {
    pub fn new(width: GridInt, height: GridInt) -> Self {
        Grid { width: max(width, 1), height: max(height, 1) }
    }

    /// How many whole cells of `cell_w` x `cell_h` fit in a surface of the given size.
    pub fn fit(surface_w: u16, surface_h: u16, cell_w: u16, cell_h: u16) -> Self {
        let cols = surface_w / max(cell_w, 1);
        let rows = surface_h / max(cell_h, 1);
        Grid::new(cols as GridInt, rows as GridInt)
    }

    pub fn width(&self) -> GridInt {
        self.width
    }

    pub fn height(&self) -> GridInt {
        self.height
    }

    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.width && pos.1 < self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coords {
        (rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }
}
