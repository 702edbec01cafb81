use crate::grid::{Grid, RegionID};
use crate::location::{Dimension, Location};

/// Partition a fresh grid into dominoes in a fixed pattern.
///
/// Pairs of rows are covered by vertical dominoes, left to right.
/// An odd last row is covered by horizontal dominoes, and if the area is odd its rightmost cell is left as a region of its own.
/// Every label is used once, so each region is exactly the domino (or lone cell) it was assigned to.
pub(crate) fn tile(dims: (Dimension, Dimension)) -> Grid {
    let (width, height) = (dims.0.get(), dims.1.get());
    let mut grid = Grid::with_dims(dims);
    let mut next: RegionID = 0;

    for y in (0..height - 1).step_by(2) {
        for x in 0..width {
            grid.set(Location(x, y), next);
            grid.set(Location(x, y + 1), next);
            next += 1;
        }
    }

    if height % 2 == 1 {
        for x in (0..width - 1).step_by(2) {
            grid.set(Location(x, height - 1), next);
            grid.set(Location(x + 1, height - 1), next);
            next += 1;
        }

        // merged into a neighbour after shuffling, see `odd_corner`
        if width % 2 == 1 {
            grid.set(Location(width - 1, height - 1), next);
        }
    }

    grid
}
