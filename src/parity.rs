use itertools::iproduct;
use ndarray::s;
use rand::Rng;

use crate::grid::{Grid, RegionID};
use crate::location::Location;

/// Attach the lone bottom-right cell left by [`tile`](crate::tiler::tile) on an odd area to a neighbouring domino.
///
/// The domino to the left is used if it lies along the bottom row, otherwise the domino above, which must then be vertical.
pub(crate) fn odd_corner(grid: &mut Grid) {
    let (width, height) = (grid.width(), grid.height());
    if width % 2 == 0 || height % 2 == 0 {
        return;
    }

    let corner = Location(width - 1, height - 1);
    if width > 2 && grid[Location(width - 3, height - 1)] == grid[Location(width - 2, height - 1)] {
        // aax
        let region = grid[Location(width - 2, height - 1)];
        grid.set(corner, region);
    } else if height > 2 && grid[Location(width - 1, height - 3)] == grid[Location(width - 1, height - 2)] {
        // a
        // a
        // x
        let region = grid[Location(width - 1, height - 2)];
        grid.set(corner, region);
    }
}

/// Break up every run of three parallel vertical dominoes.
///
/// Each match
/// ```text
/// abc
/// abc
/// ```
/// is re-partitioned, picking at random, into either two straight or two bent triominoes:
/// ```text
/// aaa    aac
/// ccc or acc
/// ```
/// A shape which would leave some region disconnected is skipped in favour of the other.
pub(crate) fn odd_domino<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let (width, height) = (grid.width(), grid.height());
    if width < 3 || height < 2 {
        return;
    }

    for (y, x) in iproduct!(0..height - 1, 0..width - 2) {
        let block = grid.cells.slice(s![y..y + 2, x..x + 3]);
        let stacked = (0..3).all(|col| block[(0, col)] == block[(1, col)]);
        if !stacked || block[(0, 0)] == block[(0, 1)] || block[(0, 1)] == block[(0, 2)] {
            continue;
        }
        let (a, b, c) = (block[(0, 0)], block[(0, 1)], block[(0, 2)]);

        let straight = [
            (Location(x + 1, y), a),
            (Location(x + 2, y), a),
            (Location(x, y + 1), c),
            (Location(x + 1, y + 1), c),
        ];
        let bent = [(Location(x + 1, y), a), (Location(x + 1, y + 1), c)];
        let mut shapes: [&[(Location, RegionID)]; 2] = [&straight, &bent];
        if rng.gen_bool(0.5) {
            shapes.reverse();
        }

        for shape in shapes {
            let mut candidate = grid.clone();
            for (location, region) in shape {
                candidate.set(*location, *region);
            }

            if [a, b, c].into_iter().all(|region| is_intact(&candidate, region)) {
                *grid = candidate;
                break;
            }
        }
    }
}

// either gone entirely, or one connected piece of at least two cells
fn is_intact(grid: &Grid, region: RegionID) -> bool {
    let size = grid.cells.iter().filter(|cell| **cell == region).count();
    size == 0 || (size >= 2 && grid.is_region_contiguous(region))
}
