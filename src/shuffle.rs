use ndarray::s;
use rand::Rng;

use crate::grid::Grid;

/// Mix a domino tiling by flipping random pairs of parallel dominoes which share a 2x2 block.
///
/// Runs `(width * height)^2` trials; most land on a block which cannot be flipped and do nothing.
/// The grid stays a partition into dominoes (plus any lone corner cell) after every trial.
pub(crate) fn shuffle<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let (width, height) = (grid.width(), grid.height());
    if width == 1 || height == 1 {
        return;
    }

    for _ in 0..(width * height).pow(2) {
        let (x, y) = (rng.gen_range(0..width - 1), rng.gen_range(0..height - 1));
        let mut block = grid.cells.slice_mut(s![y..y + 2, x..x + 2]);
        let (a, b, c, d) = (block[(0, 0)], block[(0, 1)], block[(1, 0)], block[(1, 1)]);

        if a == b && c == d {
            // aa -> ac
            // cc    ac
            block[(1, 0)] = a;
            block[(0, 1)] = d;
        } else if a == c && b == d {
            // ab -> aa
            // ab    bb
            block[(0, 1)] = a;
            block[(1, 0)] = d;
        }
    }
}
