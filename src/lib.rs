#![warn(missing_docs)]

//! # `lattice-link`
//!
//! A generator for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) puzzles as posited in the mobile game Flow Free.
//! Begin by constructing a [`Generator`] with the dimensions of the puzzles you want, optionally [seed](Generator::seed) it,
//! then call [`generate()`](Generator::generate) to receive a [`Puzzle`] and its solution.
//!
//! A puzzle is a rectangular grid in which every cell belongs to exactly one flow. Each flow is a path with two ends;
//! the ends are the numbered cells shown to the player, and every other cell is left [empty](EMPTY).
//!
//! # Internals
//! Generation never searches for a puzzle directly. Instead, it builds a random solution and refuses it if it would make a poor puzzle.
//!
//! A high level overview is as follows:
//!
//! 1. Tile the grid with dominoes in a fixed pattern. On a grid with odd area, the bottom right cell is left over.
//! 2. Shuffle the tiling by repeatedly flipping pairs of parallel dominoes sharing a 2x2 block.
//! 3. On an odd area, attach the leftover cell to a neighbouring domino, then break up runs of three side by side vertical dominoes.
//! 4. Visit cells in random order. From each end of a flow, keep joining the flow to a neighbouring region through one of that region's ends,
//! so long as the two regions touch nowhere else. This keeps flows from running alongside themselves.
//! 5. Relabel flows densely from zero.
//! 6. Refuse the grid if some flow has other than two ends, has its ends in one row or next to each other,
//! or if there are too few or too many flows. On refusal, start over from step 1.
//!
//! Nothing here proves a puzzle has a unique solution.

pub use error::GenerateError;
pub use generator::{Generator, Puzzle};
pub use grid::{Grid, RegionID};
pub use location::{Dimension, Location};
pub use render::{Rendered, ALPHABET, EMPTY};
pub use shape::SquareStep;
pub use validate::{ColorLimits, Rejection};

mod tests;
pub(crate) mod error;
pub(crate) mod flow;
pub(crate) mod generator;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod parity;
pub(crate) mod render;
pub(crate) mod shape;
pub(crate) mod shuffle;
pub(crate) mod tiler;
pub(crate) mod validate;
#[cfg(feature = "wasm")]
pub mod wasm;
