use std::fmt::{Display, Formatter};

use ndarray::{Array2, ArrayView2};

use crate::error::GenerateError;
use crate::grid::{Grid, RegionID};
use crate::location::Location;

/// Symbols used to print flows; a flattened region `n` prints as `ALPHABET[n]`.
pub const ALPHABET: [char; 92] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    '!', '"', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '/', ':', ';', '<', '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

/// Printed in place of every puzzle cell which is not the end of a flow.
pub const EMPTY: char = '.';

/// Relabel the regions of `grid` as `0..k` in the order they are first met in row-major order, returning `k`.
///
/// Labels are assigned by flood fill, so cells which share a label but are not connected end up in different regions.
/// Flattening a flattened grid changes nothing.
pub(crate) fn flatten(grid: &mut Grid) -> usize {
    let mut labels: Array2<Option<RegionID>> = Array2::from_elem(grid.cells.raw_dim(), None);
    let mut next = 0;

    for location in grid.locations() {
        if labels[location.as_index()].is_some() {
            continue;
        }
        for cell in grid.region_cells(location) {
            labels[cell.as_index()] = Some(next);
        }
        next += 1;
    }

    grid.cells = labels.mapv(|label| label.unwrap_or_default());
    next
}

/// Lay out `board` one row per line.
pub(crate) fn print(board: &Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}

/// The printable puzzle and solution of a finished grid.
///
/// The solution shows every cell's symbol; the puzzle shows symbols only at the ends of flows and [`EMPTY`] elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    puzzle: Array2<char>,
    solution: Array2<char>,
}

impl TryFrom<&Grid> for Rendered {
    type Error = GenerateError;

    /// Render a flattened grid. Fails if some label has no symbol in the [`ALPHABET`].
    fn try_from(grid: &Grid) -> Result<Self, Self::Error> {
        let symbols = grid.cells.map(|region| ALPHABET.get(*region).copied());
        if symbols.iter().any(Option::is_none) {
            return Err(GenerateError::AlphabetExceeded {
                regions: grid.region_count(),
                available: ALPHABET.len(),
            });
        }

        let solution = symbols.mapv(|symbol| symbol.unwrap_or(EMPTY));
        let puzzle = Array2::from_shape_fn(solution.raw_dim(), |index| {
            if grid.is_flow_head(Location::from(index)) { solution[index] } else { EMPTY }
        });

        Ok(Self { puzzle, solution })
    }
}

impl Rendered {
    /// The puzzle, indexed `(y, x)`.
    pub fn puzzle(&self) -> ArrayView2<'_, char> {
        self.puzzle.view()
    }

    /// The solution, indexed `(y, x)`.
    pub fn solution(&self) -> ArrayView2<'_, char> {
        self.solution.view()
    }

    /// The solution, one row per line.
    pub fn solution_string(&self) -> String {
        print(&self.solution)
    }

    /// The puzzle as rows of numbers: `0` for an empty cell, otherwise one more than the index of the symbol in the [`ALPHABET`].
    /// For digit symbols this is the digit plus one.
    pub fn encode_puzzle(&self) -> Vec<Vec<u32>> {
        encode(&self.puzzle)
    }

    /// The solution, numbered as in [`Self::encode_puzzle`].
    pub fn encode_solution(&self) -> Vec<Vec<u32>> {
        encode(&self.solution)
    }

    /// [`Self::encode_puzzle`] as a JSON array of arrays, e.g. `[[1,0,0],[0,2,0],[2,1,0]]`.
    pub fn puzzle_json(&self) -> String {
        serde_json::Value::from(self.encode_puzzle()).to_string()
    }

    /// [`Self::encode_solution`] as a JSON array of arrays.
    pub fn solution_json(&self) -> String {
        serde_json::Value::from(self.encode_solution()).to_string()
    }
}

fn encode(board: &Array2<char>) -> Vec<Vec<u32>> {
    board.rows()
        .into_iter()
        .map(|row| row.iter()
            .map(|symbol| ALPHABET.iter()
                .position(|candidate| candidate == symbol)
                .map_or(0, |index| index as u32 + 1))
            .collect())
        .collect()
}

impl Display for Rendered {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(&self.puzzle))
    }
}
