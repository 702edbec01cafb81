use strum::VariantArray;

use crate::location::Location;

/// The four steps between orthogonally adjacent cells of a rectangular grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    Up,
    Right,
    Down,
    Left,
}

impl SquareStep {
    /// Directions which, in row-major order, lead to a higher indexed cell.
    pub(crate) const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Attempt the step from `location` in this direction.
    ///
    /// The result is not bounds-checked; see [`Grid::contains`](crate::Grid::contains).
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Right => location.offset_by((1, 0)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
        }
    }
}
