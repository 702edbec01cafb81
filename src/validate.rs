use itertools::Itertools;
use strum::IntoStaticStr;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::grid::{Grid, RegionID};
use crate::location::Location;

/// Bounds on the number of colors, i.e. flows, in an accepted puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorLimits {
    /// Fewest flows allowed; a single flow is no puzzle at all.
    pub min: usize,
    /// Most flows allowed. The default keeps every flow a single digit.
    pub max: usize,
}

impl Default for ColorLimits {
    fn default() -> Self {
        Self { min: 2, max: 9 }
    }
}

/// Reasons a finished grid is refused as a puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Rejection {
    /// Both ends of one flow lie in the same row.
    #[error("row {row} holds two ends of flow {region}")]
    DuplicateRowHead { row: usize, region: RegionID },
    /// Two ends of one flow are next to each other.
    #[error("ends of flow {region} touch at {first:?} and {second:?}")]
    TouchingHeads { region: RegionID, first: Location, second: Location },
    /// A flow does not have exactly two ends.
    #[error("flow {region} has {heads} ends")]
    HeadCount { region: RegionID, heads: usize },
    /// Too few flows.
    #[error("{colors} colors, fewer than {minimum}")]
    TooFewColors { colors: usize, minimum: usize },
    /// Too many flows.
    #[error("{colors} colors, more than {maximum}")]
    TooManyColors { colors: usize, maximum: usize },
}

/// Check that each flow of `grid` has two ends, in different rows and not adjacent to one another.
pub(crate) fn check_structure(grid: &Grid) -> Result<(), Rejection> {
    for row in 0..grid.height() {
        let duplicate = (0..grid.width())
            .map(|x| Location(x, row))
            .filter(|location| grid.is_flow_head(*location))
            .map(|location| grid[location])
            .duplicates()
            .next();
        if let Some(region) = duplicate {
            return Err(Rejection::DuplicateRowHead { row, region });
        }
    }

    let touching = grid.adjacent_pairs()
        .find(|UnorderedPair(a, b)| grid[*a] == grid[*b] && grid.is_flow_head(*a) && grid.is_flow_head(*b));
    if let Some(UnorderedPair(first, second)) = touching {
        return Err(Rejection::TouchingHeads { region: grid[first], first, second });
    }

    let miscounted = grid.heads_per_region()
        .into_iter()
        .sorted()
        .find(|(_, heads)| *heads != 2);
    if let Some((region, heads)) = miscounted {
        return Err(Rejection::HeadCount { region, heads });
    }

    Ok(())
}

/// Check that the number of flows in `grid` lies within `limits`.
pub(crate) fn check_colors(grid: &Grid, limits: ColorLimits) -> Result<(), Rejection> {
    let colors = grid.region_count();
    if colors > limits.max {
        Err(Rejection::TooManyColors { colors, maximum: limits.max })
    } else if colors < limits.min {
        Err(Rejection::TooFewColors { colors, minimum: limits.min })
    } else {
        Ok(())
    }
}
