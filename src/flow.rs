use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use strum::VariantArray;
use tracing::trace;
use unordered_pair::UnorderedPair;

use crate::grid::Grid;
use crate::location::Location;
use crate::shape::SquareStep;

/// Grow the regions of a partitioned grid into flows.
///
/// Every cell is visited once in random order, and each cell which is a flow head at that moment is extended
/// by [`lay_flow`] for as long as it can be.
pub(crate) fn find_flows<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let mut order = grid.locations().collect_vec();
    order.shuffle(rng);

    for location in order {
        if grid.is_flow_head(location) {
            lay_flow(grid, location, rng);
        }
    }
}

/// Repeatedly join the flow ending at `head` to a neighbouring region, continuing from the far end of whatever was joined.
///
/// Directions are tried in random order and the first that [`can_connect`] is taken; there is no backtracking.
fn lay_flow<R: Rng>(grid: &mut Grid, mut head: Location, rng: &mut R) {
    let mut steps = SquareStep::VARIANTS.to_vec();
    loop {
        steps.shuffle(rng);
        let joined = steps.iter()
            .map(|step| step.attempt_from(head))
            .find(|neighbor| grid.contains(*neighbor) && can_connect(grid, head, *neighbor));

        let Some(neighbor) = joined else {
            return;
        };

        let region = grid[head];
        let merged = grid.fill(neighbor, region);
        let end = grid.follow(neighbor, head);
        trace!(?head, ?end, region, merged, "extended flow");
        head = end;
    }
}

/// Whether the regions of the adjacent cells `a` and `b` may be joined through the edge between them.
///
/// Both cells must be flow heads of different regions, and those regions must not already touch anywhere else;
/// otherwise the joined flow would run alongside itself.
/// This rescans the whole grid on every call.
pub(crate) fn can_connect(grid: &Grid, a: Location, b: Location) -> bool {
    let regions = UnorderedPair(grid[a], grid[b]);
    if regions.0 == regions.1 || !grid.is_flow_head(a) || !grid.is_flow_head(b) {
        return false;
    }

    let joining = UnorderedPair(a, b);
    !grid.adjacent_pairs()
        .filter(|pair| *pair != joining)
        .any(|UnorderedPair(p, q)| UnorderedPair(grid[p], grid[q]) == regions)
}
