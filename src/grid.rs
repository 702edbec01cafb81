use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use std::ops::Index;

use itertools::{iproduct, Itertools};
use ndarray::{Array2, ArrayView2};
use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::location::{Dimension, Location};
use crate::render::{print, ALPHABET};
use crate::shape::SquareStep;

/// Label shared by every cell of one region.
/// Only equality between labels is meaningful until the grid is [flattened](crate::Generator::build_grid).
pub type RegionID = usize;

/// A rectangular grid of cells, each labelled with the [`RegionID`] of the region it belongs to.
///
/// While a puzzle is being generated, regions start out as dominoes and are merged into flows.
/// A finished grid is the solution of its puzzle: every region is one flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub(crate) cells: Array2<RegionID>,
}

impl Grid {
    pub(crate) fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            cells: Array2::zeros((dims.1.get(), dims.0.get())),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// The underlying array, indexed `(y, x)`.
    pub fn as_array(&self) -> ArrayView2<'_, RegionID> {
        self.cells.view()
    }

    /// Whether `location` lies on this grid.
    pub fn contains(&self, location: Location) -> bool {
        location.0 < self.width() && location.1 < self.height()
    }

    pub(crate) fn set(&mut self, location: Location, region: RegionID) {
        self.cells[location.as_index()] = region;
    }

    /// Every location on the grid in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        iproduct!(0..self.height(), 0..self.width()).map(|(y, x)| Location(x, y))
    }

    /// The on-grid neighbours of `location` with the step leading to each.
    pub fn neighbors_of(&self, location: Location) -> impl Iterator<Item = (SquareStep, Location)> + '_ {
        SquareStep::VARIANTS.iter()
            .map(move |step| (*step, step.attempt_from(location)))
            .filter(move |(_, neighbor)| self.contains(*neighbor))
    }

    fn same_region_neighbors(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        let region = self[location];
        self.neighbors_of(location)
            .map(|(_, neighbor)| neighbor)
            .filter(move |neighbor| self[*neighbor] == region)
    }

    /// Whether `location` is a flow head, i.e. it has fewer than two neighbours in its own region.
    ///
    /// A finished flow has exactly two heads, which are the numbered cells of the puzzle.
    pub fn is_flow_head(&self, location: Location) -> bool {
        self.same_region_neighbors(location).count() < 2
    }

    /// Every flow head in row-major order.
    pub fn flow_heads(&self) -> impl Iterator<Item = Location> + '_ {
        self.locations().filter(move |location| self.is_flow_head(*location))
    }

    /// The number of flow heads of each region, including regions with none.
    pub fn heads_per_region(&self) -> HashMap<RegionID, usize> {
        let mut heads: HashMap<RegionID, usize> = self.cells.iter().map(|region| (*region, 0)).collect();
        for location in self.flow_heads() {
            *heads.entry(self[location]).or_default() += 1;
        }

        heads
    }

    /// Every pair of orthogonally adjacent locations, each pair listed once.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = UnorderedPair<Location>> + '_ {
        self.locations().flat_map(move |location| SquareStep::FORWARD_VARIANTS.iter()
            .map(move |step| step.attempt_from(location))
            .filter(move |neighbor| self.contains(*neighbor))
            .map(move |neighbor| UnorderedPair(location, neighbor)))
    }

    /// Number of distinct labels in use.
    pub fn region_count(&self) -> usize {
        self.cells.iter().unique().count()
    }

    /// Number of cells carrying each label.
    pub fn region_sizes(&self) -> HashMap<RegionID, usize> {
        self.cells.iter().copied().counts()
    }

    /// The cells reachable from `location` without leaving its region.
    pub fn region_cells(&self, location: Location) -> Vec<Location> {
        let mut seen = HashSet::from([location]);
        let mut stack = vec![location];
        while let Some(current) = stack.pop() {
            for neighbor in self.same_region_neighbors(current) {
                if seen.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        seen.into_iter().sorted().collect_vec()
    }

    /// Whether every cell labelled `region` is reachable from every other; vacuously true for unused labels.
    pub(crate) fn is_region_contiguous(&self, region: RegionID) -> bool {
        let cells = self.locations().filter(|location| self[*location] == region).collect_vec();
        match cells.first() {
            None => true,
            Some(first) => self.region_cells(*first).len() == cells.len(),
        }
    }

    /// Whether every label marks a single connected region.
    ///
    /// Cells are joined in a graph wherever orthogonal neighbours share a label;
    /// the grid is contiguous if that graph has exactly one component per label.
    pub fn is_contiguous(&self) -> bool {
        // each cell owns at most its right and lower edges
        let mut graph: UnGraphMap<Location, ()> = UnGraphMap::with_capacity(self.cells.len(), 2 * self.cells.len());
        for location in self.locations() {
            graph.add_node(location);
        }
        for UnorderedPair(a, b) in self.adjacent_pairs() {
            if self[a] == self[b] {
                graph.add_edge(a, b, ());
            }
        }

        connected_components(&graph) == self.region_count()
    }

    /// Relabel the region containing `location` as `region`, returning the number of cells changed.
    pub(crate) fn fill(&mut self, location: Location, region: RegionID) -> usize {
        let original = self[location];
        if original == region {
            return 0;
        }

        self.set(location, region);
        let mut filled = 1;
        let mut stack = vec![location];
        while let Some(current) = stack.pop() {
            let next = self.neighbors_of(current)
                .map(|(_, neighbor)| neighbor)
                .filter(|neighbor| self[*neighbor] == original)
                .collect_vec();
            for neighbor in next {
                self.set(neighbor, region);
                stack.push(neighbor);
                filled += 1;
            }
        }

        filled
    }

    /// Walk along the region from `location`, never stepping straight back, until the path ends.
    /// `previous` is the cell the walk is coming from.
    pub(crate) fn follow(&self, mut location: Location, mut previous: Location) -> Location {
        // a path cannot be longer than the grid
        for _ in 0..self.cells.len() {
            let region = self[location];
            let next = self.neighbors_of(location)
                .map(|(_, neighbor)| neighbor)
                .find(|neighbor| *neighbor != previous && self[*neighbor] == region);
            match next {
                Some(next) => {
                    previous = location;
                    location = next;
                }
                None => break,
            }
        }

        location
    }
}

impl From<Array2<RegionID>> for Grid {
    fn from(cells: Array2<RegionID>) -> Self {
        Self { cells }
    }
}

impl Index<Location> for Grid {
    type Output = RegionID;

    fn index(&self, location: Location) -> &Self::Output {
        &self.cells[location.as_index()]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // labels past the alphabet only occur before flattening
        write!(f, "{}", print(&self.cells.map(|region| ALPHABET.get(*region).copied().unwrap_or('#'))))
    }
}
