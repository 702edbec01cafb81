use std::fmt::{Display, Formatter};
use std::num::NonZero;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::error::GenerateError;
use crate::flow::find_flows;
use crate::grid::Grid;
use crate::location::Dimension;
use crate::parity::{odd_corner, odd_domino};
use crate::render::{flatten, Rendered, ALPHABET};
use crate::shuffle::shuffle;
use crate::tiler::tile;
use crate::validate::{check_colors, check_structure, ColorLimits};

/// An accepted puzzle together with its solution.
#[derive(Clone, Debug)]
pub struct Puzzle {
    grid: Grid,
    rendered: Rendered,
    attempts: usize,
}

impl Puzzle {
    /// The solved grid, with flows labelled `0..colors`.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The printable puzzle and solution.
    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    /// The number of flows.
    pub fn colors(&self) -> usize {
        self.grid.region_count()
    }

    /// How many grids were generated, including this one, before one was accepted.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rendered)
    }
}

/// Generates puzzles of one size, retrying from scratch until a grid passes validation.
///
/// Configuration methods mutate the generator in place and may be chained.
/// Every generator owns its own random source, seeded from the OS unless [`Self::seed`] is called.
pub struct Generator {
    dims: (Dimension, Dimension),
    rng: ChaCha8Rng,
    seed: u64,
    color_limits: ColorLimits,
    max_attempts: Option<NonZero<usize>>,
}

impl Generator {
    /// Construct a generator for puzzles `dims.0` wide and `dims.1` tall.
    ///
    /// Fails with [`DegenerateInput`](GenerateError::DegenerateInput) for a 1x1 grid.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Result<Self, GenerateError> {
        let (width, height) = (dims.0.get(), dims.1.get());
        if width == 1 && height == 1 {
            return Err(GenerateError::DegenerateInput { width, height });
        }

        let seed: u64 = rand::random();
        debug!(width, height, seed, "seeded generator");
        Ok(Self {
            dims,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            color_limits: Default::default(),
            max_attempts: None,
        })
    }

    /// As [`Self::with_dims`], additionally failing with [`DegenerateInput`](GenerateError::DegenerateInput) for a zero dimension.
    pub fn new(width: usize, height: usize) -> Result<Self, GenerateError> {
        match (NonZero::new(width), NonZero::new(height)) {
            (Some(width), Some(height)) => Self::with_dims((width, height)),
            _ => Err(GenerateError::DegenerateInput { width, height }),
        }
    }

    /// Restart the random source from `seed`. Generators with the same seed and configuration produce the same puzzles.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// The seed the random source was last started from.
    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    /// Set the number of flows an accepted puzzle may have.
    pub fn color_limits(&mut self, limits: ColorLimits) -> &mut Self {
        self.color_limits = limits;
        self
    }

    /// Give up after this many rejected grids, or never if `None` (the default).
    ///
    /// Some sizes, such as 2x1, never yield an acceptable grid, so an unbounded generator would loop forever on them.
    pub fn max_attempts(&mut self, max_attempts: Option<NonZero<usize>>) -> &mut Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Width and height of generated puzzles.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Run the generation pipeline once, without validation, returning the flattened grid.
    ///
    /// The grid is tiled with dominoes, shuffled, repaired where the area is odd, and grown into flows.
    /// Fails with [`AlphabetExceeded`](GenerateError::AlphabetExceeded) if it has too many regions to print.
    pub fn build_grid(&mut self) -> Result<Grid, GenerateError> {
        let mut grid = tile(self.dims);
        shuffle(&mut grid, &mut self.rng);
        odd_corner(&mut grid);
        odd_domino(&mut grid, &mut self.rng);
        trace!(regions = grid.region_count(), "partitioned grid");

        find_flows(&mut grid, &mut self.rng);
        let regions = flatten(&mut grid);
        trace!(regions, "laid flows");
        if regions > ALPHABET.len() {
            return Err(GenerateError::AlphabetExceeded { regions, available: ALPHABET.len() });
        }

        Ok(grid)
    }

    /// Build and validate a single grid.
    pub fn attempt(&mut self) -> Result<Puzzle, GenerateError> {
        let grid = self.build_grid()?;
        check_structure(&grid)?;
        check_colors(&grid, self.color_limits)?;
        let rendered = Rendered::try_from(&grid)?;

        Ok(Puzzle { grid, rendered, attempts: 1 })
    }

    /// Build grids until one is accepted.
    ///
    /// Rejected grids are discarded whole. Without [`Self::max_attempts`] this does not return until a puzzle is found.
    pub fn generate(&mut self) -> Result<Puzzle, GenerateError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt() {
                Ok(mut puzzle) => {
                    puzzle.attempts = attempts;
                    info!(attempts, colors = puzzle.colors(), "generated puzzle");
                    return Ok(puzzle);
                }
                Err(GenerateError::StructuralInvalid(rejection)) => {
                    let reason: &'static str = rejection.into();
                    debug!(attempts, reason, %rejection, "rejected grid");
                }
                Err(error @ GenerateError::AlphabetExceeded { .. }) => debug!(attempts, %error, "rejected grid"),
                Err(error) => return Err(error),
            }

            if self.max_attempts.is_some_and(|max| attempts >= max.get()) {
                return Err(GenerateError::AttemptsExhausted(attempts));
            }
        }
    }

    /// Generate `count` puzzles one after another.
    pub fn batch(&mut self, count: usize) -> impl Iterator<Item = Result<Puzzle, GenerateError>> + '_ {
        (0..count).map(move |_| self.generate())
    }
}
