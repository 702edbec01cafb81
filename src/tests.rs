#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use itertools::Itertools;
    use ndarray::{arr2, Array2};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use unordered_pair::UnorderedPair;

    use crate::flow::{can_connect, find_flows};
    use crate::parity::{odd_corner, odd_domino};
    use crate::render::flatten;
    use crate::shuffle::shuffle;
    use crate::tiler::tile;
    use crate::validate::{check_colors, check_structure};
    use crate::{ColorLimits, GenerateError, Generator, Grid, Location, Puzzle, Rejection, Rendered, SquareStep, ALPHABET, EMPTY};

    fn dims(width: usize, height: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(width).unwrap(), NonZero::new(height).unwrap())
    }

    fn partitioned(width: usize, height: usize, seed: u64) -> Grid {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = tile(dims(width, height));
        shuffle(&mut grid, &mut rng);
        odd_corner(&mut grid);
        odd_domino(&mut grid, &mut rng);
        grid
    }

    const SIZES: [(usize, usize); 14] = [
        (2, 1), (1, 2), (5, 1), (1, 5), (2, 2), (3, 3), (4, 4), (5, 5),
        (4, 5), (5, 4), (7, 3), (3, 7), (6, 6), (9, 7),
    ];

    #[test]
    fn neighbors_stay_on_grid() {
        let grid = tile(dims(3, 3));
        assert_eq!(
            grid.neighbors_of(Location(0, 0)).collect_vec(),
            vec![(SquareStep::Right, Location(1, 0)), (SquareStep::Down, Location(0, 1))]
        );
        assert_eq!(grid.neighbors_of(Location(1, 1)).count(), 4);
        assert_eq!(grid.adjacent_pairs().count(), 12);
    }

    #[test]
    fn tile_even() {
        assert_eq!(format!("{}", tile(dims(4, 2))), "0123
0123
");
    }

    #[test]
    fn tile_odd_leaves_corner() {
        let grid = tile(dims(3, 3));
        assert_eq!(format!("{}", grid), "012
012
334
");
        assert_eq!(grid.region_sizes()[&4], 1);
    }

    #[test]
    fn tile_single_row() {
        let mut grid = tile(dims(2, 1));
        assert_eq!(format!("{}", grid), "00
");

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        shuffle(&mut grid, &mut rng);
        find_flows(&mut grid, &mut rng);
        assert_eq!(format!("{}", grid), "00
");
    }

    #[test]
    fn shuffle_keeps_dominoes() {
        let original = tile(dims(6, 4));
        for seed in 0..10 {
            let mut grid = original.clone();
            shuffle(&mut grid, &mut ChaCha8Rng::seed_from_u64(seed));

            assert_ne!(grid, original);
            assert!(grid.region_sizes().values().all(|size| *size == 2));
            assert!(grid.is_contiguous());
        }
    }

    #[test]
    fn shuffle_skips_thin_grids() {
        for (width, height) in [(6, 1), (1, 6)] {
            let mut grid = tile(dims(width, height));
            shuffle(&mut grid, &mut ChaCha8Rng::seed_from_u64(1));
            assert_eq!(grid, tile(dims(width, height)));
        }
    }

    #[test]
    fn odd_corner_joins_left() {
        let mut grid = tile(dims(3, 3));
        odd_corner(&mut grid);
        assert_eq!(format!("{}", grid), "012
012
333
");
    }

    #[test]
    fn odd_corner_joins_above() {
        let mut grid = Grid::from(arr2(&[[0, 0, 1], [2, 3, 1], [2, 3, 4]]));
        odd_corner(&mut grid);
        assert_eq!(format!("{}", grid), "001
231
231
");
    }

    #[test]
    fn odd_domino_splits_triple() {
        for seed in 0..8 {
            let mut grid = Grid::from(arr2(&[[0, 1, 2], [0, 1, 2]]));
            odd_domino(&mut grid, &mut ChaCha8Rng::seed_from_u64(seed));

            let printed = format!("{}", grid);
            assert!(printed == "000\n222\n" || printed == "002\n022\n", "{}", printed);
        }
    }

    #[test]
    fn odd_domino_keeps_corner_connected() {
        // the straight split would cut the right column in two
        for seed in 0..8 {
            let mut grid = Grid::from(arr2(&[[3, 3, 2], [0, 1, 2], [0, 1, 2]]));
            odd_domino(&mut grid, &mut ChaCha8Rng::seed_from_u64(seed));
            assert_eq!(format!("{}", grid), "332
002
022
");
        }
    }

    #[test]
    fn partition_after_parity() {
        for (width, height) in SIZES {
            for seed in 0..10 {
                let grid = partitioned(width, height, seed);
                assert!(grid.is_contiguous(), "{}x{} seed {}\n{}", width, height, seed, grid);
                assert!(grid.region_sizes().values().all(|size| *size >= 2), "{}x{} seed {}\n{}", width, height, seed, grid);
            }
        }
    }

    #[test]
    fn fill_and_follow() {
        let mut grid = Grid::from(arr2(&[[0, 0, 1], [2, 2, 1]]));
        assert_eq!(grid.fill(Location(2, 0), 0), 2);
        assert_eq!(format!("{}", grid), "000
220
");
        assert_eq!(grid.follow(Location(2, 0), Location(1, 0)), Location(2, 1));
        assert_eq!(grid.follow(Location(1, 0), Location(2, 0)), Location(0, 0));
    }

    #[test]
    fn connect_only_lone_edges() {
        let grid = Grid::from(arr2(&[[0, 0, 1, 1], [2, 2, 3, 3]]));
        assert!(can_connect(&grid, Location(1, 0), Location(2, 0)));
        // 0 and 2 also touch between (1, 0) and (1, 1)
        assert!(!can_connect(&grid, Location(0, 0), Location(0, 1)));
        assert!(!can_connect(&grid, Location(0, 0), Location(1, 0)));

        let grid = Grid::from(arr2(&[[0, 0, 0], [1, 1, 1]]));
        assert!(!can_connect(&grid, Location(1, 0), Location(1, 1)));
        assert!(!can_connect(&grid, Location(0, 0), Location(0, 1)));
    }

    #[test]
    fn flows_stay_contiguous() {
        for (width, height) in SIZES {
            for seed in 0..5 {
                let mut grid = partitioned(width, height, seed);
                let before = grid.region_count();
                find_flows(&mut grid, &mut ChaCha8Rng::seed_from_u64(seed + 100));

                assert!(grid.is_contiguous(), "{}x{} seed {}\n{}", width, height, seed, grid);
                assert!(grid.region_count() <= before);
            }
        }
    }

    #[test]
    fn flatten_compacts() {
        let mut grid = Grid::from(arr2(&[[7, 7, 3], [5, 5, 3]]));
        assert_eq!(flatten(&mut grid), 3);
        assert_eq!(format!("{}", grid), "001
221
");

        let flat = grid.clone();
        assert_eq!(flatten(&mut grid), 3);
        assert_eq!(grid, flat);
    }

    #[test]
    fn flatten_splits_disconnected() {
        let mut grid = Grid::from(arr2(&[[1, 0, 1]]));
        assert_eq!(flatten(&mut grid), 3);
        assert_eq!(format!("{}", grid), "012
");
    }

    #[test]
    fn reject_row_heads() {
        let grid = Grid::from(arr2(&[[0, 0, 0], [1, 1, 1]]));
        assert_eq!(check_structure(&grid), Err(Rejection::DuplicateRowHead { row: 0, region: 0 }));
    }

    #[test]
    fn reject_touching_heads() {
        let grid = Grid::from(arr2(&[[0, 1], [0, 1]]));
        assert_eq!(
            check_structure(&grid),
            Err(Rejection::TouchingHeads { region: 0, first: Location(0, 0), second: Location(0, 1) })
        );
    }

    #[test]
    fn reject_branching_flow() {
        let grid = Grid::from(arr2(&[[0, 1, 1], [0, 0, 1], [0, 1, 1]]));
        assert_eq!(check_structure(&grid), Err(Rejection::HeadCount { region: 0, heads: 3 }));
    }

    #[test]
    fn reject_color_counts() {
        let limits = ColorLimits::default();
        assert_eq!(
            check_colors(&Grid::from(arr2(&[[0, 0]])), limits),
            Err(Rejection::TooFewColors { colors: 1, minimum: 2 })
        );
        assert_eq!(
            check_colors(&Grid::from(arr2(&[[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]])), limits),
            Err(Rejection::TooManyColors { colors: 10, maximum: 9 })
        );
        assert_eq!(check_colors(&Grid::from(arr2(&[[0, 1, 2, 3, 4, 5, 6, 7, 8]])), limits), Ok(()));
    }

    #[test]
    fn render_small_puzzle() {
        let grid = Grid::from(arr2(&[[0, 0, 0], [1, 1, 0], [1, 0, 0]]));
        assert_eq!(check_structure(&grid), Ok(()));

        let rendered = Rendered::try_from(&grid).unwrap();
        assert_eq!(format!("{}", rendered), "0..
.1.
10.
");
        assert_eq!(rendered.solution_string(), "000
110
100
");
        assert_eq!(rendered.encode_puzzle(), vec![vec![1, 0, 0], vec![0, 2, 0], vec![2, 1, 0]]);
        assert_eq!(rendered.puzzle_json(), "[[1,0,0],[0,2,0],[2,1,0]]");
        assert_eq!(rendered.solution_json(), "[[1,1,1],[2,2,1],[2,1,1]]");
    }

    #[test]
    fn render_needs_symbols() {
        let grid = Grid::from(Array2::from_shape_fn((1, 93), |(_, x)| x));
        assert_eq!(
            Rendered::try_from(&grid),
            Err(GenerateError::AlphabetExceeded { regions: 93, available: 92 })
        );
    }

    #[test]
    fn alphabet_is_distinct() {
        assert_eq!(ALPHABET.len(), 92);
        assert!(ALPHABET.iter().all_unique());
        assert!(!ALPHABET.contains(&EMPTY));
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(Generator::new(1, 1).err(), Some(GenerateError::DegenerateInput { width: 1, height: 1 }));
        assert_eq!(Generator::new(0, 4).err(), Some(GenerateError::DegenerateInput { width: 0, height: 4 }));
        assert!(Generator::with_dims(dims(1, 1)).is_err());
        assert!(Generator::with_dims(dims(1, 2)).is_ok());
    }

    #[test]
    fn single_domino_never_accepted() {
        let mut generator = Generator::new(2, 1).unwrap();
        generator.seed(3);
        assert_eq!(
            generator.attempt().err(),
            Some(GenerateError::StructuralInvalid(Rejection::DuplicateRowHead { row: 0, region: 0 }))
        );

        generator.max_attempts(NonZero::new(25));
        assert_eq!(generator.generate().err(), Some(GenerateError::AttemptsExhausted(25)));
    }

    fn assert_puzzle(puzzle: &Puzzle, limits: ColorLimits) {
        let grid = puzzle.grid();
        let colors = puzzle.colors();

        assert!(grid.is_contiguous());
        assert!((limits.min..=limits.max).contains(&colors), "{} colors", colors);
        assert_eq!(grid.as_array().iter().copied().unique().sorted().collect_vec(), (0..colors).collect_vec());
        assert!(grid.heads_per_region().values().all(|heads| *heads == 2), "\n{}", grid);

        for row in 0..grid.height() {
            assert!(grid.flow_heads().filter(|head| head.1 == row).map(|head| grid[head]).all_unique());
        }
        for UnorderedPair(a, b) in grid.adjacent_pairs() {
            assert!(grid[a] != grid[b] || !(grid.is_flow_head(a) && grid.is_flow_head(b)));
        }

        let mut reflattened = grid.clone();
        assert_eq!(flatten(&mut reflattened), colors);
        assert_eq!(&reflattened, grid);

        let rendered = puzzle.rendered();
        for location in grid.locations() {
            let index = (location.1, location.0);
            assert_eq!(rendered.solution()[index], ALPHABET[grid[location]]);
            if grid.is_flow_head(location) {
                assert_eq!(rendered.puzzle()[index], rendered.solution()[index]);
            } else {
                assert_eq!(rendered.puzzle()[index], EMPTY);
            }
        }
    }

    #[test]
    fn generated_puzzles_are_valid() {
        for (width, height) in [(3, 3), (4, 4), (5, 5), (6, 4), (4, 7)] {
            let mut generator = Generator::new(width, height).unwrap();
            generator.seed((width * 31 + height) as u64).max_attempts(NonZero::new(10_000));

            for puzzle in generator.batch(3) {
                let puzzle = puzzle.unwrap();
                assert_eq!((puzzle.grid().width(), puzzle.grid().height()), (width, height));
                assert!(puzzle.attempts() >= 1);
                assert_puzzle(&puzzle, ColorLimits::default());
            }
        }
    }

    #[test]
    fn generation_respects_color_limits() {
        let limits = ColorLimits { min: 3, max: 9 };
        let mut generator = Generator::new(5, 5).unwrap();
        generator.seed(11).color_limits(limits).max_attempts(NonZero::new(10_000));

        for puzzle in generator.batch(2) {
            assert_puzzle(&puzzle.unwrap(), limits);
        }
    }

    #[test]
    fn seed_reproduces_puzzle() {
        let mut first = Generator::new(5, 5).unwrap();
        let mut second = Generator::new(5, 5).unwrap();
        first.seed(42);
        second.seed(42);
        assert_eq!(first.current_seed(), 42);

        let (a, b) = (first.generate().unwrap(), second.generate().unwrap());
        assert_eq!(format!("{}", a), format!("{}", b));
        assert_eq!(a.rendered().solution_string(), b.rendered().solution_string());
        assert_eq!(a.attempts(), b.attempts());
    }

    #[test]
    fn build_grid_is_flat() {
        let mut generator = Generator::new(6, 6).unwrap();
        generator.seed(5);
        for _ in 0..5 {
            let grid = generator.build_grid().unwrap();
            let regions = grid.region_count();
            assert!(grid.is_contiguous());
            assert_eq!(grid.as_array().iter().max(), Some(&(regions - 1)));
        }
    }
}
