use std::num::NonZero;
use std::process;

use clap::{Parser, ValueEnum};
use lattice_link::{ColorLimits, GenerateError, Generator};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// One JSON array of rows per puzzle, followed by a comma
    Encoded,
    /// Puzzle rows as symbols, one line per row
    Text,
}

#[derive(Parser)]
#[command(name = "generator", about = "Generate Numberlink puzzles")]
struct Args {
    /// Puzzle width, and height unless --height is given
    size: usize,

    /// Puzzle height
    #[arg(long)]
    height: Option<usize>,

    /// Number of puzzles to generate
    #[arg(short = 'n', long, default_value_t = 600)]
    count: usize,

    /// Seed for the random source; random if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Give up on a puzzle after this many rejected grids
    #[arg(long)]
    max_attempts: Option<NonZero<usize>>,

    /// Fewest flows per puzzle
    #[arg(long, default_value_t = 2)]
    min_colors: usize,

    /// Most flows per puzzle
    #[arg(long, default_value_t = 9)]
    max_colors: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Encoded)]
    format: Format,

    /// Also print each solution
    #[arg(long)]
    solution: bool,

    /// Disable logging
    #[arg(long)]
    log_disable: bool,
}

fn init_logging(disable: bool) {
    use tracing_subscriber::EnvFilter;

    if disable {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), GenerateError> {
    let mut generator = Generator::new(args.size, args.height.unwrap_or(args.size))?;
    generator
        .color_limits(ColorLimits { min: args.min_colors, max: args.max_colors })
        .max_attempts(args.max_attempts);
    if let Some(seed) = args.seed {
        generator.seed(seed);
    }
    info!(seed = generator.current_seed(), count = args.count, "generating");

    for puzzle in generator.batch(args.count) {
        let puzzle = puzzle?;
        let rendered = puzzle.rendered();
        match args.format {
            Format::Encoded => {
                println!("{},", rendered.puzzle_json());
                if args.solution {
                    println!("{},", rendered.solution_json());
                }
            }
            Format::Text => {
                print!("{}", puzzle);
                if args.solution {
                    println!();
                    print!("{}", rendered.solution_string());
                }
                println!();
            }
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_disable);

    if let Err(error) = run(&args) {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}
