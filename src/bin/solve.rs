use anyhow::{bail, Context, Result};
use clap::Parser;
use fifteen_solver::engine::Board;
use fifteen_solver::heuristics::Heuristic;
use fifteen_solver::solver::{SearchOptions, SearchOutcome, DEFAULT_WEIGHT};
use fifteen_solver::utils::board_from_text;
use fifteen_solver::worker::spawn_solve;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (4 lines of 4 whitespace-separated numbers, 0 is the blank)
    board_file: Option<PathBuf>,

    /// Shuffle the goal with this many random moves instead of reading a file
    #[clap(short, long, conflicts_with = "board_file")]
    shuffle: Option<usize>,

    /// Seed for --shuffle
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Distance estimate: manhattan or misplaced
    #[clap(long, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Use Weighted A* (faster, possibly non-optimal)
    #[clap(short, long)]
    weighted: bool,

    /// Heuristic weight for --weighted
    #[clap(long, default_value_t = DEFAULT_WEIGHT)]
    weight: f64,

    /// Cancel the search after this many milliseconds
    #[clap(short, long)]
    timeout_ms: Option<u64>,
}

fn read_board_file(path: &PathBuf) -> Result<Board> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    board_from_text(&content).with_context(|| format!("invalid board in {}", path.display()))
}

/// Builds the log filter from `RUST_LOG`-style directives, defaulting to `info`.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter(directives.as_deref())),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let board = match (&args.board_file, args.shuffle) {
        (Some(path), _) => {
            let board = read_board_file(path)?;
            println!("Loaded board from {}\n", path.display());
            board
        }
        (None, Some(steps)) => {
            println!("Shuffled {} moves with seed {}\n", steps, args.seed);
            Board::new_shuffled_with_seed(args.seed, steps)
        }
        (None, None) => bail!("provide a board file or --shuffle <MOVES>"),
    };

    let options = SearchOptions {
        heuristic: args.heuristic,
        weighted: args.weighted,
        weight: args.weight,
    };

    println!("Initial board state:\n{}\n", board);
    println!(
        "Searching with {} (weight {})...\n",
        options.heuristic,
        options.effective_weight()
    );

    let mut handle = spawn_solve(board, options);
    let early = match args.timeout_ms {
        Some(ms) => {
            let result = handle.wait_timeout(Duration::from_millis(ms))?;
            if result.is_none() {
                tracing::warn!("deadline of {} ms reached, cancelling", ms);
                handle.cancel();
            }
            result
        }
        None => None,
    };
    let result = match early {
        Some(result) => result,
        None => handle.wait()?,
    };

    match &result.outcome {
        SearchOutcome::Success(path) => {
            println!("Solution found:\n");
            println!("Moves ({}):", path.len() - 1);
            let moves = result.moves().unwrap_or_default();
            if moves.is_empty() {
                println!("  No moves needed.");
            } else {
                for (i, mv) in moves.iter().enumerate() {
                    println!("  Move {}: {}", i + 1, mv);
                }
                let compact: String = moves.iter().map(|m| m.to_char()).collect();
                println!("  Compact: {}", compact);
            }
        }
        SearchOutcome::Unsolvable => println!("This configuration cannot be solved.\n"),
        SearchOutcome::Cancelled => println!("Search cancelled before a solution was found.\n"),
        SearchOutcome::Exhausted => {
            bail!("search exhausted the frontier without reaching the goal")
        }
    }
    println!(
        "\nNodes explored: {}, time: {:.2} ms",
        result.nodes_explored,
        result.elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}
