use anyhow::Result;
use clap::Parser;
use fifteen_solver::engine::Board;
use fifteen_solver::heuristics::Heuristic;
use fifteen_solver::solver::{SearchOptions, SearchOutcome, SearchResult};
use fifteen_solver::worker::spawn_solve;
use std::collections::HashMap;
use std::time::Duration;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search strategies on shuffled boards", long_about = None)]
struct Args {
    /// Number of shuffled boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Random moves applied to the goal for each board
    #[clap(short, long, default_value_t = 30)]
    shuffle: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Per-search deadline in milliseconds; slower searches are cancelled
    #[clap(short, long, default_value_t = 5000)]
    timeout_ms: u64,
}

#[derive(Debug, Default)]
struct Tally {
    solved: usize,
    cancelled: usize,
    failed: usize,
    total_moves: usize,
    total_nodes: usize,
    total_time: Duration,
}

impl Tally {
    fn record(&mut self, result: &SearchResult) {
        match &result.outcome {
            SearchOutcome::Success(path) => {
                self.solved += 1;
                self.total_moves += path.len() - 1;
                self.total_nodes += result.nodes_explored;
                self.total_time += result.elapsed;
            }
            SearchOutcome::Cancelled => self.cancelled += 1,
            // Shuffled boards are always solvable, so these point at a solver bug.
            SearchOutcome::Unsolvable | SearchOutcome::Exhausted => self.failed += 1,
        }
    }
}

fn run_with_deadline(
    board: Board,
    options: SearchOptions,
    deadline: Duration,
) -> Result<SearchResult> {
    let mut handle = spawn_solve(board, options);
    if let Some(result) = handle.wait_timeout(deadline)? {
        return Ok(result);
    }
    handle.cancel();
    Ok(handle.wait()?)
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter(
                    std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
                )),
        )
        .init();

    let args = Args::parse();
    let deadline = Duration::from_millis(args.timeout_ms);

    let strategies: Vec<(&str, SearchOptions)> = vec![
        ("A*/manhattan", SearchOptions::default()),
        (
            "A*/misplaced",
            SearchOptions::default().heuristic(Heuristic::MisplacedTiles),
        ),
        ("WA*1.5/manhattan", SearchOptions::default().weighted(1.5)),
        ("WA*3/manhattan", SearchOptions::default().weighted(3.0)),
        (
            "WA*3/misplaced",
            SearchOptions::default()
                .heuristic(Heuristic::MisplacedTiles)
                .weighted(3.0),
        ),
    ];

    let mut tallies: HashMap<&str, Tally> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards ({} shuffle moves)...",
        args.boards, args.shuffle
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let board = Board::new_shuffled_with_seed(current_seed, args.shuffle);
        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for (name, options) in &strategies {
            let result = run_with_deadline(board, *options, deadline)?;
            match &result.outcome {
                SearchOutcome::Success(path) => println!(
                    "  Strategy: {:<18} Moves: {:<4} Nodes: {:<9} Time: {:.1} ms",
                    name,
                    path.len() - 1,
                    result.nodes_explored,
                    result.elapsed.as_secs_f64() * 1000.0
                ),
                other => println!("  Strategy: {:<18} {:?}", name, other),
            }
            tallies.entry(*name).or_default().record(&result);
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages over solved boards ---");

    for (name, _) in &strategies {
        let Some(tally) = tallies.get(name) else {
            continue;
        };
        if tally.solved == 0 {
            println!(
                "Strategy {:<18}: no board solved ({} cancelled, {} failed)",
                name, tally.cancelled, tally.failed
            );
            continue;
        }
        let n = tally.solved as f64;
        println!(
            "Strategy {:<18}: Moves {:.2}, Nodes {:.0}, Time {:.2} ms, Cancelled {}, Failed {}",
            name,
            tally.total_moves as f64 / n,
            tally.total_nodes as f64 / n,
            tally.total_time.as_secs_f64() * 1000.0 / n,
            tally.cancelled,
            tally.failed
        );
    }
    Ok(())
}
