//! # Fifteen Solver Library
//!
//! This library provides the board model for the 15-puzzle and an A* / Weighted A*
//! search that finds a move sequence to the solved layout.
//!
//! It is used by two binaries:
//! - `solve`: Loads or shuffles a board, solves it in the background (optionally with a
//!   deadline that cancels the search) and prints the move sequence.
//! - `heuristic_evaluator`: Compares heuristic and weighting choices over a batch of
//!   seeded shuffled boards.
//!
//! ## Modules
//! - `engine`: The immutable `Board`, `Move`, successor generation, sliding and shuffling.
//! - `heuristics`: Manhattan distance and misplaced-tile estimates, selectable via `Heuristic`.
//! - `solvability`: The inversion/blank-row parity test.
//! - `cancel`: `CancellationToken`, the stop flag shared with a running search.
//! - `solver`: `solve`, `SearchOptions` and `SearchResult`.
//! - `worker`: Runs `solve` on a separate thread and hands back its result.
//! - `utils`: Parsing boards from text.
//! - `error`: Error types.

pub mod cancel;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solvability;
pub mod solver;
pub mod utils;
pub mod worker;
