//! Error types for board construction and background solving.

use thiserror::Error;

/// Reasons a tile layout is rejected before it becomes a [`Board`](crate::engine::Board).
///
/// Every `Board` value is a permutation of `0..TILE_COUNT`, so these checks run once,
/// at the boundary, and nothing downstream has to re-validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected {expected} tiles, found {found}")]
    InvalidTileCount { expected: usize, found: usize },

    #[error("invalid number of rows: expected {expected}, found {found}")]
    InvalidRowCount { expected: usize, found: usize },

    #[error("row {row} has {found} tiles (expected {expected})")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized token '{token}' in row {row} col {col}")]
    InvalidToken {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("tile {value} is out of range (expected 0..={max})")]
    TileOutOfRange { value: usize, max: usize },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u8 },
}

/// Failures of the background solving thread itself, as opposed to search outcomes.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("search thread terminated without delivering a result")]
    Disconnected,

    #[error("search thread panicked: {0}")]
    Panicked(String),
}

/// A heuristic name that is not one of the known estimates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heuristic '{name}' (expected 'manhattan' or 'misplaced')")]
pub struct ParseHeuristicError {
    pub name: String,
}
