//! Board model for the 15-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: The four directions the blank can travel.
//! - `Board`: An immutable, validated 4x4 arrangement of tiles `1..=15` plus the blank,
//!   with successor generation, tile sliding and seeded shuffling.
use crate::error::BoardError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Side length of the (square) board.
pub const BOARD_SIZE: usize = 4;

/// Number of cells on the board, blank included.
pub const TILE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Value used for the blank cell.
pub const BLANK: u8 = 0;

/// A direction in which the blank moves.
///
/// Applying `Move::Up` swaps the blank with the tile directly above it, so that tile
/// visually slides down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in the order successors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// Returns the move that undoes this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifteen_solver::engine::Move;
    /// assert_eq!(Move::Up.opposite(), Move::Down);
    /// assert_eq!(Move::Left.opposite(), Move::Right);
    /// ```
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Single-letter form, handy for compact move listings.
    pub fn to_char(self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// Returns the cell a tile occupies in the goal layout.
///
/// Tiles `1..=15` sit in row-major order, the blank takes the last cell.
pub fn goal_position(tile: u8) -> (usize, usize) {
    if tile == BLANK {
        return (BOARD_SIZE - 1, BOARD_SIZE - 1);
    }
    let index = tile as usize - 1;
    (index / BOARD_SIZE, index % BOARD_SIZE)
}

/// A 15-puzzle configuration.
///
/// The grid is stored row-major and always holds each value of `0..TILE_COUNT` exactly
/// once: every constructor validates its input. Boards are small `Copy` values; moves
/// return new boards instead of mutating in place, so a `Board` can be used directly as
/// a hash map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The solved layout: `1..=15` row-major with the blank in the bottom-right corner.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Board;
    /// let goal = Board::goal();
    /// assert!(goal.is_goal());
    /// assert_eq!(goal.get_tile(0, 0), 1);
    /// assert_eq!(goal.locate_blank(), (3, 3));
    /// ```
    pub fn goal() -> Self {
        let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        for tile in 1..TILE_COUNT as u8 {
            let (r, c) = goal_position(tile);
            grid[r][c] = tile;
        }
        Board { grid }
    }

    /// Builds a board from a 2D grid, checking that it is a permutation of `0..TILE_COUNT`.
    ///
    /// # Returns
    /// * `Ok(Board)` when every value is in range and appears once.
    /// * `Err(BoardError::TileOutOfRange)` for a value above `TILE_COUNT - 1`.
    /// * `Err(BoardError::DuplicateTile)` when a value repeats (which also covers a
    ///   missing or doubled blank, since the grid has exactly `TILE_COUNT` cells).
    pub fn from_grid(grid: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, BoardError> {
        let mut seen = [false; TILE_COUNT];
        for row in &grid {
            for &value in row {
                let index = value as usize;
                if index >= TILE_COUNT {
                    return Err(BoardError::TileOutOfRange {
                        value: index,
                        max: TILE_COUNT - 1,
                    });
                }
                if seen[index] {
                    return Err(BoardError::DuplicateTile { value });
                }
                seen[index] = true;
            }
        }
        Ok(Board { grid })
    }

    /// Builds a board from a flat, row-major slice of `TILE_COUNT` values.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Board;
    /// let tiles: Vec<u8> = (1..16).chain(std::iter::once(0)).collect();
    /// assert_eq!(Board::from_tiles(&tiles).unwrap(), Board::goal());
    /// assert!(Board::from_tiles(&tiles[..15]).is_err());
    /// ```
    pub fn from_tiles(tiles: &[u8]) -> Result<Self, BoardError> {
        if tiles.len() != TILE_COUNT {
            return Err(BoardError::InvalidTileCount {
                expected: TILE_COUNT,
                found: tiles.len(),
            });
        }
        let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        for (index, &value) in tiles.iter().enumerate() {
            grid[index / BOARD_SIZE][index % BOARD_SIZE] = value;
        }
        Self::from_grid(grid)
    }

    /// Scrambles the goal with a seeded random walk of `steps` legal moves.
    ///
    /// The same seed and step count always give the same board, which keeps benchmarks
    /// and evaluation runs reproducible. Because only legal moves are applied, the result
    /// is always solvable.
    pub fn new_shuffled_with_seed(seed: u64, steps: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::shuffled(&mut rng, steps)
    }

    /// Scrambles the goal with a random walk of `steps` legal moves drawn from `rng`.
    ///
    /// The walk never immediately undoes its previous move.
    pub fn shuffled(rng: &mut impl Rng, steps: usize) -> Self {
        let mut board = Board::goal();
        let mut last_move: Option<Move> = None;
        for _ in 0..steps {
            let candidates: Vec<(Move, Board)> = board
                .successors()
                .into_iter()
                .filter(|(mv, _)| Some(mv.opposite()) != last_move)
                .collect();
            if let Some(&(mv, next)) = candidates.choose(rng) {
                board = next;
                last_move = Some(mv);
            }
        }
        board
    }

    /// Returns the value at row `r`, column `c` (`0` for the blank).
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board dimensions.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.grid[r][c]
    }

    /// Returns an immutable reference to the underlying grid.
    pub fn get_grid(&self) -> &[[u8; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Iterates over all values in row-major order, blank included.
    pub fn tiles(&self) -> impl Iterator<Item = u8> + '_ {
        self.grid.iter().flat_map(|row| row.iter().copied())
    }

    pub fn is_goal(&self) -> bool {
        *self == Board::goal()
    }

    /// Returns the `(row, col)` of the blank.
    pub fn locate_blank(&self) -> (usize, usize) {
        for (r, row) in self.grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == BLANK {
                    return (r, c);
                }
            }
        }
        unreachable!("validated board always holds exactly one blank")
    }

    /// Moves the blank one cell in direction `mv`.
    ///
    /// # Returns
    /// * `Some(Board)` with the blank and its neighbour swapped.
    /// * `None` if the blank would leave the grid.
    pub fn apply_move(&self, mv: Move) -> Option<Board> {
        let (r, c) = self.locate_blank();
        self.apply_move_from(r, c, mv)
    }

    fn apply_move_from(&self, r: usize, c: usize, mv: Move) -> Option<Board> {
        let (dr, dc) = mv.delta();
        let nr = r.checked_add_signed(dr).filter(|&v| v < BOARD_SIZE)?;
        let nc = c.checked_add_signed(dc).filter(|&v| v < BOARD_SIZE)?;

        let mut grid = self.grid;
        grid[r][c] = grid[nr][nc];
        grid[nr][nc] = BLANK;
        Some(Board { grid })
    }

    /// Generates every board reachable in one move.
    ///
    /// Neighbours come in the fixed order up, down, left, right (skipping moves that
    /// leave the grid), so searches expand them reproducibly.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::{Board, Move};
    /// let moves: Vec<Move> = Board::goal().successors().into_iter().map(|(m, _)| m).collect();
    /// assert_eq!(moves, vec![Move::Up, Move::Left]);
    /// ```
    pub fn successors(&self) -> Vec<(Move, Board)> {
        let (r, c) = self.locate_blank();
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply_move_from(r, c, mv).map(|next| (mv, next)))
            .collect()
    }

    /// Slides the tile at `(r, c)` into the blank, as a player clicking that tile would.
    ///
    /// # Returns
    /// * `Some(Board)` if `(r, c)` is orthogonally adjacent to the blank.
    /// * `None` if the cell is out of bounds, is the blank itself, or is not adjacent.
    pub fn slide_tile(&self, r: usize, c: usize) -> Option<Board> {
        if r >= BOARD_SIZE || c >= BOARD_SIZE {
            return None;
        }
        let (br, bc) = self.locate_blank();
        if br.abs_diff(r) + bc.abs_diff(c) != 1 {
            return None;
        }
        let mut grid = self.grid;
        grid[br][bc] = grid[r][c];
        grid[r][c] = BLANK;
        Some(Board { grid })
    }

    /// Finds the move that turns `self` into `next`, if they are one move apart.
    pub fn move_between(&self, next: &Board) -> Option<Move> {
        self.successors()
            .into_iter()
            .find(|(_, candidate)| candidate == next)
            .map(|(mv, _)| mv)
    }
}

impl fmt::Display for Board {
    /// Formats the board as a right-aligned grid with `.` for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            for &value in row {
                if value == BLANK {
                    write!(f, "{:>3}", ".")?;
                } else {
                    write!(f, "{:>3}", value)?;
                }
            }
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
