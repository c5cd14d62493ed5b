//! Parity test deciding whether a board can reach the goal at all.
//!
//! On a board of even width every move either keeps the inversion count (horizontal
//! moves) or changes it by an odd amount while also moving the blank to a row of the
//! other parity (vertical moves). The combined parity of inversions and blank row is
//! therefore fixed for a board's whole reachable component.
use crate::engine::{Board, BLANK, BOARD_SIZE};

/// Counts pairs `i < j` in the row-major, blank-free tile sequence with `tile[i] > tile[j]`.
pub fn count_inversions(board: &Board) -> usize {
    let flat: Vec<u8> = board.tiles().filter(|&t| t != BLANK).collect();
    flat.iter()
        .enumerate()
        .map(|(i, &a)| flat[i + 1..].iter().filter(|&&b| a > b).count())
        .sum()
}

/// Row of the blank counted from the bottom, starting at 1.
pub fn blank_row_from_bottom(board: &Board) -> usize {
    let (row, _) = board.locate_blank();
    BOARD_SIZE - row
}

/// Returns whether `board` can be turned into [`Board::goal`] by legal moves.
///
/// With the blank on an even row (counted from the bottom) the board is solvable iff
/// the inversion count is odd; on an odd row, iff it is even.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::solvability::is_solvable;
/// use fifteen_solver::utils::board_from_str_array;
///
/// assert!(is_solvable(&Board::goal()));
///
/// // The classic 14-15 swap.
/// let swapped =
///     board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12", "13 15 14 0"]).unwrap();
/// assert!(!is_solvable(&swapped));
/// ```
pub fn is_solvable(board: &Board) -> bool {
    let inversions = count_inversions(board);
    if blank_row_from_bottom(board) % 2 == 0 {
        inversions % 2 == 1
    } else {
        inversions % 2 == 0
    }
}
