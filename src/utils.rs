use crate::engine::{Board, BOARD_SIZE};
use crate::error::BoardError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from row 0, holding `BOARD_SIZE`
/// whitespace-separated integers. `0` marks the blank.
///
/// # Returns
/// * `Ok(Board)` if every row parses and the tiles form a permutation of `0..16`.
/// * `Err(BoardError)` if:
///     - The number of rows is not `BOARD_SIZE`.
///     - A row does not hold exactly `BOARD_SIZE` values.
///     - A token is not a non-negative integer.
///     - A value is out of range or repeated.
///
/// # Examples
/// ```
/// use fifteen_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&[
///     "1 2 3 4",
///     "5 6 7 8",
///     "9 10 11 12",
///     "13 14 0 15",
/// ]).unwrap();
/// assert_eq!(board.get_tile(3, 3), 15);
/// assert_eq!(board.locate_blank(), (3, 2));
///
/// assert!(board_from_str_array(&["1 2 3 4"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardError> {
    if s.len() != BOARD_SIZE {
        return Err(BoardError::InvalidRowCount {
            expected: BOARD_SIZE,
            found: s.len(),
        });
    }

    let mut grid = [[0u8; BOARD_SIZE]; BOARD_SIZE];

    for (r, row_str) in s.iter().enumerate() {
        let tokens: Vec<&str> = row_str.split_whitespace().collect();
        if tokens.len() != BOARD_SIZE {
            return Err(BoardError::InvalidRowLength {
                row: r,
                expected: BOARD_SIZE,
                found: tokens.len(),
            });
        }

        for (c, token) in tokens.iter().enumerate() {
            let value: usize = token.parse().map_err(|_| BoardError::InvalidToken {
                row: r,
                col: c,
                token: token.to_string(),
            })?;
            // Range is checked here so that large values are not truncated into valid ones.
            grid[r][c] = u8::try_from(value)
                .ok()
                .filter(|&v| (v as usize) < BOARD_SIZE * BOARD_SIZE)
                .ok_or(BoardError::TileOutOfRange {
                    value,
                    max: BOARD_SIZE * BOARD_SIZE - 1,
                })?;
        }
    }

    Board::from_grid(grid)
}

/// Parses a whole board description, ignoring blank lines and surrounding whitespace.
///
/// This is the format read by the `solve` binary: one row per line.
pub fn board_from_text(text: &str) -> Result<Board, BoardError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board =
            board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12", "13 14 15 0"]).unwrap();
        assert_eq!(board, Board::goal());
    }

    #[test]
    fn test_board_from_str_array_extra_whitespace() {
        let board =
            board_from_str_array(&["  1  2  3  4", "5\t6 7 8 ", "9 10 11 12", "13 14 15 0"])
                .unwrap();
        assert_eq!(board, Board::goal());
    }

    #[test]
    fn test_board_from_str_array_invalid_token() {
        let result = board_from_str_array(&["1 2 3 X", "5 6 7 8", "9 10 11 12", "13 14 15 0"]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unrecognized token 'X'"));
        assert_eq!(
            err,
            BoardError::InvalidToken {
                row: 0,
                col: 3,
                token: "X".to_string()
            }
        );
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let result = board_from_str_array(&["1 2 3 4 5", "6 7 8 9", "10 11 12 13", "14 15 0 1"]);
        assert_eq!(
            result,
            Err(BoardError::InvalidRowLength {
                row: 0,
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn test_board_from_str_array_wrong_row_count() {
        let result = board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12"]);
        assert!(result.unwrap_err().to_string().contains("invalid number of rows"));
    }

    #[test]
    fn test_board_from_str_array_out_of_range() {
        let result = board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12", "13 14 15 300"]);
        assert_eq!(
            result,
            Err(BoardError::TileOutOfRange {
                value: 300,
                max: 15
            })
        );
    }

    #[test]
    fn test_board_from_str_array_missing_blank() {
        let result = board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12", "13 14 15 15"]);
        assert_eq!(result, Err(BoardError::DuplicateTile { value: 15 }));
    }

    #[test]
    fn test_board_from_text_skips_blank_lines() {
        let text = "\n1 2 3 4\n5 6 7 8\n\n9 10 11 12\n13 14 0 15\n";
        let board = board_from_text(text).unwrap();
        assert_eq!(board.locate_blank(), (3, 2));
    }
}
