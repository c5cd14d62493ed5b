use crate::engine::{goal_position, Board, BLANK};
use crate::error::ParseHeuristicError;
use std::fmt;
use std::str::FromStr;

/// Sums, over all non-blank tiles, the grid distance between a tile and its goal cell.
///
/// Each move shifts exactly one tile by one cell, so this never overestimates the
/// remaining number of moves, and it changes by exactly one per move (consistent).
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::heuristics::manhattan_distance;
/// assert_eq!(manhattan_distance(&Board::goal()), 0);
/// ```
pub fn manhattan_distance(board: &Board) -> u32 {
    let mut distance = 0;
    for (r, row) in board.get_grid().iter().enumerate() {
        for (c, &tile) in row.iter().enumerate() {
            if tile != BLANK {
                let (target_r, target_c) = goal_position(tile);
                distance += (r.abs_diff(target_r) + c.abs_diff(target_c)) as u32;
            }
        }
    }
    distance
}

/// Counts the non-blank tiles that are not on their goal cell.
///
/// Admissible, but a much looser bound than [`manhattan_distance`].
pub fn misplaced_tiles(board: &Board) -> u32 {
    let mut count = 0;
    for (r, row) in board.get_grid().iter().enumerate() {
        for (c, &tile) in row.iter().enumerate() {
            if tile != BLANK && goal_position(tile) != (r, c) {
                count += 1;
            }
        }
    }
    count
}

/// The distance estimate a search ranks its frontier with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    #[default]
    Manhattan,
    MisplacedTiles,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::MisplacedTiles];

    /// Estimates the number of moves from `board` to the goal.
    pub fn evaluate(self, board: &Board) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan_distance(board),
            Heuristic::MisplacedTiles => misplaced_tiles(board),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::MisplacedTiles => "misplaced",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "misplaced" | "misplaced-tiles" | "misplaced_tiles" => Ok(Heuristic::MisplacedTiles),
            _ => Err(ParseHeuristicError {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Move, BOARD_SIZE};
    use crate::utils::board_from_str_array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, VecDeque};

    /// Exact distances to the goal for every board within `max_depth` moves of it.
    fn bfs_from_goal(max_depth: u32) -> HashMap<Board, u32> {
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();
        distances.insert(Board::goal(), 0);
        queue.push_back(Board::goal());
        while let Some(board) = queue.pop_front() {
            let d = distances[&board];
            if d == max_depth {
                continue;
            }
            for (_, next) in board.successors() {
                if !distances.contains_key(&next) {
                    distances.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        distances
    }

    #[test]
    fn test_goal_scores_zero() {
        let goal = Board::goal();
        for h in Heuristic::ALL {
            assert_eq!(h.evaluate(&goal), 0, "{}", h);
        }
    }

    #[test]
    fn test_one_move_from_goal() {
        let board =
            board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12", "13 14 0 15"]).unwrap();
        assert_eq!(manhattan_distance(&board), 1);
        assert_eq!(misplaced_tiles(&board), 1);
    }

    #[test]
    fn test_manhattan_known_value() {
        // 15 and 1 swapped corners, blank in place.
        let board =
            board_from_str_array(&["15 2 3 4", "5 6 7 8", "9 10 11 12", "13 14 1 0"]).unwrap();
        // Tile 15 is 3 rows and 2 columns away, tile 1 likewise.
        assert_eq!(manhattan_distance(&board), 10);
        assert_eq!(misplaced_tiles(&board), 2);
    }

    #[test]
    fn test_misplaced_never_exceeds_manhattan() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let board = Board::shuffled(&mut rng, 80);
            assert!(misplaced_tiles(&board) <= manhattan_distance(&board));
            assert!(misplaced_tiles(&board) as usize <= BOARD_SIZE * BOARD_SIZE - 1);
        }
    }

    #[test]
    fn test_heuristics_admissible_against_bfs() {
        let distances = bfs_from_goal(10);
        assert!(distances.len() > 1000);
        for (board, &d) in &distances {
            assert!(manhattan_distance(board) <= d, "manhattan overestimates\n{}", board);
            assert!(misplaced_tiles(board) <= d, "misplaced overestimates\n{}", board);
        }
    }

    #[test]
    fn test_manhattan_changes_by_one_per_move() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            let board = Board::shuffled(&mut rng, 30);
            let h = manhattan_distance(&board) as i64;
            for mv in Move::ALL {
                if let Some(next) = board.apply_move(mv) {
                    assert_eq!((manhattan_distance(&next) as i64 - h).abs(), 1);
                }
            }
        }
    }

    #[test]
    fn test_heuristic_from_str() {
        assert_eq!("manhattan".parse::<Heuristic>(), Ok(Heuristic::Manhattan));
        assert_eq!("Misplaced".parse::<Heuristic>(), Ok(Heuristic::MisplacedTiles));
        let err = "Euclid".parse::<Heuristic>().unwrap_err();
        assert_eq!(
            err,
            ParseHeuristicError {
                name: "Euclid".to_string()
            }
        );
        assert!(err.to_string().contains("unknown heuristic 'Euclid'"));
        assert_eq!(Heuristic::MisplacedTiles.to_string(), "misplaced");
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
    }
}
