//! Best-first search (A* and Weighted A*) from a board to the goal.
//!
//! The frontier is a binary heap of immutable entries. Finding a cheaper path to a board
//! pushes a fresh entry instead of re-keying the old one; entries whose cost is worse
//! than the recorded best are dropped when they surface.
use crate::cancel::CancellationToken;
use crate::engine::{Board, Move};
use crate::heuristics::Heuristic;
use crate::solvability::is_solvable;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Weight applied to the heuristic when weighted mode is enabled without an explicit value.
pub const DEFAULT_WEIGHT: f64 = 1.5;

/// How a search ranks its frontier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOptions {
    pub heuristic: Heuristic,
    /// When `true` the heuristic is multiplied by `weight` (Weighted A*).
    pub weighted: bool,
    /// Only read in weighted mode. Not clamped: any value is accepted.
    pub weight: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            weighted: false,
            weight: DEFAULT_WEIGHT,
        }
    }
}

impl SearchOptions {
    /// Builder: set the heuristic.
    #[must_use]
    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Builder: switch to Weighted A* with the given weight.
    #[must_use]
    pub fn weighted(mut self, weight: f64) -> Self {
        self.weighted = true;
        self.weight = weight;
        self
    }

    /// The factor `p` in `f = g + h * p`.
    pub fn effective_weight(&self) -> f64 {
        if self.weighted {
            self.weight
        } else {
            1.0
        }
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The goal was reached. The path starts at the start board and ends at the goal.
    Success(Vec<Board>),
    /// The parity check proved the goal unreachable; nothing was expanded.
    Unsolvable,
    /// The caller requested a stop before the goal was found.
    Cancelled,
    /// The frontier ran dry without reaching the goal. Cannot happen for a solvable board.
    Exhausted,
}

/// The single value a search produces.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    /// Number of frontier extractions that reached the goal test.
    pub nodes_explored: usize,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Success(_))
    }

    /// The board-by-board path on success.
    pub fn path(&self) -> Option<&[Board]> {
        match &self.outcome {
            SearchOutcome::Success(path) => Some(path),
            _ => None,
        }
    }

    /// Number of moves in the solution (path length minus one).
    pub fn move_count(&self) -> Option<usize> {
        self.path().map(|path| path.len() - 1)
    }

    /// The blank's moves along the solution path.
    pub fn moves(&self) -> Option<Vec<Move>> {
        let path = self.path()?;
        path.windows(2)
            .map(|pair| pair[0].move_between(&pair[1]))
            .collect()
    }
}

/// A frontier entry. Ordered so that `BinaryHeap` pops the lowest `f` first and, among
/// equal keys, the entry pushed first.
#[derive(Debug)]
struct Node {
    f: f64,
    seq: u64,
    g: u32,
    board: Board,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

/// Searches for a move sequence from `start` to [`Board::goal`].
///
/// The start is first checked with [`is_solvable`]; an unsolvable board returns
/// [`SearchOutcome::Unsolvable`] immediately. Otherwise nodes are extracted in order of
/// `f = g + h * p` (see [`SearchOptions::effective_weight`]) and `cancel` is polled before
/// every extraction. With `p = 1` and an admissible heuristic the returned path is
/// optimal; with `p > 1` it may be longer.
///
/// # Panics
/// In debug builds, panics if the frontier empties for a solvable start, which would mean
/// the successor function or the heuristic is broken.
///
/// # Examples
/// ```
/// use fifteen_solver::cancel::CancellationToken;
/// use fifteen_solver::engine::Board;
/// use fifteen_solver::solver::{solve, SearchOptions};
/// use fifteen_solver::utils::board_from_str_array;
///
/// let start = board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12", "13 14 0 15"]).unwrap();
/// let result = solve(&start, &SearchOptions::default(), &CancellationToken::new());
/// assert_eq!(result.move_count(), Some(1));
/// assert_eq!(result.path().unwrap().last(), Some(&Board::goal()));
/// ```
pub fn solve(start: &Board, options: &SearchOptions, cancel: &CancellationToken) -> SearchResult {
    let started = Instant::now();
    let weight = options.effective_weight();
    debug!(
        heuristic = %options.heuristic,
        weight,
        "starting search"
    );

    if !is_solvable(start) {
        info!("start board is unsolvable, skipping search");
        return SearchResult {
            outcome: SearchOutcome::Unsolvable,
            nodes_explored: 0,
            elapsed: started.elapsed(),
        };
    }

    let goal = Board::goal();
    let priority =
        |g: u32, board: &Board| g as f64 + options.heuristic.evaluate(board) as f64 * weight;

    let mut frontier = BinaryHeap::new();
    let mut best_cost: HashMap<Board, u32> = HashMap::new();
    let mut came_from: HashMap<Board, Board> = HashMap::new();
    let mut seq: u64 = 0;
    let mut nodes_explored = 0;

    best_cost.insert(*start, 0);
    frontier.push(Node {
        f: priority(0, start),
        seq,
        g: 0,
        board: *start,
    });

    loop {
        if cancel.is_stop_requested() {
            warn!(nodes_explored, "search cancelled");
            return SearchResult {
                outcome: SearchOutcome::Cancelled,
                nodes_explored,
                elapsed: started.elapsed(),
            };
        }

        let Some(Node { g, board, .. }) = frontier.pop() else {
            break;
        };
        // A cheaper path to this board was pushed after this entry.
        if best_cost.get(&board).is_some_and(|&best| g > best) {
            continue;
        }
        nodes_explored += 1;

        if board == goal {
            let path = reconstruct_path(&came_from, board);
            let elapsed = started.elapsed();
            info!(
                moves = path.len() - 1,
                nodes_explored,
                elapsed_ms = elapsed.as_millis() as u64,
                "solution found"
            );
            return SearchResult {
                outcome: SearchOutcome::Success(path),
                nodes_explored,
                elapsed,
            };
        }

        let tentative_g = g + 1;
        for (_, next) in board.successors() {
            let improves = best_cost
                .get(&next)
                .map_or(true, |&known| tentative_g < known);
            if improves {
                best_cost.insert(next, tentative_g);
                came_from.insert(next, board);
                seq += 1;
                frontier.push(Node {
                    f: priority(tentative_g, &next),
                    seq,
                    g: tentative_g,
                    board: next,
                });
            }
        }
    }

    error!(
        nodes_explored,
        "frontier exhausted for a solvable board; successor generation or heuristic is broken"
    );
    debug_assert!(
        false,
        "frontier exhausted after {} nodes for a solvable board",
        nodes_explored
    );
    SearchResult {
        outcome: SearchOutcome::Exhausted,
        nodes_explored,
        elapsed: started.elapsed(),
    }
}

/// Walks predecessors back from `end` and returns the path in start-to-end order.
fn reconstruct_path(came_from: &HashMap<Board, Board>, end: Board) -> Vec<Board> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::manhattan_distance;
    use crate::utils::board_from_str_array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn one_away() -> Board {
        board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12", "13 14 0 15"]).unwrap()
    }

    fn solve_default(board: &Board, options: SearchOptions) -> SearchResult {
        solve(board, &options, &CancellationToken::new())
    }

    /// Exact distances from the goal, to cross-check optimality.
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

    fn assert_valid_path(path: &[Board], start: &Board) {
        assert_eq!(path.first(), Some(start));
        assert_eq!(path.last(), Some(&Board::goal()));
        for pair in path.windows(2) {
            assert!(
                pair[0].move_between(&pair[1]).is_some(),
                "consecutive boards must be one move apart:\n{}\n\n{}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_goal_is_already_solved() {
        let result = solve_default(&Board::goal(), SearchOptions::default());
        assert_eq!(result.outcome, SearchOutcome::Success(vec![Board::goal()]));
        assert_eq!(result.move_count(), Some(0));
        assert_eq!(result.moves(), Some(vec![]));
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn test_one_move_from_goal() {
        let start = one_away();
        let result = solve_default(&start, SearchOptions::default());
        assert_eq!(
            result.outcome,
            SearchOutcome::Success(vec![start, Board::goal()])
        );
        assert_eq!(result.moves(), Some(vec![Move::Right]));
    }

    #[test]
    fn test_unsolvable_short_circuits() {
        let swapped =
            board_from_str_array(&["1 2 3 4", "5 6 7 8", "9 10 11 12", "13 15 14 0"]).unwrap();
        for options in [
            SearchOptions::default(),
            SearchOptions::default().heuristic(Heuristic::MisplacedTiles),
            SearchOptions::default().weighted(3.0),
        ] {
            let result = solve_default(&swapped, options);
            assert_eq!(result.outcome, SearchOutcome::Unsolvable);
            assert_eq!(result.nodes_explored, 0);
            assert!(result.path().is_none());
            assert!(result.moves().is_none());
        }
    }

    #[test]
    fn test_astar_matches_bfs_distance() {
        let distances = bfs_from_goal(12);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut checked = 0;
        for _ in 0..40 {
            let start = Board::shuffled(&mut rng, 12);
            let optimal = distances[&start] as usize;
            for heuristic in Heuristic::ALL {
                let result = solve_default(&start, SearchOptions::default().heuristic(heuristic));
                assert_eq!(
                    result.move_count(),
                    Some(optimal),
                    "{} is not optimal for\n{}",
                    heuristic,
                    start
                );
                assert_valid_path(result.path().unwrap(), &start);
                checked += 1;
            }
        }
        assert_eq!(checked, 80);
    }

    #[test]
    fn test_weighted_never_beats_optimal() {
        let mut rng = SmallRng::seed_from_u64(31);
        for _ in 0..10 {
            let start = Board::shuffled(&mut rng, 24);
            let optimal = solve_default(&start, SearchOptions::default())
                .move_count()
                .unwrap();
            for weight in [1.5, 3.0, 5.0] {
                let result = solve_default(&start, SearchOptions::default().weighted(weight));
                let moves = result.move_count().unwrap();
                assert!(moves >= optimal, "weighted {} found {} < {}", weight, moves, optimal);
                assert_eq!(moves % 2, optimal % 2, "path parity is fixed by the board");
                assert_valid_path(result.path().unwrap(), &start);
            }
        }
    }

    #[test]
    fn test_weight_ignored_when_unweighted() {
        let options = SearchOptions {
            weighted: false,
            weight: 9.0,
            ..SearchOptions::default()
        };
        assert_eq!(options.effective_weight(), 1.0);
        assert_eq!(SearchOptions::default().weighted(2.5).effective_weight(), 2.5);
    }

    #[test]
    fn test_unusual_weights_still_solve() {
        let start = Board::new_shuffled_with_seed(3, 10);
        // Zero weight degenerates to uniform-cost search; large weights go greedy.
        for weight in [0.0, 0.5, 25.0] {
            let result = solve_default(&start, SearchOptions::default().weighted(weight));
            assert!(result.is_success(), "weight {} failed", weight);
            assert_valid_path(result.path().unwrap(), &start);
        }
    }

    #[test]
    fn test_cancel_before_start() {
        let hard =
            board_from_str_array(&["0 15 14 13", "12 11 10 9", "8 7 6 5", "4 3 2 1"]).unwrap();
        let cancel = CancellationToken::new();
        cancel.request_stop();
        let result = solve(&hard, &SearchOptions::default(), &cancel);
        assert_eq!(result.outcome, SearchOutcome::Cancelled);
        assert_eq!(result.nodes_explored, 0);
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let hard =
            board_from_str_array(&["0 15 14 13", "12 11 10 9", "8 7 6 5", "4 3 2 1"]).unwrap();
        let cancel = CancellationToken::new();
        let remote = cancel.clone();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.request_stop();
        });
        let options = SearchOptions::default().heuristic(Heuristic::MisplacedTiles);
        let result = solve(&hard, &options, &cancel);
        stopper.join().unwrap();
        assert_eq!(result.outcome, SearchOutcome::Cancelled);
    }

    #[test]
    fn test_deterministic_trace() {
        let start = Board::new_shuffled_with_seed(17, 25);
        let a = solve_default(&start, SearchOptions::default());
        let b = solve_default(&start, SearchOptions::default());
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.nodes_explored, b.nodes_explored);
    }

    #[test]
    fn test_manhattan_explores_less_than_misplaced() {
        let start = Board::new_shuffled_with_seed(8, 16);
        let manhattan = solve_default(&start, SearchOptions::default());
        let misplaced =
            solve_default(&start, SearchOptions::default().heuristic(Heuristic::MisplacedTiles));
        assert_eq!(manhattan.move_count(), misplaced.move_count());
        assert!(manhattan.nodes_explored <= misplaced.nodes_explored);
        assert!(manhattan_distance(&start) as usize <= manhattan.move_count().unwrap());
    }

    #[test]
    fn test_frontier_order_is_fifo_on_ties() {
        let mut heap = BinaryHeap::new();
        for seq in [2u64, 0, 1] {
            heap.push(Node {
                f: 4.0,
                seq,
                g: 0,
                board: Board::goal(),
            });
        }
        heap.push(Node {
            f: 3.5,
            seq: 9,
            g: 0,
            board: Board::goal(),
        });
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|n| n.seq)).collect();
        assert_eq!(order, vec![9, 0, 1, 2]);
    }
}
