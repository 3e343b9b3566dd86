//! Game-tree search over board states.
//!
//! Every search tries moves in ascending (start, over, end) order, so
//! [`solve_one`] and [`find_solution`] return the same solution that
//! [`solve_all`] lists first.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use log::{debug, trace};
use serde::Serialize;

use crate::board::Board;
use crate::moves::{legal_moves, Move};

/// Moves taking a board down to a single peg
pub type Solution = Vec<Move>;

/// Memoized solution counts keyed by board
#[derive(Debug, Default)]
struct SolutionCounter {
    memo: HashMap<Board, u64>,
}

impl SolutionCounter {
    fn count(&mut self, board: &Board) -> u64 {
        if board.is_solved() {
            return 1;
        }
        if let Some(&known) = self.memo.get(board) {
            return known;
        }

        let total: u64 = legal_moves(board)
            .iter()
            .map(|mv| self.count(&board.apply_move(mv)))
            .sum();
        self.memo.insert(*board, total);
        total
    }
}

/// Number of distinct solutions from `board`.
///
/// Equal to `solve_all(board).len()` but computed over board states rather
/// than move sequences, so it stays cheap for the full starting position.
pub fn count_solutions(board: &Board) -> u64 {
    let mut counter = SolutionCounter::default();
    let total = counter.count(board);
    debug!(
        "counted {} solutions from {} over {} states",
        total,
        board,
        counter.memo.len()
    );
    total
}

/// Every solution from `board`.
///
/// A board that already has one peg yields a single empty solution; a board
/// with no way down to one peg yields none.
pub fn solve_all(board: &Board) -> Vec<Solution> {
    let mut counter = SolutionCounter::default();
    let mut path = Vec::new();
    let mut solutions = Vec::new();
    collect_solutions(board, &mut counter, &mut path, &mut solutions);
    debug!("found {} solutions from {}", solutions.len(), board);
    solutions
}

fn collect_solutions(
    board: &Board,
    counter: &mut SolutionCounter,
    path: &mut Vec<Move>,
    solutions: &mut Vec<Solution>,
) {
    if board.is_solved() {
        solutions.push(path.clone());
        return;
    }

    for mv in legal_moves(board) {
        let next = board.apply_move(&mv);
        // Dead subtrees are skipped without walking them move by move
        if counter.count(&next) == 0 {
            continue;
        }
        path.push(mv);
        collect_solutions(&next, counter, path, solutions);
        path.pop();
    }
}

/// The first solution [`solve_all`] would list, or `None` if there is none.
///
/// Stops at the first success instead of enumerating every solution.
pub fn solve_one(board: &Board) -> Option<Solution> {
    let mut dead = HashSet::new();
    let mut path = Vec::new();
    if first_solution(board, &mut dead, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn first_solution(board: &Board, dead: &mut HashSet<Board>, path: &mut Vec<Move>) -> bool {
    if board.is_solved() {
        return true;
    }

    for mv in legal_moves(board) {
        let next = board.apply_move(&mv);
        if dead.contains(&next) {
            continue;
        }
        path.push(mv);
        if first_solution(&next, dead, path) {
            return true;
        }
        path.pop();
    }

    dead.insert(*board);
    false
}

/// Limits for [`find_solution`]
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Maximum time to search
    pub timeout: Option<Duration>,
    /// Maximum number of boards to expand
    pub max_nodes: Option<usize>,
}

/// How a bounded search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// A solution was found
    Solved,
    /// The search space was exhausted; no solution exists
    NoSolution,
    /// A limit was hit first; a solution may still exist
    BudgetExceeded,
}

/// Result of a bounded search
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub status: SearchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    /// Boards expanded, including the starting board
    pub nodes_expanded: usize,
    pub time_elapsed_ms: u64,
}

impl SearchReport {
    pub fn solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

/// A board on the search stack with the moves still to try from it
#[derive(Debug, Clone)]
struct SearchFrame {
    board: Board,
    /// Descending, so popping yields the smallest move first
    pending: Vec<Move>,
}

impl SearchFrame {
    fn new(board: Board) -> Self {
        let pending = legal_moves(&board).into_iter().rev().collect();
        Self { board, pending }
    }
}

/// Depth-first search for one solution within the limits of `config`.
///
/// Uses an explicit stack and remembers boards proven unsolvable, so each
/// dead state is expanded once. When a limit is hit the report says
/// [`SearchStatus::BudgetExceeded`], which is distinct from
/// [`SearchStatus::NoSolution`].
pub fn find_solution(board: &Board, config: &SearchConfig) -> SearchReport {
    let start_time = Instant::now();
    let deadline = config.timeout.map(|timeout| start_time + timeout);

    let report = |status, solution, nodes_expanded| SearchReport {
        status,
        solution,
        nodes_expanded,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    };

    if board.is_solved() {
        return report(SearchStatus::Solved, Some(Vec::new()), 1);
    }

    let mut nodes_expanded: usize = 1;
    let mut dead: HashSet<Board> = HashSet::new();
    let mut path: Vec<Move> = Vec::new();
    let mut stack: Vec<SearchFrame> = vec![SearchFrame::new(*board)];

    while let Some(frame) = stack.last_mut() {
        if deadline.is_some_and(|deadline| Instant::now() > deadline)
            || config.max_nodes.is_some_and(|max| nodes_expanded >= max)
        {
            debug!(
                "search from {} stopped after {} nodes at depth {}",
                board,
                nodes_expanded,
                path.len()
            );
            return report(SearchStatus::BudgetExceeded, None, nodes_expanded);
        }

        let Some(mv) = frame.pending.pop() else {
            // Every move from this board failed
            dead.insert(frame.board);
            stack.pop();
            path.pop();
            continue;
        };

        let next = frame.board.apply_move(&mv);
        if dead.contains(&next) {
            continue;
        }

        trace!("expanding {} via {}", next, mv);
        nodes_expanded += 1;
        path.push(mv);

        if next.is_solved() {
            debug!("solved {} after {} nodes", board, nodes_expanded);
            return report(SearchStatus::Solved, Some(path), nodes_expanded);
        }
        stack.push(SearchFrame::new(next));
    }

    debug!(
        "no solution from {}: {} nodes, {} dead boards",
        board,
        nodes_expanded,
        dead.len()
    );
    report(SearchStatus::NoSolution, None, nodes_expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::all_possible_moves;
    use crate::replay::verify_solution;

    fn board(encoding: &str) -> Board {
        encoding.parse().unwrap()
    }

    #[test]
    fn test_single_peg_is_already_solved() {
        for hole in [0, 7, 14] {
            let b = Board::from_pegs(&[hole]).unwrap();
            assert_eq!(solve_all(&b), vec![Vec::<Move>::new()]);
            assert_eq!(solve_one(&b), Some(Vec::new()));
            assert_eq!(count_solutions(&b), 1);
        }

        let b = board("100000000000000");
        assert_eq!(solve_all(&b), vec![Vec::<Move>::new()]);
        assert_eq!(solve_one(&b), Some(Vec::new()));
    }

    #[test]
    fn test_two_stuck_pegs_have_no_solution() {
        let b = board("110000000000000");
        assert!(solve_all(&b).is_empty());
        assert_eq!(solve_one(&b), None);
        assert_eq!(count_solutions(&b), 0);

        let report = find_solution(&b, &SearchConfig::default());
        assert_eq!(report.status, SearchStatus::NoSolution);
        assert!(report.solution.is_none());
    }

    #[test]
    fn test_empty_board_has_no_solution() {
        let b = board("000000000000000");
        assert!(solve_all(&b).is_empty());
        assert_eq!(solve_one(&b), None);
    }

    #[test]
    fn test_single_jump_finish() {
        // Pegs at 1 and 3 on the left edge can jump either way
        let b = Board::from_pegs(&[1, 3]).unwrap();
        assert_eq!(
            solve_all(&b),
            vec![vec![Move::new(1, 3, 6)], vec![Move::new(3, 1, 0)]]
        );
        assert_eq!(solve_one(&b), Some(vec![Move::new(1, 3, 6)]));
    }

    #[test]
    fn test_classic_start_solutions_replay_to_one_peg() {
        let b = board("111111111111101");
        let solutions = solve_all(&b);
        assert!(!solutions.is_empty());
        assert_eq!(solutions.len() as u64, count_solutions(&b));

        let mut seen = HashSet::new();
        for solution in &solutions {
            assert_eq!(solution.len(), 13);
            assert!(solution.iter().all(|mv| all_possible_moves().contains(mv)));
            assert!(verify_solution(&b, solution));
            assert!(seen.insert(solution.clone()), "duplicate solution");
        }
    }

    #[test]
    fn test_solutions_are_in_move_order() {
        let b = board("111111111111101");
        let solutions = solve_all(&b);
        assert!(solutions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_solve_one_matches_first_of_solve_all() {
        for encoding in ["111111111111101", "011111111111111", "111101111111111"] {
            let b = board(encoding);
            let all = solve_all(&b);
            assert_eq!(solve_one(&b).as_ref(), all.first());
        }
    }

    #[test]
    fn test_count_from_top_hole() {
        assert_eq!(count_solutions(&board("011111111111111")), 29760);
    }

    #[test]
    fn test_find_solution_matches_solve_one() {
        let b = board("111111111111101");
        let report = find_solution(&b, &SearchConfig::default());
        assert!(report.solved());
        assert_eq!(report.solution, solve_one(&b));
        assert!(report.nodes_expanded >= 14);
    }

    #[test]
    fn test_find_solution_on_solved_board() {
        let report = find_solution(&board("000000000000001"), &SearchConfig::default());
        assert!(report.solved());
        assert_eq!(report.solution, Some(Vec::new()));
    }

    #[test]
    fn test_find_solution_node_budget() {
        let b = board("111111111111101");
        let config = SearchConfig {
            timeout: None,
            max_nodes: Some(5),
        };
        let report = find_solution(&b, &config);
        assert_eq!(report.status, SearchStatus::BudgetExceeded);
        assert!(report.solution.is_none());
        assert_eq!(report.nodes_expanded, 5);
    }

    #[test]
    fn test_find_solution_timeout() {
        let config = SearchConfig {
            timeout: Some(Duration::ZERO),
            max_nodes: None,
        };
        // A zero timeout can still be beaten by the clock's resolution, so
        // only rule out a wrong answer
        let report = find_solution(&board("111111111111101"), &config);
        assert_ne!(report.status, SearchStatus::NoSolution);
    }
}
