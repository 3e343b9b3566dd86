//! Solver library for the 15-hole triangular peg solitaire puzzle.
//!
//! This crate enumerates every way to reduce a board to a single peg, or
//! finds one quickly, from any starting configuration. Boards are immutable
//! values; each move produces a new board.

pub mod board;
pub mod error;
pub mod geometry;
pub mod moves;
pub mod replay;
pub mod solver;

// Re-export main types
pub use board::Board;
pub use error::SolverError;
pub use geometry::{coord_to_index, index_to_coord, neighbors_for_jump, Coord, Jump, CELLS, HEIGHT};
pub use moves::{all_possible_moves, legal_moves, Move};
pub use replay::{replay, replay_steps, verify_solution};
pub use solver::{
    count_solutions, find_solution, solve_all, solve_one, SearchConfig, SearchReport, SearchStatus,
    Solution,
};
