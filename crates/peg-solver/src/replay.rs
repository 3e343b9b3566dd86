//! Replaying move sequences against a board.
//!
//! Unlike [`Board::apply_move`], replay checks every move before applying
//! it, so it can verify solutions that came from outside the solver.

use crate::board::Board;
use crate::error::SolverError;
use crate::moves::{all_possible_moves, Move};

/// Apply `moves` in order starting from `board`, returning every board
/// along the way (the starting board first).
pub fn replay_steps(board: &Board, moves: &[Move]) -> Result<Vec<Board>, SolverError> {
    let mut boards = Vec::with_capacity(moves.len() + 1);
    boards.push(*board);

    let mut current = *board;
    for (step, mv) in moves.iter().enumerate() {
        if !all_possible_moves().contains(mv) || !current.is_legal(mv) {
            return Err(SolverError::IllegalMove { step, mv: *mv });
        }
        current = current.apply_move(mv);
        boards.push(current);
    }
    Ok(boards)
}

/// Apply `moves` in order starting from `board` and return the final board
pub fn replay(board: &Board, moves: &[Move]) -> Result<Board, SolverError> {
    let steps = replay_steps(board, moves)?;
    Ok(steps.last().copied().unwrap_or(*board))
}

/// Does `moves` take `board` down to a single peg?
pub fn verify_solution(board: &Board, moves: &[Move]) -> bool {
    replay(board, moves).is_ok_and(|end| end.is_solved())
}
