//! Jump moves and move generation.
//!
//! The set of geometrically possible jumps depends only on the board shape,
//! so it is built once per process and filtered against each board.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::geometry::{coords, forward_jumps};

/// A peg at `start` jumps over the peg at `over` into the empty hole `end`.
///
/// Ordering is lexicographic on (start, over, end), which fixes the order the
/// solver tries moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub start: usize,
    pub over: usize,
    pub end: usize,
}

impl Move {
    pub fn new(start: usize, over: usize, end: usize) -> Self {
        Self { start, over, end }
    }

    /// The same jump made in the opposite direction
    pub fn reversed(self) -> Self {
        Self::new(self.end, self.over, self.start)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.start, self.over, self.end)
    }
}

static ALL_MOVES: OnceLock<BTreeSet<Move>> = OnceLock::new();

/// Every jump the board shape allows, regardless of pegs.
///
/// Each forward jump is paired with its reverse: 18 jumps, 36 moves.
pub fn all_possible_moves() -> &'static BTreeSet<Move> {
    ALL_MOVES.get_or_init(|| {
        let mut moves = BTreeSet::new();
        for start in coords() {
            for jump in forward_jumps(start) {
                let mv = Move::new(start.index(), jump.over.index(), jump.end.index());
                moves.insert(mv);
                moves.insert(mv.reversed());
            }
        }
        moves
    })
}

/// Moves that are legal on `board`, in ascending order
pub fn legal_moves(board: &Board) -> BTreeSet<Move> {
    all_possible_moves()
        .iter()
        .filter(|mv| board.is_legal(mv))
        .copied()
        .collect()
}
