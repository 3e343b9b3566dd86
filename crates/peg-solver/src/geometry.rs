//! Triangular board geometry.
//!
//! Holes are numbered 0-14 in row-major order; row `r` holds `r + 1` holes
//! and starts at flat index `r(r+1)/2`:
//!
//! ```text
//!         0
//!        1 2
//!       3 4 5
//!      6 7 8 9
//!   10 11 12 13 14
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::SolverError;

/// Number of rows in the triangle
pub const HEIGHT: usize = 5;

/// Number of holes on the board
pub const CELLS: usize = HEIGHT * (HEIGHT + 1) / 2;

/// Flat index of the first hole in `row`
const fn row_start(row: usize) -> usize {
    row * (row + 1) / 2
}

/// Row/column position on the triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row `r` has `r + 1` holes
    pub fn is_on_board(self) -> bool {
        self.row < HEIGHT && self.col <= self.row
    }

    /// Flat index; only meaningful for on-board coordinates
    pub(crate) fn index(self) -> usize {
        row_start(self.row) + self.col
    }

    fn offset(self, (d_row, d_col): (usize, usize), steps: usize) -> Coord {
        Coord::new(self.row + d_row * steps, self.col + d_col * steps)
    }
}

/// Forward jump directions. Each points right or downwards, so every jump on
/// the board is either one of these or the reverse of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Right, Direction::Down, Direction::DownRight];

    /// (row, col) step
    pub fn delta(self) -> (usize, usize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
        }
    }
}

/// A forward jump target: the hole hopped over and the landing hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jump {
    pub over: Coord,
    pub end: Coord,
}

/// Convert a flat position index into its (row, col) coordinate
pub fn index_to_coord(index: usize) -> Result<Coord, SolverError> {
    if index >= CELLS {
        return Err(SolverError::IndexOutOfRange {
            index,
            cells: CELLS,
        });
    }

    let mut row = 0;
    while row_start(row + 1) <= index {
        row += 1;
    }
    Ok(Coord::new(row, index - row_start(row)))
}

/// Convert a (row, col) coordinate into its flat position index
pub fn coord_to_index(row: usize, col: usize) -> Result<usize, SolverError> {
    let coord = Coord::new(row, col);
    if !coord.is_on_board() {
        return Err(SolverError::CoordOutOfRange { row, col });
    }
    Ok(coord.index())
}

/// Forward jumps available from `coord`, ignoring occupancy
pub(crate) fn forward_jumps(coord: Coord) -> SmallVec<[Jump; 3]> {
    Direction::ALL
        .iter()
        .filter_map(|dir| {
            let jump = Jump {
                over: coord.offset(dir.delta(), 1),
                end: coord.offset(dir.delta(), 2),
            };
            // Landing on the board implies the hole in between is too
            jump.end.is_on_board().then_some(jump)
        })
        .collect()
}

/// Forward (right, down, down-right) jumps from the hole at `index`.
///
/// Reverse jumps are not listed here; the move generator mirrors each
/// forward jump.
pub fn neighbors_for_jump(index: usize) -> Result<SmallVec<[Jump; 3]>, SolverError> {
    index_to_coord(index).map(forward_jumps)
}

/// All on-board coordinates in flat-index order
pub fn coords() -> impl Iterator<Item = Coord> {
    (0..HEIGHT).flat_map(|row| (0..=row).map(move |col| Coord::new(row, col)))
}
