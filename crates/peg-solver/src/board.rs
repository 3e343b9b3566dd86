//! Board state: which holes hold a peg.
//!
//! A board is parsed from (and printed as) a 15-character encoding of `1`
//! (peg) and `0` (empty) symbols in flat-index order. Values are immutable;
//! applying a move yields a new board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::geometry::{coords, CELLS, HEIGHT};
use crate::moves::Move;

const PEG: char = '1';
const EMPTY: char = '0';

/// Occupancy of the 15 holes, bit `i` set when hole `i` has a peg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    pegs: u16,
}

impl Board {
    const MASK: u16 = (1 << CELLS) - 1;

    /// Every hole filled
    pub fn full() -> Self {
        Self { pegs: Self::MASK }
    }

    /// Every hole filled except `hole`, the usual starting position
    pub fn with_hole(hole: usize) -> Result<Self, SolverError> {
        Self::full().set(hole, false)
    }

    /// Board with pegs exactly at `holes`
    pub fn from_pegs(holes: &[usize]) -> Result<Self, SolverError> {
        holes
            .iter()
            .try_fold(Self { pegs: 0 }, |board, &hole| board.set(hole, true))
    }

    fn set(self, index: usize, peg: bool) -> Result<Self, SolverError> {
        if index >= CELLS {
            return Err(SolverError::IndexOutOfRange {
                index,
                cells: CELLS,
            });
        }
        Ok(self.with(index, peg))
    }

    fn with(self, index: usize, peg: bool) -> Self {
        let bit = 1 << index;
        let pegs = if peg { self.pegs | bit } else { self.pegs & !bit };
        Self { pegs }
    }

    /// Whether hole `index` holds a peg. Indices past the board read as empty.
    pub fn has_peg(&self, index: usize) -> bool {
        index < CELLS && self.pegs & (1 << index) != 0
    }

    pub fn peg_count(&self) -> usize {
        self.pegs.count_ones() as usize
    }

    /// Exactly one peg left
    pub fn is_solved(&self) -> bool {
        self.peg_count() == 1
    }

    /// A move is legal when `start` and `over` hold pegs and `end` is empty
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.has_peg(mv.start) && self.has_peg(mv.over) && !self.has_peg(mv.end) && mv.end < CELLS
    }

    /// Board after `mv`: `start` and `over` emptied, `end` filled.
    ///
    /// Legality is not checked; callers draw moves from
    /// [`legal_moves`](crate::moves::legal_moves).
    pub fn apply_move(&self, mv: &Move) -> Board {
        self.with(mv.start, false)
            .with(mv.over, false)
            .with(mv.end, true)
    }

    /// The triangle as rows of uneven length (row `r` has `r + 1` holes)
    pub fn rows(&self) -> Vec<Vec<bool>> {
        let mut rows: Vec<Vec<bool>> = (0..HEIGHT).map(|r| Vec::with_capacity(r + 1)).collect();
        for coord in coords() {
            rows[coord.row].push(self.has_peg(coord.index()));
        }
        rows
    }

    /// Multi-line picture of the triangle, each row centred under the apex
    pub fn render(&self) -> String {
        self.rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let cells: Vec<&str> = row.iter().map(|&peg| if peg { "1" } else { "0" }).collect();
                format!("{}{}", " ".repeat(HEIGHT - r - 1), cells.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromStr for Board {
    type Err = SolverError;

    fn from_str(encoding: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = encoding.chars().collect();
        if symbols.len() != CELLS {
            return Err(SolverError::InvalidEncoding {
                reason: format!("expected {} symbols, got {}", CELLS, symbols.len()),
            });
        }

        let mut board = Board { pegs: 0 };
        for (index, symbol) in symbols.into_iter().enumerate() {
            match symbol {
                PEG => board = board.with(index, true),
                EMPTY => {}
                other => {
                    return Err(SolverError::InvalidEncoding {
                        reason: format!("unexpected symbol {:?} at position {}", other, index),
                    })
                }
            }
        }
        Ok(board)
    }
}

impl TryFrom<String> for Board {
    type Error = SolverError;

    fn try_from(encoding: String) -> Result<Self, Self::Error> {
        encoding.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..CELLS {
            let symbol = if self.has_peg(index) { PEG } else { EMPTY };
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
