#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reads a solver assignment back into a filled grid.

use crate::ilp::assignment::Assignment;
use crate::sudoku::alphabet::{Alphabet, Rank};
use crate::sudoku::encoder::VarIndex;
use crate::sudoku::error::DecodeError;
use crate::sudoku::puzzle::Puzzle;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display};

/// A completely filled grid, rendered with the alphabet it was decoded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedGrid {
    size: usize,
    ranks: Vec<Rank>,
    symbols: Vec<char>,
}

impl SolvedGrid {
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn rank(&self, row: usize, col: usize) -> Rank {
        self.ranks[row * self.size + col]
    }

    #[must_use]
    pub fn symbol(&self, row: usize, col: usize) -> char {
        self.symbols[row * self.size + col]
    }

    /// Rows of ranks, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rank]> {
        self.ranks.chunks(self.size)
    }
}

impl Display for SolvedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .symbols
            .chunks(self.size)
            .map(|row| row.iter().join(" "))
            .join("\n");
        write!(f, "{rows}")
    }
}

/// Decodes `assignment`, which must come from the model built by
/// [`encode`](crate::sudoku::encoder::encode) for `puzzle`.
///
/// Each cell must have exactly one true variable, and every given must come
/// back unchanged. Anything else is a solver contract breach and is reported,
/// never repaired.
///
/// # Errors
///
/// A [`DecodeError`] naming the first offending cell.
pub fn decode(
    assignment: &Assignment,
    puzzle: &Puzzle,
    alphabet: &Alphabet,
) -> Result<SolvedGrid, DecodeError> {
    let n = puzzle.size();
    let index = VarIndex::new(n);
    if assignment.num_vars() != index.num_vars() {
        return Err(DecodeError::WrongVariableCount {
            expected: index.num_vars(),
            found: assignment.num_vars(),
        });
    }

    let symbol = |rank: Rank| alphabet.symbol_of(rank).unwrap_or('?');
    let mut ranks = Vec::with_capacity(n * n);

    for (r, c) in puzzle.geometry().cells() {
        let set: SmallVec<[Rank; 4]> = (1..=n)
            .filter(|&v| assignment.is_true(index.var(r, c, v)))
            .collect();

        let rank = match set.as_slice() {
            [] => return Err(DecodeError::NoSymbol { row: r + 1, col: c + 1 }),
            [rank] => *rank,
            many => {
                return Err(DecodeError::MultipleSymbols {
                    row: r + 1,
                    col: c + 1,
                    ranks: many.to_vec(),
                });
            }
        };

        if let Some(given) = puzzle.get(r, c) {
            if given != rank {
                return Err(DecodeError::GivenOverwritten {
                    row: r + 1,
                    col: c + 1,
                    given: symbol(given),
                    found: symbol(rank),
                });
            }
        }
        ranks.push(rank);
    }

    let symbols = ranks.iter().map(|&rank| symbol(rank)).collect();
    Ok(SolvedGrid {
        size: n,
        ranks,
        symbols,
    })
}
