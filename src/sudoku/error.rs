#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-puzzle failure types.

use std::fmt::{self, Display};
use thiserror::Error;

/// The failure taxonomy a batch report attributes to a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSize,
    MalformedGrid,
    InvalidSymbol,
    AlphabetTooSmall,
    UnsatisfiableGivens,
    InternalConsistency,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidSize => "InvalidSize",
            Self::MalformedGrid => "MalformedGrid",
            Self::InvalidSymbol => "InvalidSymbol",
            Self::AlphabetTooSmall => "AlphabetTooSmall",
            Self::UnsatisfiableGivens => "UnsatisfiableGivens",
            Self::InternalConsistency => "InternalConsistency",
        };
        write!(f, "{name}")
    }
}

/// Rejection of a puzzle before it reaches the encoder. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("size {size} is not a perfect square (expected 4, 9, 16, 25, ...)")]
    InvalidSize { size: usize },

    #[error("size {size} needs {size} symbols but the alphabet only has {available}")]
    AlphabetTooSmall { size: usize, available: usize },

    #[error("malformed grid: {reason}")]
    MalformedGrid { reason: String },

    #[error(
        "invalid symbol `{token}` at ({row}, {col}): values must be 1 to {size} or 0 for empty cells"
    )]
    InvalidSymbol {
        token: String,
        row: usize,
        col: usize,
        size: usize,
    },

    #[error("symbol `{symbol}` appears twice in {unit}, at {first:?} and {second:?}")]
    UnsatisfiableGivens {
        symbol: char,
        unit: String,
        first: (usize, usize),
        second: (usize, usize),
    },
}

impl PuzzleError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedGrid {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSize { .. } => ErrorKind::InvalidSize,
            Self::AlphabetTooSmall { .. } => ErrorKind::AlphabetTooSmall,
            Self::MalformedGrid { .. } => ErrorKind::MalformedGrid,
            Self::InvalidSymbol { .. } => ErrorKind::InvalidSymbol,
            Self::UnsatisfiableGivens { .. } => ErrorKind::UnsatisfiableGivens,
        }
    }
}

/// A solver assignment that does not describe a filled grid. Always a
/// backend contract breach, never a property of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("assignment has {found} variables, the model has {expected}")]
    WrongVariableCount { expected: usize, found: usize },

    #[error("no symbol assigned to cell ({row}, {col})")]
    NoSymbol { row: usize, col: usize },

    #[error("cell ({row}, {col}) has several symbols assigned: ranks {ranks:?}")]
    MultipleSymbols {
        row: usize,
        col: usize,
        ranks: Vec<usize>,
    },

    #[error("given `{given}` at ({row}, {col}) came back as `{found}`")]
    GivenOverwritten {
        row: usize,
        col: usize,
        given: char,
        found: char,
    },

    #[error("decoded grid violates {count} model constraint(s), first `{first}`")]
    ViolatedConstraints { first: String, count: usize },
}

impl DecodeError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InternalConsistency
    }
}
