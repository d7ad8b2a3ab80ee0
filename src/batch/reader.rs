#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Batch input files.
//!
//! ```text
//! <count>
//!
//! <N> <0|1>
//! <N rows of N symbols>
//!
//! <N> <0|1>
//! ...
//! ```
//!
//! Blocks are runs of non-blank lines. Framing problems that can be pinned
//! on one puzzle (a bad header, a missing block) become that puzzle's
//! `MalformedGrid`; only a missing or unreadable count stops the batch.

use crate::sudoku::alphabet::Alphabet;
use crate::sudoku::error::PuzzleError;
use crate::sudoku::puzzle::{Puzzle, Variant};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Failures that leave no puzzle to attribute an error to.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot read batch file: {0}")]
    Io(#[from] io::Error),

    #[error("batch file is empty: expected a puzzle count on the first line")]
    MissingCount,

    #[error("line {line}: puzzle count `{found}` is not a number")]
    MalformedCount { line: usize, found: String },
}

/// The raw lines of one puzzle, header included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 1-based position in the batch.
    pub index: usize,
    /// 1-based line of the header, 0 for a missing block.
    pub line: usize,
    pub lines: Vec<String>,
}

impl Block {
    #[must_use]
    pub const fn missing(index: usize) -> Self {
        Self {
            index,
            line: 0,
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reads the `<N> <flag>` header and validates the grid below it.
    ///
    /// # Errors
    ///
    /// `MalformedGrid` for a missing block or a bad header, otherwise
    /// whatever [`Puzzle::parse`] reports.
    pub fn parse(&self, alphabet: &Alphabet) -> Result<Puzzle, PuzzleError> {
        let Some((header, rows)) = self.lines.split_first() else {
            return Err(PuzzleError::malformed("missing puzzle block"));
        };
        let (size, variant) = parse_header(header)?;
        Puzzle::parse(size, variant, rows, alphabet)
    }
}

fn parse_header(header: &str) -> Result<(usize, Variant), PuzzleError> {
    let bad = || {
        PuzzleError::malformed(format!(
            "header `{}` should be `<size> <0|1>`",
            header.trim()
        ))
    };
    let mut tokens = header.split_whitespace();
    let (Some(size), Some(flag), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(bad());
    };
    let size = size.parse::<usize>().map_err(|_| bad())?;
    let variant = Variant::from_flag(flag).ok_or_else(bad)?;
    Ok((size, variant))
}

/// Splits a batch file into exactly `count` blocks.
///
/// # Errors
///
/// [`BatchError::MissingCount`] or [`BatchError::MalformedCount`].
pub fn parse_batch(text: &str) -> Result<Vec<Block>, BatchError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .skip_while(|(_, l)| l.trim().is_empty());

    let (count_line, count) = lines.next().ok_or(BatchError::MissingCount)?;
    let count = count
        .trim()
        .parse::<usize>()
        .map_err(|_| BatchError::MalformedCount {
            line: count_line,
            found: count.trim().to_string(),
        })?;

    let mut blocks: Vec<Block> = Vec::with_capacity(count);
    let mut current: Option<Block> = None;
    let mut skipping = false;
    let mut extra = 0;

    for (line_no, line) in lines {
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            skipping = false;
            continue;
        }
        if let Some(block) = current.as_mut() {
            block.lines.push(line.to_string());
        } else if skipping {
            continue;
        } else if blocks.len() < count {
            current = Some(Block {
                index: blocks.len() + 1,
                line: line_no,
                lines: vec![line.to_string()],
            });
        } else {
            extra += 1;
            skipping = true;
        }
    }
    if let Some(block) = current {
        blocks.push(block);
    }

    if extra > 0 {
        warn!(announced = count, extra, "ignoring puzzles beyond the announced count");
    }
    if blocks.len() < count {
        warn!(
            announced = count,
            found = blocks.len(),
            "batch file has fewer puzzles than announced"
        );
        blocks.extend((blocks.len() + 1..=count).map(Block::missing));
    }
    Ok(blocks)
}

/// Reads and frames a batch file.
///
/// # Errors
///
/// I/O failures and the errors of [`parse_batch`].
pub fn read_batch_file(path: &Path) -> Result<Vec<Block>, BatchError> {
    let text = fs::read_to_string(path)?;
    parse_batch(&text)
}
