#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Grid geometry for an N×N puzzle with N = B².
//!
//! Everything that depends on the box dimension lives here: which box a cell
//! belongs to, which cells a box covers, and the list of units (rows,
//! columns, boxes, and optionally the two diagonals) that must each hold
//! every symbol once. Both the given-conflict check and the encoder walk the
//! same units.

use crate::ilp::model::ConstraintKind;
use crate::sudoku::error::PuzzleError;
use itertools::iproduct;
use std::fmt::{self, Display};
use std::ops::Range;

/// A `(row, col)` position, 0-based.
pub type Pos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    size: usize,
    box_size: usize,
}

impl Geometry {
    /// # Errors
    ///
    /// [`PuzzleError::InvalidSize`] if `size` is zero or not a perfect square.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        let box_size = size.isqrt();
        if size == 0 || box_size * box_size != size {
            return Err(PuzzleError::InvalidSize { size });
        }
        Ok(Self { size, box_size })
    }

    /// N
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// B = √N
    #[must_use]
    pub const fn box_size(&self) -> usize {
        self.box_size
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Boxes are numbered row-major: `(row / B) * B + col / B`.
    #[must_use]
    pub const fn box_index(&self, row: usize, col: usize) -> usize {
        (row / self.box_size) * self.box_size + col / self.box_size
    }

    /// Row and column ranges covered by box `b`.
    #[must_use]
    pub const fn box_bounds(&self, b: usize) -> (Range<usize>, Range<usize>) {
        let top = (b / self.box_size) * self.box_size;
        let left = (b % self.box_size) * self.box_size;
        (top..top + self.box_size, left..left + self.box_size)
    }

    /// Cells of box `b` in row-major order.
    pub fn box_cells(&self, b: usize) -> impl Iterator<Item = Pos> + use<> {
        let (rows, cols) = self.box_bounds(b);
        iproduct!(rows, cols)
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        iproduct!(0..self.size, 0..self.size)
    }

    /// Every uniqueness unit: rows, columns, boxes, then the main and anti
    /// diagonal when `diagonal` is set.
    #[must_use]
    pub fn units(&self, diagonal: bool) -> Vec<Unit> {
        let n = self.size;
        let mut units = Vec::with_capacity(3 * n + 2);

        units.extend((0..n).map(|r| Unit::new(UnitKind::Row, r, (0..n).map(|c| (r, c)))));
        units.extend((0..n).map(|c| Unit::new(UnitKind::Column, c, (0..n).map(|r| (r, c)))));
        units.extend((0..n).map(|b| Unit::new(UnitKind::Box, b, self.box_cells(b))));

        if diagonal {
            units.push(Unit::new(UnitKind::MainDiagonal, 0, (0..n).map(|i| (i, i))));
            units.push(Unit::new(
                UnitKind::AntiDiagonal,
                0,
                (0..n).map(|i| (i, n - 1 - i)),
            ));
        }
        units
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Row,
    Column,
    Box,
    MainDiagonal,
    AntiDiagonal,
}

impl UnitKind {
    #[must_use]
    pub const fn constraint_kind(self) -> ConstraintKind {
        match self {
            Self::Row => ConstraintKind::Row,
            Self::Column => ConstraintKind::Column,
            Self::Box => ConstraintKind::Box,
            Self::MainDiagonal | Self::AntiDiagonal => ConstraintKind::Diagonal,
        }
    }
}

/// A set of N cells that must contain each symbol exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub kind: UnitKind,
    pub index: usize,
    pub cells: Vec<Pos>,
}

impl Unit {
    fn new<I: IntoIterator<Item = Pos>>(kind: UnitKind, index: usize, cells: I) -> Self {
        Self {
            kind,
            index,
            cells: cells.into_iter().collect(),
        }
    }

    /// Stable identifier used in constraint names, e.g. `row_3`, `diagonal_anti`.
    #[must_use]
    pub fn tag(&self) -> String {
        match self.kind {
            UnitKind::Row => format!("row_{}", self.index),
            UnitKind::Column => format!("col_{}", self.index),
            UnitKind::Box => format!("box_{}", self.index),
            UnitKind::MainDiagonal => "diagonal_main".to_string(),
            UnitKind::AntiDiagonal => "diagonal_anti".to_string(),
        }
    }
}

/// Human-readable, 1-based.
impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            UnitKind::Row => write!(f, "row {}", self.index + 1),
            UnitKind::Column => write!(f, "column {}", self.index + 1),
            UnitKind::Box => write!(f, "box {}", self.index + 1),
            UnitKind::MainDiagonal => write!(f, "the main diagonal"),
            UnitKind::AntiDiagonal => write!(f, "the anti-diagonal"),
        }
    }
}
