#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Validated puzzles and the grid parser.
//!
//! A [`Puzzle`] can only be obtained through validation, so everything
//! downstream (encoder, decoder) may assume a perfect-square size, in-range
//! ranks, and givens that do not already clash in any unit.

use crate::sudoku::alphabet::{Alphabet, EMPTY_SYMBOL, Rank};
use crate::sudoku::error::PuzzleError;
use crate::sudoku::geometry::{Geometry, Pos};
use itertools::Itertools;
use rustc_hash::FxHashMap;

/// Standard Sudoku or Sudoku X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Standard,
    /// Both long diagonals hold every symbol once.
    Diagonal,
}

impl Variant {
    /// Reads the header flag: `0` standard, `1` diagonal.
    #[must_use]
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "0" => Some(Self::Standard),
            "1" => Some(Self::Diagonal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Self::Diagonal)
    }
}

/// An immutable, validated puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    geometry: Geometry,
    variant: Variant,
    cells: Vec<Option<Rank>>,
}

impl Puzzle {
    /// Parses `size` rows of whitespace-separated tokens.
    ///
    /// Checks run in this order, each with its own error: size is a perfect
    /// square, the alphabet is large enough, row and token counts, every
    /// token, and finally that no two givens clash.
    ///
    /// # Errors
    ///
    /// The first [`PuzzleError`] encountered.
    pub fn parse<S: AsRef<str>>(
        size: usize,
        variant: Variant,
        rows: &[S],
        alphabet: &Alphabet,
    ) -> Result<Self, PuzzleError> {
        let geometry = Geometry::new(size)?;
        alphabet.ensure_capacity(size)?;

        if rows.len() != size {
            return Err(PuzzleError::malformed(format!(
                "expected {size} rows, found {}",
                rows.len()
            )));
        }

        let mut cells = Vec::with_capacity(geometry.cell_count());
        for (r, line) in rows.iter().enumerate() {
            let tokens = line.as_ref().split_whitespace().collect_vec();
            if tokens.len() != size {
                return Err(PuzzleError::malformed(format!(
                    "row {} has {} entries, expected {size}",
                    r + 1,
                    tokens.len()
                )));
            }
            for (c, token) in tokens.into_iter().enumerate() {
                cells.push(alphabet.parse_token(token, size, r, c)?);
            }
        }

        Self::from_cells(geometry, variant, cells, alphabet)
    }

    /// Builds a puzzle from numeric rows, `0` meaning empty. The size is the
    /// number of rows.
    ///
    /// # Errors
    ///
    /// The same checks as [`Puzzle::parse`].
    pub fn from_ranks(
        ranks: &[Vec<usize>],
        variant: Variant,
        alphabet: &Alphabet,
    ) -> Result<Self, PuzzleError> {
        let size = ranks.len();
        let geometry = Geometry::new(size)?;
        alphabet.ensure_capacity(size)?;

        let mut cells = Vec::with_capacity(geometry.cell_count());
        for (r, row) in ranks.iter().enumerate() {
            if row.len() != size {
                return Err(PuzzleError::malformed(format!(
                    "row {} has {} entries, expected {size}",
                    r + 1,
                    row.len()
                )));
            }
            for (c, &rank) in row.iter().enumerate() {
                match rank {
                    0 => cells.push(None),
                    v if v <= size => cells.push(Some(v)),
                    v => {
                        return Err(PuzzleError::InvalidSymbol {
                            token: v.to_string(),
                            row: r + 1,
                            col: c + 1,
                            size,
                        });
                    }
                }
            }
        }

        Self::from_cells(geometry, variant, cells, alphabet)
    }

    fn from_cells(
        geometry: Geometry,
        variant: Variant,
        cells: Vec<Option<Rank>>,
        alphabet: &Alphabet,
    ) -> Result<Self, PuzzleError> {
        let puzzle = Self {
            geometry,
            variant,
            cells,
        };
        puzzle.check_givens(alphabet)?;
        Ok(puzzle)
    }

    /// Rejects givens that already repeat a symbol inside a unit.
    fn check_givens(&self, alphabet: &Alphabet) -> Result<(), PuzzleError> {
        let mut seen: FxHashMap<Rank, Pos> = FxHashMap::default();
        for unit in self.geometry.units(self.is_diagonal()) {
            seen.clear();
            for &(r, c) in &unit.cells {
                let Some(rank) = self.get(r, c) else {
                    continue;
                };
                if let Some(&(r0, c0)) = seen.get(&rank) {
                    return Err(PuzzleError::UnsatisfiableGivens {
                        symbol: alphabet.symbol_of(rank).unwrap_or('?'),
                        unit: unit.to_string(),
                        first: (r0 + 1, c0 + 1),
                        second: (r + 1, c + 1),
                    });
                }
                seen.insert(rank, (r, c));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.geometry.size()
    }

    #[must_use]
    pub const fn box_size(&self) -> usize {
        self.geometry.box_size()
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub const fn is_diagonal(&self) -> bool {
        self.variant.is_diagonal()
    }

    /// Rank at `(row, col)`, `None` if empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Rank> {
        self.cells[row * self.size() + col]
    }

    /// Fixed cells as `((row, col), rank)`, row-major.
    pub fn givens(&self) -> impl Iterator<Item = (Pos, Rank)> + '_ {
        let n = self.size();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|rank| ((i / n, i % n), rank)))
    }

    #[must_use]
    pub fn given_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Rows of `alphabet`'s canonical symbols, `0` for empty cells. Pass the
    /// alphabet the puzzle was read with.
    #[must_use]
    pub fn render(&self, alphabet: &Alphabet) -> String {
        self.cells
            .chunks(self.size())
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        cell.and_then(|rank| alphabet.symbol_of(rank))
                            .unwrap_or(EMPTY_SYMBOL)
                    })
                    .join(" ")
            })
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::error::ErrorKind;
    use crate::sudoku::samples;

    fn parse(size: usize, variant: Variant, rows: &[&str]) -> Result<Puzzle, PuzzleError> {
        Puzzle::parse(size, variant, rows, &Alphabet::standard())
    }

    #[test]
    fn test_parse_nine() {
        let rows: Vec<&str> = samples::NINE.lines().collect();
        let puzzle = parse(9, Variant::Standard, &rows).unwrap();
        assert_eq!(puzzle.size(), 9);
        assert_eq!(puzzle.box_size(), 3);
        assert_eq!(puzzle.get(0, 0), Some(5));
        assert_eq!(puzzle.get(0, 2), None);
        assert_eq!(puzzle.given_count(), 30);
        assert_eq!(puzzle.render(&Alphabet::standard()), samples::NINE.trim_end());
    }

    #[test]
    fn test_render_uses_given_alphabet() {
        let alphabet = Alphabet::with_symbols("wxyz").unwrap();
        let rows = ["w 0 0 z", "0 0 0 0", "0 0 0 0", "x 0 0 0"];
        let puzzle = Puzzle::parse(4, Variant::Standard, &rows, &alphabet).unwrap();
        assert_eq!(puzzle.get(0, 3), Some(4));
        assert_eq!(puzzle.render(&alphabet), "w 0 0 z\n0 0 0 0\n0 0 0 0\nx 0 0 0");
    }

    #[test]
    fn test_parse_rejects_non_square_size() {
        let err = parse(6, Variant::Standard, &["1 2 3 4 5 6"; 6]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSize);
    }

    #[test]
    fn test_parse_rejects_huge_size() {
        let row = vec!["0"; 36].join(" ");
        let rows = vec![row.as_str(); 36];
        let err = parse(36, Variant::Standard, &rows).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlphabetTooSmall);
    }

    #[test]
    fn test_parse_rejects_row_count() {
        let err = parse(4, Variant::Standard, &["0 0 0 0"; 3]).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::MalformedGrid {
                reason: "expected 4 rows, found 3".into()
            }
        );
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let err = parse(4, Variant::Standard, &["0 0 0 0", "0 0 0", "0 0 0 0", "0 0 0 0"])
            .unwrap_err();
        assert_eq!(
            err,
            PuzzleError::MalformedGrid {
                reason: "row 2 has 3 entries, expected 4".into()
            }
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range_symbol() {
        let err = parse(4, Variant::Standard, &["0 0 0 0", "0 5 0 0", "0 0 0 0", "0 0 0 0"])
            .unwrap_err();
        assert_eq!(
            err,
            PuzzleError::InvalidSymbol {
                token: "5".into(),
                row: 2,
                col: 2,
                size: 4
            }
        );
    }

    #[test]
    fn test_duplicate_in_row() {
        let mut rows: Vec<String> = samples::NINE.lines().map(str::to_string).collect();
        rows[0] = "5 3 0 0 7 0 0 0 5".to_string();
        let err = Puzzle::parse(9, Variant::Standard, &rows, &Alphabet::standard()).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::UnsatisfiableGivens {
                symbol: '5',
                unit: "row 1".into(),
                first: (1, 1),
                second: (1, 9),
            }
        );
    }

    #[test]
    fn test_duplicate_in_box() {
        let err = parse(4, Variant::Standard, &["1 0 0 0", "0 1 0 0", "0 0 0 0", "0 0 0 0"])
            .unwrap_err();
        match err {
            PuzzleError::UnsatisfiableGivens { unit, .. } => assert_eq!(unit, "box 1"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_diagonal_duplicate_only_matters_for_diagonal_variant() {
        let rows = ["1 0 0 0", "0 0 0 0", "0 0 1 0", "0 0 0 0"];
        assert!(parse(4, Variant::Standard, &rows).is_ok());
        let err = parse(4, Variant::Diagonal, &rows).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::UnsatisfiableGivens {
                symbol: '1',
                unit: "the main diagonal".into(),
                first: (1, 1),
                second: (3, 3),
            }
        );
    }

    #[test]
    fn test_letters_and_numbers_agree() {
        let alphabet = Alphabet::standard();
        let mut letters = vec![vec!["0"; 16]; 16];
        letters[0][0] = "A";
        letters[1][4] = "d";
        let mut numbers = letters.clone();
        numbers[0][0] = "10";
        numbers[1][4] = "13";

        let join = |g: &Vec<Vec<&str>>| g.iter().map(|r| r.join(" ")).collect_vec();
        let a = Puzzle::parse(16, Variant::Standard, &join(&letters), &alphabet).unwrap();
        let b = Puzzle::parse(16, Variant::Standard, &join(&numbers), &alphabet).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(1, 4), Some(13));
    }

    #[test]
    fn test_from_ranks() {
        let alphabet = Alphabet::standard();
        let puzzle = Puzzle::from_ranks(
            &[vec![1, 0, 0, 0], vec![0, 0, 3, 0], vec![0, 0, 0, 0], vec![0, 0, 0, 4]],
            Variant::Standard,
            &alphabet,
        )
        .unwrap();
        assert_eq!(
            puzzle.givens().collect_vec(),
            vec![((0, 0), 1), ((1, 2), 3), ((3, 3), 4)]
        );

        let err = Puzzle::from_ranks(&[vec![0, 9], vec![0, 0]], Variant::Standard, &alphabet);
        assert_eq!(err.map_err(|e| e.kind()), Err(ErrorKind::InvalidSize));
    }

    #[test]
    fn test_variant_flag() {
        assert_eq!(Variant::from_flag("0"), Some(Variant::Standard));
        assert_eq!(Variant::from_flag("1"), Some(Variant::Diagonal));
        assert_eq!(Variant::from_flag("2"), None);
    }
}
