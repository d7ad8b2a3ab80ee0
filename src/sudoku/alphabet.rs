#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The symbol alphabet: a bijection between puzzle symbols and dense ranks.
//!
//! Ranks run from 1 to the alphabet length. The standard alphabet is the
//! digits `1`–`9` followed by `A`–`Z`, so `A` is rank 10 and a 16×16 puzzle
//! uses `1`–`9` and `A`–`G`. The empty cell is written `0` or `.` and has no
//! rank.

use crate::sudoku::error::PuzzleError;
use rustc_hash::FxHashMap;

/// Dense integer form of a symbol, `1..=N`.
pub type Rank = usize;

/// Symbols of the standard alphabet, in rank order.
pub const STANDARD_SYMBOLS: &str = "123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Written form of an empty cell in output.
pub const EMPTY_SYMBOL: char = '0';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    ranks: FxHashMap<char, Rank>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}

impl Alphabet {
    /// Digits then upper-case letters.
    #[must_use]
    pub fn standard() -> Self {
        Self::build(STANDARD_SYMBOLS.chars().collect())
    }

    /// A custom alphabet. Returns `None` if a symbol repeats, is one of
    /// the empty markers `0` and `.`, or is a digit outside its own rank.
    ///
    /// Digit tokens are always read as decimal ranks, so digit `d` may only
    /// appear as the `d`-th symbol.
    #[must_use]
    pub fn with_symbols(symbols: &str) -> Option<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        let mut seen = FxHashMap::default();
        for (i, &s) in symbols.iter().enumerate() {
            let misplaced_digit = s.to_digit(10).is_some_and(|d| d as usize != i + 1);
            if s == '0'
                || s == '.'
                || s.is_whitespace()
                || misplaced_digit
                || seen.insert(s, ()).is_some()
            {
                return None;
            }
        }
        Some(Self::build(symbols))
    }

    fn build(symbols: Vec<char>) -> Self {
        let ranks = symbols
            .iter()
            .enumerate()
            .map(|(i, &s)| (s, i + 1))
            .collect();
        Self { symbols, ranks }
    }

    /// Number of symbols, which is the largest supported puzzle size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// # Errors
    ///
    /// [`PuzzleError::AlphabetTooSmall`] when fewer than `size` symbols exist.
    pub fn ensure_capacity(&self, size: usize) -> Result<(), PuzzleError> {
        if size > self.len() {
            return Err(PuzzleError::AlphabetTooSmall {
                size,
                available: self.len(),
            });
        }
        Ok(())
    }

    /// Rank of a single symbol. Letters match case-insensitively.
    #[must_use]
    pub fn rank_of(&self, symbol: char) -> Option<Rank> {
        self.ranks
            .get(&symbol)
            .or_else(|| self.ranks.get(&symbol.to_ascii_uppercase()))
            .copied()
    }

    /// Canonical symbol of a rank.
    #[must_use]
    pub fn symbol_of(&self, rank: Rank) -> Option<char> {
        rank.checked_sub(1).and_then(|i| self.symbols.get(i)).copied()
    }

    /// Reads one grid token for a puzzle of `size`. `Ok(None)` is an empty
    /// cell. `row` and `col` are 0-based and only used for the diagnostic.
    ///
    /// Accepted forms: `0`/`.` (empty), a decimal number `1..=size`, or a
    /// single alphabet symbol whose rank is at most `size`.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::InvalidSymbol`] for anything else.
    pub fn parse_token(
        &self,
        token: &str,
        size: usize,
        row: usize,
        col: usize,
    ) -> Result<Option<Rank>, PuzzleError> {
        let invalid = || PuzzleError::InvalidSymbol {
            token: token.to_string(),
            row: row + 1,
            col: col + 1,
            size,
        };

        if token == "." {
            return Ok(None);
        }

        let rank = if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            token.parse::<usize>().map_err(|_| invalid())?
        } else {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => self.rank_of(c).ok_or_else(invalid)?,
                _ => return Err(invalid()),
            }
        };

        match rank {
            0 => Ok(None),
            r if r <= size => Ok(Some(r)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bijection() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.len(), 35);
        for rank in 1..=alphabet.len() {
            let symbol = alphabet.symbol_of(rank).expect("rank in range");
            assert_eq!(alphabet.rank_of(symbol), Some(rank));
        }
        assert_eq!(alphabet.symbol_of(0), None);
        assert_eq!(alphabet.symbol_of(36), None);
    }

    #[test]
    fn test_letters_continue_digits() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.rank_of('9'), Some(9));
        assert_eq!(alphabet.rank_of('A'), Some(10));
        assert_eq!(alphabet.rank_of('G'), Some(16));
        assert_eq!(alphabet.rank_of('d'), Some(13));
        assert_eq!(alphabet.symbol_of(13), Some('D'));
        assert_eq!(alphabet.rank_of('0'), None);
        assert_eq!(alphabet.rank_of('#'), None);
    }

    #[test]
    fn test_parse_token_forms() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.parse_token("0", 16, 0, 0), Ok(None));
        assert_eq!(alphabet.parse_token("00", 16, 0, 0), Ok(None));
        assert_eq!(alphabet.parse_token(".", 16, 0, 0), Ok(None));
        assert_eq!(alphabet.parse_token("7", 16, 0, 0), Ok(Some(7)));
        assert_eq!(alphabet.parse_token("13", 16, 0, 0), Ok(Some(13)));
        assert_eq!(alphabet.parse_token("D", 16, 0, 0), Ok(Some(13)));
        assert_eq!(alphabet.parse_token("g", 16, 0, 0), Ok(Some(16)));
    }

    #[test]
    fn test_parse_token_rejects() {
        let alphabet = Alphabet::standard();
        for token in ["H", "17", "AB", "-1", "?", "99999999999999999999999"] {
            let err = alphabet.parse_token(token, 16, 2, 4).unwrap_err();
            assert_eq!(
                err,
                PuzzleError::InvalidSymbol {
                    token: token.to_string(),
                    row: 3,
                    col: 5,
                    size: 16
                }
            );
        }
        assert!(alphabet.parse_token("A", 9, 0, 0).is_err());
    }

    #[test]
    fn test_capacity() {
        let alphabet = Alphabet::standard();
        assert!(alphabet.ensure_capacity(25).is_ok());
        assert_eq!(
            alphabet.ensure_capacity(36),
            Err(PuzzleError::AlphabetTooSmall {
                size: 36,
                available: 35
            })
        );
    }

    #[test]
    fn test_custom_alphabet() {
        let alphabet = Alphabet::with_symbols("abcd").expect("valid alphabet");
        assert_eq!(alphabet.rank_of('c'), Some(3));
        assert_eq!(alphabet.symbol_of(4), Some('d'));
        assert!(Alphabet::with_symbols("aba").is_none());
        assert!(Alphabet::with_symbols("a0").is_none());
    }

    #[test]
    fn test_custom_alphabet_digits_keep_their_rank() {
        assert!(Alphabet::with_symbols("abc1").is_none());
        assert!(Alphabet::with_symbols("2bcd").is_none());

        let alphabet = Alphabet::with_symbols("12cd").expect("digits in place");
        assert_eq!(alphabet.parse_token("2", 4, 0, 0), Ok(Some(2)));
        assert_eq!(alphabet.parse_token("c", 4, 0, 0), Ok(Some(3)));
        assert_eq!(alphabet.rank_of('2'), Some(2));
    }
}
