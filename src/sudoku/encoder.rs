#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Encodes a [`Puzzle`] as a 0/1 feasibility model.
//!
//! One binary variable `x_{r}_{c}_{v}` per cell and rank means "cell
//! `(r, c)` holds rank `v`". Every rule is an exactly-one row:
//!
//! | family   | one row per           | variables summed       |
//! |----------|-----------------------|------------------------|
//! | cell     | `(r, c)`              | all ranks of the cell  |
//! | row      | `(r, v)`              | all columns of row r   |
//! | column   | `(c, v)`              | all rows of column c   |
//! | box      | `(b, v)`              | the B×B cells of box b |
//! | diagonal | `(diagonal, v)`       | the N diagonal cells   |
//!
//! and every given is pinned with a single-term equality `x = 1`. A puzzle of
//! size N therefore yields N³ variables and `4·N² (+ 2·N) + givens`
//! constraints.

use crate::ilp::model::{ConstraintKind, LinearConstraint, Model, VarId};
use crate::sudoku::alphabet::Rank;
use crate::sudoku::geometry::Pos;
use crate::sudoku::puzzle::Puzzle;
use itertools::iproduct;
use tracing::debug;

/// The `(row, col, rank) <-> variable` layout: `(row·N + col)·N + rank − 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarIndex {
    size: usize,
}

impl VarIndex {
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.size * self.size * self.size
    }

    /// `rank` is 1-based.
    #[must_use]
    pub fn var(&self, row: usize, col: usize, rank: Rank) -> VarId {
        debug_assert!(row < self.size && col < self.size && (1..=self.size).contains(&rank));
        VarId::new((row * self.size + col) * self.size + rank - 1)
    }

    /// Inverse of [`VarIndex::var`].
    #[must_use]
    pub const fn locate(&self, var: VarId) -> (Pos, Rank) {
        let i = var.index();
        let n = self.size;
        ((i / (n * n), (i / n) % n), i % n + 1)
    }

    /// The N variables of one cell, in rank order.
    pub fn cell_vars(&self, row: usize, col: usize) -> impl Iterator<Item = VarId> + use<> {
        let index = *self;
        (1..=self.size).map(move |rank| index.var(row, col, rank))
    }
}

/// A model together with the layout needed to read its solutions back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub model: Model,
    pub index: VarIndex,
}

/// Builds the feasibility model of `puzzle`. Total for validated puzzles.
#[must_use]
pub fn encode(puzzle: &Puzzle) -> Encoding {
    let n = puzzle.size();
    let geometry = puzzle.geometry();
    let index = VarIndex::new(n);
    let units = geometry.units(puzzle.is_diagonal());

    let mut model = Model::with_capacity(
        index.num_vars(),
        n * n + units.len() * n + puzzle.given_count(),
    );

    for (r, c, v) in iproduct!(0..n, 0..n, 1..=n) {
        let var = model.add_binary(format!("x_{r}_{c}_{v}"));
        debug_assert_eq!(var, index.var(r, c, v));
    }

    for (r, c) in geometry.cells() {
        model.add_constraint(LinearConstraint::exactly_one(
            ConstraintKind::Cell,
            format!("cell_{r}_{c}"),
            index.cell_vars(r, c),
        ));
    }

    for unit in &units {
        let tag = unit.tag();
        for v in 1..=n {
            model.add_constraint(LinearConstraint::exactly_one(
                unit.kind.constraint_kind(),
                format!("{tag}_value_{v}"),
                unit.cells.iter().map(|&(r, c)| index.var(r, c, v)),
            ));
        }
    }

    for ((r, c), v) in puzzle.givens() {
        model.add_constraint(LinearConstraint::fix(
            ConstraintKind::Pin,
            format!("pin_{r}_{c}"),
            index.var(r, c, v),
            true,
        ));
    }

    debug!(
        size = n,
        diagonal = puzzle.is_diagonal(),
        variables = model.num_vars(),
        constraints = model.num_constraints(),
        "encoded puzzle"
    );

    Encoding { model, index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::model::Sense;
    use crate::sudoku::alphabet::Alphabet;
    use crate::sudoku::puzzle::Variant;
    use crate::sudoku::samples;

    fn empty(size: usize, variant: Variant) -> Puzzle {
        Puzzle::from_ranks(&vec![vec![0; size]; size], variant, &Alphabet::standard()).unwrap()
    }

    #[test]
    fn test_counts_for_every_size() {
        for size in [1, 4, 9, 16, 25] {
            for variant in [Variant::Standard, Variant::Diagonal] {
                let enc = encode(&empty(size, variant));
                let diag = if variant.is_diagonal() { 2 * size } else { 0 };
                assert_eq!(enc.model.num_vars(), size * size * size);
                assert_eq!(enc.model.num_constraints(), 4 * size * size + diag);
                assert_eq!(enc.model.count_by_kind(ConstraintKind::Diagonal), diag);
                assert_eq!(enc.model.count_by_kind(ConstraintKind::Pin), 0);
            }
        }
    }

    #[test]
    fn test_pins_add_one_constraint_per_given() {
        let puzzle = samples::nine();
        let enc = encode(&puzzle);
        assert_eq!(enc.model.count_by_kind(ConstraintKind::Pin), 30);
        assert_eq!(enc.model.num_constraints(), 4 * 81 + 30);

        let pin = enc
            .model
            .constraints()
            .iter()
            .find(|c| c.name == "pin_0_0")
            .unwrap();
        assert_eq!(pin.sense, Sense::Eq);
        assert_eq!(pin.rhs, 1);
        assert_eq!(pin.terms[0].var, enc.index.var(0, 0, 5));
    }

    #[test]
    fn test_every_family_is_exactly_one_over_n_vars() {
        let enc = encode(&empty(9, Variant::Diagonal));
        for c in enc.model.constraints() {
            assert!(c.is_exactly_one(), "{}", c.name);
            assert_eq!(c.terms.len(), 9, "{}", c.name);
        }
    }

    #[test]
    fn test_box_constraint_covers_its_box() {
        let enc = encode(&empty(16, Variant::Standard));
        let c = enc
            .model
            .constraints()
            .iter()
            .find(|c| c.name == "box_6_value_13")
            .unwrap();
        let mut cells: Vec<Pos> = c
            .terms
            .iter()
            .map(|t| {
                let (pos, rank) = enc.index.locate(t.var);
                assert_eq!(rank, 13);
                pos
            })
            .collect();
        cells.sort_unstable();
        assert!(cells.contains(&(5, 9)));
        assert!(cells.iter().all(|&(r, c)| (4..8).contains(&r) && (8..12).contains(&c)));
    }

    #[test]
    fn test_anti_diagonal_constraint() {
        let enc = encode(&empty(4, Variant::Diagonal));
        let c = enc
            .model
            .constraints()
            .iter()
            .find(|c| c.name == "diagonal_anti_value_2")
            .unwrap();
        let cells: Vec<Pos> = c.terms.iter().map(|t| enc.index.locate(t.var).0).collect();
        assert_eq!(cells, vec![(0, 3), (1, 2), (2, 1), (3, 0)]);
    }

    #[test]
    fn test_var_index_round_trip() {
        let index = VarIndex::new(9);
        assert_eq!(index.var(0, 0, 1), VarId::new(0));
        assert_eq!(index.var(8, 8, 9), VarId::new(728));
        assert_eq!(index.locate(index.var(4, 7, 3)), ((4, 7), 3));
        assert_eq!(index.cell_vars(1, 1).count(), 9);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let puzzle = samples::sixteen();
        assert_eq!(encode(&puzzle), encode(&puzzle));
    }
}
