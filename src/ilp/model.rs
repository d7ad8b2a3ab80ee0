#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A binary feasibility model: 0/1 variables and integral linear constraints.
//!
//! The model carries no objective. Solving it means finding any assignment of
//! the binary variables that satisfies every constraint, or proving that none
//! exists. Each constraint is tagged with a [`ConstraintKind`] and a name so
//! that a model can be inspected, exported, and verified constraint by
//! constraint.

use crate::ilp::assignment::Assignment;
use smallvec::SmallVec;
use std::fmt::{self, Display};

/// Dense identifier of a binary variable inside a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VarId(u32);

impl VarId {
    /// Wraps a raw index.
    ///
    /// # Panics
    ///
    /// If `index` does not fit in a `u32`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("variable index overflowed u32"))
    }

    /// The raw index of the variable.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single `coeff * var` term of a linear expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub var: VarId,
    pub coeff: i32,
}

impl Term {
    #[must_use]
    pub const fn new(var: VarId, coeff: i32) -> Self {
        Self { var, coeff }
    }

    /// A term with coefficient one.
    #[must_use]
    pub const fn unit(var: VarId) -> Self {
        Self::new(var, 1)
    }
}

/// Relation between the left-hand side and the right-hand side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

impl Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Le => write!(f, "<="),
            Self::Ge => write!(f, ">="),
            Self::Eq => write!(f, "="),
        }
    }
}

/// The family a constraint belongs to. Used for traceability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    Cell,
    Row,
    Column,
    Box,
    Diagonal,
    Pin,
}

impl ConstraintKind {
    pub const ALL: [Self; 6] = [
        Self::Cell,
        Self::Row,
        Self::Column,
        Self::Box,
        Self::Diagonal,
        Self::Pin,
    ];
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cell => "cell",
            Self::Row => "row",
            Self::Column => "column",
            Self::Box => "box",
            Self::Diagonal => "diagonal",
            Self::Pin => "pin",
        };
        write!(f, "{name}")
    }
}

/// Term storage. Sudoku constraints have at most `N` terms, so sizes up to
/// 16 stay inline.
pub type Terms = SmallVec<[Term; 16]>;

/// `sum(terms) <sense> rhs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub kind: ConstraintKind,
    pub name: String,
    pub terms: Terms,
    pub sense: Sense,
    pub rhs: i32,
}

impl LinearConstraint {
    #[must_use]
    pub fn new(
        kind: ConstraintKind,
        name: impl Into<String>,
        terms: Terms,
        sense: Sense,
        rhs: i32,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            terms,
            sense,
            rhs,
        }
    }

    /// `sum(vars) = 1`
    pub fn exactly_one<I: IntoIterator<Item = VarId>>(
        kind: ConstraintKind,
        name: impl Into<String>,
        vars: I,
    ) -> Self {
        let terms = vars.into_iter().map(Term::unit).collect();
        Self::new(kind, name, terms, Sense::Eq, 1)
    }

    /// `var = value`
    #[must_use]
    pub fn fix(kind: ConstraintKind, name: impl Into<String>, var: VarId, value: bool) -> Self {
        let mut terms = Terms::new();
        terms.push(Term::unit(var));
        Self::new(kind, name, terms, Sense::Eq, i32::from(value))
    }

    /// Whether this is a `sum(vars) = 1` constraint with unit coefficients.
    #[must_use]
    pub fn is_exactly_one(&self) -> bool {
        self.sense == Sense::Eq && self.rhs == 1 && self.terms.iter().all(|t| t.coeff == 1)
    }

    /// Evaluates the left-hand side under a complete assignment.
    #[must_use]
    pub fn activity(&self, assignment: &Assignment) -> i64 {
        self.terms
            .iter()
            .filter(|t| assignment.is_true(t.var))
            .map(|t| i64::from(t.coeff))
            .sum()
    }

    #[must_use]
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        let lhs = self.activity(assignment);
        let rhs = i64::from(self.rhs);
        match self.sense {
            Sense::Le => lhs <= rhs,
            Sense::Ge => lhs >= rhs,
            Sense::Eq => lhs == rhs,
        }
    }
}

/// A feasibility model over binary variables.
///
/// Built once, then handed to a solver by shared reference; nothing mutates
/// it after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    names: Vec<String>,
    constraints: Vec<LinearConstraint>,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the variable and constraint tables.
    #[must_use]
    pub fn with_capacity(vars: usize, constraints: usize) -> Self {
        Self {
            names: Vec::with_capacity(vars),
            constraints: Vec::with_capacity(constraints),
        }
    }

    /// Declares a new binary variable and returns its id.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId::new(self.names.len());
        self.names.push(name.into());
        id
    }

    /// Adds a constraint.
    ///
    /// # Panics
    ///
    /// If the constraint mentions a variable that was not declared on this model.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        assert!(
            constraint
                .terms
                .iter()
                .all(|t| t.var.index() < self.names.len()),
            "constraint `{}` refers to an undeclared variable",
            constraint.name
        );
        self.constraints.push(constraint);
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    #[must_use]
    pub fn var_name(&self, var: VarId) -> &str {
        &self.names[var.index()]
    }

    #[must_use]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn vars(&self) -> impl Iterator<Item = VarId> + '_ {
        (0..self.names.len()).map(VarId::new)
    }

    #[must_use]
    pub fn count_by_kind(&self, kind: ConstraintKind) -> usize {
        self.constraints.iter().filter(|c| c.kind == kind).count()
    }

    /// Checks a complete assignment against every constraint.
    ///
    /// # Errors
    ///
    /// Returns the names of the violated constraints, in model order.
    pub fn verify(&self, assignment: &Assignment) -> Result<(), Vec<String>> {
        let violated: Vec<String> = self
            .constraints
            .iter()
            .filter(|c| !c.is_satisfied(assignment))
            .map(|c| c.name.clone())
            .collect();

        if violated.is_empty() {
            Ok(())
        } else {
            Err(violated)
        }
    }
}
