#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variable assignments.
//!
//! [`Assignment`] is the complete 0/1 valuation a solver hands back on
//! success. [`PartialAssignment`] is the working state of a search, where a
//! variable may still be unassigned.

use crate::ilp::model::VarId;
use bit_vec::BitVec;
use core::ops::Index;
use std::fmt::{self, Display};

/// State of one variable during search.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }

    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::Assigned(true))
    }
}

/// A complete assignment: every variable is either true or false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: BitVec,
}

impl Assignment {
    /// All `num_vars` variables false.
    #[must_use]
    pub fn all_false(num_vars: usize) -> Self {
        Self {
            values: BitVec::from_elem(num_vars, false),
        }
    }

    /// Builds an assignment where exactly the given variables are true.
    ///
    /// # Panics
    ///
    /// If a variable index is out of range.
    pub fn from_true_vars<I: IntoIterator<Item = VarId>>(num_vars: usize, vars: I) -> Self {
        let mut assignment = Self::all_false(num_vars);
        for var in vars {
            assignment.values.set(var.index(), true);
        }
        assignment
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// Value of `var`; variables outside the assignment read as false.
    #[must_use]
    pub fn is_true(&self, var: VarId) -> bool {
        self.values.get(var.index()).unwrap_or(false)
    }

    pub fn true_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, v)| v)
            .map(|(i, _)| VarId::new(i))
    }

    #[must_use]
    pub fn count_true(&self) -> usize {
        self.values.iter().filter(|&v| v).count()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for var in self.true_vars() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", var.index())?;
            first = false;
        }
        Ok(())
    }
}

/// The solver's working assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialAssignment {
    states: Vec<VarState>,
    assigned: usize,
}

impl Index<VarId> for PartialAssignment {
    type Output = VarState;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.states[index.index()]
    }
}

impl PartialAssignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; num_vars],
            assigned: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub const fn assigned_count(&self) -> usize {
        self.assigned
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.states.len()
    }

    #[must_use]
    pub fn value(&self, var: VarId) -> Option<bool> {
        match self.states[var.index()] {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }

    pub fn assign(&mut self, var: VarId, value: bool) {
        let slot = &mut self.states[var.index()];
        if slot.is_unassigned() {
            self.assigned += 1;
        }
        *slot = VarState::Assigned(value);
    }

    pub fn unassign(&mut self, var: VarId) {
        let slot = &mut self.states[var.index()];
        if slot.is_assigned() {
            self.assigned -= 1;
        }
        *slot = VarState::Unassigned;
    }

    pub fn unassigned(&self) -> impl Iterator<Item = VarId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_unassigned())
            .map(|(i, _)| VarId::new(i))
    }

    /// Freezes the search state into a complete assignment. Unassigned
    /// variables read as false.
    #[must_use]
    pub fn to_assignment(&self) -> Assignment {
        Assignment::from_true_vars(
            self.states.len(),
            self.states
                .iter()
                .enumerate()
                .filter(|(_, s)| s.is_true())
                .map(|(i, _)| VarId::new(i)),
        )
    }
}
