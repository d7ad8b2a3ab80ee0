#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::ilp::assignment::PartialAssignment;
use crate::ilp::model::VarId;
use std::ops::Index;

/// Why a variable received its value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Copy, Hash, PartialOrd, Ord)]
pub enum Reason {
    #[default]
    Decision,
    /// The opposite value of a refuted decision.
    Flipped,
    /// Forced by the constraint at this index.
    Constraint(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step {
    pub var: VarId,
    pub value: bool,
    pub decision_level: usize,
    pub reason: Reason,
}

/// Assignments in the order they were made.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    t: Vec<Step>,
}

impl Index<usize> for Trail {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.t[index]
    }
}

impl Trail {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            t: Vec::with_capacity(num_vars),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    #[must_use]
    pub fn decision_level(&self) -> usize {
        self.t.last().map_or(0, |s| s.decision_level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.t.iter()
    }

    pub fn push(&mut self, var: VarId, value: bool, decision_level: usize, reason: Reason) {
        self.t.push(Step {
            var,
            value,
            decision_level,
            reason,
        });
    }

    /// Undoes every step made at `level` or deeper.
    pub fn backstep_to(&mut self, a: &mut PartialAssignment, level: usize) {
        while let Some(step) = self.t.last() {
            if step.decision_level < level {
                break;
            }
            a.unassign(step.var);
            self.t.pop();
        }
    }
}
