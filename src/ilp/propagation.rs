#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Bound propagation for 0/1 linear constraints.
//!
//! For a constraint `sum(a_i * x_i) <sense> rhs` under a partial assignment,
//! the smallest and largest values the left-hand side can still reach are
//! computed from the assigned terms plus the negative (resp. positive)
//! coefficients of the unassigned ones. A constraint whose reachable range
//! misses `rhs` is a conflict; an unassigned variable whose value would push
//! the range past `rhs` is forced to the opposite value.
//!
//! For the `sum(x_i) = 1` rows a Sudoku model is made of, this reduces to the
//! familiar rules: once one variable of a row is true the rest become false,
//! and once all but one are false the last becomes true.

use crate::ilp::assignment::PartialAssignment;
use crate::ilp::model::{LinearConstraint, Model, Sense, VarId};
use crate::ilp::trail::{Reason, Trail};
use std::collections::VecDeque;

/// Index of the constraint that can no longer be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub constraint: usize,
}

/// Occurrence lists plus the queue of variables whose constraints still
/// have to be revised.
#[derive(Debug, Clone, Default)]
pub struct Propagator {
    occurrences: Vec<Vec<usize>>,
    queue: VecDeque<VarId>,
    propagations: u64,
}

impl Propagator {
    #[must_use]
    pub fn new(model: &Model) -> Self {
        let mut occurrences = vec![Vec::new(); model.num_vars()];
        for (i, c) in model.constraints().iter().enumerate() {
            for t in &c.terms {
                occurrences[t.var.index()].push(i);
            }
        }
        Self {
            occurrences,
            queue: VecDeque::new(),
            propagations: 0,
        }
    }

    /// Number of assignments forced so far.
    #[must_use]
    pub const fn propagations(&self) -> u64 {
        self.propagations
    }

    pub fn enqueue(&mut self, var: VarId) {
        self.queue.push_back(var);
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Revises every constraint once, then propagates to a fixpoint.
    ///
    /// # Errors
    ///
    /// A [`Conflict`] if some constraint cannot be satisfied.
    pub fn propagate_all(
        &mut self,
        model: &Model,
        assignment: &mut PartialAssignment,
        trail: &mut Trail,
        level: usize,
    ) -> Result<(), Conflict> {
        for (i, c) in model.constraints().iter().enumerate() {
            self.propagations += revise(c, i, assignment, trail, level, &mut self.queue)?;
        }
        self.propagate(model, assignment, trail, level)
    }

    /// Drains the queue, revising every constraint of every queued variable.
    ///
    /// # Errors
    ///
    /// A [`Conflict`] if some constraint cannot be satisfied. The queue is
    /// cleared in that case.
    pub fn propagate(
        &mut self,
        model: &Model,
        assignment: &mut PartialAssignment,
        trail: &mut Trail,
        level: usize,
    ) -> Result<(), Conflict> {
        let constraints = model.constraints();
        while let Some(var) = self.queue.pop_front() {
            for &i in &self.occurrences[var.index()] {
                match revise(&constraints[i], i, assignment, trail, level, &mut self.queue) {
                    Ok(forced) => self.propagations += forced,
                    Err(conflict) => {
                        self.queue.clear();
                        return Err(conflict);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Checks one constraint and assigns every variable it forces. Returns the
/// number of forced variables.
fn revise(
    constraint: &LinearConstraint,
    index: usize,
    assignment: &mut PartialAssignment,
    trail: &mut Trail,
    level: usize,
    queue: &mut VecDeque<VarId>,
) -> Result<u64, Conflict> {
    let mut min_act = 0i64;
    let mut max_act = 0i64;
    for t in &constraint.terms {
        let a = i64::from(t.coeff);
        match assignment.value(t.var) {
            Some(true) => {
                min_act += a;
                max_act += a;
            }
            Some(false) => {}
            None if a < 0 => min_act += a,
            None => max_act += a,
        }
    }

    let rhs = i64::from(constraint.rhs);
    let upper = matches!(constraint.sense, Sense::Le | Sense::Eq);
    let lower = matches!(constraint.sense, Sense::Ge | Sense::Eq);

    if (upper && min_act > rhs) || (lower && max_act < rhs) {
        return Err(Conflict { constraint: index });
    }

    let mut forced = 0;
    for t in &constraint.terms {
        if assignment.value(t.var).is_some() {
            continue;
        }
        let a = i64::from(t.coeff);
        let value = if upper && a > 0 && min_act + a > rhs {
            Some(false)
        } else if upper && a < 0 && min_act - a > rhs {
            Some(true)
        } else if lower && a > 0 && max_act - a < rhs {
            Some(true)
        } else if lower && a < 0 && max_act + a < rhs {
            Some(false)
        } else {
            None
        };

        if let Some(value) = value {
            assignment.assign(t.var, value);
            trail.push(t.var, value, level, Reason::Constraint(index));
            queue.push_back(t.var);
            forced += 1;
        }
    }
    Ok(forced)
}
