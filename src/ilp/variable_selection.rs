#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching heuristics for the bundled backend.

use crate::ilp::assignment::PartialAssignment;
use crate::ilp::model::{Model, VarId};
use clap::ValueEnum;
use std::fmt::{self, Display};

pub trait VariableSelection {
    fn new(model: &Model, seed: u64) -> Self
    where
        Self: Sized;

    /// The next decision, or `None` once every variable is assigned.
    fn pick(&mut self, model: &Model, assignment: &PartialAssignment) -> Option<(VarId, bool)>;
}

/// Lowest-numbered unassigned variable, tried true first.
#[derive(Debug, Clone, Default)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn new(_model: &Model, _seed: u64) -> Self {
        Self
    }

    fn pick(&mut self, _model: &Model, assignment: &PartialAssignment) -> Option<(VarId, bool)> {
        assignment.unassigned().next().map(|v| (v, true))
    }
}

/// Uniformly random unassigned variable, tried true first.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    rng: fastrand::Rng,
}

impl VariableSelection for RandomOrder {
    fn new(_model: &Model, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    fn pick(&mut self, _model: &Model, assignment: &PartialAssignment) -> Option<(VarId, bool)> {
        let free = assignment.len() - assignment.assigned_count();
        if free == 0 {
            return None;
        }
        let nth = self.rng.usize(..free);
        assignment.unassigned().nth(nth).map(|v| (v, true))
    }
}

/// Picks the open exactly-one row with the fewest remaining candidates and
/// sets its first candidate true. Falls back to fixed order when no such row
/// is open.
#[derive(Debug, Clone, Default)]
pub struct MostConstrained {
    rows: Vec<usize>,
}

impl VariableSelection for MostConstrained {
    fn new(model: &Model, _seed: u64) -> Self {
        let rows = model
            .constraints()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_exactly_one())
            .map(|(i, _)| i)
            .collect();
        Self { rows }
    }

    fn pick(&mut self, model: &Model, assignment: &PartialAssignment) -> Option<(VarId, bool)> {
        let constraints = model.constraints();
        let mut best: Option<(usize, VarId)> = None;

        for &i in &self.rows {
            let mut free = 0;
            let mut first = None;
            let mut satisfied = false;
            for t in &constraints[i].terms {
                match assignment.value(t.var) {
                    Some(true) => {
                        satisfied = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        free += 1;
                        first.get_or_insert(t.var);
                    }
                }
            }
            if satisfied {
                continue;
            }
            if let Some(var) = first {
                if best.is_none_or(|(count, _)| free < count) {
                    best = Some((free, var));
                    if free <= 2 {
                        break;
                    }
                }
            }
        }

        best.map(|(_, var)| (var, true))
            .or_else(|| assignment.unassigned().next().map(|v| (v, true)))
    }
}

/// Runtime-selectable heuristic.
#[derive(Debug, Clone)]
pub enum VariableSelectionImpls {
    MostConstrained(MostConstrained),
    Fixed(FixedOrder),
    Random(RandomOrder),
}

impl VariableSelection for VariableSelectionImpls {
    fn new(model: &Model, seed: u64) -> Self {
        Self::MostConstrained(MostConstrained::new(model, seed))
    }

    fn pick(&mut self, model: &Model, assignment: &PartialAssignment) -> Option<(VarId, bool)> {
        match self {
            Self::MostConstrained(s) => s.pick(model, assignment),
            Self::Fixed(s) => s.pick(model, assignment),
            Self::Random(s) => s.pick(model, assignment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum VariableSelectionType {
    #[default]
    MostConstrained,
    Fixed,
    Random,
}

impl Display for VariableSelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MostConstrained => write!(f, "most-constrained"),
            Self::Fixed => write!(f, "fixed"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl VariableSelectionType {
    #[must_use]
    pub fn to_impl(self, model: &Model, seed: u64) -> VariableSelectionImpls {
        match self {
            Self::MostConstrained => {
                VariableSelectionImpls::MostConstrained(MostConstrained::new(model, seed))
            }
            Self::Fixed => VariableSelectionImpls::Fixed(FixedOrder::new(model, seed)),
            Self::Random => VariableSelectionImpls::Random(RandomOrder::new(model, seed)),
        }
    }
}
