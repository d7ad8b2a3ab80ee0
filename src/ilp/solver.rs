#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The contract between a model and whatever decides it.
//!
//! A [`SolverAdapter`] takes a [`Model`] and reports one of three verdicts:
//! a satisfying [`Assignment`], a proof that none exists, or that it gave up.
//! Giving up is never reported as infeasibility.

use crate::ilp::assignment::Assignment;
use crate::ilp::model::Model;
use crate::ilp::variable_selection::VariableSelectionType;
use std::fmt::{self, Display};
use std::time::Duration;

/// Why a solver stopped without a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownReason {
    TimeLimit,
    DecisionLimit,
}

impl Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeLimit => write!(f, "time limit reached"),
            Self::DecisionLimit => write!(f, "decision limit reached"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every constraint holds under the assignment.
    Optimal(Assignment),
    Infeasible,
    Unknown(UnknownReason),
}

impl SolveStatus {
    #[must_use]
    pub const fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal(_))
    }

    #[must_use]
    pub const fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Optimal(a) => Some(a),
            _ => None,
        }
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal(_) => write!(f, "optimal"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::Unknown(reason) => write!(f, "unknown ({reason})"),
        }
    }
}

/// Search counters reported alongside a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
    pub max_depth: usize,
}

impl SolutionStats {
    /// Field-wise sum, used to total a batch.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            decisions: self.decisions + other.decisions,
            propagations: self.propagations + other.propagations,
            conflicts: self.conflicts + other.conflicts,
            max_depth: self.max_depth.max(other.max_depth),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub stats: SolutionStats,
    pub elapsed: Duration,
}

/// Solver-side configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverConfig {
    /// Wall-clock budget per model.
    pub time_limit: Option<Duration>,
    /// Maximum number of branching decisions per model.
    pub decision_limit: Option<u64>,
    pub variable_selection: VariableSelectionType,
    /// Seed for randomised heuristics.
    pub seed: u64,
}

/// A backend that decides feasibility of a 0/1 model.
///
/// Implementations must be exact: an `Optimal` assignment satisfies every
/// constraint of the model it was given.
pub trait SolverAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    fn solve(&self, model: &Model) -> SolveOutcome;
}

impl<T: SolverAdapter + ?Sized> SolverAdapter for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> SolveOutcome {
        (**self).solve(model)
    }
}

impl<T: SolverAdapter + ?Sized> SolverAdapter for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> SolveOutcome {
        (**self).solve(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Infeasible.to_string(), "infeasible");
        assert_eq!(
            SolveStatus::Unknown(UnknownReason::TimeLimit).to_string(),
            "unknown (time limit reached)"
        );
        assert!(SolveStatus::Optimal(Assignment::all_false(0)).is_optimal());
        assert!(SolveStatus::Infeasible.assignment().is_none());
    }

    #[test]
    fn test_stats_merge() {
        let a = SolutionStats {
            decisions: 1,
            propagations: 2,
            conflicts: 3,
            max_depth: 4,
        };
        let b = SolutionStats {
            decisions: 10,
            propagations: 20,
            conflicts: 30,
            max_depth: 2,
        };
        let m = a.merge(b);
        assert_eq!(m.decisions, 11);
        assert_eq!(m.propagations, 22);
        assert_eq!(m.conflicts, 33);
        assert_eq!(m.max_depth, 4);
    }
}
