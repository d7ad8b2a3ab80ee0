#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The bundled backend: depth-first branch-and-propagate over a 0/1 model.
//!
//! The search alternates two steps:
//! 1.  **Propagation:** every constraint touched by a new assignment is
//!     revised, forcing variables whose value is implied (see
//!     [`crate::ilp::propagation`]).
//! 2.  **Decision:** when propagation reaches a fixpoint, the configured
//!     heuristic picks an unassigned variable and a value for it.
//!
//! A conflict undoes the trail back to the most recent decision that has
//! not yet been refuted and asserts its opposite value one level up. When
//! no such decision remains the model is infeasible.

use crate::ilp::assignment::PartialAssignment;
use crate::ilp::model::{Model, VarId};
use crate::ilp::propagation::Propagator;
use crate::ilp::solver::{
    SolutionStats, SolveOutcome, SolveStatus, SolverAdapter, SolverConfig, UnknownReason,
};
use crate::ilp::trail::{Reason, Trail};
use crate::ilp::variable_selection::{VariableSelection, VariableSelectionImpls};
use std::time::Instant;
use tracing::debug;

/// A decision that still has its opposite value to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decision {
    var: VarId,
    value: bool,
    level: usize,
}

/// [`SolverAdapter`] backed by [`Dpll`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DpllAdapter {
    config: SolverConfig,
}

impl DpllAdapter {
    #[must_use]
    pub const fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl SolverAdapter for DpllAdapter {
    fn name(&self) -> &'static str {
        "dpll"
    }

    fn solve(&self, model: &Model) -> SolveOutcome {
        let start = Instant::now();
        let selector = self
            .config
            .variable_selection
            .to_impl(model, self.config.seed);
        let mut dpll = Dpll::new(model, selector, &self.config, start);
        let status = dpll.solve();
        let elapsed = start.elapsed();

        debug!(
            status = %status,
            decisions = dpll.decisions,
            conflicts = dpll.conflicts,
            ?elapsed,
            "dpll finished"
        );

        SolveOutcome {
            status,
            stats: dpll.stats(),
            elapsed,
        }
    }
}

/// Search state for one model.
#[derive(Debug, Clone)]
pub struct Dpll<'m, V: VariableSelection = VariableSelectionImpls> {
    model: &'m Model,
    assignment: PartialAssignment,
    trail: Trail,
    propagator: Propagator,
    selector: V,
    open: Vec<Decision>,
    deadline: Option<Instant>,
    decision_limit: Option<u64>,
    decisions: u64,
    conflicts: u64,
    max_depth: usize,
}

impl<'m, V: VariableSelection> Dpll<'m, V> {
    #[must_use]
    pub fn new(model: &'m Model, selector: V, config: &SolverConfig, start: Instant) -> Self {
        Self {
            model,
            assignment: PartialAssignment::new(model.num_vars()),
            trail: Trail::new(model.num_vars()),
            propagator: Propagator::new(model),
            selector,
            open: Vec::new(),
            // An unrepresentable deadline is no deadline.
            deadline: config
                .time_limit
                .and_then(|limit| start.checked_add(limit)),
            decision_limit: config.decision_limit,
            decisions: 0,
            conflicts: 0,
            max_depth: 0,
        }
    }

    /// Runs the search to a verdict or until a budget runs out.
    pub fn solve(&mut self) -> SolveStatus {
        if self
            .propagator
            .propagate_all(self.model, &mut self.assignment, &mut self.trail, 0)
            .is_err()
        {
            self.conflicts += 1;
            return SolveStatus::Infeasible;
        }

        loop {
            let Some((var, value)) = self.selector.pick(self.model, &self.assignment) else {
                let solution = self.assignment.to_assignment();
                debug_assert!(self.model.verify(&solution).is_ok());
                return SolveStatus::Optimal(solution);
            };

            if let Some(reason) = self.out_of_budget() {
                return SolveStatus::Unknown(reason);
            }

            self.decide(var, value);

            while self.propagate().is_err() {
                self.conflicts += 1;
                if !self.backtrack() {
                    return SolveStatus::Infeasible;
                }
            }
        }
    }

    #[must_use]
    pub const fn stats(&self) -> SolutionStats {
        SolutionStats {
            decisions: self.decisions,
            propagations: self.propagator.propagations(),
            conflicts: self.conflicts,
            max_depth: self.max_depth,
        }
    }

    fn level(&self) -> usize {
        self.open.len()
    }

    fn out_of_budget(&self) -> Option<UnknownReason> {
        if self.decision_limit.is_some_and(|limit| self.decisions >= limit) {
            return Some(UnknownReason::DecisionLimit);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(UnknownReason::TimeLimit);
        }
        None
    }

    fn assign(&mut self, var: VarId, value: bool, level: usize, reason: Reason) {
        self.assignment.assign(var, value);
        self.trail.push(var, value, level, reason);
        self.propagator.enqueue(var);
    }

    fn decide(&mut self, var: VarId, value: bool) {
        self.decisions += 1;
        let level = self.level() + 1;
        self.open.push(Decision { var, value, level });
        self.max_depth = self.max_depth.max(level);
        self.assign(var, value, level, Reason::Decision);
    }

    fn propagate(&mut self) -> Result<(), crate::ilp::propagation::Conflict> {
        let level = self.level();
        self.propagator
            .propagate(self.model, &mut self.assignment, &mut self.trail, level)
    }

    /// Refutes the most recent open decision. Returns false when none is left.
    fn backtrack(&mut self) -> bool {
        let Some(decision) = self.open.pop() else {
            return false;
        };
        self.propagator.clear();
        self.trail.backstep_to(&mut self.assignment, decision.level);
        self.assign(
            decision.var,
            !decision.value,
            decision.level - 1,
            Reason::Flipped,
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::model::{ConstraintKind, LinearConstraint, Sense, Term, Terms};
    use crate::ilp::variable_selection::VariableSelectionType;
    use std::time::Duration;

    /// Latin square of order `n` as an exactly-one model.
    fn latin_square(n: usize) -> (Model, Vec<Vec<Vec<VarId>>>) {
        let mut model = Model::new();
        let x: Vec<Vec<Vec<VarId>>> = (0..n)
            .map(|r| {
                (0..n)
                    .map(|c| (0..n).map(|v| model.add_binary(format!("x_{r}_{c}_{v}"))).collect())
                    .collect()
            })
            .collect();
        for r in 0..n {
            for c in 0..n {
                model.add_constraint(LinearConstraint::exactly_one(
                    ConstraintKind::Cell,
                    format!("cell_{r}_{c}"),
                    (0..n).map(|v| x[r][c][v]),
                ));
            }
        }
        for v in 0..n {
            for i in 0..n {
                model.add_constraint(LinearConstraint::exactly_one(
                    ConstraintKind::Row,
                    format!("row_{i}_{v}"),
                    (0..n).map(|c| x[i][c][v]),
                ));
                model.add_constraint(LinearConstraint::exactly_one(
                    ConstraintKind::Column,
                    format!("col_{i}_{v}"),
                    (0..n).map(|r| x[r][i][v]),
                ));
            }
        }
        (model, x)
    }

    #[test]
    fn test_latin_square_feasible_for_every_heuristic() {
        let (model, _) = latin_square(5);
        for selection in [
            VariableSelectionType::MostConstrained,
            VariableSelectionType::Fixed,
            VariableSelectionType::Random,
        ] {
            let adapter = DpllAdapter::new(SolverConfig {
                variable_selection: selection,
                seed: 3,
                ..SolverConfig::default()
            });
            let outcome = adapter.solve(&model);
            let assignment = outcome
                .status
                .assignment()
                .unwrap_or_else(|| panic!("{selection} found no solution"));
            assert_eq!(model.verify(assignment), Ok(()));
        }
    }

    #[test]
    fn test_contradictory_pins_are_infeasible() {
        let (mut model, x) = latin_square(2);
        // Same value pinned twice in row 0.
        model.add_constraint(LinearConstraint::fix(ConstraintKind::Pin, "p1", x[0][0][0], true));
        model.add_constraint(LinearConstraint::fix(ConstraintKind::Pin, "p2", x[0][1][0], true));

        let outcome = DpllAdapter::default().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_infeasible_after_search() {
        // An order-2 latin square always repeats a value on its main
        // diagonal, so forbidding that takes a search to refute.
        let (mut model, x) = latin_square(2);
        for v in 0..2 {
            model.add_constraint(LinearConstraint::exactly_one(
                ConstraintKind::Diagonal,
                format!("main_{v}"),
                (0..2).map(|i| x[i][i][v]),
            ));
        }

        let outcome = DpllAdapter::default().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.stats.decisions >= 1);
        assert!(outcome.stats.conflicts >= 2);
    }

    #[test]
    fn test_general_inequalities() {
        // a + b + c >= 2, a + b <= 1, 2c - a >= 1
        let mut model = Model::new();
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        let c = model.add_binary("c");
        let ge: Terms = [a, b, c].into_iter().map(Term::unit).collect();
        model.add_constraint(LinearConstraint::new(ConstraintKind::Cell, "ge", ge, Sense::Ge, 2));
        let le: Terms = [a, b].into_iter().map(Term::unit).collect();
        model.add_constraint(LinearConstraint::new(ConstraintKind::Cell, "le", le, Sense::Le, 1));
        let mixed: Terms = [Term::new(c, 2), Term::new(a, -1)].into_iter().collect();
        model.add_constraint(LinearConstraint::new(
            ConstraintKind::Cell,
            "mixed",
            mixed,
            Sense::Ge,
            1,
        ));

        let outcome = DpllAdapter::new(SolverConfig {
            variable_selection: VariableSelectionType::Fixed,
            ..SolverConfig::default()
        })
        .solve(&model);
        let assignment = outcome.status.assignment().expect("model is feasible");
        assert_eq!(model.verify(assignment), Ok(()));
        assert!(assignment.is_true(c));
    }

    #[test]
    fn test_decision_limit_is_unknown_not_infeasible() {
        let (model, _) = latin_square(6);
        let adapter = DpllAdapter::new(SolverConfig {
            decision_limit: Some(0),
            ..SolverConfig::default()
        });
        let outcome = adapter.solve(&model);
        assert_eq!(
            outcome.status,
            SolveStatus::Unknown(UnknownReason::DecisionLimit)
        );
    }

    #[test]
    fn test_zero_time_limit_is_unknown() {
        let (model, _) = latin_square(6);
        let adapter = DpllAdapter::new(SolverConfig {
            time_limit: Some(Duration::ZERO),
            ..SolverConfig::default()
        });
        assert_eq!(
            adapter.solve(&model).status,
            SolveStatus::Unknown(UnknownReason::TimeLimit)
        );
    }

    #[test]
    fn test_huge_time_limit_means_no_deadline() {
        let (model, _) = latin_square(4);
        let adapter = DpllAdapter::new(SolverConfig {
            time_limit: Some(Duration::from_secs_f64(1e19)),
            ..SolverConfig::default()
        });
        let outcome = adapter.solve(&model);
        let assignment = outcome.status.assignment().expect("latin square is feasible");
        assert_eq!(model.verify(assignment), Ok(()));
    }

    #[test]
    fn test_empty_model_is_trivially_feasible() {
        let model = Model::new();
        let outcome = DpllAdapter::default().solve(&model);
        assert!(outcome.status.is_optimal());
        assert_eq!(outcome.stats.decisions, 0);
    }
}
