#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The per-puzzle pipeline and the batch driver.
//!
//! Every block goes through parse → encode → solve → decode → verify on its
//! own and yields exactly one [`PuzzleReport`]. Nothing a single puzzle does
//! can stop the batch.

use crate::batch::reader::Block;
use crate::ilp::assignment::Assignment;
use crate::ilp::lp_format::to_lp;
use crate::ilp::model::Model;
use crate::ilp::solver::{SolutionStats, SolveStatus, SolverAdapter, UnknownReason};
use crate::sudoku::alphabet::Alphabet;
use crate::sudoku::decoder::{SolvedGrid, decode};
use crate::sudoku::encoder::encode;
use crate::sudoku::error::{DecodeError, ErrorKind, PuzzleError};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, info_span, warn};

/// What happened to one puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(SolvedGrid),
    /// The solver proved the model infeasible.
    NoSolution,
    /// The solver stopped without a verdict.
    Undetermined(UnknownReason),
    /// Rejected before encoding.
    Rejected(PuzzleError),
    /// The solver's answer did not decode to a valid grid.
    Inconsistent(DecodeError),
}

impl Outcome {
    /// The error kind for failed puzzles, `None` otherwise.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rejected(e) => Some(e.kind()),
            Self::Inconsistent(e) => Some(e.kind()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// Per-puzzle numbers for the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PuzzleStats {
    pub variables: usize,
    pub constraints: usize,
    pub parse_time: Duration,
    pub solve_time: Duration,
    pub search: SolutionStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleReport {
    /// 1-based, as in the output file.
    pub index: usize,
    pub outcome: Outcome,
    pub stats: PuzzleStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineOptions {
    /// Solve puzzles on the rayon pool.
    pub parallel: bool,
    /// Re-check decoded grids against every model constraint.
    pub verify: bool,
    /// Write each encoded model to `<prefix>.<index>.lp`.
    pub export_lp: Option<PathBuf>,
}

/// Runs one block through the whole pipeline.
pub fn solve_block<A: SolverAdapter + ?Sized>(
    block: &Block,
    adapter: &A,
    alphabet: &Alphabet,
    options: &PipelineOptions,
) -> PuzzleReport {
    let span = info_span!("puzzle", index = block.index);
    let _enter = span.enter();

    let mut stats = PuzzleStats::default();
    let report = |outcome, stats| PuzzleReport {
        index: block.index,
        outcome,
        stats,
    };

    let start = Instant::now();
    let puzzle = match block.parse(alphabet) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            warn!(kind = %e.kind(), line = block.line, "rejected: {e}");
            return report(Outcome::Rejected(e), stats);
        }
    };
    debug!(givens = puzzle.given_count(), "parsed\n{}", puzzle.render(alphabet));
    let encoding = encode(&puzzle);
    let model = &encoding.model;
    stats.parse_time = start.elapsed();
    stats.variables = model.num_vars();
    stats.constraints = model.num_constraints();

    if let Some(prefix) = &options.export_lp {
        export_lp(model, prefix, block.index);
    }

    let solved = adapter.solve(model);
    stats.solve_time = solved.elapsed;
    stats.search = solved.stats;

    let outcome = match solved.status {
        SolveStatus::Optimal(assignment) => {
            let decoded = decode(&assignment, &puzzle, alphabet).and_then(|grid| {
                if options.verify {
                    verify(model, &assignment)?;
                }
                Ok(grid)
            });
            match decoded {
                Ok(grid) => Outcome::Solved(grid),
                Err(e) => {
                    error!(solver = adapter.name(), "inconsistent solver answer: {e}");
                    Outcome::Inconsistent(e)
                }
            }
        }
        SolveStatus::Infeasible => Outcome::NoSolution,
        SolveStatus::Unknown(reason) => {
            warn!(solver = adapter.name(), %reason, "undetermined");
            Outcome::Undetermined(reason)
        }
    };

    info!(
        size = puzzle.size(),
        diagonal = puzzle.is_diagonal(),
        solved = outcome.is_solved(),
        decisions = stats.search.decisions,
        elapsed = ?stats.solve_time,
        "done"
    );
    report(outcome, stats)
}

fn verify(model: &Model, assignment: &Assignment) -> Result<(), DecodeError> {
    model
        .verify(assignment)
        .map_err(|violated| DecodeError::ViolatedConstraints {
            count: violated.len(),
            first: violated.into_iter().next().unwrap_or_default(),
        })
}

fn export_lp(model: &Model, prefix: &Path, index: usize) {
    let path = PathBuf::from(format!("{}.{index}.lp", prefix.display()));
    match fs::write(&path, to_lp(model)) {
        Ok(()) => debug!(path = %path.display(), "model written"),
        Err(e) => warn!(path = %path.display(), "unable to write model: {e}"),
    }
}

/// Solves every block, in parallel when asked. Reports come back in block
/// order either way.
pub fn run_batch<A: SolverAdapter + ?Sized>(
    blocks: &[Block],
    adapter: &A,
    alphabet: &Alphabet,
    options: &PipelineOptions,
) -> Vec<PuzzleReport> {
    info!(
        puzzles = blocks.len(),
        solver = adapter.name(),
        parallel = options.parallel,
        "solving batch"
    );
    if options.parallel {
        blocks
            .par_iter()
            .map(|block| solve_block(block, adapter, alphabet, options))
            .collect()
    } else {
        blocks
            .iter()
            .map(|block| solve_block(block, adapter, alphabet, options))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::reader::parse_batch;
    use crate::ilp::dpll::DpllAdapter;
    use crate::ilp::solver::SolveOutcome;
    use crate::sudoku::samples;

    struct GivesUp;

    impl SolverAdapter for GivesUp {
        fn name(&self) -> &'static str {
            "gives-up"
        }

        fn solve(&self, _model: &Model) -> SolveOutcome {
            SolveOutcome {
                status: SolveStatus::Unknown(UnknownReason::TimeLimit),
                stats: SolutionStats::default(),
                elapsed: Duration::ZERO,
            }
        }
    }

    /// Claims every model is satisfied by all-false.
    struct Broken;

    impl SolverAdapter for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn solve(&self, model: &Model) -> SolveOutcome {
            SolveOutcome {
                status: SolveStatus::Optimal(Assignment::all_false(model.num_vars())),
                stats: SolutionStats::default(),
                elapsed: Duration::ZERO,
            }
        }
    }

    fn block(text: &str) -> Block {
        parse_batch(text).unwrap().remove(0)
    }

    fn verifying() -> PipelineOptions {
        PipelineOptions {
            verify: true,
            ..PipelineOptions::default()
        }
    }

    #[test]
    fn test_sample_batch_outcomes() {
        let blocks = parse_batch(samples::BATCH).unwrap();
        let reports = run_batch(&blocks, &DpllAdapter::default(), &Alphabet::standard(), &verifying());

        assert_eq!(reports.len(), 4);
        let grids: Vec<String> = reports[..3]
            .iter()
            .map(|r| match &r.outcome {
                Outcome::Solved(grid) => grid.to_string(),
                other => panic!("puzzle {} not solved: {other:?}", r.index),
            })
            .collect();
        assert_eq!(grids[0], samples::FOUR_SOLUTION.trim_end());
        assert_eq!(grids[1], samples::NINE_SOLUTION.trim_end());
        assert_eq!(grids[2], samples::NINE_DIAGONAL_SOLUTION.trim_end());
        assert_eq!(
            reports[3].outcome.error_kind(),
            Some(ErrorKind::UnsatisfiableGivens)
        );
        assert_eq!(reports[1].stats.variables, 729);
        assert_eq!(reports[1].stats.constraints, 4 * 81 + 30);
        assert_eq!(reports[3].stats.variables, 0);
    }

    #[test]
    fn test_parallel_keeps_order() {
        let blocks = parse_batch(samples::BATCH).unwrap();
        let alphabet = Alphabet::standard();
        let adapter = DpllAdapter::default();
        let sequential = run_batch(&blocks, &adapter, &alphabet, &verifying());
        let parallel = run_batch(
            &blocks,
            &adapter,
            &alphabet,
            &PipelineOptions {
                parallel: true,
                ..verifying()
            },
        );
        let outcomes = |reports: &[PuzzleReport]| {
            reports
                .iter()
                .map(|r| (r.index, r.outcome.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(outcomes(&sequential), outcomes(&parallel));
    }

    #[test]
    fn test_globally_infeasible_puzzle() {
        let report = solve_block(
            &block("1\n4 0\n0 2 3 0\n0 1 0 0\n4 0 0 0\n0 0 0 0\n"),
            &DpllAdapter::default(),
            &Alphabet::standard(),
            &verifying(),
        );
        assert_eq!(report.outcome, Outcome::NoSolution);
        assert_eq!(report.stats.variables, 64);
    }

    #[test]
    fn test_unknown_is_not_infeasible() {
        let report = solve_block(
            &block(samples::BATCH),
            &GivesUp,
            &Alphabet::standard(),
            &verifying(),
        );
        assert_eq!(
            report.outcome,
            Outcome::Undetermined(UnknownReason::TimeLimit)
        );
    }

    #[test]
    fn test_contract_breach_is_inconsistent() {
        let report = solve_block(
            &block(samples::BATCH),
            &Broken,
            &Alphabet::standard(),
            &verifying(),
        );
        assert_eq!(
            report.outcome,
            Outcome::Inconsistent(DecodeError::NoSymbol { row: 1, col: 1 })
        );
        assert_eq!(report.outcome.error_kind(), Some(ErrorKind::InternalConsistency));
    }

    #[test]
    fn test_rejected_puzzle_never_reaches_solver() {
        let report = solve_block(
            &block("1\n9 0\n5 3 0 0 7 0 0 0 5\n"),
            &Broken,
            &Alphabet::standard(),
            &verifying(),
        );
        assert_eq!(report.outcome.error_kind(), Some(ErrorKind::MalformedGrid));
        assert_eq!(report.stats, PuzzleStats::default());
    }

    #[test]
    fn test_lp_export() {
        let dir = std::env::temp_dir().join(format!("sudoku-ilp-lp-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let prefix = dir.join("batch");
        let options = PipelineOptions {
            export_lp: Some(prefix.clone()),
            ..PipelineOptions::default()
        };
        solve_block(&block(samples::BATCH), &GivesUp, &Alphabet::standard(), &options);

        let lp = fs::read_to_string(dir.join("batch.1.lp")).unwrap();
        assert!(lp.contains(" cell_0_0: + x_0_0_1 + x_0_0_2 + x_0_0_3 + x_0_0_4 = 1"));
        assert!(lp.contains(" pin_0_1: + x_0_1_4 = 1"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
