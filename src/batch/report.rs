#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solutions file and batch totals.

use crate::batch::pipeline::{Outcome, PuzzleReport, PuzzleStats};
use crate::ilp::solver::SolutionStats;
use std::fmt::{self, Display};
use std::io::{self, Write};
use std::time::Duration;

/// One entry of the solutions file, without the trailing blank line.
impl Display for PuzzleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Solution for Sudoku {}:", self.index)?;
        match &self.outcome {
            Outcome::Solved(grid) => write!(f, "\n{grid}"),
            Outcome::NoSolution => write!(f, " No solution found."),
            Outcome::Undetermined(reason) => write!(f, " Undetermined ({reason})."),
            Outcome::Rejected(e) => write!(f, " Error [{}]: {e}", e.kind()),
            Outcome::Inconsistent(e) => write!(f, " Error [{}]: {e}", e.kind()),
        }
    }
}

/// Writes every report followed by a blank line, in the order given.
///
/// # Errors
///
/// Whatever the writer reports.
pub fn write_reports<W: Write>(mut out: W, reports: &[PuzzleReport]) -> io::Result<()> {
    for report in reports {
        writeln!(out, "{report}")?;
        writeln!(out)?;
    }
    out.flush()
}

/// The solutions file as a string.
#[must_use]
pub fn render_reports(reports: &[PuzzleReport]) -> String {
    reports
        .iter()
        .map(|report| format!("{report}\n\n"))
        .collect()
}

/// Totals over a batch, for the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub puzzles: usize,
    pub solved: usize,
    pub no_solution: usize,
    pub undetermined: usize,
    pub rejected: usize,
    pub inconsistent: usize,
    pub variables: usize,
    pub constraints: usize,
    pub parse_time: Duration,
    pub solve_time: Duration,
    pub search: SolutionStats,
}

impl BatchSummary {
    #[must_use]
    pub fn from_reports(reports: &[PuzzleReport]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, report| {
            match report.outcome {
                Outcome::Solved(_) => acc.solved += 1,
                Outcome::NoSolution => acc.no_solution += 1,
                Outcome::Undetermined(_) => acc.undetermined += 1,
                Outcome::Rejected(_) => acc.rejected += 1,
                Outcome::Inconsistent(_) => acc.inconsistent += 1,
            }
            let PuzzleStats {
                variables,
                constraints,
                parse_time,
                solve_time,
                search,
            } = report.stats;
            acc.puzzles += 1;
            acc.variables += variables;
            acc.constraints += constraints;
            acc.parse_time += parse_time;
            acc.solve_time += solve_time;
            acc.search = acc.search.merge(search);
            acc
        })
    }

    /// Puzzles that did not end with a verdict from the solver.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.undetermined + self.rejected + self.inconsistent
    }
}
