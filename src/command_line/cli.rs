#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_ilp::batch::{
    BatchSummary, PipelineOptions, PuzzleReport, read_batch_file, run_batch, write_reports,
};
use sudoku_ilp::ilp::dpll::DpllAdapter;
use sudoku_ilp::ilp::solver::SolverConfig;
use sudoku_ilp::ilp::variable_selection::VariableSelectionType;
use sudoku_ilp::sudoku::alphabet::Alphabet;
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{error, info, warn};

/// Input file name used when no subcommand is given.
pub(crate) const DEFAULT_INPUT: &str = "input_sudokus.txt";
/// Output file name used when no subcommand is given.
pub(crate) const DEFAULT_OUTPUT: &str = "output_solutions.txt";

/// Defines the command-line interface.
///
/// Without a subcommand, `input_sudokus.txt` is solved into
/// `output_solutions.txt`.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku-ilp",
    version,
    about = "Solves batches of Sudoku and Sudoku X puzzles through a 0/1 linear model"
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options, used when no subcommand is given.
    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a batch file and write the solutions file.
    Solve {
        /// Batch file: a count line, then blank-line separated `<N> <0|1>` blocks.
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Where to write the solutions.
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Also write every encoded model as `<input>.<index>.lp` (CPLEX LP format).
        #[arg(short, long, default_value_t = false)]
        export_lp: bool,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `*.sudoku` batch file under a directory, writing
    /// `<file>.solutions` next to each.
    Dir {
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by the solving subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check every decoded grid against all model constraints.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print the statistics table after the batch.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Solve independent puzzles in parallel. Output order is unchanged.
    #[arg(short, long, default_value_t = false)]
    pub(crate) parallel: bool,

    /// Per-puzzle wall-clock budget in seconds; puzzles that run out are
    /// reported as undetermined.
    #[arg(long, value_parser = parse_seconds)]
    pub(crate) time_limit: Option<Duration>,

    /// Per-puzzle budget of branching decisions.
    #[arg(long)]
    pub(crate) decision_limit: Option<u64>,

    #[arg(long, default_value_t = VariableSelectionType::MostConstrained)]
    pub(crate) variable_selection: VariableSelectionType,

    /// Seed for `--variable-selection random`.
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,
}

impl CommonOptions {
    pub(crate) const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            time_limit: self.time_limit,
            decision_limit: self.decision_limit,
            variable_selection: self.variable_selection,
            seed: self.seed,
        }
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("`{s}` is not a valid duration: {e}"))
}

/// Solves one batch file into one solutions file.
///
/// Individual puzzle failures end up in the solutions file and do not make
/// this fail.
///
/// # Errors
///
/// If the batch file cannot be read or framed, or the output cannot be
/// written.
pub(crate) fn solve_file(
    input: &Path,
    output: &Path,
    export_lp: bool,
    common: &CommonOptions,
) -> Result<BatchSummary, String> {
    let time = Instant::now();
    let blocks = read_batch_file(input).map_err(|e| format!("{}: {e}", input.display()))?;
    let read_time = time.elapsed();

    let options = PipelineOptions {
        parallel: common.parallel,
        verify: common.verify,
        export_lp: export_lp.then(|| input.to_path_buf()),
    };
    let adapter = DpllAdapter::new(common.solver_config());
    let alphabet = Alphabet::standard();

    let time = Instant::now();
    let reports = run_batch(&blocks, &adapter, &alphabet, &options);
    let elapsed = time.elapsed();

    write_solutions(output, &reports)?;
    info!(output = %output.display(), puzzles = reports.len(), "solutions written");

    let summary = BatchSummary::from_reports(&reports);
    if common.stats {
        print_stats(read_time, elapsed, &summary);
    }
    Ok(summary)
}

fn write_solutions(output: &Path, reports: &[PuzzleReport]) -> Result<(), String> {
    let file = File::create(output)
        .map_err(|e| format!("unable to create {}: {e}", output.display()))?;
    write_reports(BufWriter::new(file), reports)
        .map_err(|e| format!("unable to write {}: {e}", output.display()))
}

/// Solves every `*.sudoku` file under `path`.
///
/// # Errors
///
/// If `path` is not a directory, or any file in it could not be processed.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("not a directory: {}", path.display()));
    }

    let mut failed = 0;
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            warn!(path = %file_path.display(), "skipping non-sudoku file");
            continue;
        }

        let output = PathBuf::from(format!("{}.solutions", file_path.display()));
        info!(input = %file_path.display(), "solving");
        if let Err(e) = solve_file(file_path, &output, false, common) {
            error!("{e}");
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(format!("{failed} file(s) could not be solved"));
    }
    Ok(())
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
fn memory_mib() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics for one batch.
pub(crate) fn print_stats(read_time: Duration, elapsed: Duration, s: &BatchSummary) {
    let solve_secs = s.solve_time.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Read time (s)", format!("{:.3}", read_time.as_secs_f64()));
    stat_line(
        "Encode time (s)",
        format!("{:.3}", s.parse_time.as_secs_f64()),
    );
    stat_line("Puzzles", s.puzzles);
    stat_line("Solved", s.solved);
    stat_line("No solution", s.no_solution);
    stat_line("Undetermined", s.undetermined);
    stat_line("Rejected", s.rejected);
    stat_line("Inconsistent", s.inconsistent);
    stat_line("Variables", s.variables);
    stat_line("Constraints", s.constraints);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.search.decisions, solve_secs);
    stat_line_with_rate("Propagations", s.search.propagations, solve_secs);
    stat_line_with_rate("Conflicts", s.search.conflicts, solve_secs);
    stat_line("Max decision depth", s.search.max_depth);
    if let Some((allocated, resident)) = memory_mib() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("Solver time (s)", format!("{solve_secs:.3}"));
    stat_line("Wall time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sudoku-ilp", "solve"]).unwrap();
        let Some(Commands::Solve {
            input,
            output,
            export_lp,
            common,
        }) = cli.command
        else {
            panic!("expected solve");
        };
        assert_eq!(input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!export_lp);
        assert!(common.verify);
        assert_eq!(common.solver_config(), SolverConfig::default());
    }

    #[test]
    fn test_solver_options() {
        let cli = Cli::try_parse_from([
            "sudoku-ilp",
            "solve",
            "puzzles.txt",
            "--time-limit",
            "1.5",
            "--decision-limit",
            "100",
            "--variable-selection",
            "random",
            "--seed",
            "7",
            "--verify",
            "false",
        ])
        .unwrap();
        let Some(Commands::Solve { common, .. }) = cli.command else {
            panic!("expected solve");
        };
        assert!(!common.verify);
        let config = common.solver_config();
        assert_eq!(config.time_limit, Some(Duration::from_millis(1500)));
        assert_eq!(config.decision_limit, Some(100));
        assert_eq!(config.variable_selection, VariableSelectionType::Random);
        assert_eq!(config.seed, 7);

        assert!(Cli::try_parse_from(["sudoku-ilp", "solve", "--time-limit", "-1"]).is_err());
    }

    #[test]
    fn test_solve_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("sudoku-ilp-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("batch.sudoku");
        std::fs::write(&input, sudoku_ilp::sudoku::samples::BATCH).unwrap();

        solve_dir(&dir, &CommonOptions {
            verify: true,
            ..CommonOptions::default()
        })
        .unwrap();

        let solutions = std::fs::read_to_string(dir.join("batch.sudoku.solutions")).unwrap();
        assert!(solutions.starts_with("Solution for Sudoku 1:\n2 4 3 1\n"));
        assert!(solutions.contains("Solution for Sudoku 4: Error [UnsatisfiableGivens]"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
