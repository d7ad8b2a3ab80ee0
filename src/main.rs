//! # sudoku-ilp
//!
//! Command-line front end: reads batch files of Sudoku and Sudoku X puzzles,
//! solves each one through the 0/1 linear model, and writes a solutions file
//! in input order.
//!
//! ```sh
//! # input_sudokus.txt -> output_solutions.txt
//! sudoku-ilp
//!
//! # explicit files, parallel, with a per-puzzle budget and statistics
//! sudoku-ilp solve puzzles.txt -o solutions.txt --parallel --time-limit 10 --stats
//!
//! # every *.sudoku file under a directory
//! sudoku-ilp dir ./puzzles
//!
//! # shell completions
//! sudoku-ilp completions zsh > _sudoku-ilp
//! ```
//!
//! Logs go to stderr and honour `RUST_LOG`; `--debug` lowers the default
//! level to `debug`.

use crate::command_line::cli::{
    Cli, Commands, CommonOptions, DEFAULT_INPUT, DEFAULT_OUTPUT, solve_dir, solve_file,
};
use clap::{CommandFactory, Parser};
use std::path::Path;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let debug = match &cli.command {
        Some(Commands::Solve { common, .. } | Commands::Dir { common, .. }) => common.debug,
        _ => cli.common.debug,
    };
    init_tracing(debug);

    let result = match cli.command {
        Some(Commands::Solve {
            input,
            output,
            export_lp,
            common,
        }) => solve_file(&input, &output, export_lp, &common).map(drop),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => run_default(&cli.common),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_default(common: &CommonOptions) -> Result<(), String> {
    solve_file(
        Path::new(DEFAULT_INPUT),
        Path::new(DEFAULT_OUTPUT),
        false,
        common,
    )
    .map(drop)
}
