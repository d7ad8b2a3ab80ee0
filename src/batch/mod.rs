#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Batch files in, solutions files out.

pub mod pipeline;
pub mod reader;
pub mod report;

pub use pipeline::{Outcome, PipelineOptions, PuzzleReport, run_batch, solve_block};
pub use reader::{BatchError, Block, parse_batch, read_batch_file};
pub use report::{BatchSummary, render_reports, write_reports};
