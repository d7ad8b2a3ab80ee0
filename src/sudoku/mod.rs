#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Generalised Sudoku and Sudoku X over any N = B² grid.
//!
//! The flow is `Puzzle::parse` → [`encoder::encode`] → a
//! [`SolverAdapter`](crate::ilp::solver::SolverAdapter) → [`decoder::decode`].

/// Symbol ↔ rank mapping.
pub mod alphabet;
/// Turns a solver assignment back into a grid.
pub mod decoder;
/// Builds the 0/1 feasibility model of a puzzle.
pub mod encoder;
pub mod error;
/// Box arithmetic and uniqueness units.
pub mod geometry;
/// The validated puzzle and its parser.
pub mod puzzle;
pub mod samples;
