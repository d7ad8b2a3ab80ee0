//! Generalised Sudoku solving through a 0/1 integer linear model.
//!
//! A puzzle of size N = B² (4, 9, 16, 25) is encoded as N³ binary variables
//! and a set of exactly-one equalities, handed to a [`SolverAdapter`], and
//! the satisfying assignment is decoded back into a grid. The diagonal
//! "Sudoku X" variant adds one constraint per symbol for each long diagonal.
//!
//! ```
//! use sudoku_ilp::ilp::dpll::DpllAdapter;
//! use sudoku_ilp::ilp::solver::SolverAdapter;
//! use sudoku_ilp::sudoku::alphabet::Alphabet;
//! use sudoku_ilp::sudoku::decoder::decode;
//! use sudoku_ilp::sudoku::encoder::encode;
//! use sudoku_ilp::sudoku::puzzle::{Puzzle, Variant};
//!
//! let alphabet = Alphabet::standard();
//! let rows = ["0 4 0 1", "1 3 0 0", "0 0 1 0", "3 0 4 0"];
//! let puzzle = Puzzle::parse(4, Variant::Standard, &rows, &alphabet).unwrap();
//!
//! let encoding = encode(&puzzle);
//! let outcome = DpllAdapter::default().solve(&encoding.model);
//! let assignment = outcome.status.assignment().unwrap();
//! let grid = decode(assignment, &puzzle, &alphabet).unwrap();
//! assert_eq!(grid.to_string(), "2 4 3 1\n1 3 2 4\n4 2 1 3\n3 1 4 2");
//! ```
//!
//! [`SolverAdapter`]: ilp::solver::SolverAdapter

/// Batch files: framing, the per-puzzle pipeline, and the solutions file.
pub mod batch;

/// The 0/1 feasibility model, the solver contract, and the bundled
/// branch-and-propagate backend.
pub mod ilp;

/// Alphabet, geometry, parsing, encoding, and decoding of puzzles.
pub mod sudoku;
