//! Argument parsing and the batch commands behind it.

pub(crate) mod cli;
