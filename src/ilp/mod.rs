#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod dpll;
pub mod lp_format;
pub mod model;
pub mod propagation;
pub mod solver;
pub mod trail;
pub mod variable_selection;
