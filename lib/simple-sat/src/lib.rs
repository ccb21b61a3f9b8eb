//! Conflict-driven SAT engine: watched-literal propagation, resolution-based
//! conflict analysis and non-chronological backjumping.

pub mod solver;

pub mod assignment;
pub mod clause;
pub mod cref;
pub mod idx;
pub mod lbool;
pub mod options;
pub mod resolution;
pub mod trail;
pub mod watch;

pub use crate::options::{Options, DEFAULT_OPTIONS};
pub use crate::solver::{SolveResult, Solver, Unsat};
