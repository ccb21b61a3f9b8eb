//! SAT and equality-SMT solving.
//!
//! - [`core`]: formulas, literals and the DIMACS / equality-CNF readers.
//! - [`sat`]: the conflict-driven SAT engine.
//! - [`smt`]: congruence closure and the refinement loop on top of the engine.

pub use eqsat_core as core;
pub use eqsat_smt as smt;
pub use eqsat_utils as utils;
pub use simple_sat as sat;
