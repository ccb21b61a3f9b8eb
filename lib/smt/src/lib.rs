//! Equality reasoning on top of the SAT engine: a Boolean skeleton over term
//! pairs, a congruence-closure theory check and the refinement loop between them.

pub mod dpllt;
pub mod graph;
pub mod kernel;
pub mod theory;

pub use crate::dpllt::{SmtResult, SmtSolver};
pub use crate::kernel::EqualityKernel;
pub use crate::theory::TheoryVerdict;
