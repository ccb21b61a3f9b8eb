pub mod cnf;
pub mod eval;
pub mod lit;
pub mod parsing;
pub mod smt;
pub mod var;

pub use crate::cnf::{Clause, Cnf};
pub use crate::eval::Eval;
pub use crate::lit::Lit;
pub use crate::smt::{EqAtom, Relation, SmtClause, SmtCnf};
pub use crate::var::Var;
