use std::fmt::{Display, Formatter};
use std::io::BufRead;
use std::path::Path;
use std::slice::Iter;

use eqsat_utils::io::read_maybe_gzip;
use snafu::ResultExt;

use crate::eval::Eval;
use crate::parsing;
use crate::parsing::{IoSnafu, ParseError};

pub use self::clause::Clause;

pub mod clause;

/// Propositional formula in conjunctive normal form.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cnf {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Self {
            num_vars: 0,
            clauses: Vec::new(),
        }
    }

    pub fn with_vars(num_vars: usize) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        parsing::dimacs::parse_dimacs(reader)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let reader = read_maybe_gzip(path).context(IoSnafu)?;
        Self::from_reader(reader)
    }

    pub fn iter(&self) -> Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Appends a clause, growing `num_vars` to cover its variables.
    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        let clause = clause.into();
        if let Some(max_var) = clause.iter().map(|lit| lit.var().index() + 1).max() {
            self.num_vars = self.num_vars.max(max_var);
        }
        self.clauses.push(clause);
    }
}

impl Default for Cnf {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> From<I> for Cnf
where
    I: IntoIterator,
    I::Item: Into<Clause>,
{
    fn from(iter: I) -> Self {
        let mut cnf = Self::new();
        for clause in iter.into_iter() {
            cnf.add_clause(clause)
        }
        cnf
    }
}

impl Eval for Cnf {
    type Value = bool;

    fn eval(&self, valuation: &[bool]) -> bool {
        debug_assert_eq!(valuation.len(), self.num_vars);
        self.clauses.iter().all(|clause| clause.eval(valuation))
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for clause in self.clauses.iter() {
            list.entry(&format_args!("{}", clause));
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnf_from_clauses() {
        let cnf = Cnf::from([vec![1, 2], vec![-1, -4]]);
        assert_eq!(cnf.num_vars, 4);
        assert_eq!(cnf.num_clauses(), 2);
        assert_eq!(format!("{}", cnf), "[[1, 2], [-1, -4]]");
    }

    #[test]
    fn test_cnf_eval() {
        let cnf = Cnf::from([vec![1, 2], vec![-1, -2]]);
        assert!(cnf.eval(&[true, false]));
        assert!(cnf.eval(&[false, true]));
        assert!(!cnf.eval(&[true, true]));
        assert!(!cnf.eval(&[false, false]));
    }

    #[test]
    fn test_empty_cnf_is_true() {
        assert!(Cnf::with_vars(2).eval(&[false, true]));
    }
}
