//! Quantifier-free equality formulas over integer-named terms.

use std::fmt::{Display, Formatter};
use std::io::BufRead;
use std::path::Path;
use std::slice::Iter;

use eqsat_utils::io::read_maybe_gzip;
use itertools::Itertools;
use snafu::ResultExt;

use crate::eval::Eval;
use crate::parsing;
use crate::parsing::{IoSnafu, ParseError};

pub type Term = usize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Relation {
    Equal,
    NotEqual,
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Equal => write!(f, "="),
            Relation::NotEqual => write!(f, "<>"),
        }
    }
}

/// Atom `lhs = rhs` or `lhs <> rhs`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct EqAtom {
    pub lhs: Term,
    pub rhs: Term,
    pub relation: Relation,
}

impl EqAtom {
    pub const fn new(lhs: Term, rhs: Term, relation: Relation) -> Self {
        Self { lhs, rhs, relation }
    }

    pub const fn equal(lhs: Term, rhs: Term) -> Self {
        Self::new(lhs, rhs, Relation::Equal)
    }

    pub const fn not_equal(lhs: Term, rhs: Term) -> Self {
        Self::new(lhs, rhs, Relation::NotEqual)
    }

    /// The unordered pair of terms as `(min, max)`.
    pub fn ordered_pair(&self) -> (Term, Term) {
        if self.lhs <= self.rhs {
            (self.lhs, self.rhs)
        } else {
            (self.rhs, self.lhs)
        }
    }

    pub fn is_negated(&self) -> bool {
        self.relation == Relation::NotEqual
    }
}

impl Eval for EqAtom {
    type Value = usize;

    fn eval(&self, classes: &[usize]) -> bool {
        let same = classes[self.lhs] == classes[self.rhs];
        match self.relation {
            Relation::Equal => same,
            Relation::NotEqual => !same,
        }
    }
}

impl Display for EqAtom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.relation, self.rhs)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SmtClause {
    pub atoms: Vec<EqAtom>,
}

impl SmtClause {
    pub fn new(atoms: Vec<EqAtom>) -> Self {
        Self { atoms }
    }

    pub fn iter(&self) -> Iter<'_, EqAtom> {
        self.atoms.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl Eval for SmtClause {
    type Value = usize;

    fn eval(&self, classes: &[usize]) -> bool {
        self.atoms.iter().any(|atom| atom.eval(classes))
    }
}

impl<I> From<I> for SmtClause
where
    I: IntoIterator<Item = EqAtom>,
{
    fn from(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for SmtClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.atoms.iter().join(" "))
    }
}

/// Conjunction of [`SmtClause`]s over terms `0..num_terms`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SmtCnf {
    pub num_terms: usize,
    pub clauses: Vec<SmtClause>,
}

impl SmtCnf {
    pub fn new() -> Self {
        Self {
            num_terms: 0,
            clauses: Vec::new(),
        }
    }

    pub fn with_terms(num_terms: usize) -> Self {
        Self {
            num_terms,
            clauses: Vec::new(),
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        parsing::smt::parse_smt(reader)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let reader = read_maybe_gzip(path).context(IoSnafu)?;
        Self::from_reader(reader)
    }

    pub fn iter(&self) -> Iter<'_, SmtClause> {
        self.clauses.iter()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Appends a clause, growing `num_terms` to cover its terms.
    pub fn add_clause(&mut self, clause: impl Into<SmtClause>) {
        let clause = clause.into();
        if let Some(max_term) = clause.iter().map(|atom| atom.lhs.max(atom.rhs) + 1).max() {
            self.num_terms = self.num_terms.max(max_term);
        }
        self.clauses.push(clause);
    }
}

impl Default for SmtCnf {
    fn default() -> Self {
        Self::new()
    }
}

impl Eval for SmtCnf {
    type Value = usize;

    fn eval(&self, classes: &[usize]) -> bool {
        debug_assert_eq!(classes.len(), self.num_terms);
        self.clauses.iter().all(|clause| clause.eval(classes))
    }
}

impl Display for SmtCnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_terms, self.clauses.len())?;
        for clause in self.clauses.iter() {
            writeln!(f, "{}", clause)?;
        }
        Ok(())
    }
}
