use std::fmt::{Display, Formatter};

use eqsat_core::lit::Lit;

use crate::clause::Clause;
use crate::cref::ClauseRef;

/// Antecedent clause of an implied assignment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ClauseHandle {
    /// Clause from the permanent store.
    Stored(ClauseRef),
    /// Resolvent synthesized by conflict analysis, owned by its trail entry.
    Resolvent(Vec<Lit>),
}

impl ClauseHandle {
    pub fn lits<'a>(&'a self, clauses: &'a [Clause]) -> &'a [Lit] {
        match self {
            ClauseHandle::Stored(cref) => clauses[cref.index()].lits(),
            ClauseHandle::Resolvent(lits) => lits,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Reason {
    Decision,
    Implied(ClauseHandle),
}

impl Reason {
    pub fn is_decision(&self) -> bool {
        matches!(self, Reason::Decision)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TrailEntry {
    pub(crate) lit: Lit,
    pub(crate) reason: Reason,
}

impl TrailEntry {
    pub fn lit(&self) -> Lit {
        self.lit
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

impl Display for TrailEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Reason::Decision => write!(f, "{}@d", self.lit),
            Reason::Implied(ClauseHandle::Stored(cref)) => write!(f, "{}@{}", self.lit, cref),
            Reason::Implied(ClauseHandle::Resolvent(_)) => write!(f, "{}@r", self.lit),
        }
    }
}
