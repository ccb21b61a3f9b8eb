use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::clause::Clause;

/// Index of a clause in the engine's clause store.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ClauseRef(pub(crate) usize);

impl ClauseRef {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for ClauseRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Index<ClauseRef> for Vec<Clause> {
    type Output = Clause;

    fn index(&self, index: ClauseRef) -> &Self::Output {
        &self[index.0]
    }
}

impl IndexMut<ClauseRef> for Vec<Clause> {
    fn index_mut(&mut self, index: ClauseRef) -> &mut Self::Output {
        &mut self[index.0]
    }
}
