use std::fmt::{Display, Formatter};

/// Propositional variable, 0-based.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Var(pub(crate) u32);

impl Var {
    pub const fn new(var: u32) -> Self {
        Self(var)
    }

    pub const fn inner(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for Var {
    fn from(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize >> 1, "variable index {} is too large", index);
        Var(index as u32)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // display Var as 1-based integer:
        write!(f, "{}", self.index() + 1)
    }
}
