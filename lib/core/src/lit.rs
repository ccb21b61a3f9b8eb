use std::fmt::{Display, Formatter};
use std::ops;

use crate::var::Var;

/// Literal packed as `2 * var + negated`.
///
/// A literal and its negation are adjacent integers, so [`Lit::index`] can address
/// tables of size `2 * num_vars` directly. The derived order is "variable first,
/// positive before negative", which clause normalization and resolution rely on.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Lit(pub(crate) u32);

impl Lit {
    pub const fn new(var: Var, negated: bool) -> Self {
        Lit(var.0 << 1 | negated as u32)
    }

    pub const fn positive(var: Var) -> Self {
        Self::new(var, false)
    }

    pub const fn negative(var: Var) -> Self {
        Self::new(var, true)
    }

    pub const fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    pub const fn negated(self) -> bool {
        (self.0 & 1) != 0
    }

    pub const fn sign(self) -> i32 {
        if self.negated() {
            -1
        } else {
            1
        }
    }

    pub const fn inner(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn to_external(self) -> i32 {
        self.sign() * (self.var().0 + 1) as i32
    }

    pub const fn from_external(lit: i32) -> Lit {
        debug_assert!(lit != 0, "external literal must be non-zero");
        let var = lit.unsigned_abs() - 1;
        Lit::new(Var(var), lit < 0)
    }
}

impl From<i32> for Lit {
    fn from(lit: i32) -> Self {
        Lit::from_external(lit)
    }
}

impl<L> From<&L> for Lit
where
    L: Into<Lit> + Copy,
{
    fn from(val: &L) -> Self {
        (*val).into()
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_external())
    }
}

// !Lit
impl ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

// -Lit
impl ops::Neg for Lit {
    type Output = Lit;

    fn neg(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

// Lit ^ bool
impl ops::BitXor<bool> for Lit {
    type Output = Lit;

    fn bitxor(self, rhs: bool) -> Self::Output {
        Lit(self.0 ^ rhs as u32)
    }
}
