use std::fmt::{Display, Formatter};
use std::ops::{BitXor, Not};

/// Value of a variable or literal under a partial assignment.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LBool {
    False,
    True,
    Undef,
}

impl LBool {
    /// Builds the value from the `assigned`/`value` bit pair kept by the assignment.
    #[inline]
    pub const fn from_bits(assigned: bool, value: bool) -> Self {
        match (assigned, value) {
            (false, _) => LBool::Undef,
            (true, false) => LBool::False,
            (true, true) => LBool::True,
        }
    }

    #[inline]
    pub const fn is_undef(self) -> bool {
        matches!(self, LBool::Undef)
    }

    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, LBool::True)
    }

    #[inline]
    pub const fn is_false(self) -> bool {
        matches!(self, LBool::False)
    }

    pub const fn to_option(self) -> Option<bool> {
        match self {
            LBool::False => Some(false),
            LBool::True => Some(true),
            LBool::Undef => None,
        }
    }
}

impl From<bool> for LBool {
    fn from(b: bool) -> Self {
        LBool::from_bits(true, b)
    }
}

impl Not for LBool {
    type Output = LBool;

    fn not(self) -> Self::Output {
        self ^ true
    }
}

// LBool ^ bool
impl BitXor<bool> for LBool {
    type Output = LBool;

    #[inline]
    fn bitxor(self, rhs: bool) -> Self::Output {
        match self.to_option() {
            Some(b) => LBool::from(b ^ rhs),
            None => LBool::Undef,
        }
    }
}

impl Display for LBool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LBool::False => "false",
            LBool::True => "true",
            LBool::Undef => "undef",
        };
        write!(f, "{}", s)
    }
}
