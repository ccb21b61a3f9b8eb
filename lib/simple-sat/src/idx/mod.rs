use eqsat_core::lit::Lit;

use self::idx_vec::IdxVec;

pub mod idx_vec;

/// Table with one slot per packed literal.
pub type LitVec<V> = IdxVec<Lit, V>;

/// Key that maps onto a dense `usize` range.
pub trait Idx {
    fn idx(&self) -> usize;
}

impl Idx for Lit {
    fn idx(&self) -> usize {
        self.inner() as usize
    }
}
