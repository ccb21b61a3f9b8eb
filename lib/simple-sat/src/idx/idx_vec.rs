use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::slice;

use super::Idx;

/// Fixed-length table addressed by a typed key.
pub struct IdxVec<K: Idx, V> {
    slots: Vec<V>,
    key: PhantomData<K>,
}

impl<K: Idx, V: Default> IdxVec<K, V> {
    /// Table of `len` default slots.
    pub fn with_len(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, V::default);
        Self { slots, key: PhantomData }
    }
}

impl<K: Idx, V> IdxVec<K, V> {
    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.slots.iter()
    }
}

impl<K: Idx, V: Debug> Debug for IdxVec<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.slots.iter().enumerate()).finish()
    }
}

impl<K: Idx, V> Index<K> for IdxVec<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &Self::Output {
        &self.slots[key.idx()]
    }
}

impl<K: Idx, V> IndexMut<K> for IdxVec<K, V> {
    fn index_mut(&mut self, key: K) -> &mut Self::Output {
        &mut self.slots[key.idx()]
    }
}

#[cfg(test)]
mod tests {
    use eqsat_core::lit::Lit;
    use eqsat_core::var::Var;

    use crate::idx::LitVec;

    #[test]
    fn test_lit_vec_layout() {
        let mut v: LitVec<u32> = LitVec::with_len(4);
        let x = Var::new(1);
        v[Lit::positive(x)] = 10;
        v[Lit::negative(x)] = 11;
        assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![0, 0, 10, 11]);
        assert_eq!(format!("{:?}", v), "{0: 0, 1: 0, 2: 10, 3: 11}");
    }
}
