use std::ops::Index;
use std::slice;

use eqsat_core::lit::Lit;
use itertools::Itertools;

use crate::watch::WatchSlot;

/// Clause as stored by the engine: sorted literals plus two watch positions.
#[derive(Debug, Clone)]
pub struct Clause {
    pub(crate) lits: Vec<Lit>,
    pub(crate) watches: [usize; 2],
}

impl Clause {
    pub fn new(lits: Vec<Lit>, watches: [usize; 2]) -> Self {
        debug_assert!(!lits.is_empty());
        debug_assert!(watches.iter().all(|&w| w < lits.len()));
        Self { lits, watches }
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn size(&self) -> usize {
        self.lits.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, Lit> {
        self.lits.iter()
    }

    /// Position of the watch in `slot`.
    pub fn watch_index(&self, slot: WatchSlot) -> usize {
        self.watches[slot.index()]
    }

    /// Literal watched in `slot`.
    pub fn watched(&self, slot: WatchSlot) -> Lit {
        self.lits[self.watch_index(slot)]
    }

    pub(crate) fn set_watch(&mut self, slot: WatchSlot, index: usize) {
        debug_assert!(index < self.lits.len());
        self.watches[slot.index()] = index;
    }

    pub(crate) fn is_watch_index(&self, index: usize) -> bool {
        self.watches.contains(&index)
    }

    pub fn to_external(&self) -> String {
        format!("[{}]", self.lits.iter().map(|lit| lit.to_external()).join(", "))
    }
}

impl Index<usize> for Clause {
    type Output = Lit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lits[index]
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = slice::Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watched_literals() {
        let lits: Vec<Lit> = [1, -2, 3].into_iter().map(Lit::from_external).collect();
        let mut clause = Clause::new(lits, [0, 2]);
        assert_eq!(clause.watched(WatchSlot::First), Lit::from_external(1));
        assert_eq!(clause.watched(WatchSlot::Second), Lit::from_external(3));
        clause.set_watch(WatchSlot::First, 1);
        assert_eq!(clause.watched(WatchSlot::First), Lit::from_external(-2));
        assert!(clause.is_watch_index(2));
        assert!(!clause.is_watch_index(0));
        assert_eq!(clause.to_external(), "[1, -2, 3]");
    }
}
