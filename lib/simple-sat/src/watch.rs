use eqsat_core::lit::Lit;

use crate::cref::ClauseRef;
use crate::idx::LitVec;

/// Which of the two watches of a clause a table entry refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WatchSlot {
    First,
    Second,
}

impl WatchSlot {
    pub const BOTH: [WatchSlot; 2] = [WatchSlot::First, WatchSlot::Second];

    pub const fn index(self) -> usize {
        match self {
            WatchSlot::First => 0,
            WatchSlot::Second => 1,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            WatchSlot::First => WatchSlot::Second,
            WatchSlot::Second => WatchSlot::First,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ClauseWatch {
    pub(crate) cref: ClauseRef,
    pub(crate) slot: WatchSlot,
}

impl ClauseWatch {
    pub const fn new(cref: ClauseRef, slot: WatchSlot) -> Self {
        Self { cref, slot }
    }
}

/// For every literal, the clause watches currently placed on it.
#[derive(Debug)]
pub struct WatchList {
    watchlist: LitVec<Vec<ClauseWatch>>,
}

impl WatchList {
    pub fn new(num_vars: usize) -> Self {
        Self {
            watchlist: LitVec::with_len(2 * num_vars),
        }
    }

    pub fn lookup(&self, lit: Lit) -> &[ClauseWatch] {
        &self.watchlist[lit]
    }

    pub fn insert(&mut self, lit: Lit, watch: ClauseWatch) {
        self.watchlist[lit].push(watch);
    }

    pub fn remove(&mut self, lit: Lit, watch: ClauseWatch) {
        let watches = &mut self.watchlist[lit];
        if let Some(pos) = watches.iter().position(|&w| w == watch) {
            watches.swap_remove(pos);
        }
    }

    /// Total number of entries over all literals.
    pub fn num_watches(&self) -> usize {
        self.watchlist.iter().map(|ws| ws.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use eqsat_core::var::Var;

    use super::*;

    #[test]
    fn test_slot_other() {
        assert_eq!(WatchSlot::First.other(), WatchSlot::Second);
        assert_eq!(WatchSlot::Second.other(), WatchSlot::First);
        assert_eq!(WatchSlot::Second.index(), 1);
    }

    #[test]
    fn test_insert_remove() {
        let mut wl = WatchList::new(2);
        let lit = Lit::negative(Var::new(1));
        let w0 = ClauseWatch::new(ClauseRef(0), WatchSlot::First);
        let w1 = ClauseWatch::new(ClauseRef(3), WatchSlot::Second);
        wl.insert(lit, w0);
        wl.insert(lit, w1);
        assert_eq!(wl.lookup(lit), &[w0, w1]);
        assert_eq!(wl.num_watches(), 2);
        wl.remove(lit, w0);
        assert_eq!(wl.lookup(lit), &[w1]);
        assert!(wl.lookup(!lit).is_empty());
    }
}
