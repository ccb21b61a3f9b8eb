use eqsat_core::lit::Lit;
use eqsat_core::var::Var;
use eqsat_utils::bitvec::DenseBitVec;

use crate::lbool::LBool;
use crate::trail::{Reason, TrailEntry};

/// Partial assignment: the trail together with its projection onto variables.
#[derive(Debug)]
pub struct Assignment {
    assigned: DenseBitVec,
    value: DenseBitVec,
    trail: Vec<TrailEntry>,
}

impl Assignment {
    pub fn new(num_vars: usize) -> Self {
        Self {
            assigned: DenseBitVec::new(num_vars),
            value: DenseBitVec::new(num_vars),
            trail: Vec::with_capacity(num_vars),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.assigned.len()
    }

    pub fn value_var(&self, var: Var) -> LBool {
        LBool::from_bits(self.assigned.get(var.index()), self.value.get(var.index()))
    }

    pub fn value(&self, lit: Lit) -> LBool {
        self.value_var(lit.var()) ^ lit.negated()
    }

    pub fn trail(&self) -> &[TrailEntry] {
        &self.trail
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    pub fn last(&self) -> Option<&TrailEntry> {
        self.trail.last()
    }

    /// Lowest unassigned variable.
    pub fn first_unassigned(&self) -> Option<Var> {
        self.assigned.leftmost_unset().map(Var::from)
    }

    /// Makes `lit` true, recording `reason` on the trail.
    pub fn push(&mut self, lit: Lit, reason: Reason) {
        debug_assert_eq!(self.value(lit), LBool::Undef, "{} is already assigned", lit);
        let i = lit.var().index();
        self.assigned.set(i);
        self.value.assign(i, !lit.negated());
        self.trail.push(TrailEntry { lit, reason });
    }

    /// Undoes the latest assignment.
    pub fn pop(&mut self) -> Option<TrailEntry> {
        let entry = self.trail.pop()?;
        self.assigned.unset(entry.lit.var().index());
        Some(entry)
    }

    /// Undoes every assignment at trail position `len` and later.
    pub fn truncate(&mut self, len: usize) {
        while self.trail.len() > len {
            self.pop();
        }
    }

    /// Values of all variables; meaningful once every variable is assigned.
    pub fn model(&self) -> Vec<bool> {
        debug_assert_eq!(self.assigned.count_ones(), self.num_vars());
        (0..self.num_vars()).map(|i| self.value.get(i)).collect()
    }

    /// Asserts that `assigned`/`value` are exactly the projection of the trail.
    pub(crate) fn check_projection(&self) {
        let mut assigned = DenseBitVec::new(self.num_vars());
        for entry in self.trail.iter() {
            let i = entry.lit.var().index();
            assert!(!assigned.get(i), "{} appears twice on the trail", entry.lit.var());
            assigned.set(i);
            assert_eq!(self.value.get(i), !entry.lit.negated(), "stale value for {}", entry.lit.var());
        }
        assert_eq!(assigned, self.assigned, "assigned bits diverge from the trail");
    }
}
