use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use eqsat_core::cnf::{Clause as CnfClause, Cnf};
use eqsat_core::eval::Eval;
use eqsat_core::lit::Lit;
use eqsat_core::var::Var;
use elapsed::measure_time;
use itertools::Itertools;
use tap::Tap;
use tracing::{debug, info, trace, warn};

use crate::assignment::Assignment;
use crate::clause::Clause;
use crate::cref::ClauseRef;
use crate::lbool::LBool;
use crate::options::Options;
use crate::resolution::{contains, resolve};
use crate::trail::{ClauseHandle, Reason};
use crate::watch::{ClauseWatch, WatchList, WatchSlot};

/// Marker error: the clause set has been refuted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Unsat;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SolveResult {
    /// Satisfying assignment, one value per variable.
    Sat(Vec<bool>),
    Unsat,
}

impl SolveResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SolveResult::Unsat)
    }

    pub fn model(&self) -> Option<&[bool]> {
        match self {
            SolveResult::Sat(model) => Some(model),
            SolveResult::Unsat => None,
        }
    }

    pub fn into_model(self) -> Option<Vec<bool>> {
        match self {
            SolveResult::Sat(model) => Some(model),
            SolveResult::Unsat => None,
        }
    }
}

impl Display for SolveResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveResult::Sat(_) => write!(f, "SAT"),
            SolveResult::Unsat => write!(f, "UNSAT"),
        }
    }
}

#[derive(Debug)]
pub struct Solver {
    options: Options,
    clauses: Vec<Clause>,
    watchlist: WatchList,
    assignment: Assignment,
    queue: VecDeque<ClauseWatch>,
    ok: bool,
    // Statistics
    decisions: usize,
    propagations: usize,
    conflicts: usize,
    backjumps: usize,
    // Timings
    pub time_search: Duration,
    pub time_propagate: Duration,
    pub time_analyze: Duration,
}

impl Solver {
    pub fn new(num_vars: usize, options: Options) -> Self {
        Self {
            options,
            clauses: Vec::new(),
            watchlist: WatchList::new(num_vars),
            assignment: Assignment::new(num_vars),
            queue: VecDeque::new(),
            ok: true,
            decisions: 0,
            propagations: 0,
            conflicts: 0,
            backjumps: 0,
            time_search: Duration::new(0, 0),
            time_propagate: Duration::new(0, 0),
            time_analyze: Duration::new(0, 0),
        }
    }

    pub fn from_cnf(cnf: &Cnf, options: Options) -> Self {
        let mut solver = Self::new(cnf.num_vars, options);
        info!("Adding {} clauses over {} variables", cnf.num_clauses(), cnf.num_vars);
        for clause in cnf.iter() {
            if !solver.add_clause(clause.lits()) {
                break;
            }
        }
        solver
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Checks `model` against `cnf` as this engine reads it: under
    /// `legacy_empty_clause`, empty clauses are left out.
    pub fn verify(&self, cnf: &Cnf, model: &[bool]) -> bool {
        cnf.iter()
            .filter(|clause| !(self.options.legacy_empty_clause && clause.is_empty()))
            .all(|clause| clause.eval(model))
    }

    pub fn num_vars(&self) -> usize {
        self.assignment.num_vars()
    }
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
    pub fn num_decisions(&self) -> usize {
        self.decisions
    }
    pub fn num_propagations(&self) -> usize {
        self.propagations
    }
    pub fn num_conflicts(&self) -> usize {
        self.conflicts
    }
    pub fn num_backjumps(&self) -> usize {
        self.backjumps
    }

    /// Whether the clause set has not been refuted yet.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn value_var(&self, var: Var) -> LBool {
        self.assignment.value_var(var)
    }
    pub fn value(&self, lit: Lit) -> LBool {
        self.assignment.value(lit)
    }

    pub fn clause(&self, cref: ClauseRef) -> &Clause {
        &self.clauses[cref]
    }

    /// Adds a clause, possibly in the middle of the search.
    ///
    /// Returns `false` iff the clause set is now known to be unsatisfiable.
    pub fn add_clause(&mut self, lits: &[Lit]) -> bool {
        if !self.ok {
            return false;
        }

        for &lit in lits {
            assert!(
                lit.var().index() < self.num_vars(),
                "{} is out of range for {} variables",
                lit,
                self.num_vars()
            );
        }

        let clause = CnfClause::new(lits.to_vec());
        if clause.is_tautology() {
            trace!("Skipping tautology {}", clause);
            return true;
        }
        if clause.is_empty() {
            if self.options.legacy_empty_clause {
                warn!("Skipping empty clause");
                return true;
            }
            info!("Empty clause => UNSAT");
            self.ok = false;
            return false;
        }

        let lits = clause.into_lits();
        if self.assignment.is_empty() {
            let watches = [0, lits.len() - 1];
            self.push_clause(lits, watches);
            return self.ok;
        }

        self.add_clause_mid_search(lits);
        self.ok
    }

    fn push_clause(&mut self, lits: Vec<Lit>, watches: [usize; 2]) -> ClauseRef {
        let cref = ClauseRef(self.clauses.len());
        self.clauses.push(Clause::new(lits, watches));
        self.attach_clause(cref);
        trace!("Added clause {} = {}", cref, self.clauses[cref].to_external());
        cref
    }

    /// Adds a clause under a non-empty trail.
    ///
    /// Non-false literals are watched first: unassigned ones, then satisfied ones
    /// by trail position. A clause with at most one non-false literal first takes
    /// the trail back to the decision level where it became unit or falsified, so
    /// that a false watch always lies on a level no lower than its true partner.
    fn add_clause_mid_search(&mut self, lits: Vec<Lit>) {
        let mut satisfied = Vec::new();
        let mut falsified = Vec::new();
        for (position, entry) in self.assignment.trail().iter().enumerate() {
            if let Ok(i) = lits.binary_search_by_key(&entry.lit().var(), |lit| lit.var()) {
                if lits[i] == entry.lit() {
                    satisfied.push((i, position));
                } else {
                    falsified.push((i, position));
                }
            }
        }
        // Most recently falsified first.
        falsified.reverse();

        let non_false: Vec<usize> = (0..lits.len())
            .filter(|&i| self.value(lits[i]).is_undef())
            .chain(satisfied.iter().map(|&(i, _)| i))
            .take(2)
            .collect();

        match non_false[..] {
            [first, second, ..] => {
                self.push_clause(lits, [first, second]);
            }
            [only] => {
                let latest = falsified.first().copied();
                let end = latest.and_then(|(_, position)| self.level_end(position));
                let late = match (satisfied.first(), end) {
                    (Some(&(_, position)), Some(end)) => position >= end,
                    (Some(_), None) => false,
                    (None, _) => true,
                };
                if late {
                    if let Some(end) = end {
                        self.backtrack(end);
                    }
                }
                let watches = [only, latest.map_or(only, |(i, _)| i)];
                let cref = self.push_clause(lits, watches);
                let lit = self.clauses[cref][only];
                if self.value(lit).is_undef() {
                    trace!("Clause {} is unit under the current trail, implying {}", cref, lit);
                    self.assign(lit, Reason::Implied(ClauseHandle::Stored(cref)));
                }
            }
            [] => {
                let (latest, position) = falsified[0];
                let (second, second_position) = falsified.get(1).copied().unwrap_or((latest, position));
                let cref = match self.level_end(second_position) {
                    Some(end) if end <= position => {
                        // Unit on the level of the second latest falsified literal.
                        self.backtrack(end);
                        let cref = self.push_clause(lits, [latest, second]);
                        let lit = self.clauses[cref][latest];
                        trace!("Clause {} is unit after backtracking, implying {}", cref, lit);
                        self.assign(lit, Reason::Implied(ClauseHandle::Stored(cref)));
                        return;
                    }
                    end => {
                        if let Some(end) = end {
                            self.backtrack(end);
                        }
                        self.push_clause(lits, [latest, second])
                    }
                };
                debug!("Clause {} is falsified by the current trail", cref);
                self.conflicts += 1;
                if self.analyze(cref).is_err() {
                    info!("UNSAT");
                    self.ok = false;
                }
            }
        }
    }

    /// Trail position of the first decision after `position`, if any.
    fn level_end(&self, position: usize) -> Option<usize> {
        self.assignment.trail()[position + 1..]
            .iter()
            .position(|entry| entry.reason().is_decision())
            .map(|offset| position + 1 + offset)
    }

    /// Undoes every assignment from the decision at trail position `end` on.
    fn backtrack(&mut self, end: usize) {
        debug_assert!(self.assignment.trail()[end].reason().is_decision());
        debug!("Backtrack from {} to {}", self.assignment.len(), end);
        self.assignment.truncate(end);
        // Pending work only exists above the latest decision.
        self.queue.clear();
    }

    fn attach_clause(&mut self, cref: ClauseRef) {
        for slot in WatchSlot::BOTH {
            let lit = self.clauses[cref].watched(slot);
            self.watchlist.insert(lit, ClauseWatch::new(cref, slot));
        }
    }

    pub fn solve(&mut self) -> SolveResult {
        info!("Solver::solve()");

        // If the solver is already in UNSAT state, return early.
        if !self.ok {
            return SolveResult::Unsat;
        }

        let time_search_start = Instant::now();
        let result = self.search();
        self.time_search += time_search_start.elapsed();

        match result {
            Ok(()) => {
                info!("SAT");
                SolveResult::Sat(self.assignment.model())
            }
            Err(Unsat) => {
                info!("UNSAT");
                self.ok = false;
                SolveResult::Unsat
            }
        }
    }

    /// Main decide/propagate loop.
    fn search(&mut self) -> Result<(), Unsat> {
        loop {
            let time_propagate_start = Instant::now();
            self.propagate().tap(|_| {
                self.time_propagate += time_propagate_start.elapsed();
            })?;

            match self.pick_branching_variable() {
                Some(var) => self.decide(var),
                None => return Ok(()),
            }
        }
    }

    /// Lowest-index unassigned variable.
    fn pick_branching_variable(&self) -> Option<Var> {
        self.assignment.first_unassigned()
    }

    fn decide(&mut self, var: Var) {
        self.check_invariants();
        debug_assert!(self.queue.is_empty());
        self.decisions += 1;
        let decision = Lit::negative(var);
        trace!("Decision {} at trail position {}", decision, self.assignment.len());
        self.assign(decision, Reason::Decision);
    }

    /// Makes `lit` true and schedules every clause watching its negation.
    fn assign(&mut self, lit: Lit, reason: Reason) {
        self.queue.extend(self.watchlist.lookup(!lit).iter().copied());
        self.assignment.push(lit, reason);
    }

    fn propagate(&mut self) -> Result<(), Unsat> {
        while let Some(watch) = self.queue.pop_front() {
            self.propagations += 1;
            self.handle(watch)?;
        }
        Ok(())
    }

    /// Processes a clause whose watch in `watch.slot` has just become false.
    fn handle(&mut self, watch: ClauseWatch) -> Result<(), Unsat> {
        let ClauseWatch { cref, slot } = watch;
        let clause = &self.clauses[cref];
        let falsified = clause.watched(slot);
        let other = clause.watched(slot.other());
        debug_assert_eq!(self.value(falsified), LBool::False, "watch {} of {} is not false", falsified, cref);

        if self.value(other).is_true() {
            return Ok(());
        }

        let replacement = clause
            .iter()
            .enumerate()
            .find(|&(i, &lit)| !clause.is_watch_index(i) && !self.value(lit).is_false())
            .map(|(i, _)| i);

        if let Some(index) = replacement {
            let lit = self.clauses[cref][index];
            trace!("Moving watch of {} from {} to {}", cref, falsified, lit);
            self.watchlist.remove(falsified, watch);
            self.clauses[cref].set_watch(slot, index);
            self.watchlist.insert(lit, watch);
            return Ok(());
        }

        match self.value(other) {
            LBool::Undef => {
                trace!("Unit {} from {}", other, cref);
                self.assign(other, Reason::Implied(ClauseHandle::Stored(cref)));
                Ok(())
            }
            LBool::False => {
                self.conflicts += 1;
                trace!("Conflict on {} = {}", cref, self.clauses[cref].to_external());
                self.analyze(cref)
            }
            LBool::True => unreachable!("satisfied clauses return early"),
        }
    }

    fn analyze(&mut self, conflict: ClauseRef) -> Result<(), Unsat> {
        let (time_analyze, result) = measure_time(|| self.resolve_conflict(conflict));
        self.time_analyze += time_analyze.duration();
        result
    }

    /// Resolves the falsified clause backward along the trail until a single
    /// decision is isolated, then backjumps and flips it.
    fn resolve_conflict(&mut self, conflict: ClauseRef) -> Result<(), Unsat> {
        self.check_invariants_with(Some(conflict));
        self.queue.clear();

        let mut resolvent = self.clauses[conflict].lits.clone();
        while !resolvent.is_empty() {
            let entry = match self.assignment.last() {
                Some(entry) => entry,
                None => break,
            };
            let lit = entry.lit();
            if !contains(&resolvent, !lit) {
                self.assignment.pop();
                continue;
            }

            let next = match entry.reason() {
                Reason::Decision => None,
                Reason::Implied(handle) => Some(resolve(&resolvent, handle.lits(&self.clauses), lit.var())),
            };
            match next {
                None => {
                    self.backjump(resolvent);
                    return Ok(());
                }
                Some(next) => {
                    trace!("Resolved on {}: [{}]", lit.var(), next.iter().join(", "));
                    resolvent = next;
                    self.assignment.pop();
                }
            }
        }

        debug!("Conflict resolved to the empty clause");
        Err(Unsat)
    }

    /// Flips the decision on top of the trail, jumping back over every later
    /// decision that `resolvent` does not depend on.
    fn backjump(&mut self, resolvent: Vec<Lit>) {
        let trail = self.assignment.trail();
        let top = trail.len() - 1;
        debug_assert!(trail[top].reason().is_decision());

        let mut target = top;
        for i in (0..top).rev() {
            if contains(&resolvent, !trail[i].lit()) {
                break;
            }
            if trail[i].reason().is_decision() {
                target = i;
            }
        }

        let flipped = !trail[top].lit();
        debug!("Backjump from {} to {}, flipping to {}", top, target, flipped);
        self.backjumps += 1;
        self.assignment.truncate(target);
        self.assign(flipped, Reason::Implied(ClauseHandle::Resolvent(resolvent)));
        self.check_invariants();
    }

    /// Asserts the engine invariants. No-op in release builds.
    pub fn check_invariants(&self) {
        self.check_invariants_with(None);
    }

    /// Same as [`check_invariants`][Self::check_invariants], except that both
    /// watches of the `conflict` clause may be false.
    fn check_invariants_with(&self, conflict: Option<ClauseRef>) {
        if !cfg!(debug_assertions) {
            return;
        }

        self.assignment.check_projection();

        // Antecedents hold their literal, everything else is falsified earlier.
        let trail = self.assignment.trail();
        let mut position = vec![None; self.num_vars()];
        for (i, entry) in trail.iter().enumerate() {
            if let Reason::Implied(handle) = entry.reason() {
                let lits = handle.lits(&self.clauses);
                assert!(contains(lits, entry.lit()), "antecedent of {} does not contain it", entry);
                for &lit in lits.iter().filter(|&&lit| lit != entry.lit()) {
                    let p: Option<usize> = position[lit.var().index()];
                    assert!(
                        matches!(p, Some(p) if trail[p].lit() == !lit),
                        "antecedent of {} has {} not falsified earlier",
                        entry,
                        lit
                    );
                }
            }
            position[entry.lit().var().index()] = Some(i);
        }

        // Watch table is symmetric with clause watch positions.
        for (i, clause) in self.clauses.iter().enumerate() {
            for slot in WatchSlot::BOTH {
                let watch = ClauseWatch::new(ClauseRef(i), slot);
                assert!(
                    self.watchlist.lookup(clause.watched(slot)).contains(&watch),
                    "missing watch {:?} on {}",
                    watch,
                    clause.watched(slot)
                );
            }
        }
        assert_eq!(self.watchlist.num_watches(), 2 * self.clauses.len());

        // After a refutation the trail is left as the analysis popped it.
        if !self.ok {
            return;
        }

        // A false watch is either pending in the queue, or its clause is satisfied
        // by the other watch on a decision level no higher than the false one.
        let mut level = Vec::with_capacity(trail.len());
        let mut decisions = 0;
        for entry in trail.iter() {
            if entry.reason().is_decision() {
                decisions += 1;
            }
            level.push(decisions);
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            let cref = ClauseRef(i);
            if conflict == Some(cref) {
                continue;
            }
            for slot in WatchSlot::BOTH {
                let lit = clause.watched(slot);
                if !self.value(lit).is_false() || self.queue.contains(&ClauseWatch::new(cref, slot)) {
                    continue;
                }
                let other = clause.watched(slot.other());
                assert!(
                    self.value(other).is_true(),
                    "clause {} {}: watch {} is false while other watch {} is {}",
                    cref,
                    clause.to_external(),
                    lit,
                    other,
                    self.value(other)
                );
                if let (Some(p), Some(q)) = (position[lit.var().index()], position[other.var().index()]) {
                    assert!(
                        level[q] <= level[p],
                        "clause {} {}: watch {} is satisfied on level {}, above false watch {} on level {}",
                        cref,
                        clause.to_external(),
                        other,
                        level[q],
                        lit,
                        level[p]
                    );
                }
            }
        }
    }
}
