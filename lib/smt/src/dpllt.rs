use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use eqsat_core::eval::Eval;
use eqsat_core::lit::Lit;
use eqsat_core::smt::SmtCnf;
use elapsed::measure_time;
use itertools::Itertools;
use simple_sat::options::Options;
use simple_sat::solver::{SolveResult, Solver};
use tracing::{debug, info};

use crate::kernel::EqualityKernel;
use crate::theory::{self, TheoryVerdict};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SmtResult {
    /// Class id of every term.
    Sat(Vec<usize>),
    Unsat,
}

impl SmtResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SmtResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SmtResult::Unsat)
    }

    pub fn classes(&self) -> Option<&[usize]> {
        match self {
            SmtResult::Sat(classes) => Some(classes),
            SmtResult::Unsat => None,
        }
    }

    pub fn into_classes(self) -> Option<Vec<usize>> {
        match self {
            SmtResult::Sat(classes) => Some(classes),
            SmtResult::Unsat => None,
        }
    }
}

impl Display for SmtResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SmtResult::Sat(_) => write!(f, "SAT"),
            SmtResult::Unsat => write!(f, "UNSAT"),
        }
    }
}

/// Lazy refinement loop: the SAT engine proposes valuations of the equality
/// atoms, the theory check either accepts one or returns a blocking clause.
#[derive(Debug)]
pub struct SmtSolver {
    kernel: EqualityKernel,
    num_terms: usize,
    solver: Solver,
    // Statistics
    rounds: usize,
    lemmas: usize,
    // Timings
    pub time_theory: Duration,
    pub time_total: Duration,
}

impl SmtSolver {
    pub fn new(formula: &SmtCnf, options: Options) -> Self {
        let (kernel, skeleton) = EqualityKernel::build(formula);
        let num_terms = formula.num_terms.max(kernel.num_terms());
        info!(
            "Boolean skeleton: {} atoms over {} terms, {} clauses",
            kernel.num_atoms(),
            num_terms,
            skeleton.num_clauses()
        );
        let solver = Solver::from_cnf(&skeleton, options);
        Self {
            kernel,
            num_terms,
            solver,
            rounds: 0,
            lemmas: 0,
            time_theory: Duration::new(0, 0),
            time_total: Duration::new(0, 0),
        }
    }

    pub fn kernel(&self) -> &EqualityKernel {
        &self.kernel
    }
    /// The underlying SAT engine.
    pub fn solver(&self) -> &Solver {
        &self.solver
    }
    pub fn num_terms(&self) -> usize {
        self.num_terms
    }
    pub fn num_rounds(&self) -> usize {
        self.rounds
    }
    pub fn num_lemmas(&self) -> usize {
        self.lemmas
    }

    /// Checks `classes` against `formula`, leaving out empty clauses under
    /// `legacy_empty_clause`.
    pub fn verify(&self, formula: &SmtCnf, classes: &[usize]) -> bool {
        let legacy = self.solver.options().legacy_empty_clause;
        formula
            .iter()
            .filter(|clause| !(legacy && clause.is_empty()))
            .all(|clause| clause.eval(classes))
    }

    pub fn solve(&mut self) -> SmtResult {
        info!("SmtSolver::solve()");
        let time_start = Instant::now();
        let result = self.refine();
        self.time_total += time_start.elapsed();
        info!("{} after {} rounds and {} lemmas", result, self.rounds, self.lemmas);
        result
    }

    fn refine(&mut self) -> SmtResult {
        loop {
            self.rounds += 1;
            let valuation = match self.solver.solve() {
                SolveResult::Sat(valuation) => valuation,
                SolveResult::Unsat => return SmtResult::Unsat,
            };

            let (time_theory, verdict) = measure_time(|| theory::check(&self.kernel, self.num_terms, &valuation));
            self.time_theory += time_theory.duration();

            match verdict {
                TheoryVerdict::Consistent(classes) => {
                    debug!("Round {}: valuation accepted", self.rounds);
                    return SmtResult::Sat(classes);
                }
                TheoryVerdict::Conflict(atoms) => {
                    // Not all of these atoms can keep their current values.
                    let lemma: Vec<Lit> = atoms
                        .iter()
                        .map(|&atom| Lit::new(atom, valuation[atom.index()]))
                        .collect();
                    debug!(
                        "Round {}: theory conflict on {}, adding [{}]",
                        self.rounds,
                        atoms.iter().map(|&atom| self.kernel.equality(atom)).join(", "),
                        lemma.iter().join(", ")
                    );
                    self.lemmas += 1;
                    self.solver.add_clause(&lemma);
                }
            }
        }
    }
}
