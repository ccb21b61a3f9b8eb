use quickcheck_macros::quickcheck;

use eqsat::core::eval::Eval;
use eqsat::sat::options::DEFAULT_OPTIONS;
use eqsat::sat::solver::{SolveResult, Solver};
use eqsat::smt::kernel::EqualityKernel;
use eqsat::smt::theory::{check, TheoryVerdict};
use eqsat::smt::{SmtResult, SmtSolver};
use eqsat_test_utils::{brute_force_sat, brute_force_smt, SmallCnf, SmallSmtCnf};

#[quickcheck]
fn sat_agrees_with_brute_force(SmallCnf(cnf): SmallCnf) -> bool {
    let mut solver = Solver::from_cnf(&cnf, DEFAULT_OPTIONS);
    let result = solver.solve();
    solver.check_invariants();
    match (result, brute_force_sat(&cnf)) {
        (SolveResult::Sat(model), Some(_)) => cnf.eval(&model),
        (SolveResult::Unsat, None) => true,
        _ => false,
    }
}

#[quickcheck]
fn sat_is_deterministic(SmallCnf(cnf): SmallCnf) -> bool {
    let first = Solver::from_cnf(&cnf, DEFAULT_OPTIONS).solve();
    let second = Solver::from_cnf(&cnf, DEFAULT_OPTIONS).solve();
    first == second
}

#[quickcheck]
fn smt_agrees_with_brute_force(SmallSmtCnf(formula): SmallSmtCnf) -> bool {
    let result = SmtSolver::new(&formula, DEFAULT_OPTIONS).solve();
    match (result, brute_force_smt(&formula)) {
        (SmtResult::Sat(classes), Some(_)) => classes.len() == formula.num_terms && formula.eval(&classes),
        (SmtResult::Unsat, None) => true,
        _ => false,
    }
}

#[quickcheck]
fn smt_is_deterministic(SmallSmtCnf(formula): SmallSmtCnf) -> bool {
    let first = SmtSolver::new(&formula, DEFAULT_OPTIONS).solve();
    let second = SmtSolver::new(&formula, DEFAULT_OPTIONS).solve();
    first == second
}

#[quickcheck]
fn theory_classes_respect_valuation(SmallSmtCnf(formula): SmallSmtCnf, bits: Vec<bool>) -> bool {
    let (kernel, _) = EqualityKernel::build(&formula);
    let valuation: Vec<bool> = (0..kernel.num_atoms())
        .map(|i| bits.get(i).copied().unwrap_or(false))
        .collect();
    match check(&kernel, formula.num_terms, &valuation) {
        TheoryVerdict::Consistent(classes) => kernel
            .iter()
            .all(|(atom, (a, b))| (classes[a] == classes[b]) == valuation[atom.index()]),
        TheoryVerdict::Conflict(atoms) => {
            // Exactly one false atom, closed by a chain of true ones.
            let num_false = atoms.iter().filter(|atom| !valuation[atom.index()]).count();
            num_false == 1 && !atoms.is_empty()
        }
    }
}
