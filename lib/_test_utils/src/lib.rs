//! Shared helpers for tests: small random formulas, brute-force oracles and
//! fixed scenarios every solving front-end must pass.

use color_eyre::eyre::ensure;

use eqsat_core::cnf::Cnf;
use eqsat_core::eval::Eval;
use eqsat_core::smt::{EqAtom, SmtCnf};

pub use self::arbitrary::{SmallCnf, SmallSmtCnf};
pub use self::oracle::{brute_force_sat, brute_force_smt, set_partitions};

pub mod arbitrary;
pub mod oracle;

/// Runs the standard SAT scenarios against `solve`, which returns a model or `None` for UNSAT.
pub fn run_sat_scenarios<F>(mut solve: F) -> color_eyre::Result<()>
where
    F: FnMut(&Cnf) -> Option<Vec<bool>>,
{
    let cnf = Cnf::from([vec![1, 2], vec![-1, -2]]);
    let model = solve(&cnf);
    println!("Solver returned: {:?}", model);
    ensure!(model.map_or(false, |m| cnf.eval(&m)), "expected a model of {}", cnf);

    let cnf = Cnf::from([vec![1], vec![-1]]);
    let model = solve(&cnf);
    println!("Solver returned: {:?}", model);
    ensure!(model.is_none(), "expected UNSAT for {}", cnf);

    let cnf = Cnf::from([vec![1, 2], vec![3, 4], vec![-1, -2], vec![-3, -4], vec![5]]);
    let model = solve(&cnf);
    println!("Solver returned: {:?}", model);
    ensure!(model.map_or(false, |m| cnf.eval(&m) && m[4]), "expected a model of {}", cnf);

    Ok(())
}

/// Runs the standard equality scenarios against `solve`, which returns term classes or `None` for UNSAT.
pub fn run_smt_scenarios<F>(mut solve: F) -> color_eyre::Result<()>
where
    F: FnMut(&SmtCnf) -> Option<Vec<usize>>,
{
    let mut cnf = SmtCnf::new();
    cnf.add_clause([EqAtom::equal(0, 1)]);
    cnf.add_clause([EqAtom::equal(1, 2)]);
    cnf.add_clause([EqAtom::not_equal(0, 2)]);
    let classes = solve(&cnf);
    println!("Solver returned: {:?}", classes);
    ensure!(classes.is_none(), "expected UNSAT for\n{}", cnf);

    let mut cnf = SmtCnf::with_terms(3);
    cnf.add_clause([EqAtom::equal(0, 1)]);
    let classes = solve(&cnf);
    println!("Solver returned: {:?}", classes);
    let classes = classes.ok_or_else(|| color_eyre::eyre::eyre!("expected SAT for\n{}", cnf))?;
    ensure!(cnf.eval(&classes), "classes {:?} violate\n{}", classes, cnf);
    ensure!(classes[0] == classes[1] && classes[2] != classes[0], "unexpected classes {:?}", classes);

    Ok(())
}
