use criterion::{black_box, criterion_group, criterion_main, Criterion};

use eqsat::core::cnf::Cnf;
use eqsat::core::smt::{EqAtom, SmtCnf};
use eqsat::sat::options::DEFAULT_OPTIONS;
use eqsat::sat::solver::Solver;
use eqsat::smt::SmtSolver;

/// `n + 1` pigeons into `n` holes.
fn pigeonhole(n: i32) -> Cnf {
    let p = |i: i32, j: i32| i * n + j + 1;
    let mut clauses = Vec::new();
    for i in 0..=n {
        clauses.push((0..n).map(|j| p(i, j)).collect::<Vec<_>>());
    }
    for j in 0..n {
        for a in 0..=n {
            for b in (a + 1)..=n {
                clauses.push(vec![-p(a, j), -p(b, j)]);
            }
        }
    }
    Cnf::from(clauses)
}

/// Chain `0=1=...=n` with `0<>n`.
fn long_cycle(n: usize) -> SmtCnf {
    let mut formula = SmtCnf::new();
    for t in 0..n {
        formula.add_clause([EqAtom::equal(t, t + 1)]);
    }
    formula.add_clause([EqAtom::not_equal(0, n)]);
    formula
}

fn my_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solvers");

    let cnf = pigeonhole(4);
    group.bench_with_input("CDCL pigeonhole 5-4", &cnf, |b, cnf| {
        b.iter(|| Solver::from_cnf(black_box(cnf), DEFAULT_OPTIONS).solve())
    });

    let formula = long_cycle(50);
    group.bench_with_input("DPLL(T) cycle of 50", &formula, |b, formula| {
        b.iter(|| SmtSolver::new(black_box(formula), DEFAULT_OPTIONS).solve())
    });

    group.finish();
}

criterion_group!(benches, my_benches);
criterion_main!(benches);
