use quickcheck::{Arbitrary, Gen};

use eqsat_core::cnf::{Clause, Cnf};
use eqsat_core::lit::Lit;
use eqsat_core::smt::{EqAtom, Relation, SmtClause, SmtCnf};
use eqsat_core::var::Var;

const MAX_VARS: usize = 8;
const MAX_CLAUSES: usize = 24;
const MAX_TERMS: usize = 5;
const MAX_SMT_CLAUSES: usize = 8;
const MAX_CLAUSE_LEN: usize = 3;

/// Random CNF small enough for [`brute_force_sat`][crate::brute_force_sat].
#[derive(Debug, Clone)]
pub struct SmallCnf(pub Cnf);

impl Arbitrary for SmallCnf {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_vars = 1 + usize::arbitrary(g) % MAX_VARS;
        let num_clauses = usize::arbitrary(g) % (MAX_CLAUSES + 1);
        let mut cnf = Cnf::with_vars(num_vars);
        for _ in 0..num_clauses {
            let len = 1 + usize::arbitrary(g) % MAX_CLAUSE_LEN;
            let lits = (0..len)
                .map(|_| Lit::new(Var::from(usize::arbitrary(g) % num_vars), bool::arbitrary(g)))
                .collect();
            cnf.add_clause(Clause::new(lits));
        }
        SmallCnf(cnf)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let cnf = self.0.clone();
        Box::new((0..cnf.num_clauses()).rev().map(move |i| {
            let mut smaller = cnf.clone();
            smaller.clauses.remove(i);
            SmallCnf(smaller)
        }))
    }
}

/// Random equality CNF small enough for [`brute_force_smt`][crate::brute_force_smt].
#[derive(Debug, Clone)]
pub struct SmallSmtCnf(pub SmtCnf);

impl Arbitrary for SmallSmtCnf {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_terms = 1 + usize::arbitrary(g) % MAX_TERMS;
        let num_clauses = usize::arbitrary(g) % (MAX_SMT_CLAUSES + 1);
        let mut cnf = SmtCnf::with_terms(num_terms);
        for _ in 0..num_clauses {
            let len = 1 + usize::arbitrary(g) % MAX_CLAUSE_LEN;
            let atoms = (0..len)
                .map(|_| {
                    let lhs = usize::arbitrary(g) % num_terms;
                    let rhs = usize::arbitrary(g) % num_terms;
                    let relation = *g.choose(&[Relation::Equal, Relation::NotEqual]).unwrap_or(&Relation::Equal);
                    EqAtom::new(lhs, rhs, relation)
                })
                .collect();
            cnf.add_clause(SmtClause::new(atoms));
        }
        SmallSmtCnf(cnf)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let cnf = self.0.clone();
        Box::new((0..cnf.num_clauses()).rev().map(move |i| {
            let mut smaller = cnf.clone();
            smaller.clauses.remove(i);
            SmallSmtCnf(smaller)
        }))
    }
}
