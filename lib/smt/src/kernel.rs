use std::collections::HashMap;

use eqsat_core::cnf::{Clause, Cnf};
use eqsat_core::lit::Lit;
use eqsat_core::smt::{EqAtom, SmtCnf, Term};
use eqsat_core::var::Var;

/// One Boolean atom per unordered term pair occurring in a formula.
#[derive(Debug, Clone, Default)]
pub struct EqualityKernel {
    pairs: Vec<(Term, Term)>,
    atoms: HashMap<(Term, Term), Var>,
}

impl EqualityKernel {
    /// Interns every term pair of `formula` and translates it into its Boolean skeleton.
    ///
    /// `a = b` becomes the atom of `(min, max)`, `a <> b` its negation.
    pub fn build(formula: &SmtCnf) -> (Self, Cnf) {
        let mut kernel = Self::default();
        let clauses = formula
            .iter()
            .map(|clause| {
                let lits = clause
                    .iter()
                    .map(|atom| Lit::new(kernel.intern(atom.ordered_pair()), atom.is_negated()))
                    .collect();
                Clause::new(lits)
            })
            .collect();
        let skeleton = Cnf {
            num_vars: kernel.num_atoms(),
            clauses,
        };
        (kernel, skeleton)
    }

    fn intern(&mut self, pair: (Term, Term)) -> Var {
        debug_assert!(pair.0 <= pair.1);
        if let Some(&var) = self.atoms.get(&pair) {
            return var;
        }
        let var = Var::from(self.pairs.len());
        self.pairs.push(pair);
        self.atoms.insert(pair, var);
        var
    }

    pub fn num_atoms(&self) -> usize {
        self.pairs.len()
    }

    /// One past the largest term mentioned by any atom.
    pub fn num_terms(&self) -> usize {
        self.pairs.iter().map(|&(_, b)| b + 1).max().unwrap_or(0)
    }

    /// Atom of the unordered pair `{a, b}`, if it occurs in the formula.
    pub fn atom(&self, a: Term, b: Term) -> Option<Var> {
        let pair = if a <= b { (a, b) } else { (b, a) };
        self.atoms.get(&pair).copied()
    }

    /// Term pair of `atom`, smaller term first.
    pub fn pair(&self, atom: Var) -> (Term, Term) {
        self.pairs[atom.index()]
    }

    /// The equality `atom` stands for.
    pub fn equality(&self, atom: Var) -> EqAtom {
        let (a, b) = self.pair(atom);
        EqAtom::equal(a, b)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, (Term, Term))> + '_ {
        self.pairs.iter().enumerate().map(|(i, &pair)| (Var::from(i), pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_shares_atoms_between_orientations() {
        let mut formula = SmtCnf::new();
        formula.add_clause([EqAtom::equal(2, 0), EqAtom::not_equal(1, 1)]);
        formula.add_clause([EqAtom::not_equal(0, 2)]);
        let (kernel, skeleton) = EqualityKernel::build(&formula);

        assert_eq!(kernel.num_atoms(), 2);
        assert_eq!(kernel.num_terms(), 3);
        let v02 = kernel.atom(2, 0).unwrap();
        let v11 = kernel.atom(1, 1).unwrap();
        assert_eq!(kernel.pair(v02), (0, 2));
        assert_eq!(kernel.equality(v11), EqAtom::equal(1, 1));
        assert_eq!(kernel.atom(0, 1), None);

        assert_eq!(skeleton.num_vars, 2);
        assert_eq!(
            skeleton.clauses,
            vec![
                Clause::new(vec![Lit::positive(v02), Lit::negative(v11)]),
                Clause::new(vec![Lit::negative(v02)]),
            ]
        );
    }

    #[test]
    fn test_empty_formula() {
        let (kernel, skeleton) = EqualityKernel::build(&SmtCnf::with_terms(4));
        assert_eq!(kernel.num_atoms(), 0);
        assert_eq!(skeleton, Cnf::new());
    }
}
