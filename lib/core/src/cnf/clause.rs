use std::fmt::{Display, Formatter};
use std::slice::Iter;

use itertools::Itertools;

use crate::eval::Eval;
use crate::lit::Lit;

/// Disjunction of literals, kept sorted by variable and free of duplicates.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Clause {
    pub(crate) lits: Vec<Lit>,
}

impl Clause {
    pub fn new(mut lits: Vec<Lit>) -> Self {
        lits.sort_unstable();
        lits.dedup();
        Clause { lits }
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn into_lits(self) -> Vec<Lit> {
        self.lits
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }

    /// Whether the clause contains some literal together with its negation.
    pub fn is_tautology(&self) -> bool {
        // Complementary literals are adjacent in the sorted order.
        self.lits.iter().tuple_windows().any(|(&a, &b)| a == !b)
    }
}

impl Eval for Clause {
    type Value = bool;

    fn eval(&self, valuation: &[bool]) -> bool {
        self.lits.iter().any(|&lit| valuation[lit.var().index()] ^ lit.negated())
    }
}

impl<I> From<I> for Clause
where
    I: IntoIterator,
    I::Item: Into<Lit>,
{
    fn from(iter: I) -> Self {
        Self::new(iter.into_iter().map_into::<Lit>().collect())
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for lit in self.lits.iter() {
            list.entry(&format_args!("{}", lit));
        }
        list.finish()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_is_normalized() {
        let clause = Clause::from([3, -1, 3, 2]);
        let expected: Vec<Lit> = vec![(-1).into(), 2.into(), 3.into()];
        assert_eq!(clause.lits(), expected.as_slice());
        assert_eq!(clause, Clause::from([2, 3, -1]));
    }

    #[test]
    fn test_clause_tautology() {
        assert!(Clause::from([1, 2, -1]).is_tautology());
        assert!(!Clause::from([1, 2, -3]).is_tautology());
        assert!(!Clause::from(Vec::<i32>::new()).is_tautology());
    }

    #[test]
    fn test_clause_eval() {
        let clause = Clause::from([1, -2]);
        assert!(clause.eval(&[true, true]));
        assert!(clause.eval(&[false, false]));
        assert!(!clause.eval(&[false, true]));
        assert!(!Clause::from(Vec::<i32>::new()).eval(&[]));
    }

    #[test]
    fn test_clause_display() {
        assert_eq!(format!("{}", Clause::from([2, -1])), "[-1, 2]");
    }
}
