use eqsat_core::lit::Lit;
use eqsat_core::var::Var;
use itertools::{EitherOrBoth, Itertools};

/// Membership test on a sorted literal slice.
pub fn contains(clause: &[Lit], lit: Lit) -> bool {
    clause.binary_search(&lit).is_ok()
}

/// Resolves two sorted clauses on `pivot`.
///
/// Both inputs must be sorted in literal order; so is the result. Literals over
/// `pivot` are dropped, the rest are merged without duplicates.
pub fn resolve(lhs: &[Lit], rhs: &[Lit], pivot: Var) -> Vec<Lit> {
    debug_assert!(lhs.windows(2).all(|w| w[0] < w[1]));
    debug_assert!(rhs.windows(2).all(|w| w[0] < w[1]));

    lhs.iter()
        .merge_join_by(rhs.iter(), |a, b| a.cmp(b))
        .filter_map(|either| {
            let lit = match either {
                EitherOrBoth::Both(&lit, _) | EitherOrBoth::Left(&lit) | EitherOrBoth::Right(&lit) => lit,
            };
            (lit.var() != pivot).then(|| lit)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(xs: &[i32]) -> Vec<Lit> {
        let mut v: Vec<Lit> = xs.iter().map(|&x| Lit::from_external(x)).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_resolve_drops_pivot() {
        let r = resolve(&lits(&[1, 2]), &lits(&[-1, 3]), Var::new(0));
        assert_eq!(r, lits(&[2, 3]));
    }

    #[test]
    fn test_resolve_merges_shared_literals() {
        let r = resolve(&lits(&[-1, 2, -4]), &lits(&[2, 3, 4, 5]), Var::new(3));
        assert_eq!(r, lits(&[-1, 2, 3, 5]));
    }

    #[test]
    fn test_resolve_to_empty() {
        let r = resolve(&lits(&[-3]), &lits(&[3]), Var::new(2));
        assert!(r.is_empty());
    }

    #[test]
    fn test_contains() {
        let c = lits(&[1, -2, 5]);
        assert!(contains(&c, Lit::from_external(-2)));
        assert!(!contains(&c, Lit::from_external(2)));
    }
}
