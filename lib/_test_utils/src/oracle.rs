use eqsat_core::cnf::Cnf;
use eqsat_core::eval::Eval;
use eqsat_core::smt::SmtCnf;

/// First satisfying assignment in lexicographic order (false < true), by enumeration.
pub fn brute_force_sat(cnf: &Cnf) -> Option<Vec<bool>> {
    assert!(cnf.num_vars < 24, "too many variables for enumeration: {}", cnf.num_vars);
    (0..1u32 << cnf.num_vars)
        .map(|bits| (0..cnf.num_vars).map(|i| bits >> (cnf.num_vars - 1 - i) & 1 == 1).collect::<Vec<_>>())
        .find(|valuation| cnf.eval(valuation))
}

/// First satisfying partition of the terms, by enumeration.
pub fn brute_force_smt(cnf: &SmtCnf) -> Option<Vec<usize>> {
    set_partitions(cnf.num_terms).into_iter().find(|classes| cnf.eval(classes))
}

/// All partitions of `0..n` as restricted growth strings.
pub fn set_partitions(n: usize) -> Vec<Vec<usize>> {
    fn go(n: usize, used: usize, current: &mut Vec<usize>, result: &mut Vec<Vec<usize>>) {
        if current.len() == n {
            result.push(current.clone());
            return;
        }
        for class in 0..=used {
            current.push(class);
            go(n, used.max(class + 1), current, result);
            current.pop();
        }
    }

    let mut result = Vec::new();
    go(n, 0, &mut Vec::with_capacity(n), &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_partitions_are_bell_numbers() {
        let bell = [1, 1, 2, 5, 15, 52];
        for (n, &b) in bell.iter().enumerate() {
            assert_eq!(set_partitions(n).len(), b);
        }
        assert_eq!(set_partitions(2), vec![vec![0, 0], vec![0, 1]]);
    }

    #[test]
    fn test_brute_force_sat() {
        assert_eq!(brute_force_sat(&Cnf::from([vec![1, 2], vec![-1]])), Some(vec![false, true]));
        assert_eq!(brute_force_sat(&Cnf::from([vec![1], vec![-1]])), None);
    }
}
