//! Congruence closure over equality atoms.
//!
//! Given a Boolean valuation of the kernel atoms, the true atoms are merged into
//! equivalence classes. A false atom whose terms end up in the same class is
//! violated; the check then explains one violation by a short chain of true
//! atoms.

use std::cmp::Reverse;

use eqsat_core::smt::Term;
use eqsat_core::var::Var;
use tracing::trace;

use crate::graph::EqualityGraph;
use crate::kernel::EqualityKernel;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TheoryVerdict {
    /// Class id of every term.
    Consistent(Vec<usize>),
    /// Atoms whose current values cannot hold together.
    Conflict(Vec<Var>),
}

pub fn check(kernel: &EqualityKernel, num_terms: usize, valuation: &[bool]) -> TheoryVerdict {
    debug_assert_eq!(valuation.len(), kernel.num_atoms());
    let num_terms = num_terms.max(kernel.num_terms());

    let mut graph = EqualityGraph::new(num_terms);
    let mut forbidden = Vec::new();
    for (atom, (a, b)) in kernel.iter() {
        if valuation[atom.index()] {
            graph.add_edge(a, b, atom);
        } else {
            forbidden.push((atom, a, b));
        }
    }

    let classes = graph.components();
    let violated: Vec<(Var, Term, Term)> = forbidden
        .into_iter()
        .filter(|&(_, a, b)| classes[a] == classes[b])
        .collect();
    trace!("{} violated disequalities", violated.len());

    if violated.is_empty() {
        TheoryVerdict::Consistent(classes)
    } else {
        TheoryVerdict::Conflict(explain(&graph, &violated))
    }
}

/// Shortest explanation found by greedily exploring from the terms with the most
/// unexplained violations: path atoms plus the violated false atom.
fn explain(graph: &EqualityGraph, violated: &[(Var, Term, Term)]) -> Vec<Var> {
    let mut pending = vec![0usize; graph.num_terms()];
    for &(_, a, b) in violated {
        pending[a] += 1;
        if a != b {
            pending[b] += 1;
        }
    }
    let mut explained = vec![false; violated.len()];
    let mut best: Option<Vec<Var>> = None;

    while let Some(center) = (0..graph.num_terms())
        .filter(|&t| pending[t] > 0)
        .max_by_key(|&t| (pending[t], Reverse(t)))
    {
        let paths = graph.bfs(center);
        for (k, &(atom, a, b)) in violated.iter().enumerate() {
            if explained[k] || (a != center && b != center) {
                continue;
            }
            explained[k] = true;
            pending[a] -= 1;
            if a != b {
                pending[b] -= 1;
            }

            let other = if a == center { b } else { a };
            debug_assert!(paths.is_reached(other));
            if let Some(mut candidate) = paths.path_atoms(other) {
                candidate.push(atom);
                if best.as_ref().map_or(true, |best| candidate.len() < best.len()) {
                    best = Some(candidate);
                }
            }
        }
    }

    best.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use eqsat_core::eval::Eval;
    use eqsat_core::smt::{EqAtom, SmtCnf};

    use super::*;

    fn kernel(atoms: &[EqAtom]) -> EqualityKernel {
        let mut formula = SmtCnf::new();
        for &atom in atoms {
            formula.add_clause([atom]);
        }
        EqualityKernel::build(&formula).0
    }

    #[test]
    fn test_consistent_classes() {
        let k = kernel(&[EqAtom::equal(0, 1), EqAtom::equal(2, 3), EqAtom::equal(1, 3)]);
        assert_eq!(check(&k, 5, &[true, true, false]), TheoryVerdict::Consistent(vec![0, 0, 1, 1, 2]));
    }

    #[test]
    fn test_triangle_conflict() {
        let k = kernel(&[EqAtom::equal(0, 1), EqAtom::equal(1, 2), EqAtom::equal(0, 2)]);
        let verdict = check(&k, 3, &[true, true, false]);
        assert_eq!(verdict, TheoryVerdict::Conflict(vec![Var::new(0), Var::new(1), Var::new(2)]));
    }

    #[test]
    fn test_false_self_loop() {
        let k = kernel(&[EqAtom::equal(0, 1), EqAtom::equal(2, 2)]);
        assert_eq!(check(&k, 3, &[true, false]), TheoryVerdict::Conflict(vec![Var::new(1)]));
    }

    #[test]
    fn test_shortest_explanation_is_kept() {
        // Chain 0-1-2-3-4 with false 0=4 (long) and false 2=3 (short).
        let k = kernel(&[
            EqAtom::equal(0, 1),
            EqAtom::equal(1, 2),
            EqAtom::equal(2, 3),
            EqAtom::equal(3, 4),
            EqAtom::equal(0, 4),
            EqAtom::equal(1, 3),
        ]);
        let verdict = check(&k, 5, &[true, true, true, true, false, false]);
        // 1<>3 is explained by 1-2-3, two edges; 0<>4 needs four.
        assert_eq!(verdict, TheoryVerdict::Conflict(vec![Var::new(1), Var::new(2), Var::new(5)]));
    }

    #[test]
    fn test_classes_satisfy_true_atoms() {
        let atoms = [EqAtom::equal(0, 3), EqAtom::equal(3, 1), EqAtom::equal(2, 4), EqAtom::equal(0, 4)];
        let k = kernel(&atoms);
        let valuation = [true, true, true, false];
        match check(&k, 5, &valuation) {
            TheoryVerdict::Consistent(classes) => {
                for (atom, &value) in valuation.iter().enumerate() {
                    assert_eq!(k.equality(Var::from(atom)).eval(&classes), value);
                }
            }
            verdict => panic!("unexpected {:?}", verdict),
        }
    }
}
