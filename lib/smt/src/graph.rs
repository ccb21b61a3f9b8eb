use std::collections::VecDeque;

use eqsat_core::smt::Term;
use eqsat_core::var::Var;

/// Undirected multigraph over terms whose edges are labelled by equality atoms.
#[derive(Debug, Clone)]
pub struct EqualityGraph {
    adjacency: Vec<Vec<(Term, Var)>>,
}

impl EqualityGraph {
    pub fn new(num_terms: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_terms],
        }
    }

    pub fn num_terms(&self) -> usize {
        self.adjacency.len()
    }

    pub fn add_edge(&mut self, a: Term, b: Term, atom: Var) {
        self.adjacency[a].push((b, atom));
        if a != b {
            self.adjacency[b].push((a, atom));
        }
    }

    pub fn neighbors(&self, term: Term) -> &[(Term, Var)] {
        &self.adjacency[term]
    }

    /// Connected component of every term, numbered in order of the smallest term.
    pub fn components(&self) -> Vec<usize> {
        let n = self.num_terms();
        let mut component = vec![usize::MAX; n];
        let mut stack = Vec::new();
        let mut next = 0;

        for root in 0..n {
            if component[root] != usize::MAX {
                continue;
            }
            component[root] = next;
            stack.push(root);
            while let Some(term) = stack.pop() {
                for &(other, _) in self.neighbors(term) {
                    if component[other] == usize::MAX {
                        component[other] = next;
                        stack.push(other);
                    }
                }
            }
            next += 1;
        }

        component
    }

    /// Breadth-first search tree rooted at `source`.
    pub fn bfs(&self, source: Term) -> ShortestPaths {
        let mut parent = vec![None; self.num_terms()];
        let mut reached = vec![false; self.num_terms()];
        let mut queue = VecDeque::new();
        reached[source] = true;
        queue.push_back(source);

        while let Some(term) = queue.pop_front() {
            for &(other, atom) in self.neighbors(term) {
                if !reached[other] {
                    reached[other] = true;
                    parent[other] = Some((term, atom));
                    queue.push_back(other);
                }
            }
        }

        ShortestPaths { source, parent, reached }
    }
}

#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: Term,
    parent: Vec<Option<(Term, Var)>>,
    reached: Vec<bool>,
}

impl ShortestPaths {
    pub fn source(&self) -> Term {
        self.source
    }

    pub fn is_reached(&self, term: Term) -> bool {
        self.reached[term]
    }

    /// Edge atoms along a shortest path from the source to `target`.
    pub fn path_atoms(&self, target: Term) -> Option<Vec<Var>> {
        if !self.reached[target] {
            return None;
        }
        let mut atoms = Vec::new();
        let mut term = target;
        while let Some((prev, atom)) = self.parent[term] {
            atoms.push(atom);
            term = prev;
        }
        atoms.reverse();
        Some(atoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(num_terms: usize, edges: &[(Term, Term)]) -> EqualityGraph {
        let mut g = EqualityGraph::new(num_terms);
        for (i, &(a, b)) in edges.iter().enumerate() {
            g.add_edge(a, b, Var::from(i));
        }
        g
    }

    #[test]
    fn test_components_numbered_by_first_term() {
        let g = graph(6, &[(4, 1), (2, 5), (5, 5)]);
        assert_eq!(g.components(), vec![0, 1, 2, 3, 1, 2]);
    }

    #[test]
    fn test_components_of_long_chain() {
        let n = 100_000;
        let edges: Vec<_> = (1..n).map(|t| (t - 1, t)).collect();
        let g = graph(n, &edges);
        assert!(g.components().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_shortest_path_prefers_direct_edge() {
        // 0-1-2-3 and a shortcut 0-3.
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (0, 3)]);
        let paths = g.bfs(0);
        assert_eq!(paths.path_atoms(3), Some(vec![Var::new(3)]));
        assert_eq!(paths.path_atoms(2).map(|p| p.len()), Some(2));
        assert_eq!(paths.path_atoms(0), Some(vec![]));
        assert_eq!(paths.path_atoms(4), None);
        assert!(!paths.is_reached(4));
    }
}
