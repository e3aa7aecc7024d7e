// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! General algorithms checking subsets of edges.

use crate::collections::UnionFind;
use crate::digraph::WeightedDigraph;
use crate::num::traits::NumAssign;

/// Return the in-degree of each node in the subgraph formed by `edges`.
pub fn in_degrees<W>(g: &WeightedDigraph<W>, edges: &[usize]) -> Vec<usize>
where
    W: NumAssign + PartialOrd + Copy,
{
    let mut degrees = vec![0; g.num_nodes()];
    for &e in edges {
        degrees[g.edge(e).snk()] += 1;
    }
    degrees
}

/// Return the total weight of `edges`.
pub fn total_weight<W>(g: &WeightedDigraph<W>, edges: &[usize]) -> W
where
    W: NumAssign + PartialOrd + Copy,
{
    edges.iter().fold(W::zero(), |acc, &e| acc + g.edge(e).weight())
}

/// Return `true` if `edges` form a branching whose roots include `root`.
///
/// This means that no node has more than one incoming edge, `root` has
/// none and the edges do not contain a cycle.
///
/// # Example
///
/// ```
/// use rs_arborescence::WeightedDigraph;
/// use rs_arborescence::algorithms::is_branching;
///
/// let g = WeightedDigraph::from_edges(4, vec![(0, 1, 1), (1, 2, 1), (2, 1, 1), (3, 2, 1)]);
/// assert!(is_branching(&g, 0, &[0, 1]));
/// assert!(!is_branching(&g, 0, &[1, 2]));
/// assert!(!is_branching(&g, 0, &[1, 3]));
/// assert!(!is_branching(&g, 2, &[3]));
/// ```
pub fn is_branching<W>(g: &WeightedDigraph<W>, root: usize, edges: &[usize]) -> bool
where
    W: NumAssign + PartialOrd + Copy,
{
    let degrees = in_degrees(g, edges);
    if degrees[root] > 0 || degrees.iter().any(|&d| d > 1) {
        return false;
    }

    // With in-degree at most one, each cycle in the underlying
    // undirected graph is a directed cycle.
    let mut comps = UnionFind::new(g.num_nodes());
    for &e in edges {
        let (u, v) = g.edge(e).enodes();
        let ucomp = comps.find(u);
        if ucomp == comps.find(v) {
            return false;
        }
        comps.unite(u, v, ucomp);
    }
    true
}

/// Return `true` if `edges` form a spanning arborescence rooted at `root`.
///
/// This is a branching in which every node except `root` has an incoming edge.
pub fn is_arborescence<W>(g: &WeightedDigraph<W>, root: usize, edges: &[usize]) -> bool
where
    W: NumAssign + PartialOrd + Copy,
{
    g.num_nodes() > 0 && edges.len() + 1 == g.num_nodes() && is_branching(g, root, edges)
}

/// Return for each node whether it can be reached from `root`.
pub fn reachable<W>(g: &WeightedDigraph<W>, root: usize) -> Vec<bool>
where
    W: NumAssign + PartialOrd + Copy,
{
    let mut seen = vec![false; g.num_nodes()];
    let mut stack = vec![root];
    seen[root] = true;
    while let Some(u) = stack.pop() {
        for e in g.outedges(u) {
            let v = e.snk();
            if !seen[v] {
                seen[v] = true;
                stack.push(v);
            }
        }
    }
    seen
}
