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

//! The contraction algorithm of Chu-Liu and Edmonds.

use super::{augmented_arcs, check_root, ArborescenceError, ArcData, Cost};
use crate::digraph::WeightedDigraph;
use crate::num::traits::{NumAssign, Signed};

use std::mem;
use tracing::{debug, instrument, trace};

/// The data of a single contraction needed to expand the contracted node.
struct Contraction<W> {
    /// The edges of the graph *before* the contraction.
    edges: Vec<ArcData<W>>,
    /// For each edge of the contracted graph the edge in `edges` it stems from.
    origin: Vec<usize>,
    /// Whether a node is on the cycle.
    oncycle: Vec<bool>,
    /// The cycle nodes with their selected incoming edges and the weights.
    cycle: Vec<(usize, usize, W)>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not visited, yet.
    White,
    /// On the current path.
    Gray,
    /// Visited, not on a cycle.
    Black,
}

/// Compute a minimum spanning arborescence with the contraction algorithm.
///
/// The cheapest entering edge of each node is selected. If these edges
/// contain a cycle, the cycle is contracted to a new node and the weight
/// of each edge entering the cycle is reduced by the weight of the
/// selected edge it competes with. The problem is solved on the
/// contracted graph and the cycle is expanded again, dropping the cycle
/// edge at the node where the chosen entering edge arrives.
///
/// Of several cheapest entering edges the first one (lowest id) is
/// selected. Returns the ids of the arborescence edges ordered by their
/// sink nodes. If not all nodes can be reached from the root, the result
/// is a minimal partial arborescence (see the [module
/// documentation](super)).
///
/// The running time is `O(n m)`.
///
/// # Example
///
/// ```
/// use rs_arborescence::WeightedDigraph;
/// use rs_arborescence::arborescence::edmonds;
///
/// let g = WeightedDigraph::from_edges(4, vec![
///     (0, 1, 10), (0, 2, 10), (0, 3, 10),
///     (1, 2, 1), (2, 3, 1), (3, 1, 1),
/// ]);
/// let tree = edmonds(&g, 0).unwrap();
/// assert_eq!(tree.iter().map(|&e| g.edge(e).weight()).sum::<i32>(), 12);
/// assert_eq!(tree.len(), 3);
/// ```
#[instrument(level = "debug", skip(g), fields(nodes = g.num_nodes(), edges = g.num_edges()))]
pub fn edmonds<W>(g: &WeightedDigraph<W>, root: usize) -> Result<Vec<usize>, ArborescenceError>
where
    W: NumAssign + Signed + PartialOrd + Copy,
{
    check_root(g, root)?;

    let n = g.num_nodes();
    let m = g.num_edges();
    let mut nodes: Vec<usize> = (0..n).collect();
    // the root is never on a cycle since it has no entering edge
    let mut edges = augmented_arcs(g, root);
    let mut contractions: Vec<Contraction<Cost<W>>> = vec![];

    // contract cycles until the selected edges are cycle free
    let mut branching = loop {
        // all node ids are smaller than this bound
        let bound = n + contractions.len();
        let inarcs = select_inarcs(&edges, root, bound);
        let cycle = match find_cycle(&nodes, &edges, &inarcs, root) {
            Some(cycle) => cycle,
            None => break nodes.iter().filter_map(|&u| inarcs[u].map(|(e, _)| e)).collect::<Vec<_>>(),
        };

        let cyclenode = bound;
        trace!(node = cyclenode, len = cycle.len(), "contract cycle");

        let mut oncycle = vec![false; bound];
        for &u in &cycle {
            oncycle[u] = true;
        }

        let mut newedges = Vec::with_capacity(edges.len());
        let mut origin = Vec::with_capacity(edges.len());
        for (i, e) in edges.iter().enumerate() {
            let newe = match (oncycle[e.src], oncycle[e.snk]) {
                (false, false) => *e,
                (true, false) => ArcData { src: cyclenode, ..*e },
                (false, true) => {
                    let (_, w) = inarcs[e.snk].unwrap_or_else(|| unreachable!("cycle node {} without entering edge", e.snk));
                    ArcData {
                        snk: cyclenode,
                        weight: e.weight - w,
                        ..*e
                    }
                }
                (true, true) => continue,
            };
            newedges.push(newe);
            origin.push(i);
        }

        // the contracted node takes the place of the first cycle node
        let mut newnodes = Vec::with_capacity(nodes.len() + 1 - cycle.len());
        let mut placed = false;
        for &u in &nodes {
            if !oncycle[u] {
                newnodes.push(u);
            } else if !placed {
                newnodes.push(cyclenode);
                placed = true;
            }
        }
        nodes = newnodes;

        let cycle = cycle
            .into_iter()
            .map(|u| {
                let (e, w) = inarcs[u].unwrap_or_else(|| unreachable!("cycle node {} without entering edge", u));
                (u, e, w)
            })
            .collect();
        contractions.push(Contraction {
            edges: mem::replace(&mut edges, newedges),
            origin,
            oncycle,
            cycle,
        });
    };

    debug!(contractions = contractions.len(), "selected edges are cycle free");

    // expand the contracted nodes in reverse order
    while let Some(contraction) = contractions.pop() {
        let mut expanded = Vec::with_capacity(branching.len() + contraction.cycle.len());
        let mut entered = None;
        for e in branching {
            let e = contraction.origin[e];
            let v = contraction.edges[e].snk;
            if contraction.oncycle[v] {
                assert!(entered.is_none(), "two edges entering the contracted cycle");
                entered = Some(v);
            }
            expanded.push(e);
        }

        let broken = entered.unwrap_or_else(|| unreachable!("no edge entering the contracted cycle"));
        expanded.extend(
            contraction
                .cycle
                .iter()
                .filter(|&&(u, _, _)| u != broken)
                .map(|&(_, e, _)| e),
        );
        branching = expanded;
    }

    // drop the additional edges
    branching.retain(|&e| e < m);
    branching.sort_by_key(|&e| g.edge(e).snk());
    debug!(edges = branching.len(), "arborescence expanded");
    Ok(branching)
}

/// Select the cheapest entering edge of each node.
///
/// Loops and edges entering the root are ignored. Returns for each node
/// the index and the weight of the first cheapest edge.
fn select_inarcs<W>(edges: &[ArcData<W>], root: usize, bound: usize) -> Vec<Option<(usize, W)>>
where
    W: PartialOrd + Copy,
{
    let mut inarcs = vec![None; bound];
    for (i, e) in edges.iter().enumerate() {
        if e.src == e.snk || e.snk == root {
            continue;
        }
        if inarcs[e.snk].map_or(true, |(_, w)| e.weight < w) {
            inarcs[e.snk] = Some((i, e.weight));
        }
    }
    inarcs
}

/// Find a cycle of selected edges.
///
/// The nodes are visited in the given order. From each unvisited node
/// the path of selected edges is followed backwards until the root, a
/// node without entering edge or an already visited node is reached.
/// Returns the nodes of the first cycle found.
fn find_cycle<W>(nodes: &[usize], edges: &[ArcData<W>], inarcs: &[Option<(usize, W)>], root: usize) -> Option<Vec<usize>>
where
    W: Copy,
{
    let pred = |u: usize| inarcs[u].map(|(e, _)| edges[e].src);
    let mut color = vec![Color::White; inarcs.len()];

    for &u in nodes {
        if u == root || color[u] != Color::White {
            continue;
        }

        // run along predecessors of unseen nodes
        let mut v = u;
        while v != root && color[v] == Color::White {
            color[v] = Color::Gray;
            let w = match pred(v) {
                Some(w) => w,
                None => break,
            };
            if color[w] == Color::Gray {
                // we have found a cycle through w
                let mut cycle = vec![w];
                let mut x = w;
                while let Some(y) = pred(x).filter(|&y| y != w) {
                    cycle.push(y);
                    x = y;
                }
                return Some(cycle);
            }
            v = w;
        }

        // the path has no cycle
        let mut v = u;
        while v != root && color[v] == Color::Gray {
            color[v] = Color::Black;
            match pred(v) {
                Some(w) => v = w,
                None => break,
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{edmonds, find_cycle, select_inarcs, ArcData};
    use crate::WeightedDigraph;

    fn arcs(edges: &[(usize, usize, i32)]) -> Vec<ArcData<i32>> {
        edges
            .iter()
            .map(|&(src, snk, weight)| ArcData { src, snk, weight })
            .collect()
    }

    #[test]
    fn test_select_first_cheapest() {
        let edges = arcs(&[(0, 1, 3), (2, 1, 1), (3, 1, 1), (1, 1, 0), (1, 0, 0), (0, 2, 2)]);
        let inarcs = select_inarcs(&edges, 0, 4);
        assert_eq!(inarcs, vec![None, Some((1, 1)), Some((5, 2)), None]);
    }

    #[test]
    fn test_find_cycle() {
        // 0 -> 1 -> 2 -> 3 -> 1
        let edges = arcs(&[(0, 1, 5), (1, 2, 1), (2, 3, 1), (3, 1, 1)]);
        let inarcs = select_inarcs(&edges, 0, 4);
        let mut cycle = find_cycle(&[0, 1, 2, 3], &edges, &inarcs, 0).unwrap();
        cycle.sort();
        assert_eq!(cycle, vec![1, 2, 3]);

        let edges = arcs(&[(0, 1, 5), (1, 2, 1), (2, 3, 1)]);
        let inarcs = select_inarcs(&edges, 0, 4);
        assert_eq!(find_cycle(&[0, 1, 2, 3], &edges, &inarcs, 0), None);
    }

    #[test]
    fn test_no_cycle() {
        let g = WeightedDigraph::from_edges(4, vec![(0, 1, 1), (0, 2, 2), (1, 2, 1), (2, 1, 1)]);
        assert_eq!(edmonds(&g, 0).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_cycle() {
        let g = WeightedDigraph::from_edges(3, vec![(0, 1, 5), (0, 2, 10), (1, 2, 1), (2, 1, 1)]);
        assert_eq!(edmonds(&g, 0).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_nested_cycles() {
        // The cycle 1-2 is contracted first, then the cycle formed by
        // the contracted node and 3.
        let g = WeightedDigraph::from_edges(
            5,
            vec![
                (0, 4, 1),
                (4, 1, 20),
                (1, 2, 1),
                (2, 1, 1),
                (2, 3, 2),
                (3, 1, 3),
                (3, 2, 4),
                (4, 3, 10),
            ],
        );
        let tree = edmonds(&g, 0).unwrap();
        let weight: i32 = tree.iter().map(|&e| g.edge(e).weight()).sum();
        // 0->4, 4->3, 3->1, 1->2
        assert_eq!(weight, 1 + 10 + 3 + 1);
        assert_eq!(tree, vec![5, 2, 7, 0]);
    }

    #[test]
    fn test_root_in_the_middle() {
        let g = WeightedDigraph::from_edges(3, vec![(0, 1, 1), (1, 2, 1), (2, 0, 1), (1, 0, 7)]);
        assert_eq!(edmonds(&g, 1).unwrap(), vec![2, 1]);
        assert_eq!(edmonds(&g, 2).unwrap(), vec![2, 0]);
    }

    #[test]
    fn test_unreachable_cycle() {
        // the cycle 2-3 cannot be entered, the cheaper edge 2->3 is kept
        let g = WeightedDigraph::from_edges(4, vec![(0, 1, 1), (2, 3, 4), (3, 2, 6)]);
        assert_eq!(edmonds(&g, 0).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_unreachable_nested_cycles() {
        // Nothing enters {0, 1, 3}. Leaving 3 without entering edge
        // costs 15, any other choice costs 16.
        let g = WeightedDigraph::from_edges(4, vec![(1, 3, 16), (0, 3, 1), (3, 0, 0), (0, 1, 15)]);
        let tree = edmonds(&g, 2).unwrap();
        assert_eq!(tree, vec![2, 3]);
    }

    #[test]
    fn test_contracted_root_side_edges() {
        // edges leaving the cycle must be mapped back to the cycle node they leave
        let g = WeightedDigraph::from_edges(
            5,
            vec![(0, 1, 10), (1, 2, 1), (2, 1, 1), (2, 3, 1), (1, 3, 5), (3, 4, 2), (0, 4, 9)],
        );
        let tree = edmonds(&g, 0).unwrap();
        assert_eq!(tree, vec![0, 1, 3, 5]);
    }
}
