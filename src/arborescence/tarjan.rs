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

//! Tarjan's path growing algorithm with mergeable heaps.

use super::{augmented_arcs, check_root, ArborescenceError};
use crate::collections::{SkewHeap, SkewHeapArena, UnionFind};
use crate::digraph::WeightedDigraph;
use crate::num::traits::{NumAssign, Signed};

use tracing::{debug, instrument, trace};

/// Processing state of a component.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    /// Not visited, yet.
    New,
    /// On the path currently grown.
    OnPath,
    /// Done, the selected entering edge does not close a cycle.
    Closed,
}

/// Compute a minimum spanning arborescence with mergeable heaps.
///
/// Each (contracted) node keeps its candidate entering edges in a skew
/// heap. Starting from an unvisited node, the cheapest entering edge is
/// followed backwards until the root, a finished node or a node on the
/// current path is reached. In the latter case the cycle is contracted:
/// the weight of the selected edge of each cycle node is subtracted from
/// all candidates of that node (in constant time) and the heaps are
/// melded. Finally the contractions are expanded from the outermost one
/// inwards.
///
/// Of several cheapest candidates the one with the lowest id is selected.
/// Returns the ids of the arborescence edges ordered by their sink nodes.
/// If not all nodes can be reached from the root, the result is a
/// minimal partial arborescence (see the [module documentation](super)).
///
/// The running time is `O(m log n)`.
///
/// # Example
///
/// ```
/// use rs_arborescence::WeightedDigraph;
/// use rs_arborescence::arborescence::tarjan;
///
/// let g = WeightedDigraph::from_edges(4, vec![
///     (0, 1, 10.0), (0, 2, 10.0), (0, 3, 10.0),
///     (1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0),
/// ]);
/// let tree = tarjan(&g, 0).unwrap();
/// assert_eq!(tree, vec![0, 3, 4]);
/// ```
#[instrument(level = "debug", skip(g), fields(nodes = g.num_nodes(), edges = g.num_edges()))]
pub fn tarjan<W>(g: &WeightedDigraph<W>, root: usize) -> Result<Vec<usize>, ArborescenceError>
where
    W: NumAssign + Signed + PartialOrd + Copy,
{
    check_root(g, root)?;

    let n = g.num_nodes();
    let m = g.num_edges();
    // there are at most n - 1 contractions
    let size = 2 * n;

    let arcs = augmented_arcs(g, root);
    let mut arena = SkewHeapArena::with_capacity(arcs.len());
    let mut heaps: Vec<SkewHeap> = (0..size).map(|_| SkewHeap::new()).collect();
    for (i, a) in arcs.iter().enumerate() {
        if a.src == a.snk || a.snk == root {
            continue;
        }
        arena.push(&mut heaps[a.snk], a.weight, i);
    }

    let mut comps = UnionFind::new(size);
    let mut state = vec![State::New; size];
    // the selected entering edge of each component and its (reduced) weight
    let mut inarcs = vec![None; size];
    // the component a component has been contracted into
    let mut parent: Vec<Option<usize>> = vec![None; size];
    // the cycle of each contraction, the k-th cycle forms component n + k
    let mut cycles: Vec<Vec<usize>> = vec![];

    state[root] = State::Closed;

    for u in 0..n {
        let mut cur = comps.find(u);
        if state[cur] != State::New {
            continue;
        }

        while state[cur] != State::Closed {
            state[cur] = State::OnPath;

            // find the cheapest edge entering from another component,
            // there is always the one from the root
            let inarc = loop {
                let top = arena.peek_min(&heaps[cur]).map(|(w, &e)| (e, w));
                match top {
                    Some((e, _)) if comps.find(arcs[e].src) == cur => {
                        arena.pop_min(&mut heaps[cur]);
                    }
                    Some(top) => break top,
                    None => unreachable!("component {} cannot be entered", cur),
                }
            };

            inarcs[cur] = Some(inarc);
            let origin = comps.find(arcs[inarc.0].src);

            if state[origin] != State::OnPath {
                cur = origin;
                continue;
            }

            // we have found a cycle, collect its components
            let mut cycle = vec![cur];
            let mut v = origin;
            while v != cur {
                cycle.push(v);
                v = comps.find(arcs[selected(&inarcs, v)].src);
            }

            let cyclenode = n + cycles.len();
            trace!(node = cyclenode, len = cycle.len(), "contract cycle");

            let mut heap = SkewHeap::new();
            for &v in &cycle {
                let (_, w) = inarcs[v].unwrap_or_else(|| unreachable!("cycle component {} without entering edge", v));
                let mut h = heaps[v].take();
                arena.add_lazy(&mut h, -w);
                heap = arena.merge(heap, h);
                parent[v] = Some(cyclenode);
                comps.unite(v, cyclenode, cyclenode);
            }
            heaps[cyclenode] = heap;
            cycles.push(cycle);
            cur = cyclenode;
        }

        // all components on the path are done
        let mut v = comps.find(u);
        while state[v] == State::OnPath {
            state[v] = State::Closed;
            v = comps.find(arcs[selected(&inarcs, v)].src);
        }
    }

    debug!(contractions = cycles.len(), "all components closed");

    // The entering edge of each node in the final arborescence.
    //
    // An edge entering a component breaks all components on the path
    // from its sink up to that component. The remaining children of
    // these components keep their selected edges. Each component lies
    // on exactly one such path.
    let mut entering: Vec<Option<usize>> = vec![None; n];
    let mut pending: Vec<(usize, usize)> = (0..n + cycles.len())
        .filter(|&v| v != root && parent[v].is_none())
        .map(|v| (v, selected(&inarcs, v)))
        .collect();
    while let Some((c, e)) = pending.pop() {
        let mut v = arcs[e].snk;
        entering[v] = Some(e);
        while v != c {
            let p = parent[v].unwrap_or_else(|| unreachable!("edge {} does not enter component {}", e, c));
            for &u in &cycles[p - n] {
                if u != v {
                    pending.push((u, selected(&inarcs, u)));
                }
            }
            v = p;
        }
    }

    // drop the additional edges
    let tree: Vec<usize> = entering.into_iter().flatten().filter(|&e| e < m).collect();
    debug!(edges = tree.len(), "arborescence expanded");
    Ok(tree)
}

/// Return the selected entering edge of component `v`.
///
/// # Panics
///
/// Panics if no edge has been selected for `v`.
fn selected<W>(inarcs: &[Option<(usize, W)>], v: usize) -> usize
where
    W: Copy,
{
    match inarcs[v] {
        Some((e, _)) => e,
        None => unreachable!("component {} without entering edge", v),
    }
}

#[cfg(test)]
mod tests {
    use super::tarjan;
    use crate::WeightedDigraph;

    fn weight(g: &WeightedDigraph<i64>, tree: &[usize]) -> i64 {
        tree.iter().map(|&e| g.edge(e).weight()).sum()
    }

    #[test]
    fn test_no_cycle() {
        let g = WeightedDigraph::from_edges(4, vec![(0, 1, 1), (0, 2, 2), (1, 2, 1), (2, 1, 1)]);
        assert_eq!(tarjan(&g, 0).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_cycle() {
        let g = WeightedDigraph::from_edges(3, vec![(0, 1, 5), (0, 2, 10), (1, 2, 1), (2, 1, 1)]);
        assert_eq!(tarjan(&g, 0).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_nested_cycles() {
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
        let tree = tarjan(&g, 0).unwrap();
        assert_eq!(weight(&g, &tree), 15);
        assert_eq!(tree, vec![5, 2, 7, 0]);
    }

    #[test]
    fn test_parallel_edges_and_loops() {
        let g = WeightedDigraph::from_edges(3, vec![(0, 1, 4), (0, 1, 2), (1, 1, -5), (0, 1, 2), (1, 2, 3), (2, 0, -1)]);
        assert_eq!(tarjan(&g, 0).unwrap(), vec![1, 4]);
    }

    #[test]
    fn test_unreachable() {
        // node 3 has no entering edge but enters the cycle 4-5, which
        // cannot be entered from the root
        let g = WeightedDigraph::from_edges(
            6,
            vec![(0, 1, 1), (1, 2, 1), (4, 5, 4), (5, 4, 6), (3, 4, 2), (3, 5, 9)],
        );
        let tree = tarjan(&g, 0).unwrap();
        assert_eq!(tree, vec![0, 1, 4, 2]);

        let g = WeightedDigraph::from_edges(4, vec![(0, 1, 1), (2, 3, 4), (3, 2, 6)]);
        assert_eq!(tarjan(&g, 0).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_unreachable_nested_cycles() {
        // Nothing enters {0, 1, 3}. Leaving 3 without entering edge
        // costs 15, any other choice costs 16.
        let g = WeightedDigraph::from_edges(4, vec![(1, 3, 16), (0, 3, 1), (3, 0, 0), (0, 1, 15)]);
        let tree = tarjan(&g, 2).unwrap();
        assert_eq!(weight(&g, &tree), 15);
        assert_eq!(tree, vec![2, 3]);
    }

    #[test]
    fn test_deep_nesting() {
        // The contracted component of 1, ..., k is entered cheapest from
        // k + 1 and k + 1 is entered from k, so the cycles are nested
        // n - 1 levels deep.
        let n = 20_000;
        let mut g = WeightedDigraph::new(n + 1);
        for k in 2..=n {
            g.add_edge(k - 1, k, 0);
            g.add_edge(k, 1, k as i64);
        }
        g.add_edge(0, 1, 3 * n as i64);
        let tree = tarjan(&g, 0).unwrap();
        assert_eq!(tree.len(), n);
        assert_eq!(weight(&g, &tree), 3 * n as i64);
    }

    #[test]
    fn test_cycle_through_root_edges() {
        // edges into the root are ignored, also when the root is not node 0
        let g = WeightedDigraph::from_edges(4, vec![(0, 1, 1), (1, 0, 1), (1, 2, 3), (2, 3, 1), (3, 1, 1), (3, 0, 0)]);
        let tree = tarjan(&g, 1).unwrap();
        assert_eq!(tree, vec![5, 2, 3]);
        let tree = tarjan(&g, 0).unwrap();
        assert_eq!(weight(&g, &tree), 5);
    }

    #[test]
    fn test_long_path() {
        // a long chain with a cycle back to the start
        let n = 50_000;
        let mut g = WeightedDigraph::new(n + 1);
        for i in 1..n {
            g.add_edge(i, i + 1, 1);
        }
        g.add_edge(n, 1, 1);
        g.add_edge(0, n / 2, 100);
        let tree = tarjan(&g, 0).unwrap();
        assert_eq!(tree.len(), n);
        assert_eq!(weight(&g, &tree), 100 + (n as i64 - 1));
    }
}
