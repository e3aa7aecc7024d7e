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

//! Minimum spanning arborescences.
//!
//! Given a digraph with edge weights and a root node, a *minimum
//! spanning arborescence* is a set of edges of minimal total weight such
//! that each node except the root has exactly one incoming edge and the
//! root is connected to every node by a directed path.
//!
//! Two algorithms are available:
//!
//! - [`edmonds`] is the classic contraction algorithm of Chu-Liu and
//!   Edmonds running in `O(n m)`.
//! - [`tarjan`] grows paths of cheapest entering edges and maintains
//!   the candidate edges of each (contracted) node in mergeable heaps,
//!   running in `O(m log n)`.
//!
//! Both return arborescences of the same weight. If some node is not
//! reachable from the root, the result is a minimal *partial*
//! arborescence: a branching in which, besides the root, as few nodes as
//! possible have no incoming edge and which has minimal weight among all
//! such branchings. Loops are ignored and of parallel edges only the
//! cheapest one is relevant.
//!
//! Internally each node except the root gets an additional edge from the
//! root whose cost is larger than that of any combination of real edges.
//! These edges are removed from the result. Because reduced costs may
//! become negative, the weight type must be signed.
//!
//! # Example
//!
//! ```
//! use rs_arborescence::WeightedDigraph;
//! use rs_arborescence::arborescence::{min_arborescence, MinArborescence, Strategy};
//!
//! let g = WeightedDigraph::from_edges(3, vec![(0, 1, 5.0), (0, 2, 10.0), (1, 2, 1.0), (2, 1, 1.0)]);
//!
//! let tree = min_arborescence(&g, 0).unwrap();
//! assert_eq!(tree.num_nodes(), 3);
//! assert_eq!(tree.num_edges(), 2);
//! assert_eq!(tree.total_weight(), 6.0);
//!
//! let edges = MinArborescence::new(&g).with_strategy(Strategy::Contraction).solve(0).unwrap();
//! assert_eq!(edges, vec![0, 2]);
//! ```

mod edmonds;
mod tarjan;

pub use self::edmonds::edmonds;
pub use self::tarjan::tarjan;

use crate::digraph::WeightedDigraph;
use crate::num::traits::{NumAssign, Signed, Zero};

use std::ops::{Add, AddAssign, Neg, Sub};
use tracing::instrument;

/// Errors returned by the arborescence algorithms.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArborescenceError {
    /// The requested root is not a node of the graph.
    #[error("root {root} is not a node of a graph with {num_nodes} nodes")]
    InvalidRoot {
        /// The requested root.
        root: usize,
        /// The number of nodes of the graph.
        num_nodes: usize,
    },
}

impl ArborescenceError {
    /// Return a machine-readable error code for the variant.
    pub fn code(&self) -> ArborescenceErrorCode {
        match self {
            ArborescenceError::InvalidRoot { .. } => ArborescenceErrorCode::InvalidRoot,
        }
    }
}

/// Machine-readable error codes for [`ArborescenceError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArborescenceErrorCode {
    /// The requested root is not a node of the graph.
    InvalidRoot,
}

impl ArborescenceErrorCode {
    /// Return the symbolic name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ArborescenceErrorCode::InvalidRoot => "INVALID_ROOT",
        }
    }
}

/// Return an error if `root` is not a node of `g`.
pub fn check_root<W>(g: &WeightedDigraph<W>, root: usize) -> Result<(), ArborescenceError>
where
    W: NumAssign + PartialOrd + Copy,
{
    if root < g.num_nodes() {
        Ok(())
    } else {
        Err(ArborescenceError::InvalidRoot {
            root,
            num_nodes: g.num_nodes(),
        })
    }
}

/// The algorithm used to compute the arborescence.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Strategy {
    /// Repeated cycle contraction, see [`edmonds`].
    Contraction,
    /// Path growing with mergeable heaps, see [`tarjan`].
    #[default]
    Heap,
}

/// Minimum spanning arborescence solver for a fixed graph.
///
/// The solver holds no state between two calls of [`MinArborescence::solve`],
/// so it can be used for any number of roots.
pub struct MinArborescence<'a, W> {
    graph: &'a WeightedDigraph<W>,
    /// The algorithm to be used. Defaults to [`Strategy::Heap`].
    pub strategy: Strategy,
}

impl<'a, W> MinArborescence<'a, W>
where
    W: NumAssign + Signed + PartialOrd + Copy,
{
    /// Create a solver for `g` using the default strategy.
    pub fn new(g: &'a WeightedDigraph<W>) -> Self {
        MinArborescence {
            graph: g,
            strategy: Strategy::default(),
        }
    }

    /// Use the given strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The graph of this solver.
    pub fn graph(&self) -> &'a WeightedDigraph<W> {
        self.graph
    }

    /// Compute a minimum arborescence rooted at `root`.
    ///
    /// Returns the ids of the arborescence edges in the order of their
    /// sink nodes.
    pub fn solve(&self, root: usize) -> Result<Vec<usize>, ArborescenceError> {
        match self.strategy {
            Strategy::Contraction => edmonds(self.graph, root),
            Strategy::Heap => tarjan(self.graph, root),
        }
    }

    /// Compute a minimum arborescence rooted at `root` as a graph.
    ///
    /// The returned graph has the same nodes as the input graph and
    /// contains exactly the edges of the arborescence with their
    /// original weights.
    #[instrument(level = "debug", skip(self), fields(strategy = ?self.strategy))]
    pub fn arborescence(&self, root: usize) -> Result<WeightedDigraph<W>, ArborescenceError> {
        let edges = self.solve(root)?;
        let mut tree = WeightedDigraph::with_capacities(self.graph.num_nodes(), edges.len());
        for e in edges {
            let e = self.graph.edge(e);
            tree.add_edge(e.src(), e.snk(), e.weight());
        }
        Ok(tree)
    }
}

/// Compute a minimum arborescence of `g` rooted at `root`.
///
/// This is a shortcut for `MinArborescence::new(g).arborescence(root)`.
pub fn min_arborescence<W>(g: &WeightedDigraph<W>, root: usize) -> Result<WeightedDigraph<W>, ArborescenceError>
where
    W: NumAssign + Signed + PartialOrd + Copy,
{
    MinArborescence::new(g).arborescence(root)
}

/// Cost of an edge of the augmented graph.
///
/// Edges of the input graph have penalty 0, the additional edges from
/// the root have penalty 1. Costs are compared lexicographically, so a
/// minimal arborescence of the augmented graph uses as few additional
/// edges as possible.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub(crate) struct Cost<W> {
    penalty: isize,
    weight: W,
}

impl<W> Cost<W>
where
    W: Zero,
{
    /// The cost of an edge of the input graph.
    pub(crate) fn real(weight: W) -> Self {
        Cost { penalty: 0, weight }
    }

    /// The cost of an additional edge.
    pub(crate) fn artificial() -> Self {
        Cost {
            penalty: 1,
            weight: W::zero(),
        }
    }
}

impl<W: Add<Output = W>> Add for Cost<W> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Cost {
            penalty: self.penalty + other.penalty,
            weight: self.weight + other.weight,
        }
    }
}

impl<W: Sub<Output = W>> Sub for Cost<W> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Cost {
            penalty: self.penalty - other.penalty,
            weight: self.weight - other.weight,
        }
    }
}

impl<W: AddAssign> AddAssign for Cost<W> {
    fn add_assign(&mut self, other: Self) {
        self.penalty += other.penalty;
        self.weight += other.weight;
    }
}

impl<W: Neg<Output = W>> Neg for Cost<W> {
    type Output = Self;

    fn neg(self) -> Self {
        Cost {
            penalty: -self.penalty,
            weight: -self.weight,
        }
    }
}

impl<W: Zero> Zero for Cost<W> {
    fn zero() -> Self {
        Cost::real(W::zero())
    }

    fn is_zero(&self) -> bool {
        self.penalty == 0 && self.weight.is_zero()
    }
}

/// An edge of a (possibly contracted) augmented graph.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ArcData<W> {
    pub(crate) src: usize,
    pub(crate) snk: usize,
    pub(crate) weight: W,
}

/// Return the edges of `g` followed by an additional edge from `root`
/// to every other node.
///
/// The arc at position `i < g.num_edges()` is the edge of `g` with id `i`.
pub(crate) fn augmented_arcs<W>(g: &WeightedDigraph<W>, root: usize) -> Vec<ArcData<Cost<W>>>
where
    W: NumAssign + PartialOrd + Copy,
{
    let mut arcs = Vec::with_capacity(g.num_edges() + g.num_nodes());
    arcs.extend(g.edges().map(|e| ArcData {
        src: e.src(),
        snk: e.snk(),
        weight: Cost::real(e.weight()),
    }));
    arcs.extend((0..g.num_nodes()).filter(|&v| v != root).map(|v| ArcData {
        src: root,
        snk: v,
        weight: Cost::artificial(),
    }));
    arcs
}

#[cfg(test)]
mod tests {
    use super::{augmented_arcs, check_root, min_arborescence, ArborescenceError, Cost, MinArborescence, Strategy};
    use crate::WeightedDigraph;

    #[test]
    fn test_invalid_root() {
        let g = WeightedDigraph::from_edges(2, vec![(0, 1, 1)]);
        let err = min_arborescence(&g, 2).unwrap_err();
        assert_eq!(err, ArborescenceError::InvalidRoot { root: 2, num_nodes: 2 });
        assert_eq!(err.code().as_str(), "INVALID_ROOT");
        assert_eq!(err.to_string(), "root 2 is not a node of a graph with 2 nodes");
        assert!(check_root(&g, 1).is_ok());

        let empty = WeightedDigraph::<i32>::new(0);
        for &strategy in &[Strategy::Contraction, Strategy::Heap] {
            assert!(MinArborescence::new(&empty).with_strategy(strategy).solve(0).is_err());
        }
    }

    #[test]
    fn test_default_strategy() {
        let g = WeightedDigraph::<i32>::new(1);
        let solver = MinArborescence::new(&g);
        assert_eq!(solver.strategy, Strategy::Heap);
        assert_eq!(solver.graph().num_nodes(), 1);
        assert_eq!(solver.solve(0), Ok(vec![]));
    }

    #[test]
    fn test_result_graph() {
        let g = WeightedDigraph::from_edges(4, vec![(0, 1, 1), (0, 2, 2), (1, 2, 1), (2, 1, 1), (3, 3, 0)]);
        for &strategy in &[Strategy::Contraction, Strategy::Heap] {
            let tree = MinArborescence::new(&g).with_strategy(strategy).arborescence(0).unwrap();
            assert_eq!(tree.num_nodes(), 4);
            let mut edges: Vec<_> = tree.edges().map(|e| (e.src(), e.snk(), e.weight())).collect();
            edges.sort();
            assert_eq!(edges, vec![(0, 1, 1), (1, 2, 1)]);
            assert_eq!(tree.in_degree(3), 0);
        }
    }

    #[test]
    fn test_cost_order() {
        let real = Cost::real(1000);
        let artificial = Cost::artificial();
        assert!(real < artificial);
        assert!(Cost::real(-3) < Cost::real(2));
        // reduced costs keep the penalty first
        assert!(artificial - Cost::real(7) < artificial - Cost::real(5));
        assert!(real - Cost::real(1000) < artificial - Cost::real(5000));
        let mut c = artificial;
        c += -Cost::real(4);
        assert_eq!(c, artificial - Cost::real(4));
    }

    #[test]
    fn test_augmented_arcs() {
        let g = WeightedDigraph::from_edges(3, vec![(0, 1, 4), (2, 2, 1)]);
        let arcs = augmented_arcs(&g, 1);
        let ends: Vec<_> = arcs.iter().map(|a| (a.src, a.snk)).collect();
        assert_eq!(ends, vec![(0, 1), (2, 2), (1, 0), (1, 2)]);
        assert_eq!(arcs[0].weight, Cost::real(4));
        assert_eq!(arcs[3].weight, Cost::artificial());
    }
}
