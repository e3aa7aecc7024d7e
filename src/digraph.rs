/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! A weighted directed graph with dense node and edge ids.
//!
//! Nodes are the numbers `0..n`. Edges are numbered `0..m` in the
//! order in which they have been added and keep their number for the
//! lifetime of the graph. The graph allows loops and parallel edges.

use crate::num::traits::NumAssign;

use std::fmt;
use std::slice::Iter as SliceIter;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A weighted edge of a [`WeightedDigraph`].
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Edge<W> {
    src: usize,
    snk: usize,
    weight: W,
    id: usize,
}

impl<W> Edge<W>
where
    W: Copy,
{
    /// The source node.
    pub fn src(&self) -> usize {
        self.src
    }

    /// The sink node.
    pub fn snk(&self) -> usize {
        self.snk
    }

    /// Return source and sink node.
    pub fn enodes(&self) -> (usize, usize) {
        (self.src, self.snk)
    }

    /// The weight of the edge.
    pub fn weight(&self) -> W {
        self.weight
    }

    /// The (insertion) index of the edge.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Return `true` if source and sink coincide.
    pub fn is_loop(&self) -> bool {
        self.src == self.snk
    }
}

impl<W> fmt::Display for Edge<W>
where
    W: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}->{}({})", self.src, self.snk, self.weight)
    }
}

/// A weighted digraph stored as edge list plus incidence lists.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct WeightedDigraph<W> {
    edges: Vec<Edge<W>>,
    // The ids of the outgoing and incoming edges of each node, both in
    // insertion order.
    outedges: Vec<Vec<usize>>,
    inedges: Vec<Vec<usize>>,
}

/// Iterator over a list of edge ids of a node.
pub struct IncidentEdges<'a, W> {
    graph: &'a WeightedDigraph<W>,
    it: SliceIter<'a, usize>,
}

impl<'a, W> Iterator for IncidentEdges<'a, W> {
    type Item = &'a Edge<W>;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|&e| &self.graph.edges[e])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, W> ExactSizeIterator for IncidentEdges<'a, W> {}

impl<W> WeightedDigraph<W>
where
    W: NumAssign + PartialOrd + Copy,
{
    /// Create a graph with `n` nodes and no edges.
    pub fn new(n: usize) -> Self {
        Self::with_capacities(n, 0)
    }

    /// Create a graph with `n` nodes and memory reserved for `nedges` edges.
    pub fn with_capacities(n: usize, nedges: usize) -> Self {
        WeightedDigraph {
            edges: Vec::with_capacity(nedges),
            outedges: vec![vec![]; n],
            inedges: vec![vec![]; n],
        }
    }

    /// Create a graph with `n` nodes from a list of `(src, snk, weight)` triples.
    ///
    /// Triples with an invalid node are skipped, see [`WeightedDigraph::add_edge`].
    ///
    /// # Example
    ///
    /// ```
    /// use rs_arborescence::WeightedDigraph;
    ///
    /// let g = WeightedDigraph::from_edges(3, vec![(0, 1, 2), (1, 2, 3), (2, 7, 1)]);
    /// assert_eq!(g.num_nodes(), 3);
    /// assert_eq!(g.num_edges(), 2);
    /// assert_eq!(g.total_weight(), 5);
    /// ```
    pub fn from_edges<I>(n: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let edges = edges.into_iter();
        let mut g = Self::with_capacities(n, edges.size_hint().0);
        for (u, v, w) in edges {
            g.add_edge(u, v, w);
        }
        g
    }

    /// Add a new edge `u -> v` with weight `w` and return its id.
    ///
    /// If `u` or `v` is not a node of the graph the edge is ignored
    /// and `None` is returned.
    pub fn add_edge(&mut self, u: usize, v: usize, w: W) -> Option<usize> {
        if u >= self.num_nodes() || v >= self.num_nodes() {
            return None;
        }
        let id = self.edges.len();
        self.edges.push(Edge {
            src: u,
            snk: v,
            weight: w,
            id,
        });
        self.outedges[u].push(id);
        self.inedges[v].push(id);
        Some(id)
    }

    /// The number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.inedges.len()
    }

    /// The number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Return the edge with the given id.
    pub fn edge(&self, id: usize) -> &Edge<W> {
        &self.edges[id]
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> SliceIter<Edge<W>> {
        self.edges.iter()
    }

    /// The edges leaving node `u` in insertion order.
    pub fn outedges(&self, u: usize) -> IncidentEdges<W> {
        IncidentEdges {
            graph: self,
            it: self.outedges[u].iter(),
        }
    }

    /// The edges entering node `v` in insertion order.
    pub fn inedges(&self, v: usize) -> IncidentEdges<W> {
        IncidentEdges {
            graph: self,
            it: self.inedges[v].iter(),
        }
    }

    /// The number of edges entering node `v`.
    pub fn in_degree(&self, v: usize) -> usize {
        self.inedges[v].len()
    }

    /// The sum of all edge weights.
    pub fn total_weight(&self) -> W {
        self.edges.iter().fold(W::zero(), |acc, e| acc + e.weight)
    }
}

impl<W> fmt::Display for WeightedDigraph<W>
where
    W: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for (u, outs) in self.outedges.iter().enumerate() {
            write!(f, "{} -> [", u)?;
            for &e in outs {
                write!(f, " ({}, {})", self.edges[e].snk, self.edges[e].weight)?;
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}
