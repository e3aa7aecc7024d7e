// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

#![forbid(unsafe_code)]

//! Minimum spanning arborescences of weighted digraphs.
//!
//! The crate provides a simple weighted digraph, the data structures
//! needed by the contraction algorithms (a union-find with explicitly
//! chosen representatives and skew heaps with lazy key offsets) and two
//! algorithms computing minimum spanning arborescences.
//!
//! # Example
//!
//! ```
//! use rs_arborescence::{min_arborescence, WeightedDigraph};
//!
//! let mut g = WeightedDigraph::new(4);
//! g.add_edge(0, 1, 1);
//! g.add_edge(0, 2, 2);
//! g.add_edge(1, 2, 1);
//! g.add_edge(2, 1, 1);
//!
//! let tree = min_arborescence(&g, 0).unwrap();
//! assert_eq!(tree.total_weight(), 2);
//! // node 3 cannot be reached
//! assert_eq!(tree.in_degree(3), 0);
//! ```

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod digraph;
pub use self::digraph::{Edge, WeightedDigraph};

pub mod collections;

// # Algorithms

pub mod algorithms;
pub mod arborescence;
pub use self::arborescence::{min_arborescence, ArborescenceError, MinArborescence, Strategy};
