// Copyright (c) 2016, 2017, 2020 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Skew heaps with lazy key offsets.
//!
//! All nodes of all heaps live in a common [`SkewHeapArena`]. A single
//! heap is represented by a [`SkewHeap`], which is nothing but the
//! (owned) handle of its root node. Heaps can be melded in amortized
//! logarithmic time and a constant can be added to all keys of a heap
//! in constant time.
//!
//! # Example
//!
//! ```
//! use rs_arborescence::collections::{SkewHeap, SkewHeapArena};
//!
//! let mut arena = SkewHeapArena::new();
//! let mut a = SkewHeap::new();
//! let mut b = SkewHeap::new();
//! arena.push(&mut a, 5, 'a');
//! arena.push(&mut a, 3, 'b');
//! arena.push(&mut b, 4, 'c');
//!
//! // subtract 2 from all keys of `b`
//! arena.add_lazy(&mut b, -2);
//!
//! let mut h = arena.merge(a, b);
//! assert_eq!(arena.pop_min(&mut h), Some((2, 'c')));
//! assert_eq!(arena.pop_min(&mut h), Some((3, 'b')));
//! assert_eq!(arena.peek_min(&h), Some((5, &'a')));
//! ```

use crate::num::traits::Zero;

use std::mem;
use std::ops::AddAssign;

/// A node of a skew heap.
struct SkewNode<K, V> {
    /// The key of the node, *without* the pending offset.
    key: K,
    /// Offset pending for this node and all of its descendants.
    lazy: K,
    /// The value stored in this node.
    value: V,
    /// The left child. If the node is free, the next free node.
    left: Option<usize>,
    /// The right child.
    right: Option<usize>,
}

/// A single skew heap.
///
/// The heap owns its nodes in some [`SkewHeapArena`]. It can be neither
/// cloned nor copied, melding two heaps consumes both of them. Using a
/// heap with an arena other than the one its nodes have been created in
/// is a logic error.
#[derive(Debug, Default)]
pub struct SkewHeap {
    root: Option<usize>,
}

impl SkewHeap {
    /// Return a new, empty heap.
    pub fn new() -> Self {
        SkewHeap { root: None }
    }

    /// Return `true` iff the heap contains no element.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Move the heap out, leaving an empty heap behind.
    pub fn take(&mut self) -> SkewHeap {
        mem::take(self)
    }
}

/// Storage for the nodes of a family of skew heaps.
///
/// The minimum of a heap is the element with the smallest key. Elements
/// with equal keys are ordered by their values.
pub struct SkewHeapArena<K, V> {
    nodes: Vec<SkewNode<K, V>>,
    /// First free node.
    free: Option<usize>,
    /// Number of nodes in use.
    len: usize,
}

impl<K, V> Default for SkewHeapArena<K, V> {
    fn default() -> Self {
        SkewHeapArena {
            nodes: vec![],
            free: None,
            len: 0,
        }
    }
}

impl<K, V> SkewHeapArena<K, V>
where
    K: Zero + AddAssign + PartialOrd + Copy,
    V: Ord + Clone,
{
    /// Create a new, empty arena.
    pub fn new() -> Self {
        Default::default()
    }

    /// Create an arena with memory reserved for `n` nodes.
    pub fn with_capacity(n: usize) -> Self {
        SkewHeapArena {
            nodes: Vec::with_capacity(n),
            free: None,
            len: 0,
        }
    }

    /// The number of elements in all heaps of this arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` iff no heap of this arena contains an element.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove all elements.
    ///
    /// All heaps created with this arena become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free = None;
        self.len = 0;
    }

    /// Push the element `value` with given `key` onto `heap`.
    pub fn push(&mut self, heap: &mut SkewHeap, key: K, value: V) {
        let node = SkewNode {
            key,
            lazy: K::zero(),
            value,
            left: None,
            right: None,
        };
        let idx = if let Some(idx) = self.free {
            self.free = self.nodes[idx].left;
            self.nodes[idx] = node;
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        };
        self.len += 1;
        heap.root = self.meld(heap.root, Some(idx));
    }

    /// Return the minimal key and its value of `heap`, or `None` if the heap is empty.
    pub fn peek_min(&mut self, heap: &SkewHeap) -> Option<(K, &V)> {
        let root = heap.root?;
        self.propagate(root);
        let node = &self.nodes[root];
        Some((node.key, &node.value))
    }

    /// Remove and return the element with the smallest key from
    /// `heap`, or `None` if the heap is empty.
    pub fn pop_min(&mut self, heap: &mut SkewHeap) -> Option<(K, V)> {
        let root = heap.root?;
        self.propagate(root);
        let left = self.nodes[root].left.take();
        let right = self.nodes[root].right.take();
        heap.root = self.meld(left, right);

        // put the node into the free list
        self.nodes[root].left = self.free;
        self.free = Some(root);
        self.len -= 1;

        let node = &self.nodes[root];
        Some((node.key, node.value.clone()))
    }

    /// Meld two heaps.
    ///
    /// Both heaps are consumed, the returned heap contains the elements of both.
    pub fn merge(&mut self, a: SkewHeap, b: SkewHeap) -> SkewHeap {
        SkewHeap {
            root: self.meld(a.root, b.root),
        }
    }

    /// Add `delta` to the key of each element of `heap`.
    ///
    /// The offset is only stored at the root and pushed down lazily.
    pub fn add_lazy(&mut self, heap: &mut SkewHeap, delta: K) {
        if let Some(root) = heap.root {
            self.nodes[root].lazy += delta;
        }
    }

    /// Apply the pending offset of node `u` to its key and pass it to its children.
    fn propagate(&mut self, u: usize) {
        let lazy = self.nodes[u].lazy;
        if lazy.is_zero() {
            return;
        }
        let node = &mut self.nodes[u];
        node.key += lazy;
        node.lazy = K::zero();
        let (left, right) = (node.left, node.right);
        for child in left.into_iter().chain(right) {
            self.nodes[child].lazy += lazy;
        }
    }

    /// Return `true` if node `u` is strictly smaller than node `v`.
    ///
    /// Both nodes must not have pending offsets.
    fn less(&self, u: usize, v: usize) -> bool {
        let (u, v) = (&self.nodes[u], &self.nodes[v]);
        u.key < v.key || (!(v.key < u.key) && u.value < v.value)
    }

    /// Meld the heaps rooted at `a` and `b` and return the new root.
    ///
    /// This is the usual recursive skew heap merge
    ///
    /// ```text
    /// merge(a, b) = a                                  if b is empty
    ///             = b                                  if a is empty
    ///             = a' with swapped children and
    ///               a'.left = merge(b', a'.left)       otherwise
    /// ```
    ///
    /// where `a'` is the root with the smaller key, written as a loop
    /// along the merge path.
    fn meld(&mut self, a: Option<usize>, b: Option<usize>) -> Option<usize> {
        let mut root = None;
        // the node whose left child receives the next part of the merge path
        let mut last: Option<usize> = None;
        let (mut a, mut b) = (a, b);
        loop {
            for u in a.into_iter().chain(b) {
                self.propagate(u);
            }
            let (u, v) = match (a, b) {
                (Some(u), Some(v)) => {
                    if self.less(v, u) {
                        (v, u)
                    } else {
                        (u, v)
                    }
                }
                (rest, None) | (None, rest) => {
                    match last {
                        Some(p) => self.nodes[p].left = rest,
                        None => root = rest,
                    }
                    return root;
                }
            };

            let node = &mut self.nodes[u];
            mem::swap(&mut node.left, &mut node.right);
            let next = node.left;
            match last {
                Some(p) => self.nodes[p].left = Some(u),
                None => root = Some(u),
            }
            last = Some(u);
            a = Some(v);
            b = next;
        }
    }
}
