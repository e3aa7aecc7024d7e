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

//! Union-Find with explicit choice of the representative.

/// A disjoint-set union data structure over the elements `0..n`.
///
/// In contrast to the usual union-by-rank implementation, the caller
/// decides which root survives a union. The contraction algorithms use
/// this to make sure that the representative of a contracted cycle is
/// always the freshly allocated id of the cycle node, because other
/// arrays are indexed by that id.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    /// Create `n` singleton sets.
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Return `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Return the representative of the set containing `i`.
    ///
    /// Uses path halving, so no recursion is needed.
    pub fn find(&mut self, i: usize) -> usize {
        let mut i = i;
        while self.parent[i] != i {
            let grandparent = self.parent[self.parent[i]];
            self.parent[i] = grandparent;
            i = grandparent;
        }
        i
    }

    /// Unite the sets containing `i` and `j`.
    ///
    /// `representative` becomes the representative of the united set
    /// and is returned.
    ///
    /// # Panics
    ///
    /// Panics if `representative` is not the representative of one of
    /// the two sets.
    pub fn unite(&mut self, i: usize, j: usize, representative: usize) -> usize {
        let iroot = self.find(i);
        let jroot = self.find(j);
        assert!(
            representative == iroot || representative == jroot,
            "{} is neither the representative of {} nor of {}",
            representative,
            i,
            j
        );
        self.parent[iroot] = representative;
        self.parent[jroot] = representative;
        representative
    }
}

#[cfg(test)]
mod tests {
    use super::UnionFind;

    #[test]
    fn test_singletons() {
        let mut uf = UnionFind::new(5);
        assert_eq!(uf.len(), 5);
        assert!(!uf.is_empty());
        assert!((0..5).all(|i| uf.find(i) == i));
    }

    #[test]
    fn test_chosen_representative() {
        let mut uf = UnionFind::new(6);
        // the larger id wins although both sets are singletons
        assert_eq!(uf.unite(0, 4, 4), 4);
        assert_eq!(uf.find(0), 4);
        // the smaller id wins, too, if requested
        assert_eq!(uf.unite(1, 2, 1), 1);
        assert_eq!(uf.find(2), 1);
        // a larger set may be absorbed by a singleton
        assert_eq!(uf.unite(2, 5, 5), 5);
        assert_eq!(uf.unite(0, 5, 5), 5);
        assert!([0, 1, 2, 4, 5].iter().all(|&i| uf.find(i) == 5));
        assert_eq!(uf.find(3), 3);
    }

    #[test]
    fn test_unite_same_set() {
        let mut uf = UnionFind::new(3);
        uf.unite(0, 1, 1);
        assert_eq!(uf.unite(0, 1, 1), 1);
        assert_eq!(uf.find(0), 1);
    }

    #[test]
    #[should_panic]
    fn test_invalid_representative() {
        let mut uf = UnionFind::new(3);
        uf.unite(0, 1, 2);
    }

    #[test]
    fn test_long_chain() {
        let n = 100_000;
        let mut uf = UnionFind::new(n);
        for i in 1..n {
            uf.unite(i - 1, i, i);
        }
        assert_eq!(uf.find(0), n - 1);
        assert_eq!(uf.find(n / 2), n - 1);
    }
}
