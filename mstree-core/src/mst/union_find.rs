//! Union-find (disjoint set union) used by Kruskal's algorithm.
//!
//! Merges always hang the second root under the first, with no rank or size
//! heuristic, so the parent layout is reproducible for a given union order.
//! `find` compresses every visited node straight onto the root.

#[derive(Clone, Debug)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    components: usize,
}

impl UnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            components: n,
        }
    }

    pub(crate) fn components(&self) -> usize {
        self.components
    }

    pub(crate) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Returns `false` when `left` and `right` were already in one set.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }
        self.parent[right_root] = left_root;
        self.components -= 1;
        true
    }

    #[cfg(test)]
    fn parent_of(&self, node: usize) -> usize {
        self.parent[node]
    }
}
