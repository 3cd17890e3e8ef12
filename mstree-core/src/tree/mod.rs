//! Binary trees shaped from spanning-tree adjacency.
//!
//! Nodes live in an arena owned by [`BinaryTree`] and refer to their
//! children by index. The root is always the first node of the arena. Each
//! child slot is written at most once.

mod shape;
mod traversal;

pub use self::{
    shape::shape_tree,
    traversal::{SerializedNode, VisualNode},
};

/// Index of a node within its [`BinaryTree`].
pub type TreeNodeId = usize;

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    /// The `left` slot.
    Left,
    /// The `right` slot.
    Right,
}

/// A node of a [`BinaryTree`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeNode {
    name: String,
    left: Option<TreeNodeId>,
    right: Option<TreeNodeId>,
}

impl TreeNode {
    fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            left: None,
            right: None,
        }
    }

    /// Returns the node's name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the left child, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn left(&self) -> Option<TreeNodeId> { self.left }

    /// Returns the right child, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn right(&self) -> Option<TreeNodeId> { self.right }

    /// Returns the child in `side`, if any.
    #[must_use]
    pub fn child(&self, side: Side) -> Option<TreeNodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// A rooted binary tree of named nodes.
///
/// Equality is structural: two trees are equal when they have the same
/// shape and names, regardless of arena layout.
#[derive(Clone, Debug)]
pub struct BinaryTree {
    nodes: Vec<TreeNode>,
}

impl BinaryTree {
    pub(crate) fn with_root(name: impl Into<String>) -> Self {
        Self {
            nodes: vec![TreeNode::leaf(name)],
        }
    }

    /// Places a new node named `name` into the empty `side` slot of
    /// `parent` and returns its id.
    pub(crate) fn attach(
        &mut self,
        parent: TreeNodeId,
        side: Side,
        name: impl Into<String>,
    ) -> TreeNodeId {
        let id = self.nodes.len();
        self.nodes.push(TreeNode::leaf(name));
        let slot = match side {
            Side::Left => &mut self.nodes[parent].left,
            Side::Right => &mut self.nodes[parent].right,
        };
        debug_assert!(slot.is_none(), "child slot written twice");
        *slot = Some(id);
        id
    }

    /// Returns the root id.
    #[must_use]
    pub const fn root(&self) -> TreeNodeId {
        0
    }

    /// Returns the node with id `id`, if it exists.
    #[must_use]
    pub fn node(&self, id: TreeNodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// Returns the root node.
    #[must_use]
    pub fn root_node(&self) -> &TreeNode {
        &self.nodes[self.root()]
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the id of the node named `name`, if present.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TreeNodeId> {
        self.nodes.iter().position(|node| node.name == name)
    }

    /// Returns the name of the `side` child of the node named `name`.
    ///
    /// # Examples
    /// ```
    /// use mstree_core::{AdjacencyMap, Side, shape_tree};
    ///
    /// let adjacency: AdjacencyMap = [("2", "1"), ("2", "3")].into_iter().collect();
    /// let tree = shape_tree(&adjacency, "2")?;
    /// assert_eq!(tree.child_name("2", Side::Left), Some("1"));
    /// assert_eq!(tree.child_name("2", Side::Right), Some("3"));
    /// assert_eq!(tree.child_name("1", Side::Left), None);
    /// # Ok::<(), mstree_core::MstreeError>(())
    /// ```
    #[must_use]
    pub fn child_name(&self, name: &str, side: Side) -> Option<&str> {
        let id = self.find(name)?;
        let child = self.nodes[id].child(side)?;
        Some(self.nodes[child].name())
    }

    fn at(&self, id: TreeNodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Follows `right` links from `id` and returns the last node, the one
    /// without a right child.
    pub(crate) fn right_spine_end(&self, id: TreeNodeId) -> TreeNodeId {
        let mut current = id;
        while let Some(next) = self.at(current).right {
            current = next;
        }
        current
    }
}

impl PartialEq for BinaryTree {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(Some(self.root()), Some(other.root()))];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(mine), Some(theirs)) => {
                    let (mine, theirs) = (self.at(mine), other.at(theirs));
                    if mine.name != theirs.name {
                        return false;
                    }
                    pending.push((mine.left, theirs.left));
                    pending.push((mine.right, theirs.right));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for BinaryTree {}
