//! Traversal and serialization of [`BinaryTree`].

use serde::{Deserialize, Serialize};

use super::{BinaryTree, Side, TreeNodeId};

/// Nested `{name, left, right}` form of a tree; absent children are `null`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SerializedNode {
    /// Node name.
    pub name: String,
    /// Left subtree.
    pub left: Option<Box<SerializedNode>>,
    /// Right subtree.
    pub right: Option<Box<SerializedNode>>,
}

impl SerializedNode {
    /// Creates a leaf.
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            left: None,
            right: None,
        }
    }
}

/// `{name, children}` form consumed by tree renderers; `children` is left
/// out for leaves.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VisualNode {
    /// Node name.
    pub name: String,
    /// Left child first, then right.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VisualNode>,
}

impl BinaryTree {
    /// Names in left, self, right order.
    ///
    /// # Examples
    /// ```
    /// use mstree_core::{AdjacencyMap, shape_tree};
    ///
    /// let adjacency: AdjacencyMap = [("1", "2"), ("2", "3"), ("3", "4")].into_iter().collect();
    /// let tree = shape_tree(&adjacency, "1")?;
    /// assert_eq!(tree.in_order(), ["1", "2", "3", "4"]);
    /// # Ok::<(), mstree_core::MstreeError>(())
    /// ```
    #[must_use]
    pub fn in_order(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.len());
        let mut pending: Vec<TreeNodeId> = Vec::new();
        let mut cursor = Some(self.root());
        while cursor.is_some() || !pending.is_empty() {
            while let Some(id) = cursor {
                pending.push(id);
                cursor = self.at(id).left;
            }
            if let Some(id) = pending.pop() {
                let node = self.at(id);
                names.push(node.name.clone());
                cursor = node.right;
            }
        }
        names
    }

    /// Names in self, left, right order.
    #[must_use]
    pub fn pre_order(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.len());
        let mut pending = vec![self.root()];
        while let Some(id) = pending.pop() {
            let node = self.at(id);
            names.push(node.name.clone());
            pending.extend(node.right);
            pending.extend(node.left);
        }
        names
    }

    /// Converts the tree into its nested `{name, left, right}` form.
    #[must_use]
    pub fn serialize(&self) -> SerializedNode {
        self.serialize_from(self.root())
    }

    fn serialize_from(&self, id: TreeNodeId) -> SerializedNode {
        let node = self.at(id);
        SerializedNode {
            name: node.name.clone(),
            left: node.left.map(|child| Box::new(self.serialize_from(child))),
            right: node.right.map(|child| Box::new(self.serialize_from(child))),
        }
    }

    /// Rebuilds a tree from its nested form.
    ///
    /// # Examples
    /// ```
    /// use mstree_core::{AdjacencyMap, BinaryTree, shape_tree};
    ///
    /// let adjacency: AdjacencyMap = [("2", "1"), ("2", "3")].into_iter().collect();
    /// let tree = shape_tree(&adjacency, "2")?;
    /// assert_eq!(BinaryTree::from_serialized(&tree.serialize()), tree);
    /// # Ok::<(), mstree_core::MstreeError>(())
    /// ```
    #[must_use]
    pub fn from_serialized(root: &SerializedNode) -> Self {
        let mut tree = Self::with_root(root.name.as_str());
        let mut pending = vec![(root, tree.root())];
        while let Some((serialized, id)) = pending.pop() {
            if let Some(left) = &serialized.left {
                let child = tree.attach(id, Side::Left, left.name.as_str());
                pending.push((&**left, child));
            }
            if let Some(right) = &serialized.right {
                let child = tree.attach(id, Side::Right, right.name.as_str());
                pending.push((&**right, child));
            }
        }
        tree
    }

    /// Converts the tree into the `{name, children}` renderer form.
    #[must_use]
    pub fn visual_tree(&self) -> VisualNode {
        self.visual_from(self.root())
    }

    fn visual_from(&self, id: TreeNodeId) -> VisualNode {
        let node = self.at(id);
        VisualNode {
            name: node.name.clone(),
            children: [node.left, node.right]
                .into_iter()
                .flatten()
                .map(|child| self.visual_from(child))
                .collect(),
        }
    }
}
