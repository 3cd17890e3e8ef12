//! MST to binary tree conversion.
//!
//! Depth-first from the root. At each node the unvisited neighbours, ordered
//! with [`compare_names`], become children:
//!
//! - one candidate goes `left` when it orders below the node, else `right`;
//! - with two or more, the first goes `left` and the second `right`;
//! - any further candidate is hung off the end of the node's right spine.
//!
//! Each child's subtree is completed before the next sibling is placed, so
//! later overflow candidates land below earlier ones. High-degree nodes
//! therefore degrade into right-leaning chains; the layout is kept as is
//! because callers depend on it.
//!
//! The walk uses an explicit frame stack rather than call recursion.

use std::{cmp::Ordering, collections::HashSet};

use tracing::{Span, debug, field, instrument};

use crate::{
    Result,
    error::MstreeError,
    mst::AdjacencyMap,
    ordering::{compare_names, sorted_names},
};

use super::{BinaryTree, Side, TreeNodeId};

struct Frame<'a> {
    node: TreeNodeId,
    candidates: Vec<&'a str>,
    cursor: usize,
    placed: usize,
}

/// Shapes the spanning tree described by `adjacency` into a binary tree
/// rooted at `root`.
///
/// Nodes unreachable from `root` are left out.
///
/// # Errors
/// Returns [`MstreeError::UnknownRoot`] when `root` is not in `adjacency`.
///
/// # Examples
/// ```
/// use mstree_core::{AdjacencyMap, Side, shape_tree};
///
/// let adjacency: AdjacencyMap = [("r", "5"), ("r", "1"), ("r", "3")].into_iter().collect();
/// let tree = shape_tree(&adjacency, "r")?;
/// assert_eq!(tree.child_name("r", Side::Left), Some("1"));
/// assert_eq!(tree.child_name("r", Side::Right), Some("3"));
/// assert_eq!(tree.child_name("3", Side::Right), Some("5"));
/// # Ok::<(), mstree_core::MstreeError>(())
/// ```
#[instrument(
    name = "tree.shape",
    err,
    skip(adjacency),
    fields(nodes = adjacency.len(), reached = field::Empty),
)]
pub fn shape_tree(adjacency: &AdjacencyMap, root: &str) -> Result<BinaryTree> {
    let root_neighbours = adjacency
        .neighbours(root)
        .ok_or_else(|| MstreeError::UnknownRoot {
            name: root.to_owned(),
        })?;

    let mut tree = BinaryTree::with_root(root);
    let mut visited: HashSet<&str> = HashSet::from([root]);
    let mut stack = vec![Frame {
        node: tree.root(),
        candidates: candidates(root_neighbours, &visited),
        cursor: 0,
        placed: 0,
    }];

    loop {
        let Some(frame) = stack.last_mut() else {
            break;
        };
        let Some(&candidate) = frame.candidates.get(frame.cursor) else {
            stack.pop();
            continue;
        };
        frame.cursor += 1;
        if visited.contains(candidate) {
            continue;
        }
        let parent = frame.node;
        let position = frame.placed;
        let only_child = frame.candidates.len() == 1;
        frame.placed += 1;

        let child = match position {
            0 if only_child => {
                let side = match compare_names(candidate, tree.at(parent).name()) {
                    Ordering::Less => Side::Left,
                    Ordering::Equal | Ordering::Greater => Side::Right,
                };
                tree.attach(parent, side, candidate)
            }
            0 => tree.attach(parent, Side::Left, candidate),
            1 => tree.attach(parent, Side::Right, candidate),
            _ => {
                let tail = tree.right_spine_end(parent);
                debug!(
                    node = tree.at(parent).name(),
                    overflow = candidate,
                    tail = tree.at(tail).name(),
                    "chaining overflow child onto right spine"
                );
                tree.attach(tail, Side::Right, candidate)
            }
        };

        visited.insert(candidate);
        let neighbours = adjacency.neighbours(candidate).unwrap_or_default();
        stack.push(Frame {
            node: child,
            candidates: candidates(neighbours, &visited),
            cursor: 0,
            placed: 0,
        });
    }

    Span::current().record("reached", tree.len());
    Ok(tree)
}

fn candidates<'a>(neighbours: &'a [String], visited: &HashSet<&str>) -> Vec<&'a str> {
    sorted_names(
        neighbours
            .iter()
            .map(String::as_str)
            .filter(|name| !visited.contains(name)),
    )
}
