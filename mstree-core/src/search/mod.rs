//! "Find node" highlighting over a shaped tree.
//!
//! The tree is walked as if it were a binary search tree ordered by
//! [`compare_names`]. Nothing checks that the shaped tree actually is one:
//! overflow chaining can break the ordering, in which case the walk may
//! miss a node that is present. Callers get a best-effort answer.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::{Deserialize, Serialize};
use tracing::{Span, field, instrument};

use crate::{
    ordering::compare_names,
    tree::{BinaryTree, TreeNodeId},
};

/// Highlight assigned to a node by a search walk.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightState {
    /// The node matches the query.
    Found,
    /// The walk passed through the node without a match.
    OnPath,
    /// The node sits in a branch the walk ruled out.
    Pruned,
}

/// Result of a search walk.
///
/// Nodes the walk never considered, such as the subtrees below the found
/// node, have no entry in [`SearchOutcome::states`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SearchOutcome {
    states: BTreeMap<String, HighlightState>,
    path: Vec<String>,
    found: bool,
}

impl SearchOutcome {
    /// Highlight state per node name.
    #[must_use]
    #[rustfmt::skip]
    pub fn states(&self) -> &BTreeMap<String, HighlightState> { &self.states }

    /// Nodes visited by the walk, root first.
    #[must_use]
    #[rustfmt::skip]
    pub fn path(&self) -> &[String] { &self.path }

    /// Returns `true` when a node matched the query.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_found(&self) -> bool { self.found }

    /// Returns the highlight of `name`, if the walk assigned one.
    #[must_use]
    pub fn state_of(&self, name: &str) -> Option<HighlightState> {
        self.states.get(name).copied()
    }
}

/// Walks `tree` towards `query` and classifies the nodes it touches.
///
/// # Examples
/// ```
/// use mstree_core::{AdjacencyMap, HighlightState, highlight, shape_tree};
///
/// let adjacency: AdjacencyMap = [("2", "1"), ("2", "3")].into_iter().collect();
/// let tree = shape_tree(&adjacency, "2")?;
/// let outcome = highlight(&tree, "3");
/// assert!(outcome.is_found());
/// assert_eq!(outcome.state_of("2"), Some(HighlightState::OnPath));
/// assert_eq!(outcome.state_of("1"), Some(HighlightState::Pruned));
/// assert_eq!(outcome.state_of("3"), Some(HighlightState::Found));
/// # Ok::<(), mstree_core::MstreeError>(())
/// ```
#[must_use]
#[instrument(name = "search.highlight", skip(tree), fields(found = field::Empty, steps = field::Empty))]
pub fn highlight(tree: &BinaryTree, query: &str) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();
    let mut cursor = Some(tree.root());

    while let Some(id) = cursor {
        let Some(node) = tree.node(id) else {
            break;
        };
        outcome.path.push(node.name().to_owned());
        let (taken, ruled_out) = match compare_names(query, node.name()) {
            Ordering::Equal => {
                outcome.found = true;
                outcome
                    .states
                    .insert(node.name().to_owned(), HighlightState::Found);
                break;
            }
            Ordering::Less => (node.left(), node.right()),
            Ordering::Greater => (node.right(), node.left()),
        };
        outcome
            .states
            .insert(node.name().to_owned(), HighlightState::OnPath);
        if let Some(branch) = ruled_out {
            prune(tree, branch, &mut outcome.states);
        }
        cursor = taken;
    }

    let span = Span::current();
    span.record("found", outcome.found);
    span.record("steps", outcome.path.len());
    outcome
}

fn prune(tree: &BinaryTree, branch: TreeNodeId, states: &mut BTreeMap<String, HighlightState>) {
    let mut pending = vec![branch];
    while let Some(id) = pending.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        states.insert(node.name().to_owned(), HighlightState::Pruned);
        pending.extend(node.left());
        pending.extend(node.right());
    }
}
