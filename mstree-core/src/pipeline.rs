//! Pipeline orchestration.
//!
//! Runs graph construction, Kruskal and tree shaping in order over one
//! [`GraphInput`]. Every run builds fresh data, so a [`Pipeline`] can be
//! shared freely between callers.

use serde::Serialize;
use tracing::{Span, field, info, instrument, warn};

use crate::{
    Result,
    builder::DisconnectedPolicy,
    error::MstreeError,
    graph::{Edge, GraphBuilder, SelfLoopPolicy},
    input::GraphInput,
    mst::kruskal,
    search::{SearchOutcome, highlight},
    tree::{BinaryTree, SerializedNode, shape_tree},
};

/// Entry point for running the MST-to-tree pipeline.
///
/// # Examples
/// ```
/// use mstree_core::{GraphInput, PipelineBuilder};
///
/// let input = GraphInput::new(
///     ["1", "2", "3", "4"],
///     ["A", "B", "C", "D"],
///     vec![
///         vec![1, 0, 0, 1],
///         vec![1, 1, 0, 0],
///         vec![0, 1, 1, 0],
///         vec![0, 0, 1, 1],
///     ],
///     [("A", 1.0), ("B", 2.0), ("C", 3.0), ("D", 10.0)],
/// );
/// let output = PipelineBuilder::new().build().run(&input)?;
/// assert_eq!(output.in_order(), ["1", "2", "3", "4"]);
/// assert_eq!(output.total_weight(), 6.0);
/// # Ok::<(), mstree_core::MstreeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    root: Option<String>,
    self_loops: SelfLoopPolicy,
    disconnected: DisconnectedPolicy,
}

impl Pipeline {
    pub(crate) fn new(
        root: Option<String>,
        self_loops: SelfLoopPolicy,
        disconnected: DisconnectedPolicy,
    ) -> Self {
        Self {
            root,
            self_loops,
            disconnected,
        }
    }

    /// Returns the root override, if any.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Returns the self-loop policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn self_loops(&self) -> SelfLoopPolicy { self.self_loops }

    /// Returns the disconnected-graph policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn disconnected(&self) -> DisconnectedPolicy { self.disconnected }

    /// Builds the graph, its minimum spanning forest and the shaped tree.
    ///
    /// # Errors
    /// Propagates malformed-input and invalid-weight errors from graph
    /// construction and Kruskal. Returns [`MstreeError::UnknownRoot`] when
    /// the configured root is not a declared node, and
    /// [`MstreeError::Disconnected`] when the graph is disconnected under
    /// [`DisconnectedPolicy::Reject`].
    #[instrument(
        name = "pipeline.run",
        err,
        skip_all,
        fields(nodes = input.node_names.len(), root = field::Empty),
    )]
    pub fn run(&self, input: &GraphInput) -> Result<PipelineOutput> {
        let graph = GraphBuilder::new()
            .with_self_loops(self.self_loops)
            .build(input)?;
        let root = match &self.root {
            Some(name) => name.clone(),
            None => graph
                .nodes()
                .first()
                .map(|node| node.name().to_owned())
                .ok_or(MstreeError::EmptyGraph)?,
        };
        if graph.id_of(&root).is_none() {
            return Err(MstreeError::UnknownRoot { name: root });
        }
        Span::current().record("root", field::display(&root));

        let forest = kruskal(&graph)?;

        if !forest.is_tree() {
            match self.disconnected {
                DisconnectedPolicy::Reject => {
                    return Err(MstreeError::Disconnected {
                        components: forest.component_count(),
                        accepted: forest.edges().len(),
                        required: forest.required_edges(),
                    });
                }
                DisconnectedPolicy::Partial => warn!(
                    components = forest.component_count(),
                    "graph is disconnected; shaping the root's component only"
                ),
            }
        }

        let component_count = forest.component_count();
        let total_weight = forest.total_weight();
        let (mst_edges, adjacency) = forest.into_parts();
        let tree = shape_tree(&adjacency, &root)?;

        let unreached = graph.node_count().saturating_sub(tree.len());
        if unreached > 0 {
            warn!(unreached, "nodes outside the root's component were left out of the tree");
        }
        info!(
            mst_edges = mst_edges.len(),
            tree_nodes = tree.len(),
            "pipeline completed"
        );

        Ok(PipelineOutput {
            root,
            mst_edges,
            total_weight,
            component_count,
            adjacency_mismatches: graph.adjacency_mismatches(),
            tree,
        })
    }
}

/// Everything a run produced.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    root: String,
    mst_edges: Vec<Edge>,
    total_weight: f64,
    component_count: usize,
    adjacency_mismatches: usize,
    tree: BinaryTree,
}

impl PipelineOutput {
    /// Name of the tree root.
    #[must_use]
    #[rustfmt::skip]
    pub fn root(&self) -> &str { &self.root }

    /// MST edges in acceptance order.
    #[must_use]
    #[rustfmt::skip]
    pub fn mst_edges(&self) -> &[Edge] { &self.mst_edges }

    /// Summed weight of the MST edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Number of connected components of the input graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Adjacency-matrix cells that disagreed with the incidence matrix.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjacency_mismatches(&self) -> usize { self.adjacency_mismatches }

    /// The shaped binary tree.
    #[must_use]
    #[rustfmt::skip]
    pub fn tree(&self) -> &BinaryTree { &self.tree }

    /// In-order names of the tree.
    #[must_use]
    pub fn in_order(&self) -> Vec<String> {
        self.tree.in_order()
    }

    /// Nested form of the tree.
    #[must_use]
    pub fn serialized_tree(&self) -> SerializedNode {
        self.tree.serialize()
    }

    /// Highlights the walk towards `query`.
    #[must_use]
    pub fn search(&self, query: &str) -> SearchOutcome {
        highlight(&self.tree, query)
    }

    /// Assembles the output contract, optionally including a search.
    #[must_use]
    pub fn report(&self, query: Option<&str>) -> PipelineReport {
        PipelineReport {
            root: self.root.clone(),
            mst_edges: self.mst_edges.clone(),
            total_weight: self.total_weight,
            component_count: self.component_count,
            adjacency_mismatches: self.adjacency_mismatches,
            binary_tree: self.serialized_tree(),
            in_order: self.in_order(),
            search: query.map(|value| self.search(value)),
        }
    }
}

/// Serializable output contract handed to renderers and transports.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    /// Name of the tree root.
    pub root: String,
    /// MST edges in acceptance order.
    pub mst_edges: Vec<Edge>,
    /// Summed weight of the MST edges.
    pub total_weight: f64,
    /// Number of connected components of the input graph.
    pub component_count: usize,
    /// Adjacency-matrix cells that disagreed with the incidence matrix.
    pub adjacency_mismatches: usize,
    /// Nested `{name, left, right}` tree.
    pub binary_tree: SerializedNode,
    /// In-order names of the tree.
    pub in_order: Vec<String>,
    /// Search walk, when a query was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchOutcome>,
}
