//! Graph construction from node names and an incidence matrix.
//!
//! [`GraphBuilder`] validates the tokenized input eagerly and produces an
//! immutable [`Graph`]. Later stages never mutate the graph; they derive new
//! structures from it.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{Span, debug, field, instrument, warn};

use crate::{
    Result,
    error::MstreeError,
    input::GraphInput,
};

/// Index of a node within its [`Graph`].
pub type NodeId = usize;

/// A named graph vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    name: String,
}

impl Node {
    /// Returns the node's name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }
}

/// A weighted undirected edge.
///
/// A self-loop repeats the same endpoint twice.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
    name: String,
    nodes: [String; 2],
    weight: f64,
    #[serde(skip)]
    endpoints: [NodeId; 2],
}

impl Edge {
    /// Returns the edge name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the endpoint names in incidence-matrix row order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[String; 2] { &self.nodes }

    /// Returns the declared weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }

    /// Returns the endpoint ids in incidence-matrix row order.
    #[must_use]
    #[rustfmt::skip]
    pub fn endpoints(&self) -> [NodeId; 2] { self.endpoints }

    /// Returns `true` when both endpoints are the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.endpoints[0] == self.endpoints[1]
    }
}

/// How an incidence column with a single marked node is interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SelfLoopPolicy {
    /// Create an edge from the node to itself.
    #[default]
    Synthesize,
    /// Drop the column like any other column without two endpoints.
    Omit,
}

/// An immutable weighted graph.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    edges: Vec<Edge>,
    adjacency_mismatches: usize,
}

impl Graph {
    /// Returns the nodes in declaration order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Returns the edges in incidence-column order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Looks up a node id by name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Returns the name of node `id`, if it exists.
    #[must_use]
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(Node::name)
    }

    /// Number of adjacency-matrix cells that disagreed with the incidence
    /// matrix. Always zero when no adjacency matrix was supplied.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjacency_mismatches(&self) -> usize { self.adjacency_mismatches }
}

/// Validates [`GraphInput`] and builds a [`Graph`].
///
/// # Examples
/// ```
/// use mstree_core::{GraphBuilder, GraphInput};
///
/// let input = GraphInput::new(
///     ["a", "b", "c"],
///     ["x", "y"],
///     vec![vec![1, 0], vec![1, 1], vec![0, 1]],
///     [("x", 2.0), ("y", 1.0)],
/// );
/// let graph = GraphBuilder::new().build(&input)?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edges()[1].nodes(), &["b".to_owned(), "c".to_owned()]);
/// # Ok::<(), mstree_core::MstreeError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphBuilder {
    self_loops: SelfLoopPolicy,
}

impl GraphBuilder {
    /// Creates a builder that synthesizes self-loops.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the self-loop policy.
    #[must_use]
    pub fn with_self_loops(mut self, policy: SelfLoopPolicy) -> Self {
        self.self_loops = policy;
        self
    }

    /// Returns the configured self-loop policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn self_loops(&self) -> SelfLoopPolicy { self.self_loops }

    /// Builds a graph from `input`.
    ///
    /// # Errors
    /// Returns a malformed-input [`MstreeError`] when the node list is empty
    /// or has duplicates, when matrix dimensions disagree with the name
    /// lists, when an incidence cell is not `0`/`1`, or when an edge has no
    /// weight entry.
    #[instrument(
        name = "graph.build",
        err,
        skip_all,
        fields(nodes = input.node_names.len(), columns = input.edge_names.len(), edges = field::Empty),
    )]
    pub fn build(&self, input: &GraphInput) -> Result<Graph> {
        let (nodes, index) = collect_nodes(&input.node_names)?;
        validate_incidence(&input.incidence_matrix, nodes.len(), input.edge_names.len())?;

        let mut edges = Vec::with_capacity(input.edge_names.len());
        for (column, edge_name) in input.edge_names.iter().enumerate() {
            let weight = *input
                .edge_weights
                .get(edge_name)
                .ok_or_else(|| MstreeError::MissingWeight {
                    edge: edge_name.clone(),
                })?;
            let marked = marked_rows(&input.incidence_matrix, column);
            let endpoints = match (marked.as_slice(), self.self_loops) {
                ([a, b], _) => [*a, *b],
                ([a], SelfLoopPolicy::Synthesize) => [*a, *a],
                _ => {
                    debug!(
                        edge = edge_name.as_str(),
                        marked = marked.len(),
                        "dropping incidence column without two endpoints"
                    );
                    continue;
                }
            };
            edges.push(Edge {
                name: edge_name.clone(),
                nodes: endpoints.map(|id| nodes[id].name.clone()),
                weight,
                endpoints,
            });
        }
        Span::current().record("edges", edges.len());

        let adjacency_mismatches = match &input.adjacency_matrix {
            Some(matrix) => check_adjacency(matrix, &nodes, &edges)?,
            None => 0,
        };

        Ok(Graph {
            nodes,
            index,
            edges,
            adjacency_mismatches,
        })
    }
}

fn collect_nodes(names: &[String]) -> Result<(Vec<Node>, HashMap<String, NodeId>)> {
    if names.is_empty() {
        return Err(MstreeError::EmptyGraph);
    }
    let mut index = HashMap::with_capacity(names.len());
    let mut nodes = Vec::with_capacity(names.len());
    for (id, name) in names.iter().enumerate() {
        if index.insert(name.clone(), id).is_some() {
            return Err(MstreeError::DuplicateNode { name: name.clone() });
        }
        nodes.push(Node { name: name.clone() });
    }
    Ok((nodes, index))
}

fn validate_incidence(matrix: &[Vec<i64>], node_count: usize, edge_count: usize) -> Result<()> {
    if matrix.len() != node_count {
        return Err(MstreeError::RowCountMismatch {
            expected: node_count,
            actual: matrix.len(),
        });
    }
    for (row, cells) in matrix.iter().enumerate() {
        if cells.len() != edge_count {
            return Err(MstreeError::ColumnCountMismatch {
                matrix: "incidence",
                row,
                expected: edge_count,
                actual: cells.len(),
            });
        }
        if let Some((column, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, value)| !matches!(value, 0 | 1))
        {
            return Err(MstreeError::InvalidCell { row, column, value });
        }
    }
    Ok(())
}

fn marked_rows(matrix: &[Vec<i64>], column: usize) -> Vec<NodeId> {
    matrix
        .iter()
        .enumerate()
        .filter(|(_, cells)| cells.get(column) == Some(&1))
        .map(|(row, _)| row)
        .collect()
}

fn check_adjacency(matrix: &[Vec<i64>], nodes: &[Node], edges: &[Edge]) -> Result<usize> {
    if matrix.len() != nodes.len() {
        return Err(MstreeError::AdjacencyShapeMismatch {
            expected: nodes.len(),
            actual: matrix.len(),
        });
    }
    for (row, cells) in matrix.iter().enumerate() {
        if cells.len() != nodes.len() {
            return Err(MstreeError::ColumnCountMismatch {
                matrix: "adjacency",
                row,
                expected: nodes.len(),
                actual: cells.len(),
            });
        }
    }

    let connected: HashSet<(NodeId, NodeId)> = edges
        .iter()
        .filter(|edge| !edge.is_self_loop())
        .flat_map(|edge| {
            let [a, b] = edge.endpoints;
            [(a, b), (b, a)]
        })
        .collect();

    let mut mismatches = 0;
    for (row, cells) in matrix.iter().enumerate() {
        for (column, &value) in cells.iter().enumerate() {
            if row == column {
                continue;
            }
            if (value != 0) != connected.contains(&(row, column)) {
                warn!(
                    from = nodes[row].name.as_str(),
                    to = nodes[column].name.as_str(),
                    value,
                    "adjacency matrix disagrees with incidence matrix"
                );
                mismatches += 1;
            }
        }
    }
    Ok(mismatches)
}
