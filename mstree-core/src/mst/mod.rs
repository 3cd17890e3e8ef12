//! Minimum spanning tree (MST) construction.
//!
//! Sequential Kruskal over a validated [`Graph`]. Edges are stable-sorted by
//! weight so equal weights keep their incidence-column order, which makes
//! the accepted edge list reproducible. Besides the accepted edges the stage
//! returns a fresh [`AdjacencyMap`] describing the tree; the graph itself is
//! left untouched.

pub(crate) mod union_find;

use std::{cmp::Ordering, collections::HashMap};

use tracing::{Span, debug, field, instrument};

use crate::{
    Result,
    error::MstreeError,
    graph::{Edge, Graph},
};

use self::union_find::UnionFind;

/// Per-node neighbour lists of a spanning forest.
///
/// Lists keep insertion order: each accepted edge `(a, b)` appends `b` to
/// `a`'s list and `a` to `b`'s list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdjacencyMap {
    neighbours: HashMap<String, Vec<String>>,
}

impl AdjacencyMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with no neighbours if it is not present yet.
    pub fn add_node(&mut self, name: impl Into<String>) {
        self.neighbours.entry(name.into()).or_default();
    }

    /// Records an undirected connection between `a` and `b`.
    pub fn connect(&mut self, a: &str, b: &str) {
        self.neighbours
            .entry(a.to_owned())
            .or_default()
            .push(b.to_owned());
        self.neighbours
            .entry(b.to_owned())
            .or_default()
            .push(a.to_owned());
    }

    /// Returns the neighbours of `name` in insertion order.
    #[must_use]
    pub fn neighbours(&self, name: &str) -> Option<&[String]> {
        self.neighbours.get(name).map(Vec::as_slice)
    }

    /// Returns `true` when `name` is a node of the map.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.neighbours.contains_key(name)
    }

    /// Number of nodes in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns `true` when the map has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }
}

impl<A: AsRef<str>, B: AsRef<str>> FromIterator<(A, B)> for AdjacencyMap {
    /// Connects each pair in iteration order.
    fn from_iter<I: IntoIterator<Item = (A, B)>>(pairs: I) -> Self {
        let mut map = Self::new();
        for (a, b) in pairs {
            map.connect(a.as_ref(), b.as_ref());
        }
        map
    }
}

/// The output of a minimum spanning forest computation.
///
/// When the input graph is connected the forest is a minimum spanning tree.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimumSpanningForest {
    edges: Vec<Edge>,
    adjacency: AdjacencyMap,
    component_count: usize,
    node_count: usize,
    total_weight: f64,
}

impl MinimumSpanningForest {
    /// Returns the accepted edges in acceptance order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the neighbour lists of the forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjacency(&self) -> &AdjacencyMap { &self.adjacency }

    /// Consumes the forest, handing the neighbour lists to the next stage.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Edge>, AdjacencyMap) {
        (self.edges, self.adjacency)
    }

    /// Returns the number of connected components in the forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns the summed weight of the accepted edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Number of edges a spanning tree over every node would need.
    #[must_use]
    pub fn required_edges(&self) -> usize {
        self.node_count.saturating_sub(1)
    }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }
}

/// Computes a minimum spanning forest of `graph` with Kruskal's algorithm.
///
/// Self-loops never join two sets and are therefore never accepted.
///
/// # Errors
/// Returns [`MstreeError::NonFiniteWeight`] when any edge weight is NaN or
/// infinite. No edge is accepted in that case.
///
/// # Examples
/// ```
/// use mstree_core::{GraphBuilder, GraphInput, kruskal};
///
/// let input = GraphInput::new(
///     ["1", "2", "3"],
///     ["A", "B", "C"],
///     vec![vec![1, 0, 1], vec![1, 1, 0], vec![0, 1, 1]],
///     [("A", 1.0), ("B", 2.0), ("C", 3.0)],
/// );
/// let graph = GraphBuilder::new().build(&input)?;
/// let forest = kruskal(&graph)?;
/// let names: Vec<&str> = forest.edges().iter().map(|edge| edge.name()).collect();
/// assert_eq!(names, ["A", "B"]);
/// assert!(forest.is_tree());
/// # Ok::<(), mstree_core::MstreeError>(())
/// ```
#[instrument(
    name = "mst.kruskal",
    err,
    skip_all,
    fields(nodes = graph.node_count(), edges = graph.edges().len(), accepted = field::Empty, components = field::Empty),
)]
pub fn kruskal(graph: &Graph) -> Result<MinimumSpanningForest> {
    if let Some(edge) = graph.edges().iter().find(|edge| !edge.weight().is_finite()) {
        return Err(MstreeError::NonFiniteWeight {
            edge: edge.name().to_owned(),
            weight: edge.weight(),
        });
    }

    let mut sorted: Vec<&Edge> = graph.edges().iter().collect();
    sorted.sort_by(|left, right| {
        left.weight()
            .partial_cmp(&right.weight())
            .unwrap_or(Ordering::Equal)
    });

    let node_count = graph.node_count();
    let required = node_count.saturating_sub(1);
    let mut sets = UnionFind::new(node_count);
    let mut adjacency = AdjacencyMap::new();
    for node in graph.nodes() {
        adjacency.add_node(node.name());
    }

    let mut edges = Vec::with_capacity(required);
    let mut total_weight = 0.0;
    for edge in sorted {
        if edges.len() == required {
            break;
        }
        let [a, b] = edge.endpoints();
        if !sets.union(a, b) {
            debug!(edge = edge.name(), "skipping edge that would close a cycle");
            continue;
        }
        let [left, right] = edge.nodes();
        adjacency.connect(left, right);
        total_weight += edge.weight();
        edges.push(edge.clone());
    }

    let span = Span::current();
    span.record("accepted", edges.len());
    span.record("components", sets.components());

    Ok(MinimumSpanningForest {
        edges,
        adjacency,
        component_count: sets.components(),
        node_count,
        total_weight,
    })
}

#[cfg(test)]
mod property;
