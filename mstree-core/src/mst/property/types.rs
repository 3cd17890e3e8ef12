//! Fixture types for the MST property tests.

use test_strategy::Arbitrary;

use crate::GraphInput;

/// Shape of a generated graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum Topology {
    /// A random spanning tree plus a few extra edges.
    #[weight(3)]
    Sparse,
    /// Most node pairs joined.
    #[weight(2)]
    Dense,
    /// Several components with no edges between them.
    #[weight(2)]
    Forest,
    /// Weights drawn from two values so ties dominate.
    #[weight(2)]
    Ties,
    /// Sparse graph with single-endpoint columns mixed in.
    #[weight(1)]
    SelfLoops,
}

/// One generated edge; `a == b` marks a self-loop column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct FixtureEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// A generated graph over nodes named `0..node_count`.
#[derive(Clone, Debug)]
pub(super) struct MstFixture {
    pub node_count: usize,
    pub edges: Vec<FixtureEdge>,
    pub topology: Topology,
}

impl MstFixture {
    pub(super) fn node_name(index: usize) -> String {
        index.to_string()
    }

    pub(super) fn edge_name(index: usize) -> String {
        format!("e{index}")
    }

    /// Renders the fixture as an incidence-matrix input.
    pub(super) fn to_input(&self) -> GraphInput {
        let incidence = (0..self.node_count)
            .map(|node| {
                self.edges
                    .iter()
                    .map(|edge| i64::from(edge.a == node || edge.b == node))
                    .collect()
            })
            .collect();
        GraphInput::new(
            (0..self.node_count).map(Self::node_name),
            (0..self.edges.len()).map(Self::edge_name),
            incidence,
            self.edges
                .iter()
                .enumerate()
                .map(|(index, edge)| (Self::edge_name(index), edge.weight)),
        )
    }
}
