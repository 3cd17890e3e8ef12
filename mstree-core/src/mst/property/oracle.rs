//! Brute-force minimum spanning forest for small graphs.
//!
//! Enumerates every subset of non-loop edges of the right size and keeps
//! the lightest acyclic one. Exponential, so only usable on tiny fixtures.

use super::{strategies::MAX_EDGES, types::MstFixture};

/// Reference answer for a fixture.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct OracleForest {
    pub total_weight: f64,
    pub component_count: usize,
}

fn root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Counts connected components by merging every edge.
pub(super) fn component_count(fixture: &MstFixture) -> usize {
    let mut parent: Vec<usize> = (0..fixture.node_count).collect();
    let mut components = fixture.node_count;
    for edge in &fixture.edges {
        let (a, b) = (root(&mut parent, edge.a), root(&mut parent, edge.b));
        if a != b {
            parent[b] = a;
            components -= 1;
        }
    }
    components
}

/// Returns `true` when the `(a, b)` pairs contain no cycle.
pub(super) fn is_acyclic(node_count: usize, pairs: impl IntoIterator<Item = (usize, usize)>) -> bool {
    let mut parent: Vec<usize> = (0..node_count).collect();
    for (a, b) in pairs {
        let (a, b) = (root(&mut parent, a), root(&mut parent, b));
        if a == b {
            return false;
        }
        parent[b] = a;
    }
    true
}

pub(super) fn brute_force_forest(fixture: &MstFixture) -> OracleForest {
    let candidates: Vec<_> = fixture.edges.iter().filter(|edge| edge.a != edge.b).collect();
    assert!(candidates.len() <= MAX_EDGES, "fixture too large for brute force");

    let components = component_count(fixture);
    let size = fixture.node_count - components;
    let mut best: Option<f64> = None;
    for mask in 0u32..(1 << candidates.len()) {
        if mask.count_ones() as usize != size {
            continue;
        }
        let chosen: Vec<_> = candidates
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, edge)| *edge)
            .collect();
        if !is_acyclic(fixture.node_count, chosen.iter().map(|edge| (edge.a, edge.b))) {
            continue;
        }
        let weight: f64 = chosen.iter().map(|edge| edge.weight).sum();
        best = Some(best.map_or(weight, |current| current.min(weight)));
    }

    OracleForest {
        total_weight: best.unwrap_or(0.0),
        component_count: components,
    }
}
