//! Graph generators for the MST property tests.
//!
//! Weights are small integers stored as `f64`, so sums compare exactly.
//! Graphs stay small enough for the brute-force oracle to enumerate every
//! candidate edge subset.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{FixtureEdge, MstFixture, Topology};

const MIN_NODES: usize = 1;
const MAX_NODES: usize = 7;
/// Upper bound on non-loop edges, keeping `2^edges` subsets enumerable.
pub(super) const MAX_EDGES: usize = 12;

pub(super) fn mst_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (any::<Topology>(), any::<u64>()).prop_map(|(topology, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(topology, &mut rng)
    })
}

pub(super) fn generate_fixture(topology: Topology, rng: &mut SmallRng) -> MstFixture {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let edges = match topology {
        Topology::Sparse => sparse(node_count, rng, |r| r.gen_range(1..=20)),
        Topology::Dense => dense(node_count, rng),
        Topology::Forest => forest(node_count, rng),
        Topology::Ties => sparse(node_count, rng, |r| r.gen_range(1..=2)),
        Topology::SelfLoops => with_self_loops(node_count, rng),
    };
    MstFixture {
        node_count,
        edges,
        topology,
    }
}

fn edge(a: usize, b: usize, weight: u32) -> FixtureEdge {
    FixtureEdge {
        a,
        b,
        weight: f64::from(weight),
    }
}

/// A random spanning tree over `nodes` followed by extra random edges.
fn spanning_tree_over(
    nodes: &[usize],
    rng: &mut SmallRng,
    weight: &mut impl FnMut(&mut SmallRng) -> u32,
) -> Vec<FixtureEdge> {
    let mut edges = Vec::with_capacity(nodes.len());
    for (position, &node) in nodes.iter().enumerate().skip(1) {
        let parent = nodes[rng.gen_range(0..position)];
        let w = weight(rng);
        edges.push(edge(parent, node, w));
    }
    edges
}

fn sparse(
    node_count: usize,
    rng: &mut SmallRng,
    mut weight: impl FnMut(&mut SmallRng) -> u32,
) -> Vec<FixtureEdge> {
    let nodes: Vec<usize> = (0..node_count).collect();
    let mut edges = spanning_tree_over(&nodes, rng, &mut weight);
    if node_count > 1 {
        let extra = rng.gen_range(0..=node_count);
        for _ in 0..extra {
            if edges.len() == MAX_EDGES {
                break;
            }
            let a = rng.gen_range(0..node_count);
            let b = rng.gen_range(0..node_count);
            if a != b {
                let w = weight(rng);
                edges.push(edge(a, b, w));
            }
        }
    }
    shuffle(&mut edges, rng);
    edges
}

fn dense(node_count: usize, rng: &mut SmallRng) -> Vec<FixtureEdge> {
    let mut edges = Vec::new();
    for a in 0..node_count {
        for b in (a + 1)..node_count {
            if edges.len() < MAX_EDGES && rng.gen_bool(0.8) {
                edges.push(edge(a, b, rng.gen_range(1..=20)));
            }
        }
    }
    edges
}

fn forest(node_count: usize, rng: &mut SmallRng) -> Vec<FixtureEdge> {
    let mut nodes: Vec<usize> = (0..node_count).collect();
    shuffle(&mut nodes, rng);
    let mut edges = Vec::new();
    let mut weight = |r: &mut SmallRng| r.gen_range(1..=20);
    let mut rest = nodes.as_slice();
    while !rest.is_empty() {
        let size = rng.gen_range(1..=rest.len());
        let (group, tail) = rest.split_at(size);
        edges.extend(spanning_tree_over(group, rng, &mut weight));
        rest = tail;
    }
    edges
}

fn with_self_loops(node_count: usize, rng: &mut SmallRng) -> Vec<FixtureEdge> {
    let mut edges = sparse(node_count, rng, |r| r.gen_range(1..=20));
    let loops = rng.gen_range(1..=2);
    for _ in 0..loops {
        let node = rng.gen_range(0..node_count);
        let at = rng.gen_range(0..=edges.len());
        edges.insert(at, edge(node, node, rng.gen_range(0..=5)));
    }
    edges
}

fn shuffle<T>(slice: &mut [T], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}
