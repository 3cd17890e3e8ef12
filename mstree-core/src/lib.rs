//! mstree core library.
//!
//! Builds a weighted graph from an incidence matrix, computes its minimum
//! spanning tree with Kruskal's algorithm, shapes that tree into a binary
//! tree ordered by node names, and walks the binary tree to highlight a
//! search for a value.
//!
//! [`PipelineBuilder`] wires the stages together; each stage is also exposed
//! on its own.

mod builder;
mod error;
mod graph;
mod input;
mod mst;
mod ordering;
mod pipeline;
mod search;
mod tree;

pub use crate::{
    builder::{DisconnectedPolicy, PipelineBuilder},
    error::{ErrorKind, MstreeError, MstreeErrorCode, Result},
    graph::{Edge, Graph, GraphBuilder, Node, NodeId, SelfLoopPolicy},
    input::{GraphInput, RawForm},
    mst::{AdjacencyMap, MinimumSpanningForest, kruskal},
    ordering::{NameKey, compare_names},
    pipeline::{Pipeline, PipelineOutput, PipelineReport},
    search::{HighlightState, SearchOutcome, highlight},
    tree::{BinaryTree, SerializedNode, Side, TreeNode, TreeNodeId, VisualNode, shape_tree},
};
