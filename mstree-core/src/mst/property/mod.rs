//! Property-based tests for Kruskal and tree shaping.
//!
//! Generated graphs are checked against a brute-force minimum spanning
//! forest, against structural invariants of the accepted edge set, and
//! against the node coverage of the shaped tree.

mod oracle;
mod strategies;
mod types;
