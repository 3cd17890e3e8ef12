//! Builder utilities for configuring the pipeline.
//!
//! Exposes the policies that decide the open behaviours of the pipeline:
//! the tree root, what a single-endpoint incidence column means, and
//! whether a disconnected graph is an error.

use crate::{graph::SelfLoopPolicy, pipeline::Pipeline};

/// What the pipeline does when the spanning forest has several components.
///
/// # Examples
/// ```
/// use mstree_core::DisconnectedPolicy;
///
/// assert_eq!(DisconnectedPolicy::default(), DisconnectedPolicy::Partial);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DisconnectedPolicy {
    /// Shape only the root's component and log the nodes left out.
    #[default]
    Partial,
    /// Fail with [`crate::MstreeError::Disconnected`].
    Reject,
}

/// Configures and constructs [`Pipeline`] instances.
///
/// # Examples
/// ```
/// use mstree_core::{DisconnectedPolicy, PipelineBuilder, SelfLoopPolicy};
///
/// let pipeline = PipelineBuilder::new()
///     .with_root("4")
///     .with_self_loops(SelfLoopPolicy::Omit)
///     .with_disconnected(DisconnectedPolicy::Reject)
///     .build();
/// assert_eq!(pipeline.root(), Some("4"));
/// assert_eq!(pipeline.self_loops(), SelfLoopPolicy::Omit);
/// assert_eq!(pipeline.disconnected(), DisconnectedPolicy::Reject);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PipelineBuilder {
    root: Option<String>,
    self_loops: SelfLoopPolicy,
    disconnected: DisconnectedPolicy,
}

impl PipelineBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use mstree_core::{DisconnectedPolicy, PipelineBuilder, SelfLoopPolicy};
    ///
    /// let builder = PipelineBuilder::new();
    /// assert_eq!(builder.root(), None);
    /// assert_eq!(builder.self_loops(), SelfLoopPolicy::Synthesize);
    /// assert_eq!(builder.disconnected(), DisconnectedPolicy::Partial);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Roots the tree at `name` instead of the first declared node.
    #[must_use]
    pub fn with_root(mut self, name: impl Into<String>) -> Self {
        self.root = Some(name.into());
        self
    }

    /// Returns the configured root override.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Sets how single-endpoint incidence columns are treated.
    #[must_use]
    pub fn with_self_loops(mut self, policy: SelfLoopPolicy) -> Self {
        self.self_loops = policy;
        self
    }

    /// Returns the configured self-loop policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn self_loops(&self) -> SelfLoopPolicy { self.self_loops }

    /// Sets how disconnected graphs are treated.
    #[must_use]
    pub fn with_disconnected(mut self, policy: DisconnectedPolicy) -> Self {
        self.disconnected = policy;
        self
    }

    /// Returns the configured disconnected-graph policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn disconnected(&self) -> DisconnectedPolicy { self.disconnected }

    /// Constructs the [`Pipeline`].
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline::new(self.root, self.self_loops, self.disconnected)
    }
}
