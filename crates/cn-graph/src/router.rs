//! Routing trait and the default all-pairs implementation.
//!
//! # Pluggability
//!
//! `cn-sim` calls routing via the [`Router`] trait.  The default
//! [`AllPairsRouter`] precomputes Floyd–Warshall tables once at construction,
//! so every later request is a table walk with no search.

use cn_core::NodeId;

use crate::{CampusGraph, GraphResult, ShortestPaths};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered, acyclic node sequence from origin to destination inclusive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Nodes in travel order.  Never empty.
    pub nodes:        Vec<NodeId>,
    /// Sum of the traversed edge weights.
    pub total_weight: f64,
}

impl Route {
    pub fn origin(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn destination(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges traversed.
    pub fn segment_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// `true` if origin and destination are the same node ("already there").
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Consecutive `(from, to)` node pairs.
    pub fn segments(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<String> = self.nodes.iter().map(|n| n.0.to_string()).collect();
        write!(f, "{} (weight {})", labels.join(" → "), self.total_weight)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so a simulation can be moved to a
/// driver thread.
pub trait Router: Send + Sync {
    /// Number of nodes the router was built for.
    fn node_count(&self) -> usize;

    /// Compute the route `from → to`.
    ///
    /// `from == to` is the single-node route, not an error.
    fn route(&self, from: NodeId, to: NodeId) -> GraphResult<Route>;
}

// ── AllPairsRouter ────────────────────────────────────────────────────────────

/// Router backed by cached [`ShortestPaths`] tables.
///
/// The graph is immutable for the lifetime of a simulation, so the tables
/// are computed exactly once in [`AllPairsRouter::new`].
#[derive(Clone, Debug)]
pub struct AllPairsRouter {
    paths: ShortestPaths,
}

impl AllPairsRouter {
    pub fn new(graph: &CampusGraph) -> Self {
        Self { paths: ShortestPaths::compute(graph) }
    }

    /// Wrap tables computed elsewhere.
    pub fn from_paths(paths: ShortestPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ShortestPaths {
        &self.paths
    }
}

impl Router for AllPairsRouter {
    fn node_count(&self) -> usize {
        self.paths.node_count()
    }

    fn route(&self, from: NodeId, to: NodeId) -> GraphResult<Route> {
        self.paths.reconstruct_path(from, to)
    }
}
