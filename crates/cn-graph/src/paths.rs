//! All-pairs shortest paths (Floyd–Warshall) and path reconstruction.
//!
//! # Tables
//!
//! ```text
//! dist[i * N + j] = cost of the cheapest directed path i → j (+inf if none)
//! next[i * N + j] = first hop on that path, NodeId::INVALID if unreachable
//! ```
//!
//! # Tie-breaking
//!
//! Intermediate nodes are tried in ascending index order and a pair is only
//! updated on a strict improvement.  When several shortest paths exist the
//! one discovered through the lowest intermediate index is kept, which makes
//! the result deterministic across runs (and across the sequential and
//! `parallel` implementations).

use cn_core::NodeId;

use crate::{CampusGraph, GraphError, GraphResult, Route};

/// Distance and next-hop matrices for one [`CampusGraph`].
///
/// Computed once per graph and shared read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths {
    node_count: usize,
    dist:       Vec<f64>,
    next:       Vec<NodeId>,
}

impl ShortestPaths {
    /// Run Floyd–Warshall over `graph`.
    ///
    /// O(N³) time, O(N²) space.
    pub fn compute(graph: &CampusGraph) -> Self {
        let n = graph.node_count();
        let mut dist = Vec::with_capacity(n * n);
        let mut next = Vec::with_capacity(n * n);

        for i in 0..n {
            for (j, &w) in graph.row(NodeId(i as u32)).iter().enumerate() {
                dist.push(w);
                next.push(if w.is_finite() { NodeId(j as u32) } else { NodeId::INVALID });
            }
        }

        for k in 0..n {
            // Row k is invariant during pass k (dist[k][k] == 0), so a copy
            // lets every row relax independently.
            let via_k: Vec<f64> = dist[k * n..(k + 1) * n].to_vec();
            relax_pass(&mut dist, &mut next, &via_k, k, n);
        }

        log::debug!("computed all-pairs shortest paths for {n} nodes");
        Self { node_count: n, dist, next }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Cost of the cheapest path `from → to` (`+inf` if unreachable).
    #[inline]
    pub fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.dist[from.index() * self.node_count + to.index()]
    }

    /// First hop from `from` toward `to`, or `None` if unreachable.
    #[inline]
    pub fn next_hop(&self, from: NodeId, to: NodeId) -> Option<NodeId> {
        let hop = self.next[from.index() * self.node_count + to.index()];
        hop.is_valid().then_some(hop)
    }

    #[inline]
    pub fn is_reachable(&self, from: NodeId, to: NodeId) -> bool {
        self.next_hop(from, to).is_some()
    }

    /// Walk the next-hop table from `from` to `to`.
    ///
    /// `from == to` yields the single-node route `[from]` with weight 0.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidNode`] if either id is out of range.
    /// - [`GraphError::NoPath`] if `to` is unreachable from `from`.  Never a
    ///   partial route.
    pub fn reconstruct_path(&self, from: NodeId, to: NodeId) -> GraphResult<Route> {
        for node in [from, to] {
            if node.index() >= self.node_count {
                return Err(GraphError::InvalidNode { node, node_count: self.node_count });
            }
        }

        let mut nodes = vec![from];
        let mut cur = from;
        while cur != to {
            // A shortest path visits each node at most once.
            if nodes.len() > self.node_count {
                return Err(GraphError::NoPath { from, to });
            }
            cur = self.next_hop(cur, to).ok_or(GraphError::NoPath { from, to })?;
            nodes.push(cur);
        }

        Ok(Route { nodes, total_weight: self.distance(from, to) })
    }
}

/// One Floyd–Warshall pass through intermediate node `k`.
#[cfg(not(feature = "parallel"))]
fn relax_pass(dist: &mut [f64], next: &mut [NodeId], via_k: &[f64], k: usize, n: usize) {
    if n == 0 {
        return;
    }
    for (dist_row, next_row) in dist.chunks_mut(n).zip(next.chunks_mut(n)) {
        relax_row(dist_row, next_row, via_k, k);
    }
}

#[cfg(feature = "parallel")]
fn relax_pass(dist: &mut [f64], next: &mut [NodeId], via_k: &[f64], k: usize, n: usize) {
    use rayon::prelude::*;

    if n == 0 {
        return;
    }
    dist.par_chunks_mut(n)
        .zip(next.par_chunks_mut(n))
        .for_each(|(dist_row, next_row)| relax_row(dist_row, next_row, via_k, k));
}

/// Relax row `i` through `k`: `dist[i][j] = min(dist[i][j], dist[i][k] + dist[k][j])`.
#[inline]
fn relax_row(dist_row: &mut [f64], next_row: &mut [NodeId], via_k: &[f64], k: usize) {
    let d_ik = dist_row[k];
    if !d_ik.is_finite() {
        return;
    }
    let hop = next_row[k];
    for (j, &d_kj) in via_k.iter().enumerate() {
        let candidate = d_ik + d_kj;
        if candidate < dist_row[j] {
            dist_row[j] = candidate;
            next_row[j] = hop;
        }
    }
}
