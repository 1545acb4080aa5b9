//! Campus graph representation and builder.
//!
//! # Data layout
//!
//! Campus graphs are small (low hundreds of nodes) and the shortest-path
//! engine touches every `(i, j)` pair, so the graph is stored as a dense
//! row-major `N×N` weight matrix:
//!
//! ```text
//! weights[i * N + j] = weight of edge i → j, or +inf if there is none
//! weights[i * N + i] = 0
//! ```
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps map-plane `(x, y)` positions to the nearest
//! `NodeId`, so a rendering front end can turn a click into a node.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cn_core::{NodeId, Point};

use crate::{GraphError, GraphResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2], // [x, y]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── CampusGraph ───────────────────────────────────────────────────────────────

/// Immutable weighted directed graph over `N` campus nodes.
///
/// Construct with [`CampusGraph::from_matrix`] (already-normalised weights),
/// [`CampusGraph::from_source_matrix`] (raw data where `<= 0` means "no
/// edge"), or [`CampusGraphBuilder`].  Never mutated after construction.
pub struct CampusGraph {
    /// Map position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    node_count:  usize,
    weights:     Vec<f64>,
    spatial_idx: RTree<NodeEntry>,
}

impl CampusGraph {
    /// Build from a square matrix in internal form: `+inf` for "no edge",
    /// zero diagonal, strictly positive weights elsewhere.
    ///
    /// `positions` must be empty (all nodes at the origin) or have one entry
    /// per node.
    ///
    /// # Errors
    ///
    /// [`GraphError::Malformed`] for a non-square matrix, a non-zero
    /// diagonal, a zero, negative or NaN off-diagonal weight, or a position
    /// count mismatch.
    pub fn from_matrix(matrix: Vec<Vec<f64>>, positions: Vec<Point>) -> GraphResult<Self> {
        let n = matrix.len();
        let mut weights = Vec::with_capacity(n * n);

        for (i, row) in matrix.into_iter().enumerate() {
            if row.len() != n {
                return Err(GraphError::Malformed(format!(
                    "matrix is not square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            for (j, w) in row.into_iter().enumerate() {
                if w.is_nan() {
                    return Err(GraphError::Malformed(format!("weight [{i}][{j}] is NaN")));
                }
                if w < 0.0 {
                    return Err(GraphError::Malformed(format!(
                        "weight [{i}][{j}] is negative ({w})"
                    )));
                }
                if i == j && w != 0.0 {
                    return Err(GraphError::Malformed(format!(
                        "diagonal entry [{i}][{i}] must be 0, got {w}"
                    )));
                }
                if i != j && w == 0.0 {
                    return Err(GraphError::Malformed(format!(
                        "weight [{i}][{j}] is 0; use +inf for no edge"
                    )));
                }
                weights.push(w);
            }
        }

        let node_pos = if positions.is_empty() {
            vec![Point::default(); n]
        } else if positions.len() == n {
            positions
        } else {
            return Err(GraphError::Malformed(format!(
                "{} positions supplied for {n} nodes",
                positions.len()
            )));
        };

        Ok(Self::assemble(n, weights, node_pos))
    }

    /// Build from a matrix in source-data form.
    ///
    /// Off-diagonal entries that are zero or negative mean "no edge" and
    /// become `+inf`.  The diagonal must still be zero.
    pub fn from_source_matrix(matrix: Vec<Vec<f64>>, positions: Vec<Point>) -> GraphResult<Self> {
        let normalised = matrix
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(j, w)| if i != j && w <= 0.0 { f64::INFINITY } else { w })
                    .collect()
            })
            .collect();
        Self::from_matrix(normalised, positions)
    }

    fn assemble(node_count: usize, weights: Vec<f64>, node_pos: Vec<Point>) -> Self {
        let entries: Vec<NodeEntry> = node_pos
            .iter()
            .enumerate()
            .map(|(i, p)| NodeEntry { point: [p.x, p.y], id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Self { node_pos, node_count, weights, spatial_idx }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Number of finite off-diagonal entries.
    pub fn edge_count(&self) -> usize {
        let n = self.node_count;
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j && self.weights[i * n + j].is_finite())
            .count()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// `true` if `node` is inside `0..node_count`.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count
    }

    /// Reject out-of-range ids before they reach the path tables.
    pub fn check_node(&self, node: NodeId) -> GraphResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(GraphError::InvalidNode { node, node_count: self.node_count })
        }
    }

    /// Weight of the direct edge `from → to` (`+inf` if absent).
    #[inline]
    pub fn weight(&self, from: NodeId, to: NodeId) -> f64 {
        self.weights[from.index() * self.node_count + to.index()]
    }

    /// Row `i` of the weight matrix.
    #[inline]
    pub fn row(&self, from: NodeId) -> &[f64] {
        let start = from.index() * self.node_count;
        &self.weights[start..start + self.node_count]
    }

    /// Nodes reachable from `node` by one direct edge.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.row(node)
            .iter()
            .enumerate()
            .filter(move |&(j, w)| j != node.index() && w.is_finite())
            .map(|(j, _)| NodeId(j as u32))
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    /// Positions of `nodes` in order (the waypoints of a route).
    pub fn positions_of(&self, nodes: &[NodeId]) -> Vec<Point> {
        nodes.iter().map(|&n| self.position(n)).collect()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node nearest to `pos`.  `None` only for an empty graph.
    pub fn snap_to_node(&self, pos: Point) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }
}

// ── CampusGraphBuilder ────────────────────────────────────────────────────────

/// Construct a [`CampusGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cn_core::Point;
/// use cn_graph::CampusGraphBuilder;
///
/// let mut b = CampusGraphBuilder::new();
/// let dorm = b.add_node(Point::new(330.0, 190.0));
/// let canteen = b.add_node(Point::new(330.0, 250.0));
/// b.add_road(dorm, canteen, 60.0);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // bidirectional
/// ```
pub struct CampusGraphBuilder {
    nodes: Vec<Point>,
    edges: Vec<(NodeId, NodeId, f64)>,
}

impl CampusGraphBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), edges: Vec::new() }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge.  Parallel edges keep the lowest weight.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.edges.push((from, to, weight));
    }

    /// Add edges in both directions with the same weight.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.add_directed_edge(a, b, weight);
        self.add_directed_edge(b, a, weight);
    }

    /// Add a two-way road weighted by the straight-line distance between
    /// the endpoints' map positions.
    pub fn add_walkway(&mut self, a: NodeId, b: NodeId) {
        let w = self.nodes[a.index()].distance(self.nodes[b.index()]) as f64;
        self.add_road(a, b, w);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consume the builder and produce a validated [`CampusGraph`].
    ///
    /// Self-loops are ignored (the diagonal is always zero).  A zero-weight
    /// edge between distinct nodes is [`GraphError::Malformed`].
    pub fn build(self) -> GraphResult<CampusGraph> {
        let n = self.nodes.len();
        let mut matrix = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 0.0;
        }

        for (from, to, w) in self.edges {
            if from.index() >= n || to.index() >= n {
                let node = if from.index() >= n { from } else { to };
                return Err(GraphError::InvalidNode { node, node_count: n });
            }
            if w.is_nan() {
                return Err(GraphError::Malformed(format!("edge {from} → {to} has NaN weight")));
            }
            if from == to {
                continue;
            }
            let cell = &mut matrix[from.index()][to.index()];
            if w < *cell {
                *cell = w;
            }
        }

        CampusGraph::from_matrix(matrix, self.nodes)
    }
}

impl Default for CampusGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
