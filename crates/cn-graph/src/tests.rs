//! Unit tests for cn-graph.
//!
//! All graphs are built in memory; the loader tests parse CSV from a
//! `Cursor` so no fixture files are needed.

#[cfg(test)]
mod helpers {
    use cn_core::{NodeId, Point};
    use crate::{CampusGraph, CampusGraphBuilder};

    /// Four nodes on a square, every side weight 10, both directions.
    ///
    /// ```text
    ///   0 ── 1
    ///   │    │
    ///   3 ── 2
    /// ```
    ///
    /// 0→2 has two shortest paths (via 1 and via 3), both weight 20.
    pub fn square() -> (CampusGraph, [NodeId; 4]) {
        let mut b = CampusGraphBuilder::new();
        let n0 = b.add_node(Point::new(0.0, 0.0));
        let n1 = b.add_node(Point::new(100.0, 0.0));
        let n2 = b.add_node(Point::new(100.0, 100.0));
        let n3 = b.add_node(Point::new(0.0, 100.0));
        b.add_road(n0, n1, 10.0);
        b.add_road(n1, n2, 10.0);
        b.add_road(n2, n3, 10.0);
        b.add_road(n3, n0, 10.0);
        (b.build().unwrap(), [n0, n1, n2, n3])
    }

    /// Two connected components: {0, 1} and {2}.
    pub fn split() -> CampusGraph {
        let mut b = CampusGraphBuilder::new();
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(10.0, 0.0));
        b.add_node(Point::new(50.0, 50.0));
        b.add_road(a, c, 5.0);
        b.build().unwrap()
    }
}

// ── Construction & validation ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use cn_core::{NodeId, Point};
    use crate::{CampusGraph, CampusGraphBuilder, GraphError};

    #[test]
    fn empty_build() {
        let g = CampusGraphBuilder::new().build().unwrap();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.snap_to_node(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn parallel_edges_keep_minimum() {
        let mut b = CampusGraphBuilder::new();
        let a = b.add_node(Point::default());
        let c = b.add_node(Point::default());
        b.add_directed_edge(a, c, 40.0);
        b.add_directed_edge(a, c, 25.0);
        b.add_directed_edge(a, c, 30.0);
        let g = b.build().unwrap();
        assert_eq!(g.weight(a, c), 25.0);
        assert!(g.weight(c, a).is_infinite());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn walkway_uses_euclidean_length() {
        let mut b = CampusGraphBuilder::new();
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(30.0, 40.0));
        b.add_walkway(a, c);
        let g = b.build().unwrap();
        assert!((g.weight(a, c) - 50.0).abs() < 1e-6);
        assert_eq!(g.weight(a, c), g.weight(c, a));
    }

    #[test]
    fn self_loops_ignored() {
        let mut b = CampusGraphBuilder::new();
        let a = b.add_node(Point::default());
        b.add_directed_edge(a, a, 7.0);
        let g = b.build().unwrap();
        assert_eq!(g.weight(a, a), 0.0);
    }

    #[test]
    fn edge_to_unknown_node_rejected() {
        let mut b = CampusGraphBuilder::new();
        let a = b.add_node(Point::default());
        b.add_directed_edge(a, NodeId(9), 1.0);
        assert!(matches!(
            b.build(),
            Err(GraphError::InvalidNode { node: NodeId(9), node_count: 1 })
        ));
    }

    #[test]
    fn nan_weight_rejected() {
        let mut b = CampusGraphBuilder::new();
        let a = b.add_node(Point::default());
        let c = b.add_node(Point::default());
        b.add_directed_edge(a, c, f64::NAN);
        assert!(matches!(b.build(), Err(GraphError::Malformed(_))));
    }

    #[test]
    fn matrix_must_be_square() {
        let m = vec![vec![0.0, 1.0], vec![1.0]];
        assert!(matches!(CampusGraph::from_matrix(m, vec![]), Err(GraphError::Malformed(_))));
    }

    #[test]
    fn matrix_diagonal_must_be_zero() {
        let m = vec![vec![3.0, 1.0], vec![1.0, 0.0]];
        assert!(matches!(CampusGraph::from_matrix(m, vec![]), Err(GraphError::Malformed(_))));
    }

    #[test]
    fn zero_weight_between_distinct_nodes_rejected() {
        let m = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        assert!(matches!(CampusGraph::from_matrix(m, vec![]), Err(GraphError::Malformed(_))));

        let mut b = CampusGraphBuilder::new();
        let a = b.add_node(Point::default());
        let c = b.add_node(Point::new(5.0, 0.0));
        b.add_road(a, c, 0.0);
        assert!(matches!(b.build(), Err(GraphError::Malformed(_))));
    }

    #[test]
    fn matrix_rejects_negative_weight() {
        let m = vec![vec![0.0, -1.0], vec![1.0, 0.0]];
        assert!(matches!(CampusGraph::from_matrix(m, vec![]), Err(GraphError::Malformed(_))));
    }

    #[test]
    fn source_matrix_zero_means_no_edge() {
        let m = vec![
            vec![0.0, 120.0, 0.0],
            vec![120.0, 0.0, -1.0],
            vec![0.0, 85.0, 0.0],
        ];
        let g = CampusGraph::from_source_matrix(m, vec![]).unwrap();
        assert_eq!(g.weight(NodeId(0), NodeId(1)), 120.0);
        assert!(g.weight(NodeId(0), NodeId(2)).is_infinite());
        assert!(g.weight(NodeId(1), NodeId(2)).is_infinite());
        assert_eq!(g.weight(NodeId(2), NodeId(1)), 85.0);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn position_count_mismatch_rejected() {
        let m = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let r = CampusGraph::from_matrix(m, vec![Point::default()]);
        assert!(matches!(r, Err(GraphError::Malformed(_))));
    }

    #[test]
    fn neighbors_skip_self_and_missing() {
        let (g, [n0, n1, _n2, n3]) = super::helpers::square();
        let mut out: Vec<_> = g.neighbors(n0).collect();
        out.sort();
        assert_eq!(out, vec![n1, n3]);
    }

    #[test]
    fn check_node_range() {
        let (g, [n0, ..]) = super::helpers::square();
        assert!(g.check_node(n0).is_ok());
        assert!(matches!(
            g.check_node(NodeId(4)),
            Err(GraphError::InvalidNode { node_count: 4, .. })
        ));
    }

    #[test]
    fn snap_to_nearest_node() {
        let (g, [n0, n1, n2, n3]) = super::helpers::square();
        assert_eq!(g.snap_to_node(Point::new(3.0, -2.0)), Some(n0));
        assert_eq!(g.snap_to_node(Point::new(90.0, 12.0)), Some(n1));
        assert_eq!(g.snap_to_node(Point::new(140.0, 160.0)), Some(n2));
        assert_eq!(g.snap_to_node(Point::new(-5.0, 70.0)), Some(n3));
        assert_eq!(g.positions_of(&[n0, n2]), vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)]);
    }
}

// ── Shortest paths ────────────────────────────────────────────────────────────

#[cfg(test)]
mod paths {
    use cn_core::NodeId;
    use crate::{GraphError, ShortestPaths};

    #[test]
    fn tie_goes_to_lowest_intermediate() {
        let (g, [n0, n1, n2, _n3]) = super::helpers::square();
        let sp = ShortestPaths::compute(&g);
        let route = sp.reconstruct_path(n0, n2).unwrap();
        assert_eq!(route.nodes, vec![n0, n1, n2]);
        assert_eq!(route.total_weight, 20.0);
    }

    #[test]
    fn repeated_runs_identical() {
        let (g, [n0, _, n2, _]) = super::helpers::square();
        let first = ShortestPaths::compute(&g);
        for _ in 0..5 {
            let again = ShortestPaths::compute(&g);
            assert_eq!(again, first);
            assert_eq!(again.reconstruct_path(n0, n2).unwrap(), first.reconstruct_path(n0, n2).unwrap());
        }
    }

    #[test]
    fn diagonal_is_zero_and_self_route_is_single_node() {
        let (g, nodes) = super::helpers::square();
        let sp = ShortestPaths::compute(&g);
        for n in nodes {
            assert_eq!(sp.distance(n, n), 0.0);
            let r = sp.reconstruct_path(n, n).unwrap();
            assert_eq!(r.nodes, vec![n]);
            assert_eq!(r.total_weight, 0.0);
            assert!(r.is_trivial());
        }
    }

    #[test]
    fn unreachable_pair_is_no_path() {
        let g = super::helpers::split();
        let sp = ShortestPaths::compute(&g);
        assert!(sp.distance(NodeId(0), NodeId(2)).is_infinite());
        assert!(!sp.is_reachable(NodeId(0), NodeId(2)));
        assert!(matches!(
            sp.reconstruct_path(NodeId(0), NodeId(2)),
            Err(GraphError::NoPath { from: NodeId(0), to: NodeId(2) })
        ));
        assert!(sp.is_reachable(NodeId(1), NodeId(0)));
    }

    #[test]
    fn out_of_range_is_invalid_node() {
        let (g, [n0, ..]) = super::helpers::square();
        let sp = ShortestPaths::compute(&g);
        assert!(matches!(
            sp.reconstruct_path(n0, NodeId(17)),
            Err(GraphError::InvalidNode { node: NodeId(17), node_count: 4 })
        ));
        assert!(matches!(
            sp.reconstruct_path(NodeId::INVALID, n0),
            Err(GraphError::InvalidNode { .. })
        ));
    }

    #[test]
    fn one_way_edges_respected() {
        use cn_core::Point;
        use crate::CampusGraphBuilder;

        let mut b = CampusGraphBuilder::new();
        let a = b.add_node(Point::default());
        let c = b.add_node(Point::default());
        let d = b.add_node(Point::default());
        b.add_directed_edge(a, c, 1.0);
        b.add_directed_edge(c, d, 1.0);
        b.add_directed_edge(d, a, 1.0);
        let sp = ShortestPaths::compute(&b.build().unwrap());
        assert_eq!(sp.distance(a, d), 2.0);
        assert_eq!(sp.distance(d, c), 2.0);
        assert_eq!(sp.reconstruct_path(c, a).unwrap().nodes, vec![c, d, a]);
    }

    #[test]
    fn empty_graph_computes() {
        let g = crate::CampusGraphBuilder::new().build().unwrap();
        let sp = ShortestPaths::compute(&g);
        assert_eq!(sp.node_count(), 0);
    }
}

// ── Brute-force comparison on random graphs ───────────────────────────────────

#[cfg(test)]
mod brute_force {
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    use cn_core::{NodeId, Point};
    use crate::{CampusGraph, CampusGraphBuilder, ShortestPaths};

    /// Random directed graph with integer weights so sums are exact in f64.
    fn random_graph(rng: &mut SmallRng) -> CampusGraph {
        let n = rng.gen_range(1..=7usize);
        let mut b = CampusGraphBuilder::new();
        for _ in 0..n {
            b.add_node(Point::default());
        }
        for i in 0..n {
            for j in 0..n {
                if i != j && rng.gen_range(0..100) < 40 {
                    let w = rng.gen_range(1..=50) as f64;
                    b.add_directed_edge(NodeId(i as u32), NodeId(j as u32), w);
                }
            }
        }
        b.build().unwrap()
    }

    /// Cheapest simple path by exhaustive DFS.
    fn dfs_best(g: &CampusGraph, cur: usize, to: usize, visited: &mut Vec<bool>, acc: f64, best: &mut f64) {
        if cur == to {
            if acc < *best {
                *best = acc;
            }
            return;
        }
        for next in g.neighbors(NodeId(cur as u32)) {
            let j = next.index();
            if visited[j] {
                continue;
            }
            visited[j] = true;
            let w = g.weight(NodeId(cur as u32), next);
            dfs_best(g, j, to, visited, acc + w, best);
            visited[j] = false;
        }
    }

    #[test]
    fn matches_exhaustive_search() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let g = random_graph(&mut rng);
            let sp = ShortestPaths::compute(&g);
            let n = g.node_count();

            for i in 0..n {
                for j in 0..n {
                    let mut visited = vec![false; n];
                    visited[i] = true;
                    let mut best = f64::INFINITY;
                    dfs_best(&g, i, j, &mut visited, 0.0, &mut best);

                    let (from, to) = (NodeId(i as u32), NodeId(j as u32));
                    assert_eq!(sp.distance(from, to), best, "distance {i}→{j}");

                    match sp.reconstruct_path(from, to) {
                        Ok(route) => {
                            assert!(best.is_finite());
                            assert_eq!(route.origin(), from);
                            assert_eq!(route.destination(), to);
                            let sum: f64 = route.segments().map(|(a, b)| g.weight(a, b)).sum();
                            assert_eq!(sum, best, "route weight {i}→{j}");
                            assert_eq!(route.total_weight, best);

                            let mut seen = route.nodes.clone();
                            seen.sort();
                            seen.dedup();
                            assert_eq!(seen.len(), route.nodes.len(), "route revisits a node");
                        }
                        Err(_) => assert!(best.is_infinite()),
                    }
                }
            }

            // Idempotence.
            assert_eq!(ShortestPaths::compute(&g), sp);
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use crate::{AllPairsRouter, GraphError, Router};

    #[test]
    fn all_pairs_router_delegates() {
        let (g, [n0, n1, n2, n3]) = super::helpers::square();
        let r = AllPairsRouter::new(&g);
        assert_eq!(r.node_count(), 4);

        let route = r.route(n3, n1).unwrap();
        assert_eq!(route.nodes, vec![n3, n0, n1]);
        assert_eq!(route.segment_count(), 2);
        let segs: Vec<_> = route.segments().collect();
        assert_eq!(segs, vec![(n3, n0), (n0, n1)]);
        assert_eq!(r.paths().distance(n3, n1), 20.0);
        assert!(r.route(n2, n2).unwrap().is_trivial());
    }

    #[test]
    fn router_from_precomputed_tables() {
        use crate::ShortestPaths;

        let (g, [n0, _, n2, _]) = super::helpers::square();
        let r = AllPairsRouter::from_paths(ShortestPaths::compute(&g));
        assert_eq!(r.node_count(), 4);
        assert_eq!(r.route(n0, n2).unwrap(), AllPairsRouter::new(&g).route(n0, n2).unwrap());
    }

    #[test]
    fn router_reports_no_path() {
        let g = super::helpers::split();
        let r = AllPairsRouter::new(&g);
        assert!(matches!(
            r.route(cn_core::NodeId(2), cn_core::NodeId(0)),
            Err(GraphError::NoPath { .. })
        ));
    }

    #[test]
    fn route_display() {
        let (g, [n0, _, n2, _]) = super::helpers::square();
        let r = AllPairsRouter::new(&g);
        assert_eq!(r.route(n0, n2).unwrap().to_string(), "0 → 1 → 2 (weight 20)");
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use cn_core::{NodeId, Point};
    use crate::{read_positions, read_weight_matrix, CampusGraph, GraphError};

    const MATRIX: &str = "\
,1,2,3
1,0,120,0
2,120,0,85
3,,85,0
";

    const POSITIONS: &str = "\
node,x,y
2,415,175
1,315,175
3,415,260
";

    #[test]
    fn matrix_skips_labels() {
        let m = read_weight_matrix(Cursor::new(MATRIX)).unwrap();
        assert_eq!(m, vec![
            vec![0.0, 120.0, 0.0],
            vec![120.0, 0.0, 85.0],
            vec![0.0, 85.0, 0.0],
        ]);
    }

    #[test]
    fn matrix_rejects_non_numeric_cell() {
        let bad = ",1,2\n1,0,x\n2,1,0\n";
        assert!(matches!(read_weight_matrix(Cursor::new(bad)), Err(GraphError::Malformed(_))));
    }

    #[test]
    fn positions_out_of_order() {
        let p = read_positions(Cursor::new(POSITIONS), 3).unwrap();
        assert_eq!(p[0], Point::new(315.0, 175.0));
        assert_eq!(p[1], Point::new(415.0, 175.0));
        assert_eq!(p[2], Point::new(415.0, 260.0));
    }

    #[test]
    fn positions_reject_zero_label() {
        let bad = "node,x,y\n0,1,1\n";
        assert!(matches!(read_positions(Cursor::new(bad), 1), Err(GraphError::Malformed(_))));
    }

    #[test]
    fn positions_reject_duplicate_and_missing() {
        let dup = "node,x,y\n1,1,1\n1,2,2\n";
        assert!(matches!(read_positions(Cursor::new(dup), 2), Err(GraphError::Malformed(_))));
        let missing = "node,x,y\n1,1,1\n";
        assert!(matches!(read_positions(Cursor::new(missing), 2), Err(GraphError::Malformed(_))));
    }

    #[test]
    fn loaded_graph_routes() {
        let m = read_weight_matrix(Cursor::new(MATRIX)).unwrap();
        let p = read_positions(Cursor::new(POSITIONS), m.len()).unwrap();
        let g = CampusGraph::from_source_matrix(m, p).unwrap();
        let sp = crate::ShortestPaths::compute(&g);
        let r = sp.reconstruct_path(NodeId(0), NodeId(2)).unwrap();
        assert_eq!(r.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(r.total_weight, 205.0);
        assert_eq!(g.snap_to_node(Point::new(410.0, 250.0)), Some(NodeId(2)));
    }
}
