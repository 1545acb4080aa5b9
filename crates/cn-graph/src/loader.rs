//! CSV graph loader.
//!
//! # Weight matrix format
//!
//! A dense `N×N` matrix with a label row and a label column, nodes numbered
//! `1..=N` as in the campus survey data:
//!
//! ```csv
//! ,1,2,3
//! 1,0,120,0
//! 2,120,0,85
//! 3,0,85,0
//! ```
//!
//! Off-diagonal `0` (or any non-positive value, or an empty cell) means "no
//! direct edge".  The diagonal must be `0`.
//!
//! # Position format
//!
//! ```csv
//! node,x,y
//! 1,315,175
//! 2,415,175
//! ```
//!
//! Every node must appear exactly once.  Labels are 1-based.

use std::io::Read;
use std::path::Path;

use cn_core::Point;

use crate::{CampusGraph, GraphError, GraphResult};

/// One row of the positions file.
struct PositionRecord {
    node: u32,
    x:    f32,
    y:    f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`CampusGraph`] from a weight-matrix CSV and an optional
/// positions CSV.
pub fn load_graph_csv(matrix_path: &Path, positions_path: Option<&Path>) -> GraphResult<CampusGraph> {
    let matrix = read_weight_matrix(std::fs::File::open(matrix_path)?)?;
    let positions = match positions_path {
        Some(p) => read_positions(std::fs::File::open(p)?, matrix.len())?,
        None => Vec::new(),
    };
    let graph = CampusGraph::from_source_matrix(matrix, positions)?;
    log::info!(
        "loaded campus graph from {}: {} nodes, {} edges",
        matrix_path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Parse the labelled weight matrix into raw source-form rows.
///
/// The label row and label column are skipped; the result still uses the
/// source convention (`<= 0` = no edge).  Pass it to
/// [`CampusGraph::from_source_matrix`].
pub fn read_weight_matrix<R: Read>(reader: R) -> GraphResult<Vec<Vec<f64>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = record
            .iter()
            .skip(1)
            .enumerate()
            .map(|(j, cell)| parse_weight(cell, i, j))
            .collect::<GraphResult<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parse a `node,x,y` positions file for a graph of `node_count` nodes.
pub fn read_positions<R: Read>(reader: R, node_count: usize) -> GraphResult<Vec<Point>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut positions: Vec<Option<Point>> = vec![None; node_count];
    for result in csv_reader.records() {
        let record = result?;
        let rec = parse_position(&record)?;
        let idx = label_to_index(rec.node, node_count)?;
        if positions[idx].replace(Point::new(rec.x, rec.y)).is_some() {
            return Err(GraphError::Malformed(format!("node {} has two positions", rec.node)));
        }
    }

    positions
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            p.ok_or_else(|| GraphError::Malformed(format!("node {} has no position", i + 1)))
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_weight(cell: &str, row: usize, col: usize) -> GraphResult<f64> {
    if cell.is_empty() {
        return Ok(0.0);
    }
    cell.parse::<f64>().map_err(|_| {
        GraphError::Malformed(format!(
            "matrix cell at node {} / node {} is not a number: {cell:?}",
            row + 1,
            col + 1
        ))
    })
}

fn parse_position(record: &csv::StringRecord) -> GraphResult<PositionRecord> {
    let field = |i: usize, name: &str| {
        record
            .get(i)
            .ok_or_else(|| GraphError::Malformed(format!("position row missing `{name}`")))
    };
    let bad = |name: &str, v: &str| GraphError::Malformed(format!("invalid {name} {v:?} in positions"));

    let node = field(0, "node")?;
    let x = field(1, "x")?;
    let y = field(2, "y")?;
    Ok(PositionRecord {
        node: node.parse().map_err(|_| bad("node", node))?,
        x:    x.parse().map_err(|_| bad("x", x))?,
        y:    y.parse().map_err(|_| bad("y", y))?,
    })
}

/// Convert a 1-based data label into a 0-based index.
fn label_to_index(label: u32, node_count: usize) -> GraphResult<usize> {
    if label == 0 || label as usize > node_count {
        return Err(GraphError::Malformed(format!(
            "node label {label} outside 1..={node_count}"
        )));
    }
    Ok(label as usize - 1)
}
