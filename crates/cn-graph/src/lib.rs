//! `cn-graph` — campus graph, all-pairs shortest paths, and routing.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`graph`]  | `CampusGraph` (dense weight matrix + R-tree), `CampusGraphBuilder` |
//! | [`paths`]  | `ShortestPaths` — Floyd–Warshall distance and next-hop tables |
//! | [`router`] | `Router` trait, `Route`, `AllPairsRouter`                     |
//! | [`loader`] | `load_graph_csv`, `read_weight_matrix`, `read_positions`      |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs each Floyd–Warshall pass over rows on Rayon.         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod graph;
pub mod loader;
pub mod paths;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{CampusGraph, CampusGraphBuilder};
pub use loader::{load_graph_csv, read_positions, read_weight_matrix};
pub use paths::ShortestPaths;
pub use router::{AllPairsRouter, Route, Router};
