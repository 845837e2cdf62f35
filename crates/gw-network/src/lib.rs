//! `gw-network`: road graph snapshots and signal-aware fastest paths.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `RoadGraph` (edge arena + CSR + R-tree), `RoadGraphBuilder`  |
//! | [`router`] | `Router` trait, `RouteQuery`, `FastestPath`, `SignalDijkstra`|
//! | [`sweep`]  | `sweep_departures`, `best_departure`                         |
//! | [`loader`] | `load_graph_csv`, `load_graph_reader`                        |
//! | [`error`]  | `NetworkError`, `RouteError`, result aliases                 |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Departure sweeps run on Rayon's thread pool.              |
//! | `serde`    | Derives `Serialize`/`Deserialize` on query/result types.  |

pub mod error;
pub mod graph;
pub mod loader;
pub mod router;
pub mod sweep;


pub use error::{NetworkError, NetworkResult, RouteError, RouteResult};
pub use graph::{RoadGraph, RoadGraphBuilder};
pub use loader::{GraphHeader, LoadedGraph, load_graph_csv, load_graph_reader};
pub use router::{FastestPath, PathSegment, RouteQuery, Router, SignalDijkstra};
pub use sweep::{best_departure, sweep_departures};
