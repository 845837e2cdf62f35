//! CSV graph snapshot loader.
//!
//! # CSV format
//!
//! Three tables keyed by the caller's own ids (any `u64`, not necessarily
//! dense).  Edge lengths are derived from node coordinates unless the
//! optional `length_m` column is filled in.
//!
//! ```csv
//! # nodes.csv
//! id,lng,lat
//! 0,121.480981,31.228522
//! 1,121.481535,31.228795
//!
//! # edges.csv
//! id,start_node_id,end_node_id,length_m
//! 0,0,1,
//!
//! # signals.csv
//! edge_id,period,pass_interval,start_moment,is_show
//! 0,190,53,156,false
//! ```
//!
//! `is_show` may be omitted.  The designated start and end nodes are given
//! by external id in [`GraphHeader`].

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use gw_core::{EdgeId, GeoPoint, GraphId, Moment, NodeId};
use gw_signal::PeriodicSignal;

use crate::graph::{RoadGraph, RoadGraphBuilder};
use crate::{NetworkError, NetworkResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:  u64,
    lng: f64,
    lat: f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    id:            u64,
    start_node_id: u64,
    end_node_id:   u64,
    #[serde(default)]
    length_m:      Option<f64>,
}

#[derive(Deserialize)]
struct SignalRecord {
    edge_id:       u64,
    period:        f64,
    pass_interval: f64,
    start_moment:  f64,
    #[serde(default)]
    is_show:       bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Identity and designated endpoints of a graph being loaded.
#[derive(Clone, Debug)]
pub struct GraphHeader {
    pub id:            GraphId,
    pub name:          String,
    pub start_node_id: u64,
    pub end_node_id:   u64,
}

/// A loaded graph plus the mapping from the caller's ids to graph ids.
pub struct LoadedGraph {
    pub graph:    RoadGraph,
    pub node_ids: FxHashMap<u64, NodeId>,
    pub edge_ids: FxHashMap<u64, EdgeId>,
}

/// Load `nodes.csv`, `edges.csv` and `signals.csv` from `dir`.
pub fn load_graph_csv(dir: &Path, header: GraphHeader) -> NetworkResult<LoadedGraph> {
    let open = |file: &str| std::fs::File::open(dir.join(file)).map_err(NetworkError::Io);
    load_graph_reader(header, open("nodes.csv")?, open("edges.csv")?, open("signals.csv")?)
}

/// Like [`load_graph_csv`] but reads from any `Read` sources.
pub fn load_graph_reader<N: Read, E: Read, S: Read>(
    header:  GraphHeader,
    nodes:   N,
    edges:   E,
    signals: S,
) -> NetworkResult<LoadedGraph> {
    let mut b = RoadGraphBuilder::new(header.name).with_id(header.id);

    // ── Nodes ─────────────────────────────────────────────────────────────
    let mut node_ids: FxHashMap<u64, NodeId> = FxHashMap::default();
    for row in csv::Reader::from_reader(nodes).deserialize::<NodeRecord>() {
        let row = row.map_err(parse_error)?;
        let id = b.add_node(GeoPoint::new(row.lng, row.lat));
        if node_ids.insert(row.id, id).is_some() {
            return Err(NetworkError::Parse(format!("duplicate node id {}", row.id)));
        }
    }
    let node = |external: u64, what: &str| {
        node_ids
            .get(&external)
            .copied()
            .ok_or_else(|| NetworkError::Parse(format!("{what} references unknown node id {external}")))
    };

    // ── Edges ─────────────────────────────────────────────────────────────
    let mut edge_ids: FxHashMap<u64, EdgeId> = FxHashMap::default();
    for row in csv::Reader::from_reader(edges).deserialize::<EdgeRecord>() {
        let row = row.map_err(parse_error)?;
        let what = format!("edge {}", row.id);
        let from = node(row.start_node_id, &what)?;
        let to   = node(row.end_node_id, &what)?;
        let id = match row.length_m {
            Some(length_m) => b.add_edge_with_length(from, to, length_m),
            None => b.add_edge(from, to),
        };
        if edge_ids.insert(row.id, id).is_some() {
            return Err(NetworkError::Parse(format!("duplicate edge id {}", row.id)));
        }
    }

    // ── Signals ───────────────────────────────────────────────────────────
    for row in csv::Reader::from_reader(signals).deserialize::<SignalRecord>() {
        let row = row.map_err(parse_error)?;
        let edge = edge_ids.get(&row.edge_id).copied().ok_or_else(|| {
            NetworkError::Parse(format!("signal references unknown edge id {}", row.edge_id))
        })?;
        let signal = PeriodicSignal {
            period:        row.period,
            pass_interval: row.pass_interval,
            start_moment:  Moment(row.start_moment),
            is_show:       row.is_show,
        };
        b.attach_signal(edge, signal)?;
    }

    let start = node(header.start_node_id, "graph start")?;
    let end   = node(header.end_node_id, "graph end")?;
    b.endpoints(start, end);

    Ok(LoadedGraph { graph: b.build()?, node_ids, edge_ids })
}

fn parse_error(e: csv::Error) -> NetworkError {
    NetworkError::Parse(e.to_string())
}
