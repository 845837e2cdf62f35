//! Road graph snapshot and builder.
//!
//! # Data layout
//!
//! Edges live in an arena indexed by `EdgeId`, in the order they were added
//! (`edge_from`, `edge_to`, `edge_length_m`, `edge_signal`).  Outgoing
//! adjacency is a **Compressed Sparse Row** index over that arena: the
//! outgoing edges of `NodeId n` are
//!
//! ```text
//! out_edge_ids[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! The index is derived from the arena once, in [`RoadGraphBuilder::build`].
//! A `RoadGraph` is never mutated afterwards, so the index cannot go stale.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `[lng, lat]` to the nearest `NodeId` so
//! callers can turn a raw coordinate into a routable node.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use gw_core::{CalibrationRecord, CalibrationStore, EdgeId, GeoPoint, GraphId, Moment, NodeId, haversine_m};
use gw_signal::PeriodicSignal;

use crate::{NetworkError, NetworkResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lng, lat]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared planar distance in degree space.  Good enough to rank
    /// candidates within one city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_lng = self.point[0] - point[0];
        let d_lat = self.point[1] - point[1];
        d_lng * d_lng + d_lat * d_lat
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Immutable directed road graph with optional per-edge signals.
///
/// Arrays are `pub` for indexed access in the router's inner loop.  Build
/// through [`RoadGraphBuilder`].
pub struct RoadGraph {
    id:         GraphId,
    name:       String,
    start_node: NodeId,
    end_node:   NodeId,

    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR adjacency over the edge arena ─────────────────────────────────
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,
    /// Edge ids grouped by source node.
    pub out_edge_ids: Vec<EdgeId>,

    // ── Edge arena (indexed by EdgeId) ────────────────────────────────────
    pub edge_from: Vec<NodeId>,
    pub edge_to: Vec<NodeId>,
    /// Haversine length in metres, fixed at build time.
    pub edge_length_m: Vec<f64>,
    /// At most one signal per edge.
    pub edge_signal: Vec<Option<PeriodicSignal>>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadGraph {
    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Designated origin of the graph's commute.
    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    /// Designated destination of the graph's commute.
    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn signal_count(&self) -> usize {
        self.edge_signal.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn edge_length_m(&self, edge: EdgeId) -> f64 {
        self.edge_length_m[edge.index()]
    }

    #[inline]
    pub fn signal(&self, edge: EdgeId) -> Option<&PeriodicSignal> {
        self.edge_signal[edge.index()].as_ref()
    }

    /// Calibrate `store` from the light on `reference`, observed turning
    /// green at `observed`.  The delta is `observed` minus that light's
    /// nominal `start_moment`.
    pub fn calibrate_from(
        &self,
        store:     &CalibrationStore,
        reference: EdgeId,
        observed:  Moment,
        now:       Moment,
    ) -> NetworkResult<CalibrationRecord> {
        let signal = self
            .edge_signal
            .get(reference.index())
            .ok_or(NetworkError::UnknownEdge(reference))?
            .as_ref()
            .ok_or(NetworkError::NoSignal(reference))?;
        Ok(store.calibrate(observed, signal.start_moment, now))
    }

    /// `(edge, signal)` for every signalized edge, in edge order.
    pub fn signals(&self) -> impl Iterator<Item = (EdgeId, &PeriodicSignal)> + '_ {
        self.edge_signal
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (EdgeId(i as u32), s)))
    }

    /// Outgoing edges of `node`.  A contiguous slice of the CSR index.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        self.out_edge_ids[start..end].iter().copied()
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest node to `pos`, or `None` for an empty graph.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lng, pos.lat])
            .map(|e| e.id)
    }

    /// Up to `k` nodes nearest to `pos`, closest first.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lng, pos.lat])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Assemble a [`RoadGraph`] from coordinates and edge endpoint pairs.
///
/// Node and edge ids are handed out sequentially and stay valid in the built
/// graph.  Edge lengths are derived from the endpoint coordinates when
/// [`build`](Self::build) runs, unless given explicitly.
///
/// # Example
///
/// ```
/// use gw_core::{GeoPoint, Moment};
/// use gw_network::RoadGraphBuilder;
/// use gw_signal::PeriodicSignal;
///
/// let mut b = RoadGraphBuilder::new("commute");
/// let home = b.add_node(GeoPoint::new(121.480981, 31.228522));
/// let work = b.add_node(GeoPoint::new(121.481535, 31.228795));
/// let e = b.add_edge(home, work);
/// b.attach_signal(e, PeriodicSignal::new(190.0, 58.0, Moment(1_000.0)).unwrap()).unwrap();
/// b.endpoints(home, work);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.edge_count(), 1);
/// assert!(graph.edge_length_m(e) > 0.0);
/// ```
pub struct RoadGraphBuilder {
    id:        GraphId,
    name:      String,
    endpoints: Option<(NodeId, NodeId)>,
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
    signals:   Vec<Option<PeriodicSignal>>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: Option<f64>,
}

impl RoadGraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id:        GraphId(0),
            name:      name.into(),
            endpoints: None,
            nodes:     Vec::new(),
            raw_edges: Vec::new(),
            signals:   Vec::new(),
        }
    }

    pub fn with_id(mut self, id: GraphId) -> Self {
        self.id = id;
        self
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge whose length is the haversine distance
    /// between its endpoints.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> EdgeId {
        self.push_edge(from, to, None)
    }

    /// Add a directed edge with a caller-supplied length in metres.
    pub fn add_edge_with_length(&mut self, from: NodeId, to: NodeId, length_m: f64) -> EdgeId {
        self.push_edge(from, to, Some(length_m))
    }

    /// Add `a → b` and its mirror `b → a`.
    pub fn add_road(&mut self, a: NodeId, b: NodeId) -> (EdgeId, EdgeId) {
        (self.add_edge(a, b), self.add_edge(b, a))
    }

    fn push_edge(&mut self, from: NodeId, to: NodeId, length_m: Option<f64>) -> EdgeId {
        let id = EdgeId(self.raw_edges.len() as u32);
        self.raw_edges.push(RawEdge { from, to, length_m });
        self.signals.push(None);
        id
    }

    /// Attach `signal` to `edge`.  Each edge carries at most one.
    pub fn attach_signal(&mut self, edge: EdgeId, signal: PeriodicSignal) -> NetworkResult<()> {
        signal
            .validate()
            .map_err(|source| NetworkError::Signal { edge, source })?;
        let slot = self
            .signals
            .get_mut(edge.index())
            .ok_or(NetworkError::UnknownEdge(edge))?;
        if slot.is_some() {
            return Err(NetworkError::DuplicateSignal(edge));
        }
        *slot = Some(signal);
        Ok(())
    }

    /// Designate the commute's origin and destination.
    pub fn endpoints(&mut self, start: NodeId, end: NodeId) {
        self.endpoints = Some((start, end));
    }

    /// Validate and freeze into a [`RoadGraph`].
    ///
    /// Fails if an edge or the designated endpoints reference a missing
    /// node, or an explicit length is negative or not finite.
    pub fn build(self) -> NetworkResult<RoadGraph> {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();
        let known = |n: NodeId| -> NetworkResult<NodeId> {
            if n.index() < node_count { Ok(n) } else { Err(NetworkError::UnknownNode(n)) }
        };

        let (start_node, end_node) = self.endpoints.ok_or(NetworkError::MissingEndpoints)?;
        known(start_node)?;
        known(end_node)?;

        let mut edge_from     = Vec::with_capacity(edge_count);
        let mut edge_to       = Vec::with_capacity(edge_count);
        let mut edge_length_m = Vec::with_capacity(edge_count);

        for (i, e) in self.raw_edges.iter().enumerate() {
            let from = known(e.from)?;
            let to   = known(e.to)?;
            let length_m = e
                .length_m
                .unwrap_or_else(|| haversine_m(self.nodes[from.index()], self.nodes[to.index()]));
            if !(length_m.is_finite() && length_m >= 0.0) {
                return Err(NetworkError::InvalidLength { edge: EdgeId(i as u32), length_m });
            }
            edge_from.push(from);
            edge_to.push(to);
            edge_length_m.push(length_m);
        }

        // CSR: count per source, prefix-sum, then scatter edge ids.
        let mut node_out_start = vec![0u32; node_count + 1];
        for from in &edge_from {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let mut cursor = node_out_start.clone();
        let mut out_edge_ids = vec![EdgeId::INVALID; edge_count];
        for (i, from) in edge_from.iter().enumerate() {
            let slot = &mut cursor[from.index()];
            out_edge_ids[*slot as usize] = EdgeId(i as u32);
            *slot += 1;
        }

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, pos)| NodeEntry { point: [pos.lng, pos.lat], id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let graph = RoadGraph {
            id: self.id,
            name: self.name,
            start_node,
            end_node,
            node_pos: self.nodes,
            node_out_start,
            out_edge_ids,
            edge_from,
            edge_to,
            edge_length_m,
            edge_signal: self.signals,
            spatial_idx,
        };
        log::info!(
            "built graph {} {:?}: {} nodes, {} edges, {} signals",
            graph.id,
            graph.name,
            graph.node_count(),
            graph.edge_count(),
            graph.signal_count()
        );
        Ok(graph)
    }
}
