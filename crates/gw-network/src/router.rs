//! Routing trait and the signal-aware Dijkstra implementation.
//!
//! # Time-dependent costs
//!
//! The label of a node is the elapsed time since departure.  Relaxing an
//! edge costs `wait + length / velocity`, where `wait` depends on the
//! absolute moment the traveler reaches the edge's tail and on the edge's
//! signal (zero for unsignalized edges).  A settled node is final: its
//! outgoing edges are relaxed once, at its settled arrival moment, and
//! never towards nodes that are already settled.
//!
//! # Tie-breaking
//!
//! The frontier is ordered by `(elapsed, NodeId)`, so among equally fast
//! frontier nodes the lowest id is settled first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gw_core::{Calibration, EdgeId, Moment, NodeId, RouteConfig, WindowPolicy};
use gw_signal::SignalError;

use crate::graph::RoadGraph;
use crate::{RouteError, RouteResult};

// ── Query ─────────────────────────────────────────────────────────────────────

/// Everything a fastest-path search needs besides the graph and endpoints.
///
/// `calibration` is the snapshot every signal on the route is evaluated
/// with.  Take it once, e.g. from a `CalibrationStore`, and build the query
/// from it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteQuery {
    pub departure:     Moment,
    pub velocity_mps:  f64,
    pub calibration:   Calibration,
    pub window_policy: WindowPolicy,
}

impl RouteQuery {
    pub fn new(departure: Moment, velocity_mps: f64, calibration: Calibration) -> Self {
        Self { departure, velocity_mps, calibration, window_policy: WindowPolicy::Strict }
    }

    pub fn from_config(config: &RouteConfig, departure: Moment, calibration: Calibration) -> Self {
        Self {
            departure,
            velocity_mps: config.velocity_mps,
            calibration,
            window_policy: config.window_policy,
        }
    }

    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    pub fn departing_at(mut self, departure: Moment) -> Self {
        self.departure = departure;
        self
    }

    /// Seconds to traverse `length_m` at this query's speed.
    #[inline]
    pub fn crossing_secs(&self, length_m: f64) -> f64 {
        length_m / self.velocity_mps
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// One traversed edge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSegment {
    pub edge: EdgeId,
    pub from: NodeId,
    pub to:   NodeId,
    /// Time spent at `from` waiting for the edge's signal.
    pub wait_secs: f64,
    /// Time spent on the edge itself.
    pub crossing_secs: f64,
    /// Moment the traveler reaches `to`.
    pub arrive_at: Moment,
}

impl PathSegment {
    #[inline]
    pub fn total_secs(&self) -> f64 {
        self.wait_secs + self.crossing_secs
    }
}

/// The fastest route found for one query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastestPath {
    pub departure:       Moment,
    /// Edges in travel order.
    pub segments:        Vec<PathSegment>,
    pub total_wait_secs: f64,
    /// Waiting plus crossing.
    pub total_secs:      f64,
}

impl FastestPath {
    /// `true` if origin and destination coincide.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn arrival(&self) -> Moment {
        self.segments.last().map_or(self.departure, |s| s.arrive_at)
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.segments.iter().map(|s| s.edge)
    }

    /// Visited nodes in order, origin first.  Empty for a trivial path.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.segments.len() + 1);
        if let Some(first) = self.segments.first() {
            nodes.push(first.from);
        }
        nodes.extend(self.segments.iter().map(|s| s.to));
        nodes
    }

    /// `(node, seconds)` for every node where the traveler actually waits.
    pub fn waits(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.segments
            .iter()
            .filter(|s| s.wait_secs > 0.0)
            .map(|s| (s.from, s.wait_secs))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable fastest-path engine.
///
/// Implementations must be `Send + Sync`: one router instance serves
/// concurrent queries over a shared graph.
pub trait Router: Send + Sync {
    /// Fastest route from `from` to `to` for `query`.
    fn route(
        &self,
        graph: &RoadGraph,
        from:  NodeId,
        to:    NodeId,
        query: &RouteQuery,
    ) -> RouteResult<FastestPath>;

    /// Fastest route between the graph's designated endpoints.
    fn fastest_path(&self, graph: &RoadGraph, query: &RouteQuery) -> RouteResult<FastestPath> {
        self.route(graph, graph.start_node(), graph.end_node(), query)
    }
}

// ── SignalDijkstra ────────────────────────────────────────────────────────────

/// Dijkstra over elapsed time with signal waits evaluated at the tail's
/// arrival moment.
#[derive(Copy, Clone, Debug, Default)]
pub struct SignalDijkstra;

impl Router for SignalDijkstra {
    fn route(
        &self,
        graph: &RoadGraph,
        from:  NodeId,
        to:    NodeId,
        query: &RouteQuery,
    ) -> RouteResult<FastestPath> {
        validate(graph, from, to, query)?;
        let result = dijkstra(graph, from, to, query);
        match &result {
            Ok(path) => log::debug!(
                "graph {}: {from} → {to} departing {}: {} edges, {:.1}s ({:.1}s waiting)",
                graph.id(),
                query.departure,
                path.segments.len(),
                path.total_secs,
                path.total_wait_secs
            ),
            Err(e) => log::debug!("graph {}: {from} → {to} departing {}: {e}", graph.id(), query.departure),
        }
        result
    }
}

fn validate(graph: &RoadGraph, from: NodeId, to: NodeId, query: &RouteQuery) -> RouteResult<()> {
    gw_core::validate_velocity(query.velocity_mps)
        .map_err(|_| RouteError::InvalidVelocity(query.velocity_mps))?;
    for node in [from, to] {
        if !graph.contains_node(node) {
            return Err(RouteError::NodeNotFound(node));
        }
    }
    Ok(())
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Frontier entry.  Reversed ordering turns `BinaryHeap` into a min-heap on
/// `(elapsed, node)`.
#[derive(Copy, Clone, Debug)]
struct State {
    elapsed: f64,
    node:    NodeId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .elapsed
            .total_cmp(&self.elapsed)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Per-node search labels, indexed by `NodeId`.
struct Labels {
    settled:   Vec<bool>,
    /// Best known elapsed seconds since departure.
    elapsed:   Vec<f64>,
    /// Absolute arrival at the best known elapsed time.
    arrival:   Vec<Option<Moment>>,
    prev_edge: Vec<EdgeId>,
    /// Wait incurred on `prev_edge`, recorded when it was relaxed.
    wait_in:   Vec<f64>,
}

impl Labels {
    fn new(n: usize) -> Self {
        Self {
            settled:   vec![false; n],
            elapsed:   vec![f64::INFINITY; n],
            arrival:   vec![None; n],
            prev_edge: vec![EdgeId::INVALID; n],
            wait_in:   vec![0.0; n],
        }
    }
}

fn dijkstra(
    graph: &RoadGraph,
    from:  NodeId,
    to:    NodeId,
    query: &RouteQuery,
) -> RouteResult<FastestPath> {
    if from == to {
        return Ok(FastestPath {
            departure:       query.departure,
            segments:        Vec::new(),
            total_wait_secs: 0.0,
            total_secs:      0.0,
        });
    }

    let mut labels = Labels::new(graph.node_count());
    labels.elapsed[from.index()] = 0.0;
    labels.arrival[from.index()] = Some(query.departure);

    // Edges closed by a signal, in discovery order, to explain an unreachable target.
    let mut blocked: Vec<(EdgeId, Moment)> = Vec::new();

    let mut heap = BinaryHeap::new();
    heap.push(State { elapsed: 0.0, node: from });

    while let Some(State { node, .. }) = heap.pop() {
        if labels.settled[node.index()] {
            continue; // stale entry
        }
        labels.settled[node.index()] = true;
        if node == to {
            break;
        }

        let elapsed = labels.elapsed[node.index()];
        let now = labels.arrival[node.index()].ok_or_else(|| {
            RouteError::Internal(format!("{node} settled without an arrival moment"))
        })?;

        for edge in graph.out_edges(node) {
            let next = graph.edge_to[edge.index()];
            if labels.settled[next.index()] {
                continue;
            }

            let crossing = query.crossing_secs(graph.edge_length_m(edge));
            let wait = match graph.signal(edge) {
                None => 0.0,
                Some(signal) => {
                    match signal.wait_time(now, crossing, query.calibration, query.window_policy) {
                        Ok(wait) => wait,
                        Err(SignalError::NoFeasibleWindow { .. }) => {
                            log::warn!("{edge} closed to a {crossing:.1}s crossing reached at {now}");
                            blocked.push((edge, now));
                            continue;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            };

            let candidate = elapsed + wait + crossing;
            if candidate < labels.elapsed[next.index()] {
                log::trace!("relax {edge}: {node} → {next} wait {wait:.2}s cross {crossing:.2}s");
                labels.elapsed[next.index()] = candidate;
                labels.arrival[next.index()] = Some(now + (wait + crossing));
                labels.prev_edge[next.index()] = edge;
                labels.wait_in[next.index()] = wait;
                heap.push(State { elapsed: candidate, node: next });
            }
        }
    }

    if !labels.prev_edge[to.index()].is_valid() {
        return Err(unreached(graph, from, to, &blocked));
    }

    reconstruct(graph, &labels, from, to, query)
}

/// Classify a failed search.  A closed edge is blamed only if its head can
/// still reach `to` over the graph's edges; otherwise the target is cut off
/// and the result is `NoRoute`.
fn unreached(graph: &RoadGraph, from: NodeId, to: NodeId, blocked: &[(EdgeId, Moment)]) -> RouteError {
    if blocked.is_empty() {
        return RouteError::NoRoute { from, to };
    }
    let reaches = reaches_target(graph, to);
    blocked
        .iter()
        .find(|(edge, _)| reaches[graph.edge_to[edge.index()].index()])
        .map(|&(edge, arrival)| RouteError::InfeasibleWindow { edge, arrival })
        .unwrap_or(RouteError::NoRoute { from, to })
}

/// Nodes with a directed walk to `to`, signals ignored.
fn reaches_target(graph: &RoadGraph, to: NodeId) -> Vec<bool> {
    let n = graph.node_count();
    let mut in_edges: Vec<Vec<EdgeId>> = vec![Vec::new(); n];
    for (i, head) in graph.edge_to.iter().enumerate() {
        in_edges[head.index()].push(EdgeId(i as u32));
    }

    let mut reaches = vec![false; n];
    reaches[to.index()] = true;
    let mut stack = vec![to];
    while let Some(node) = stack.pop() {
        for &edge in &in_edges[node.index()] {
            let tail = graph.edge_from[edge.index()];
            if !reaches[tail.index()] {
                reaches[tail.index()] = true;
                stack.push(tail);
            }
        }
    }
    reaches
}

/// Walk `prev_edge` back from `to`, then reverse into travel order.
fn reconstruct(
    graph:  &RoadGraph,
    labels: &Labels,
    from:   NodeId,
    to:     NodeId,
    query:  &RouteQuery,
) -> RouteResult<FastestPath> {
    let mut segments = Vec::new();
    let mut cur = to;
    while cur != from {
        if segments.len() >= graph.node_count() {
            return Err(RouteError::Internal(format!("predecessor cycle through {cur}")));
        }
        let edge = labels.prev_edge[cur.index()];
        if !edge.is_valid() {
            return Err(RouteError::Internal(format!("{cur} on path has no predecessor")));
        }
        let arrive_at = labels.arrival[cur.index()]
            .ok_or_else(|| RouteError::Internal(format!("{cur} on path has no arrival moment")))?;
        segments.push(PathSegment {
            edge,
            from: graph.edge_from[edge.index()],
            to: cur,
            wait_secs: labels.wait_in[cur.index()],
            crossing_secs: query.crossing_secs(graph.edge_length_m(edge)),
            arrive_at,
        });
        cur = graph.edge_from[edge.index()];
    }
    segments.reverse();

    let total_wait_secs = segments.iter().map(|s| s.wait_secs).sum();
    let total_secs = segments.iter().map(PathSegment::total_secs).sum();

    Ok(FastestPath { departure: query.departure, segments, total_wait_secs, total_secs })
}
