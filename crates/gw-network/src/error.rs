//! Graph construction and routing error types.

use thiserror::Error;

use gw_core::{EdgeId, Moment, NodeId};
use gw_signal::SignalError;

/// Errors raised while building or loading a [`RoadGraph`](crate::RoadGraph).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("edge {0} not found in graph")]
    UnknownEdge(EdgeId),

    #[error("edge {0} already has a signal")]
    DuplicateSignal(EdgeId),

    #[error("edge {0} has no signal")]
    NoSignal(EdgeId),

    #[error("edge {edge} has invalid length {length_m}")]
    InvalidLength { edge: EdgeId, length_m: f64 },

    #[error("graph has no designated start and end nodes")]
    MissingEndpoints,

    #[error("signal on edge {edge}: {source}")]
    Signal {
        edge:   EdgeId,
        #[source]
        source: SignalError,
    },

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Outcome of a failed fastest-path query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// The destination has no predecessor once the search is exhausted.
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    /// The destination stayed unreached and at least one edge was closed to
    /// the traveler because no green window fit the crossing.  `edge` and
    /// `arrival` describe the first such edge from which the target is
    /// still reachable.
    #[error("no feasible route: edge {edge} admits no crossing when reached at {arrival}")]
    InfeasibleWindow { edge: EdgeId, arrival: Moment },

    #[error("velocity must be finite and positive, got {0}")]
    InvalidVelocity(f64),

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("signal error: {0}")]
    Signal(#[from] SignalError),

    /// The search reached a state it should never reach.
    #[error("internal routing error: {0}")]
    Internal(String),
}

impl RouteError {
    /// No feasible path exists for this departure.
    pub fn is_no_path(&self) -> bool {
        matches!(self, RouteError::NoRoute { .. } | RouteError::InfeasibleWindow { .. })
    }

    /// The query was rejected before the search ran.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RouteError::InvalidVelocity(_) | RouteError::NodeNotFound(_))
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
