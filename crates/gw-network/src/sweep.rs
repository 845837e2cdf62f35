//! Fastest paths for a range of departure moments.
//!
//! Each departure is an independent query over the same immutable graph and
//! the same calibration snapshot, so the queries need no coordination.  With
//! the `parallel` feature they run on Rayon's thread pool; results are
//! returned in the order of `departures` either way.

use gw_core::Moment;

use crate::graph::RoadGraph;
use crate::router::{FastestPath, RouteQuery, Router};
use crate::RouteResult;

/// Route between the graph's designated endpoints once per departure.
///
/// Every field of `query` except `departure` is shared by all runs.
pub fn sweep_departures<R: Router>(
    router:     &R,
    graph:      &RoadGraph,
    departures: &[Moment],
    query:      &RouteQuery,
) -> Vec<RouteResult<FastestPath>> {
    #[cfg(not(feature = "parallel"))]
    {
        departures
            .iter()
            .map(|&t| router.fastest_path(graph, &query.departing_at(t)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        departures
            .par_iter()
            .map(|&t| router.fastest_path(graph, &query.departing_at(t)))
            .collect()
    }
}

/// The departure with the shortest total travel time, ignoring departures
/// that have no feasible path.  Ties go to the earliest entry in
/// `departures`.
pub fn best_departure<R: Router>(
    router:     &R,
    graph:      &RoadGraph,
    departures: &[Moment],
    query:      &RouteQuery,
) -> Option<FastestPath> {
    sweep_departures(router, graph, departures, query)
        .into_iter()
        .filter_map(Result::ok)
        .fold(None, |best: Option<FastestPath>, path| match best {
            Some(b) if b.total_secs <= path.total_secs => Some(b),
            _ => Some(path),
        })
}
