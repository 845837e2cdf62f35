//! commute: fastest signal-aware route across a small Shanghai graph.
//!
//! Usage: `commute [config.json]`
//!
//! The optional config is a JSON `RouteConfig`, e.g.
//! `{"velocity_mps": 6.5, "window_policy": "strict"}`.  Set `RUST_LOG=debug`
//! to see per-query logging.

mod network;

use std::path::Path;

use anyhow::{Context, Result};

use gw_core::{Calibration, CalibrationRecord, CalibrationStore, Moment, RouteConfig};
use gw_network::{RouteQuery, Router, SignalDijkstra, best_departure};

use network::{REFERENCE_SIGNAL_EDGE, build_network};

/// Process-wide calibration, as a server would hold it.
static CALIBRATION: CalibrationStore = CalibrationStore::new(CalibrationRecord {
    calibration:   Calibration::ZERO,
    calibrated_at: Moment::EPOCH,
});

// Fixed reference Monday 00:00 UTC.
const DEPARTURE: Moment = Moment(1_700_000_000.0);

fn load_config() -> Result<RouteConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(RouteConfig::default());
    };
    let text = std::fs::read_to_string(Path::new(&path)).with_context(|| format!("reading {path}"))?;
    let config: RouteConfig = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let loaded = build_network()?;
    let graph = &loaded.graph;
    println!("=== commute: {} ===", graph.name());
    println!(
        "Graph: {} nodes, {} edges, {} signals  |  {:.1} m/s",
        graph.node_count(),
        graph.edge_count(),
        graph.signal_count(),
        config.velocity_mps
    );

    // 1. Calibrate: the reference light was seen turning green 40 s before
    //    departure.
    let reference_edge = loaded.edge_ids[&REFERENCE_SIGNAL_EDGE];
    let record = graph
        .calibrate_from(&CALIBRATION, reference_edge, Moment(DEPARTURE.secs() - 40.0), DEPARTURE)
        .context("calibrating from the reference light")?;
    println!("Calibration: {:+.0}s (set {})", record.calibration.secs(), record.calibrated_at);
    println!();

    // 2. One query, one calibration snapshot.
    let query = RouteQuery::from_config(&config, DEPARTURE, CALIBRATION.current());
    let path = SignalDijkstra.fastest_path(graph, &query)?;

    println!("{:<8} {:<8} {:<8} {:>9} {:>9}", "Edge", "From", "To", "Wait s", "Cross s");
    println!("{}", "-".repeat(46));
    for s in &path.segments {
        println!(
            "{:<8} {:<8} {:<8} {:>9.1} {:>9.1}",
            s.edge.to_string(),
            s.from.to_string(),
            s.to.to_string(),
            s.wait_secs,
            s.crossing_secs
        );
    }
    println!("{}", "-".repeat(46));
    println!(
        "Total {:.1}s, of which {:.1}s waiting at {} lights",
        path.total_secs,
        path.total_wait_secs,
        path.waits().count()
    );
    println!();

    // 3. Would leaving a little later help?
    let departures: Vec<Moment> = (0..19).map(|i| DEPARTURE + 10.0 * i as f64).collect();
    if let Some(best) = best_departure(&SignalDijkstra, graph, &departures, &query) {
        println!(
            "Best departure in the next 3 min: +{:.0}s → arrive {} ({:.1}s en route)",
            best.departure - DEPARTURE,
            best.arrival(),
            best.total_secs
        );
    }
    println!();

    println!("{}", serde_json::to_string_pretty(&path)?);
    Ok(())
}
