//! The Shanghai "Great World" commute graph.
//!
//! Thirteen intersections around Yan'an Road, eighteen one-way segments,
//! five signalized segments.  Lengths are derived from the coordinates.

use std::io::Cursor;

use anyhow::Result;

use gw_core::GraphId;
use gw_network::{GraphHeader, LoadedGraph, load_graph_reader};

const NODES_CSV: &str = "\
id,lng,lat
0,121.480981,31.228522
1,121.481535,31.228795
2,121.481575,31.228818
3,121.482265,31.229156
4,121.482306,31.229178
5,121.480241,31.22946
6,121.480787,31.229712
7,121.480837,31.22974
8,121.481581,31.230151
9,121.481631,31.230178
10,121.480053,31.229736
11,121.481382,31.230493
12,121.481438,31.230521
";

const EDGES_CSV: &str = "\
id,start_node_id,end_node_id
0,0,1
1,1,2
2,2,3
3,3,4
4,5,6
5,6,7
6,7,8
7,8,9
8,10,11
9,11,12
10,0,5
11,1,6
12,2,7
13,3,8
14,4,9
15,5,10
16,8,11
17,9,12
";

// Nominal start moments are seconds into the lights' own cycle; the
// calibration offset anchors them to wall-clock time.
const SIGNALS_CSV: &str = "\
edge_id,period,pass_interval,start_moment,is_show
15,190,53,156,true
7,190,116,0,true
9,190,116,0,false
16,190,74,116,true
17,190,74,116,false
";

/// External id of the light operators use as the calibration reference.
pub const REFERENCE_SIGNAL_EDGE: u64 = 15;

pub fn build_network() -> Result<LoadedGraph> {
    let header = GraphHeader {
        id:            GraphId(1),
        name:          "Great World commute".into(),
        start_node_id: 0,
        end_node_id:   12,
    };
    Ok(load_graph_reader(
        header,
        Cursor::new(NODES_CSV),
        Cursor::new(EDGES_CSV),
        Cursor::new(SIGNALS_CSV),
    )?)
}
