//! `gw-core`: shared primitives for the greenwave signal-aware router.
//!
//! # What lives here
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`ids`]         | `GraphId`, `NodeId`, `EdgeId`                          |
//! | [`geo`]         | `GeoPoint`, haversine distance                         |
//! | [`time`]        | `Moment`                                               |
//! | [`calibration`] | `Calibration`, `CalibrationRecord`, `CalibrationStore` |
//! | [`config`]      | `RouteConfig`, `WindowPolicy`                          |
//! | [`error`]       | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod calibration;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use calibration::{Calibration, CalibrationRecord, CalibrationStore};
pub use config::{RouteConfig, WindowPolicy, validate_velocity};
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_M, GeoPoint, haversine_m};
pub use ids::{EdgeId, GraphId, NodeId};
pub use time::Moment;
