//! `gw-signal`: periodic traffic signals.
//!
//! # Crate layout
//!
//! | Module     | Contents                                           |
//! |------------|----------------------------------------------------|
//! | [`signal`] | `PeriodicSignal`, window indexing, `wait_time`     |
//! | [`window`] | `GreenWindow`: one green occurrence               |
//! | [`error`]  | `SignalError`, `SignalResult<T>`                   |
//!
//! Signals carry no reference to their edge.  The caller supplies the
//! crossing duration (edge length over speed) and the calibration snapshot
//! for each query.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod error;
pub mod signal;
pub mod window;

#[cfg(test)]
mod tests;

pub use error::{SignalError, SignalResult};
pub use signal::PeriodicSignal;
pub use window::GreenWindow;
