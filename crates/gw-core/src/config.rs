//! Routing configuration.

use crate::{CoreError, CoreResult};

/// What a signal does when neither of its two upcoming green windows leaves
/// enough time to finish the crossing.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WindowPolicy {
    /// The edge cannot be entered at that arrival moment.
    #[default]
    Strict,
    /// Wait for the next window to open and cross regardless of whether the
    /// crossing finishes before it closes.
    IgnoreCrossingBound,
}

/// Per-application routing defaults.
///
/// Typically deserialized from a JSON file by the application and turned
/// into a `RouteQuery` per request.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteConfig {
    /// Travel speed in metres per second.  Must be finite and positive.
    pub velocity_mps: f64,

    pub window_policy: WindowPolicy,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            velocity_mps:  8.0,
            window_policy: WindowPolicy::Strict,
        }
    }
}

impl RouteConfig {
    pub fn validate(&self) -> CoreResult<()> {
        validate_velocity(self.velocity_mps)
    }
}

/// Reject zero, negative, NaN, and infinite speeds.
pub fn validate_velocity(velocity_mps: f64) -> CoreResult<()> {
    if velocity_mps.is_finite() && velocity_mps > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidVelocity(velocity_mps))
    }
}
