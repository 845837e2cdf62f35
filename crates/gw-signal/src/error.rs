//! Signal error type.

use thiserror::Error;

use gw_core::Moment;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    #[error("invalid signal: {0}")]
    InvalidSignal(String),

    /// Neither of the two upcoming green windows is long enough, from
    /// `arrival`, to finish a `crossing_secs` crossing before it closes.
    #[error(
        "no green window admits a {crossing_secs:.3}s crossing arriving at {arrival} \
         (green lasts {pass_interval}s)"
    )]
    NoFeasibleWindow {
        arrival:       Moment,
        crossing_secs: f64,
        pass_interval: f64,
    },
}

pub type SignalResult<T> = Result<T, SignalError>;
