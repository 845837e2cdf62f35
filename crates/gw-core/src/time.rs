//! Absolute moments on the signal clock.
//!
//! # Units
//!
//! A [`Moment`] is seconds since the Unix epoch as `f64`.  Durations are
//! plain `f64` seconds: `Moment - Moment` yields one, `Moment + f64` applies
//! one.  Fractional seconds are kept throughout; nothing here rounds.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

const SECS_PER_DAY: f64 = 86_400.0;

/// An absolute timestamp in epoch seconds.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Moment(pub f64);

impl Moment {
    pub const EPOCH: Moment = Moment(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Whole UTC days since the epoch.  Negative before 1970.
    #[inline]
    pub fn utc_day(self) -> i64 {
        (self.0 / SECS_PER_DAY).floor() as i64
    }

    /// The later of two moments.
    #[inline]
    pub fn max(self, other: Moment) -> Moment {
        if other.0 > self.0 { other } else { self }
    }

    /// Current wall-clock moment.
    pub fn now() -> Moment {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Moment(secs)
    }
}

impl Add<f64> for Moment {
    type Output = Moment;
    #[inline]
    fn add(self, secs: f64) -> Moment {
        Moment(self.0 + secs)
    }
}

impl AddAssign<f64> for Moment {
    #[inline]
    fn add_assign(&mut self, secs: f64) {
        self.0 += secs;
    }
}

impl Sub for Moment {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: Moment) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}
