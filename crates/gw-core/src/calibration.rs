//! Global signal calibration.
//!
//! Every signal's green windows are shifted by one shared offset before any
//! wait computation.  The offset corrects the drift between the nominal
//! signal timetable and the real lights; an operator recalibrates it by
//! reporting the moment one reference light actually turned green.
//!
//! # Snapshot discipline
//!
//! A routing query takes exactly one [`Calibration`] value at its start and
//! uses it for every edge it relaxes.  [`CalibrationStore`] is the
//! process-wide holder: writers replace the whole [`CalibrationRecord`],
//! readers copy it out, so a reader observes either the old record or the
//! new one and never a mix.

use std::sync::{PoisonError, RwLock};

use crate::Moment;

/// Offset in seconds added to every signal's window bounds.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Calibration(pub f64);

impl Calibration {
    pub const ZERO: Calibration = Calibration(0.0);

    /// Offset that moves `nominal_start` onto `observed`.
    #[inline]
    pub fn from_reference(observed: Moment, nominal_start: Moment) -> Self {
        Calibration(observed - nominal_start)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Apply the offset to a nominal moment.
    #[inline]
    pub fn apply(self, nominal: Moment) -> Moment {
        nominal + self.0
    }
}

/// A calibration value together with the moment it was set.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationRecord {
    pub calibration:   Calibration,
    pub calibrated_at: Moment,
}

impl CalibrationRecord {
    /// `true` if this record was written on the same UTC day as `now`.
    pub fn is_current(&self, now: Moment) -> bool {
        self.calibrated_at.utc_day() == now.utc_day()
    }
}

/// Process-wide calibration holder.
///
/// Cheap to share behind an `Arc` or a `static`.  Lock hold times are a
/// single record copy.
#[derive(Debug, Default)]
pub struct CalibrationStore {
    record: RwLock<CalibrationRecord>,
}

impl CalibrationStore {
    pub const fn new(record: CalibrationRecord) -> Self {
        Self { record: RwLock::new(record) }
    }

    /// Copy of the current record.  Take this once per query.
    pub fn snapshot(&self) -> CalibrationRecord {
        // The record is `Copy` and always fully written, so a poisoned lock
        // still holds a consistent value.
        *self.record.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Shorthand for `snapshot().calibration`.
    pub fn current(&self) -> Calibration {
        self.snapshot().calibration
    }

    /// Overwrite the offset.
    pub fn set(&self, calibration: Calibration, now: Moment) -> CalibrationRecord {
        let record = CalibrationRecord { calibration, calibrated_at: now };
        *self.record.write().unwrap_or_else(PoisonError::into_inner) = record;
        log::info!("signal calibration set to {:+.3}s at {}", calibration.secs(), now);
        record
    }

    /// Recalibrate from an observation: the reference light whose nominal
    /// window starts at `nominal_start` was seen turning green at `observed`.
    pub fn calibrate(&self, observed: Moment, nominal_start: Moment, now: Moment) -> CalibrationRecord {
        self.set(Calibration::from_reference(observed, nominal_start), now)
    }

    /// `true` if the store was written on the same UTC day as `now`.
    pub fn is_current(&self, now: Moment) -> bool {
        self.snapshot().is_current(now)
    }
}
