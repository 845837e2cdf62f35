//! Periodic traffic signal and the wait it imposes on a crossing.
//!
//! # Window arithmetic
//!
//! With period `P`, green width `g`, nominal start `s` and calibration `d`,
//! occurrence `k` (any integer) is
//!
//! ```text
//! [ s + d + k·P ,  s + d + g + k·P ]
//! ```
//!
//! A wait query at `arrival` looks at exactly two occurrences: the first one
//! whose end is past `arrival`, `n = ⌊(arrival − end₀) / P⌋ + 1`, and the one
//! after it.  Because `g < P`, occurrence `n + 1` always opens after
//! `arrival`, so it admits the crossing iff the crossing fits in `g`.  A
//! crossing longer than the green phase is therefore never admitted by any
//! occurrence, and searching further periods cannot help.

use gw_core::{Calibration, Moment, WindowPolicy};

use crate::{GreenWindow, SignalError, SignalResult};

/// One traffic light's recurring green phase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodicSignal {
    /// Cycle length in seconds.
    pub period: f64,
    /// Green width in seconds, `0 <= pass_interval < period`.
    pub pass_interval: f64,
    /// Nominal start of one green window, before calibration.
    pub start_moment: Moment,
    /// Display hint for map front-ends.  Not used by routing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_show: bool,
}

impl PeriodicSignal {
    /// Validated constructor.
    pub fn new(period: f64, pass_interval: f64, start_moment: Moment) -> SignalResult<Self> {
        let signal = Self { period, pass_interval, start_moment, is_show: false };
        signal.validate()?;
        Ok(signal)
    }

    pub fn shown(mut self, is_show: bool) -> Self {
        self.is_show = is_show;
        self
    }

    pub fn validate(&self) -> SignalResult<()> {
        if !(self.period.is_finite() && self.period > 0.0) {
            return Err(SignalError::InvalidSignal(format!(
                "period must be positive, got {}",
                self.period
            )));
        }
        if !(self.pass_interval >= 0.0 && self.pass_interval < self.period) {
            return Err(SignalError::InvalidSignal(format!(
                "pass interval must lie in [0, {}), got {}",
                self.period, self.pass_interval
            )));
        }
        if !self.start_moment.secs().is_finite() {
            return Err(SignalError::InvalidSignal("start moment is not finite".into()));
        }
        Ok(())
    }

    /// Nominal end of the window that starts at `start_moment`.
    #[inline]
    pub fn end_moment(&self) -> Moment {
        self.start_moment + self.pass_interval
    }

    /// Occurrence `k` after applying `calibration`.
    #[inline]
    pub fn window(&self, k: i64, calibration: Calibration) -> GreenWindow {
        let shift = calibration.secs() + k as f64 * self.period;
        GreenWindow {
            start: self.start_moment + shift,
            end:   self.end_moment() + shift,
        }
    }

    /// Occurrence 0 with `calibration` applied: the timetable as the
    /// lights actually run it.
    #[inline]
    pub fn calibrated(&self, calibration: Calibration) -> GreenWindow {
        self.window(0, calibration)
    }

    /// Index of the first occurrence whose end is later than `arrival`.
    fn first_open_index(&self, arrival: Moment, calibration: Calibration) -> i64 {
        let end0 = calibration.apply(self.end_moment());
        ((arrival - end0) / self.period).floor() as i64 + 1
    }

    /// The two occurrences a wait query considers, nearest first.
    pub fn upcoming_windows(&self, arrival: Moment, calibration: Calibration) -> [GreenWindow; 2] {
        let n = self.first_open_index(arrival, calibration);
        [self.window(n, calibration), self.window(n + 1, calibration)]
    }

    /// Seconds a traveler reaching this light at `arrival` waits before
    /// starting a crossing that takes `crossing_secs`.
    ///
    /// Under [`WindowPolicy::Strict`] a crossing that fits neither upcoming
    /// window is [`SignalError::NoFeasibleWindow`].  Under
    /// [`WindowPolicy::IgnoreCrossingBound`] the traveler instead waits for
    /// the nearest window to open.
    pub fn wait_time(
        &self,
        arrival:       Moment,
        crossing_secs: f64,
        calibration:   Calibration,
        policy:        WindowPolicy,
    ) -> SignalResult<f64> {
        let windows = self.upcoming_windows(arrival, calibration);

        if let Some(window) = windows.iter().find(|w| w.admits(arrival, crossing_secs)) {
            return Ok(window.wait_from(arrival));
        }

        match policy {
            WindowPolicy::Strict => Err(SignalError::NoFeasibleWindow {
                arrival,
                crossing_secs,
                pass_interval: self.pass_interval,
            }),
            WindowPolicy::IgnoreCrossingBound => {
                log::trace!(
                    "crossing of {crossing_secs:.3}s exceeds {}s green; waiting for next opening",
                    self.pass_interval
                );
                Ok(windows[0].wait_from(arrival))
            }
        }
    }
}
