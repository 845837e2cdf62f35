//! One occurrence of a signal's green phase.

use gw_core::Moment;

/// A closed interval `[start, end]` during which the light is green.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreenWindow {
    pub start: Moment,
    pub end:   Moment,
}

impl GreenWindow {
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Earliest moment a traveler reaching the light at `arrival` may enter.
    #[inline]
    pub fn entry(&self, arrival: Moment) -> Moment {
        arrival.max(self.start)
    }

    /// `true` if a crossing entered at [`entry`](Self::entry) finishes no
    /// later than `end`.
    #[inline]
    pub fn admits(&self, arrival: Moment, crossing_secs: f64) -> bool {
        self.entry(arrival).secs() <= self.end.secs() - crossing_secs
    }

    /// Seconds between `arrival` and the moment this window lets the
    /// traveler in.  Zero if it is already open.
    #[inline]
    pub fn wait_from(&self, arrival: Moment) -> f64 {
        self.entry(arrival) - arrival
    }
}
