//! Unit tests for gw-signal.

#[cfg(test)]
mod helpers {
    use gw_core::Moment;

    use crate::PeriodicSignal;

    /// 190 s cycle, 58 s green, nominally green from t=1000.
    pub fn light() -> PeriodicSignal {
        PeriodicSignal::new(190.0, 58.0, Moment(1_000.0)).unwrap()
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use gw_core::Moment;

    use crate::{PeriodicSignal, SignalError};

    #[test]
    fn end_moment_is_start_plus_pass() {
        let s = super::helpers::light();
        assert_eq!(s.end_moment(), Moment(1_058.0));
        assert!(!s.is_show);
        assert!(s.shown(true).is_show);
    }

    #[test]
    fn rejects_non_positive_period() {
        assert!(matches!(
            PeriodicSignal::new(0.0, 0.0, Moment(0.0)),
            Err(SignalError::InvalidSignal(_))
        ));
        assert!(PeriodicSignal::new(f64::NAN, 1.0, Moment(0.0)).is_err());
    }

    #[test]
    fn rejects_pass_interval_outside_period() {
        assert!(PeriodicSignal::new(60.0, 60.0, Moment(0.0)).is_err());
        assert!(PeriodicSignal::new(60.0, -1.0, Moment(0.0)).is_err());
        assert!(PeriodicSignal::new(60.0, 0.0, Moment(0.0)).is_ok());
    }
}

// ── Window indexing ───────────────────────────────────────────────────────────

#[cfg(test)]
mod windows {
    use gw_core::{Calibration, Moment};

    #[test]
    fn calibrated_shifts_both_bounds() {
        let w = super::helpers::light().calibrated(Calibration(20.0));
        assert_eq!(w.start, Moment(1_020.0));
        assert_eq!(w.end, Moment(1_078.0));
        assert_eq!(w.duration(), 58.0);
    }

    #[test]
    fn upcoming_windows_straddle_arrival() {
        let s = super::helpers::light();
        for arrival in [500.0, 990.0, 1_000.0, 1_057.0, 1_058.0, 1_100.0, 50_000.5] {
            let arrival = Moment(arrival);
            let [first, second] = s.upcoming_windows(arrival, Calibration::ZERO);
            assert!(first.end > arrival, "first window must end after {arrival}");
            assert!(first.end.secs() - 190.0 <= arrival.secs(), "previous window must not end after {arrival}");
            assert_eq!(second.start - first.start, 190.0);
        }
    }

    #[test]
    fn windows_before_nominal_start() {
        // n = ⌊(500 − 1058) / 190⌋ + 1 = −2 → [620, 678]
        let [first, _] = super::helpers::light().upcoming_windows(Moment(500.0), Calibration::ZERO);
        assert_eq!(first.start, Moment(620.0));
        assert_eq!(first.end, Moment(678.0));
    }
}

// ── Wait time ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wait_time {
    use gw_core::{Calibration, Moment, WindowPolicy};

    use crate::SignalError;

    const STRICT: WindowPolicy = WindowPolicy::Strict;

    #[test]
    fn arrival_before_window_waits_for_opening() {
        // 50 m at 10 m/s: 5 s crossing, window [1000, 1058].
        let w = super::helpers::light()
            .wait_time(Moment(990.0), 5.0, Calibration::ZERO, STRICT)
            .unwrap();
        assert_eq!(w, 10.0);
    }

    #[test]
    fn arrival_inside_window_crosses_immediately() {
        let w = super::helpers::light()
            .wait_time(Moment(1_030.0), 5.0, Calibration::ZERO, STRICT)
            .unwrap();
        assert_eq!(w, 0.0);
    }

    #[test]
    fn exact_fit_is_admitted() {
        let w = super::helpers::light()
            .wait_time(Moment(1_053.0), 5.0, Calibration::ZERO, STRICT)
            .unwrap();
        assert_eq!(w, 0.0);
    }

    #[test]
    fn near_miss_rolls_to_next_window() {
        // Arrives while green but would still be crossing at 1060 > 1058.
        let w = super::helpers::light()
            .wait_time(Moment(1_055.0), 5.0, Calibration::ZERO, STRICT)
            .unwrap();
        assert_eq!(w, 1_190.0 - 1_055.0);
    }

    #[test]
    fn calibration_moves_the_window() {
        let w = super::helpers::light()
            .wait_time(Moment(990.0), 5.0, Calibration(20.0), STRICT)
            .unwrap();
        assert_eq!(w, 30.0);
    }

    #[test]
    fn shifting_calibration_by_one_period_changes_nothing() {
        let s = super::helpers::light();
        for arrival in [700.0, 990.0, 1_055.0, 1_300.25] {
            let a = s.wait_time(Moment(arrival), 5.0, Calibration(13.0), STRICT).unwrap();
            let b = s.wait_time(Moment(arrival), 5.0, Calibration(13.0 + 190.0), STRICT).unwrap();
            let c = s.wait_time(Moment(arrival), 5.0, Calibration(13.0 - 380.0), STRICT).unwrap();
            assert!((a - b).abs() < 1e-9 && (a - c).abs() < 1e-9, "arrival {arrival}: {a} {b} {c}");
        }
    }

    #[test]
    fn wait_is_never_negative_and_bounded_by_two_periods() {
        let s = super::helpers::light();
        let mut t = 0.0;
        while t < 2_000.0 {
            let w = s.wait_time(Moment(t), 12.5, Calibration(-41.0), STRICT).unwrap();
            assert!(w >= 0.0, "negative wait at {t}");
            assert!(w < 2.0 * s.period, "wait {w} at {t}");
            t += 7.3;
        }
    }

    #[test]
    fn crossing_longer_than_green_is_infeasible() {
        // end − crossing = 998 < start = 1000 for every occurrence.
        let err = super::helpers::light()
            .wait_time(Moment(990.0), 60.0, Calibration::ZERO, STRICT)
            .unwrap_err();
        match err {
            SignalError::NoFeasibleWindow { arrival, crossing_secs, pass_interval } => {
                assert_eq!(arrival, Moment(990.0));
                assert_eq!(crossing_secs, 60.0);
                assert_eq!(pass_interval, 58.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn ignore_crossing_bound_waits_for_opening() {
        let w = super::helpers::light()
            .wait_time(Moment(990.0), 60.0, Calibration::ZERO, WindowPolicy::IgnoreCrossingBound)
            .unwrap();
        assert_eq!(w, 10.0);
    }

    #[test]
    fn zero_length_crossing_on_zero_width_window() {
        let s = crate::PeriodicSignal::new(30.0, 0.0, Moment(10.0)).unwrap();
        let w = s.wait_time(Moment(11.0), 0.0, Calibration::ZERO, STRICT).unwrap();
        assert_eq!(w, 29.0);
    }
}
