//! Unit tests for gw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, GraphId, NodeId};

    #[test]
    fn index_and_validity() {
        assert_eq!(NodeId(12).index(), 12);
        assert!(EdgeId(0).is_valid());
        assert!(!EdgeId::INVALID.is_valid());
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display_labels() {
        assert_eq!(NodeId(3).to_string(), "node-3");
        assert_eq!(EdgeId(17).to_string(), "edge-17");
        assert_eq!(GraphId(1).to_string(), "graph-1");
    }
}

#[cfg(test)]
mod geo {
    use crate::{EARTH_RADIUS_M, GeoPoint, haversine_m};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(121.480981, 31.228522);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_uses_equatorial_radius() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0; // 111_319.49 m
        let d = haversine_m(a, b);
        assert!((d - expected).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn symmetric_and_non_negative() {
        let a = GeoPoint::new(121.480981, 31.228522);
        let b = GeoPoint::new(121.481535, 31.228795);
        let ab = a.distance_m(b);
        let ba = b.distance_m(a);
        assert!(ab > 0.0);
        assert!((ab - ba).abs() < 1e-9);
        // Two neighbouring Shanghai intersections, roughly 60 m apart.
        assert!(ab > 50.0 && ab < 70.0, "got {ab}");
    }

    #[test]
    fn antipodal_points_do_not_nan() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(180.0, 0.0);
        let d = a.distance_m(b);
        assert!((d - EARTH_RADIUS_M * std::f64::consts::PI).abs() < 1e-3);
    }
}

#[cfg(test)]
mod time {
    use crate::Moment;

    #[test]
    fn arithmetic() {
        let t = Moment(1_000.0);
        assert_eq!(t + 5.5, Moment(1_005.5));
        assert_eq!(Moment(1_005.5) - t, 5.5);
        let mut u = t;
        u += 2.0;
        assert_eq!(u, Moment(1_002.0));
        assert_eq!(t.max(u), u);
    }

    #[test]
    fn utc_day_boundaries() {
        assert_eq!(Moment(0.0).utc_day(), 0);
        assert_eq!(Moment(86_399.9).utc_day(), 0);
        assert_eq!(Moment(86_400.0).utc_day(), 1);
        assert_eq!(Moment(-1.0).utc_day(), -1);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(Moment::now() > Moment(1_577_836_800.0));
    }
}

#[cfg(test)]
mod calibration {
    use std::sync::Arc;

    use crate::{Calibration, CalibrationRecord, CalibrationStore, Moment};

    #[test]
    fn from_reference_is_observed_minus_nominal() {
        let c = Calibration::from_reference(Moment(1_700_000_156.0), Moment(156.0));
        assert_eq!(c, Calibration(1_700_000_000.0));
        assert_eq!(c.apply(Moment(156.0)), Moment(1_700_000_156.0));
    }

    #[test]
    fn store_overwrites() {
        let store = CalibrationStore::default();
        assert_eq!(store.current(), Calibration::ZERO);

        let rec = store.calibrate(Moment(500.0), Moment(116.0), Moment(86_400.0 * 3.0 + 10.0));
        assert_eq!(rec.calibration, Calibration(384.0));
        assert_eq!(store.snapshot(), rec);

        store.set(Calibration(-7.0), Moment(0.0));
        assert_eq!(store.current(), Calibration(-7.0));
    }

    #[test]
    fn is_current_same_utc_day() {
        let store = CalibrationStore::new(CalibrationRecord {
            calibration:   Calibration(12.0),
            calibrated_at: Moment(86_400.0 * 10.0 + 3_600.0),
        });
        assert!(store.is_current(Moment(86_400.0 * 10.0 + 80_000.0)));
        assert!(!store.is_current(Moment(86_400.0 * 11.0)));
    }

    #[test]
    fn readers_never_see_a_torn_record() {
        let store = Arc::new(CalibrationStore::default());
        std::thread::scope(|s| {
            let writer = Arc::clone(&store);
            s.spawn(move || {
                for i in 0..1_000 {
                    let v = i as f64;
                    writer.set(Calibration(v), Moment(v));
                }
            });
            for _ in 0..4 {
                let reader = Arc::clone(&store);
                s.spawn(move || {
                    for _ in 0..1_000 {
                        let rec = reader.snapshot();
                        assert_eq!(rec.calibration.secs(), rec.calibrated_at.secs());
                    }
                });
            }
        });
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, RouteConfig, WindowPolicy, validate_velocity};

    #[test]
    fn default_is_valid_and_strict() {
        let cfg = RouteConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.window_policy, WindowPolicy::Strict);
    }

    #[test]
    fn rejects_bad_velocity() {
        for v in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(validate_velocity(v), Err(CoreError::InvalidVelocity(_))), "{v}");
        }
        assert!(validate_velocity(0.1).is_ok());
    }
}
