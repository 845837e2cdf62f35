//! Coordinates and great-circle distance.

/// WGS-84 equatorial radius in metres.
///
/// Edge lengths are derived with this radius rather than the mean Earth
/// radius; stored lengths in existing graph data depend on it.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A longitude/latitude pair in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Haversine great-circle distance to `other` in metres.
    ///
    /// Coordinates are not range-checked.
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        haversine_m(self, other)
    }
}

/// Haversine distance between `a` and `b` in metres, never negative.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

    // Rounding can push `h` a hair above 1 for antipodal points.
    2.0 * h.clamp(0.0, 1.0).sqrt().asin() * EARTH_RADIUS_M
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lng, self.lat)
    }
}
