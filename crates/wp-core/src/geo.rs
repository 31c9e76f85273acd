//! Geographic coordinate type and distance primitives.
//!
//! `GeoPoint` stores double-precision latitude/longitude in degrees.  OSM
//! coordinates carry seven decimal places (~1 cm) and section lengths feed
//! the A* heuristic, so the extra precision over `f32` is not optional here.

use crate::error::{CoreError, CoreResult};

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Underestimates true road distance (the chord never exceeds the road),
    /// which is exactly the property an admissible A* heuristic needs.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Sum of pairwise haversine distances along a polyline, in metres.
///
/// # Errors
///
/// [`CoreError::DegenerateGeometry`] if fewer than two points are supplied —
/// a polyline with no segments has no meaningful length.
pub fn polyline_length_m(points: &[GeoPoint]) -> CoreResult<f64> {
    if points.len() < 2 {
        return Err(CoreError::DegenerateGeometry(points.len()));
    }
    Ok(points
        .windows(2)
        .map(|pair| pair[0].distance_m(pair[1]))
        .sum())
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned geographic rectangle, as declared by an OSM `<bounds>`
/// element.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lon >= self.min_lon
            && p.lon <= self.max_lon
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}) .. ({:.4}, {:.4})",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}
