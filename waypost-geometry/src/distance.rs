//! Ellipsoidal (orthodromic) path length over WGS84.
//!
//! The destination database stores geometry in SRID 4326, so distances here
//! use a proper ellipsoidal model rather than a spherical haversine
//! approximation.

#![allow(deprecated)] // trait-form GeodesicDistance, as shipped in geo 0.29

use geo::GeodesicDistance;
use geo::Point;

use crate::GeoPoint;

/// Total path length of an ordered point sequence, in kilometers.
///
/// Sums the geodesic surface distance of each consecutive pair. A single
/// point (or an empty slice) yields 0.
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    let mut meters = 0.0;
    for pair in points.windows(2) {
        let from = Point::new(pair[0].lon, pair[0].lat);
        let to = Point::new(pair[1].lon, pair[1].lat);
        meters += from.geodesic_distance(&to);
    }
    meters / 1000.0
}
