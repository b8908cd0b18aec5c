//! Geographic primitives for the waypost exporter: points, ellipsoidal path
//! length, deterministic rounding and WKB encoding.

pub mod distance;
pub mod wkb;

pub use distance::path_length_km;

/// A geographic position in degrees, WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Round to 7 fractional decimal digits.
///
/// Derived km and cost values pass through this before textual rendering so
/// the emitted SQL is reproducible across runs and platforms.
pub fn round_e7(value: f64) -> f64 {
    (value * 1e7).round() / 1e7
}
