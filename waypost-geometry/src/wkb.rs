//! WKB (Well-Known Binary) encoding for the SQL geometry columns.
//!
//! The emitted hex strings are parsed structurally by the destination
//! spatial database, so the byte layout must be exact.
//!
//! ## Layout (little-endian throughout)
//!
//! ```text
//! Point:
//!   byte order: 1 byte (little-endian = 1)
//!   type: 4 bytes (point = 1)
//!   x: 8 bytes (f64, longitude)
//!   y: 8 bytes (f64, latitude)
//! LineString:
//!   byte order, type (linestring = 2)
//!   num_points: 4 bytes
//!   points: num_points * 16 bytes
//! MultiLineString:
//!   byte order, type (multilinestring = 5)
//!   num_lines: 4 bytes
//!   lines: complete LineString encodings, each with its own
//!          byte-order marker and type code
//! ```

use crate::GeoPoint;

const LITTLE_ENDIAN: u8 = 1;
const TYPE_POINT: u32 = 1;
const TYPE_LINESTRING: u32 = 2;
const TYPE_MULTILINESTRING: u32 = 5;

/// Encode a single point as WKB.
pub fn point_wkb(point: GeoPoint) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + 4 + 16);
    buf.push(LITTLE_ENDIAN);
    buf.extend_from_slice(&TYPE_POINT.to_le_bytes());
    buf.extend_from_slice(&point.lon.to_le_bytes());
    buf.extend_from_slice(&point.lat.to_le_bytes());
    buf
}

/// Encode a polyline as WKB.
pub fn line_wkb(points: &[GeoPoint]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + 4 + 4 + points.len() * 16);
    buf.push(LITTLE_ENDIAN);
    buf.extend_from_slice(&TYPE_LINESTRING.to_le_bytes());
    buf.extend_from_slice(&(points.len() as u32).to_le_bytes());
    for point in points {
        buf.extend_from_slice(&point.lon.to_le_bytes());
        buf.extend_from_slice(&point.lat.to_le_bytes());
    }
    buf
}

/// Encode a set of polylines as WKB.
///
/// Each member line is a complete nested LineString encoding, not a
/// headerless fragment.
pub fn multi_line_wkb(lines: &[&[GeoPoint]]) -> Vec<u8> {
    let total_points: usize = lines.iter().map(|line| line.len()).sum();
    let mut buf = Vec::with_capacity(1 + 4 + 4 + lines.len() * 9 + total_points * 16);
    buf.push(LITTLE_ENDIAN);
    buf.extend_from_slice(&TYPE_MULTILINESTRING.to_le_bytes());
    buf.extend_from_slice(&(lines.len() as u32).to_le_bytes());
    for line in lines {
        buf.extend_from_slice(&line_wkb(line));
    }
    buf
}

/// Render WKB bytes as uppercase hex, two characters per byte, no
/// separators. This is the form embedded in the SQL text.
pub fn to_hex(wkb: &[u8]) -> String {
    hex::encode_upper(wkb)
}
