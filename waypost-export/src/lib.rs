//! SQL export of a precomputed routing graph.
//!
//! Consumes the segmented-way and vertex record streams produced upstream,
//! derives routing attributes (geodesic length, cost, reverse cost), encodes
//! geometry as hex WKB and emits a pgRouting-compatible SQL load script:
//! schema DDL, size-bounded multi-row INSERT statements, then key and index
//! DDL. Strictly streaming: one record in memory at a time, output rows in
//! input order.

pub mod edges;
pub mod schema;
pub mod sql;
pub mod vertices;

pub use edges::{export_edges, EdgeExportConfig};
pub use vertices::{export_vertices, VertexExportConfig};

/// Rows per multi-row INSERT for the edge table. Compatibility constant,
/// empirically a good balance of statement size vs. per-statement overhead.
pub const EDGE_BATCH_SIZE: usize = 25;

/// Rows per multi-row INSERT for the vertex table.
pub const VERTEX_BATCH_SIZE: usize = 50;

/// Reverse cost assigned to one-way edges: effectively untraversable in the
/// reverse direction under any sane cost model.
pub const REVERSE_COST_BLOCKED: f64 = 1_000_000.0;

/// Emit a progress log line every this many rows.
pub const PROGRESS_INTERVAL: u64 = 50_000;
