//! Typed binary record streams.
//!
//! The upstream segmenter stage writes one stream file per record kind:
//! segmented ways and graph vertices. Each stream starts with a one-byte
//! kind tag, followed by records back to back until end of file. Clean EOF
//! is only valid at a record boundary.
//!
//! This crate holds both sides of the codec: the writers used by the
//! producer (and by tests) and the readers the exporter consumes through
//! the [`RecordSource`] capability.

pub mod primitives;
pub mod vertices;
pub mod ways;

pub use vertices::{Restriction, Vertex, VertexReader, VertexWriter};
pub use ways::{Node, SegmentedWay, WayReader, WaySegment, WayWriter};

use waypost_common::Result;

/// Stream kind tags, written once at offset 0.
pub const TAG_WAYS: u8 = 0x57; // 'W'
pub const TAG_VERTICES: u8 = 0x56; // 'V'

/// A pull source of decoded records of one statically known layout.
///
/// The stream's kind tag is checked once when the source is opened; after
/// that there is no per-record type dispatch.
pub trait RecordSource {
    type Record;

    /// The kind tag the stream declared at open.
    fn declared_tag(&self) -> u8;

    /// Decode the next record, or `None` at clean end of stream.
    fn next_record(&mut self) -> Result<Option<Self::Record>>;
}
