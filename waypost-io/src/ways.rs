//! Segmented-way stream codec.
//!
//! Format (little-endian):
//!
//! ```text
//! tag: u8 = 0x57  // 'W', once at offset 0
//! then per way:
//!   id:       i64
//!   clazz:    u8
//!   flags:    u32
//!   kmh:      i32
//!   one_way:  u8   // 0/1
//!   name:     u16 len + UTF-8
//!   meta:     u16 len + UTF-8
//!   n_segments: u16
//!   per segment:
//!     id:      i32
//!     source:  i32
//!     target:  i32
//!     n_nodes: u32
//!     per node: id i64, lon f64, lat f64
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use waypost_common::{Error, Result};
use waypost_geometry::GeoPoint;

use crate::primitives::*;
use crate::{RecordSource, TAG_WAYS};

/// A graph node with its stable upstream identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub point: GeoPoint,
}

/// One routable edge of a way, endpoints attached to graph vertices.
///
/// `nodes` is never empty: first is the segment start, last the end,
/// interior nodes are shape points.
#[derive(Debug, Clone, PartialEq)]
pub struct WaySegment {
    pub id: i32,
    pub source: i32,
    pub target: i32,
    pub nodes: Vec<Node>,
}

/// A way split into routable segments by the upstream segmenter.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedWay {
    pub id: i64,
    pub clazz: u8,
    pub flags: u32,
    pub kmh: i32,
    pub one_way: bool,
    pub name: String,
    pub meta: String,
    pub segments: Vec<WaySegment>,
}

/// Reader for a segmented-way stream. Checks the kind tag at open.
#[derive(Debug)]
pub struct WayReader<R: Read> {
    reader: R,
    tag: u8,
}

impl WayReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read> WayReader<R> {
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let tag = read_u8(&mut reader)?;
        if tag != TAG_WAYS {
            return Err(Error::TypeMismatch {
                expected: TAG_WAYS,
                found: tag,
            });
        }
        Ok(Self { reader, tag })
    }

    fn read_way(&mut self, id: i64) -> Result<SegmentedWay> {
        let clazz = read_u8(&mut self.reader)?;
        let flags = read_u32(&mut self.reader)?;
        let kmh = read_i32(&mut self.reader)?;
        let one_way = read_u8(&mut self.reader)? != 0;
        let name = read_string(&mut self.reader)?;
        let meta = read_string(&mut self.reader)?;

        let n_segments = read_u16(&mut self.reader)? as usize;
        let mut segments = Vec::with_capacity(n_segments);
        for _ in 0..n_segments {
            let seg_id = read_i32(&mut self.reader)?;
            let source = read_i32(&mut self.reader)?;
            let target = read_i32(&mut self.reader)?;
            let n_nodes = read_u32(&mut self.reader)? as usize;
            let mut nodes = Vec::with_capacity(n_nodes);
            for _ in 0..n_nodes {
                let node_id = read_i64(&mut self.reader)?;
                let lon = read_f64(&mut self.reader)?;
                let lat = read_f64(&mut self.reader)?;
                nodes.push(Node {
                    id: node_id,
                    point: GeoPoint::new(lon, lat),
                });
            }
            segments.push(WaySegment {
                id: seg_id,
                source,
                target,
                nodes,
            });
        }

        Ok(SegmentedWay {
            id,
            clazz,
            flags,
            kmh,
            one_way,
            name,
            meta,
            segments,
        })
    }
}

impl<R: Read> RecordSource for WayReader<R> {
    type Record = SegmentedWay;

    fn declared_tag(&self) -> u8 {
        self.tag
    }

    fn next_record(&mut self) -> Result<Option<SegmentedWay>> {
        let mut lead = [0u8; 8];
        if read_record_lead(&mut self.reader, &mut lead)?.is_none() {
            return Ok(None);
        }
        let id = i64::from_le_bytes(lead);
        Ok(Some(self.read_way(id)?))
    }
}

/// Writer side of the codec, used by the upstream producer and by tests.
pub struct WayWriter<W: Write> {
    writer: W,
}

impl WayWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Self::from_writer(BufWriter::new(file))
    }
}

impl<W: Write> WayWriter<W> {
    pub fn from_writer(mut writer: W) -> Result<Self> {
        write_u8(&mut writer, TAG_WAYS)?;
        Ok(Self { writer })
    }

    pub fn write_record(&mut self, way: &SegmentedWay) -> Result<()> {
        write_i64(&mut self.writer, way.id)?;
        write_u8(&mut self.writer, way.clazz)?;
        write_u32(&mut self.writer, way.flags)?;
        write_i32(&mut self.writer, way.kmh)?;
        write_u8(&mut self.writer, way.one_way as u8)?;
        write_string(&mut self.writer, &way.name)?;
        write_string(&mut self.writer, &way.meta)?;
        write_u16(&mut self.writer, way.segments.len() as u16)?;
        for segment in &way.segments {
            write_i32(&mut self.writer, segment.id)?;
            write_i32(&mut self.writer, segment.source)?;
            write_i32(&mut self.writer, segment.target)?;
            write_u32(&mut self.writer, segment.nodes.len() as u32)?;
            for node in &segment.nodes {
                write_i64(&mut self.writer, node.id)?;
                write_f64(&mut self.writer, node.point.lon)?;
                write_f64(&mut self.writer, node.point.lat)?;
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }
}
