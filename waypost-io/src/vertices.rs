//! Vertex stream codec.
//!
//! Format (little-endian):
//!
//! ```text
//! tag: u8 = 0x56  // 'V', once at offset 0
//! then per vertex:
//!   id:        i32
//!   clazz:     u8
//!   osm_id:    i64
//!   osm_name:  u16 len + UTF-8
//!   ref_count: i32
//!   lon:       f64
//!   lat:       f64
//!   n_restrictions: u16   // 0 = no restriction set
//!   per restriction: clazz u8, from i32, to i32
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use waypost_common::{Error, Result};
use waypost_geometry::GeoPoint;

use crate::primitives::*;
use crate::{RecordSource, TAG_VERTICES};

/// A turn-movement constraint at a vertex.
///
/// Bit 0 of `clazz` set means a forbidden turn, clear means an
/// only-allowed turn. `from` and `to` are segment ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restriction {
    pub clazz: u8,
    pub from: i32,
    pub to: i32,
}

/// A graph vertex (intersection) with optional turn restrictions.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: i32,
    pub clazz: u8,
    pub osm_id: i64,
    pub osm_name: String,
    pub ref_count: i32,
    pub point: GeoPoint,
    pub restrictions: Option<Vec<Restriction>>,
}

/// Reader for a vertex stream. Checks the kind tag at open.
#[derive(Debug)]
pub struct VertexReader<R: Read> {
    reader: R,
    tag: u8,
}

impl VertexReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read> VertexReader<R> {
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let tag = read_u8(&mut reader)?;
        if tag != TAG_VERTICES {
            return Err(Error::TypeMismatch {
                expected: TAG_VERTICES,
                found: tag,
            });
        }
        Ok(Self { reader, tag })
    }

    fn read_vertex(&mut self, id: i32) -> Result<Vertex> {
        let clazz = read_u8(&mut self.reader)?;
        let osm_id = read_i64(&mut self.reader)?;
        let osm_name = read_string(&mut self.reader)?;
        let ref_count = read_i32(&mut self.reader)?;
        let lon = read_f64(&mut self.reader)?;
        let lat = read_f64(&mut self.reader)?;

        let n_restrictions = read_u16(&mut self.reader)? as usize;
        let restrictions = if n_restrictions == 0 {
            None
        } else {
            let mut list = Vec::with_capacity(n_restrictions);
            for _ in 0..n_restrictions {
                let clazz = read_u8(&mut self.reader)?;
                let from = read_i32(&mut self.reader)?;
                let to = read_i32(&mut self.reader)?;
                list.push(Restriction { clazz, from, to });
            }
            Some(list)
        };

        Ok(Vertex {
            id,
            clazz,
            osm_id,
            osm_name,
            ref_count,
            point: GeoPoint::new(lon, lat),
            restrictions,
        })
    }
}

impl<R: Read> RecordSource for VertexReader<R> {
    type Record = Vertex;

    fn declared_tag(&self) -> u8 {
        self.tag
    }

    fn next_record(&mut self) -> Result<Option<Vertex>> {
        let mut lead = [0u8; 4];
        if read_record_lead(&mut self.reader, &mut lead)?.is_none() {
            return Ok(None);
        }
        let id = i32::from_le_bytes(lead);
        Ok(Some(self.read_vertex(id)?))
    }
}

/// Writer side of the codec, used by the upstream producer and by tests.
pub struct VertexWriter<W: Write> {
    writer: W,
}

impl VertexWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Self::from_writer(BufWriter::new(file))
    }
}

impl<W: Write> VertexWriter<W> {
    pub fn from_writer(mut writer: W) -> Result<Self> {
        write_u8(&mut writer, TAG_VERTICES)?;
        Ok(Self { writer })
    }

    pub fn write_record(&mut self, vertex: &Vertex) -> Result<()> {
        write_i32(&mut self.writer, vertex.id)?;
        write_u8(&mut self.writer, vertex.clazz)?;
        write_i64(&mut self.writer, vertex.osm_id)?;
        write_string(&mut self.writer, &vertex.osm_name)?;
        write_i32(&mut self.writer, vertex.ref_count)?;
        write_f64(&mut self.writer, vertex.point.lon)?;
        write_f64(&mut self.writer, vertex.point.lat)?;
        let restrictions = vertex.restrictions.as_deref().unwrap_or(&[]);
        write_u16(&mut self.writer, restrictions.len() as u16)?;
        for restriction in restrictions {
            write_u8(&mut self.writer, restriction.clazz)?;
            write_i32(&mut self.writer, restriction.from)?;
            write_i32(&mut self.writer, restriction.to)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }
}
