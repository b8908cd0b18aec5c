//! Edge export: segmented-way stream → pgRouting edge table script.

use std::io::Write;

use log::info;

use waypost_common::{Error, Result};
use waypost_geometry::wkb::{line_wkb, multi_line_wkb, to_hex};
use waypost_geometry::{path_length_km, round_e7, GeoPoint};
use waypost_io::{RecordSource, SegmentedWay};

use crate::schema;
use crate::sql::{quote_nullable, BatchWriter};
use crate::{EDGE_BATCH_SIZE, PROGRESS_INTERVAL, REVERSE_COST_BLOCKED};

pub struct EdgeExportConfig {
    /// Target table, e.g. `osm_2po_4pgr`.
    pub table: String,
    /// Rows per multi-row INSERT.
    pub batch_size: usize,
    /// Register and encode geometry as MULTILINESTRING instead of
    /// LINESTRING.
    pub multiline: bool,
}

impl EdgeExportConfig {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            batch_size: EDGE_BATCH_SIZE,
            multiline: false,
        }
    }
}

/// Drive the edge export: schema preamble, one row per way segment in
/// stream order, key/index postamble. Returns the number of rows written.
pub fn export_edges<S, W>(mut source: S, mut out: W, config: &EdgeExportConfig) -> Result<u64>
where
    S: RecordSource<Record = SegmentedWay>,
    W: Write,
{
    out.write_all(schema::edge_preamble(&config.table, config.multiline).as_bytes())?;

    let mut batch = BatchWriter::new(&mut out, &config.table, config.batch_size);
    let mut n: u64 = 0;

    while let Some(way) = source.next_record()? {
        let kmh = if way.kmh <= 0 { 1 } else { way.kmh };
        let name = quote_nullable(&way.name);
        let meta = quote_nullable(&way.meta);

        for segment in &way.segments {
            let (first, last) = match (segment.nodes.first(), segment.nodes.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => return Err(Error::EmptyGeometry(segment.id)),
            };

            let points: Vec<GeoPoint> = segment.nodes.iter().map(|node| node.point).collect();
            let km = round_e7(path_length_km(&points));
            let cost = round_e7(km / kmh as f64);
            let reverse_cost = if way.one_way {
                REVERSE_COST_BLOCKED
            } else {
                cost
            };
            let geom_way = if config.multiline {
                to_hex(&multi_line_wkb(&[&points]))
            } else {
                to_hex(&line_wkb(&points))
            };

            let row = format!(
                "({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, '{}')",
                segment.id,
                way.id,
                name,
                meta,
                first.id,
                last.id,
                way.clazz,
                way.flags,
                segment.source,
                segment.target,
                km,
                kmh,
                cost,
                reverse_cost,
                first.point.lon,
                first.point.lat,
                last.point.lon,
                last.point.lat,
                geom_way,
            );
            batch.push(&row)?;

            n += 1;
            if n % PROGRESS_INTERVAL == 0 {
                info!("{n} segments written");
            }
        }
    }

    let total = batch.finish()?;
    info!("{total} segments written");

    out.write_all(schema::edge_postamble(&config.table).as_bytes())?;
    out.flush()?;
    Ok(total)
}
