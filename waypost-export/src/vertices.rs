//! Vertex export: vertex stream → pgRouting vertex table script.

use std::io::Write;

use log::info;

use waypost_common::Result;
use waypost_geometry::wkb::{point_wkb, to_hex};
use waypost_io::{RecordSource, Restriction, Vertex};

use crate::schema;
use crate::sql::{quote_nullable, BatchWriter};
use crate::{PROGRESS_INTERVAL, VERTEX_BATCH_SIZE};

pub struct VertexExportConfig {
    /// Target table, e.g. `osm_2po_vertex`.
    pub table: String,
    /// Rows per multi-row INSERT.
    pub batch_size: usize,
}

impl VertexExportConfig {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            batch_size: VERTEX_BATCH_SIZE,
        }
    }
}

/// Render a vertex's restriction set as the compact wire token the
/// downstream schema expects: per restriction a sign (`-` forbidden,
/// `+` only-allowed) then `<from>_<to>`, concatenated in input order and
/// single-quoted. No or empty restrictions render the unquoted `null`
/// marker.
pub fn restriction_token(restrictions: Option<&[Restriction]>) -> String {
    match restrictions {
        None => "null".to_string(),
        Some([]) => "null".to_string(),
        Some(list) => {
            let mut token = String::from("'");
            for restriction in list {
                token.push(if restriction.clazz & 1 != 0 { '-' } else { '+' });
                token.push_str(&restriction.from.to_string());
                token.push('_');
                token.push_str(&restriction.to.to_string());
            }
            token.push('\'');
            token
        }
    }
}

/// Drive the vertex export: schema preamble, one row per vertex in stream
/// order, key/index postamble. Returns the number of rows written.
pub fn export_vertices<S, W>(mut source: S, mut out: W, config: &VertexExportConfig) -> Result<u64>
where
    S: RecordSource<Record = Vertex>,
    W: Write,
{
    out.write_all(schema::vertex_preamble(&config.table).as_bytes())?;

    let mut batch = BatchWriter::new(&mut out, &config.table, config.batch_size);
    let mut n: u64 = 0;

    while let Some(vertex) = source.next_record()? {
        let geom_vertex = to_hex(&point_wkb(vertex.point));
        let row = format!(
            "({}, {}, {}, {}, {}, {}, '{}')",
            vertex.id,
            vertex.clazz,
            vertex.osm_id,
            quote_nullable(&vertex.osm_name),
            vertex.ref_count,
            restriction_token(vertex.restrictions.as_deref()),
            geom_vertex,
        );
        batch.push(&row)?;

        n += 1;
        if n % PROGRESS_INTERVAL == 0 {
            info!("{n} vertices written");
        }
    }

    let total = batch.finish()?;
    info!("{total} vertices written");

    out.write_all(schema::vertex_postamble(&config.table).as_bytes())?;
    out.flush()?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypost_geometry::GeoPoint;

    struct VecSource(std::vec::IntoIter<Vertex>);

    impl RecordSource for VecSource {
        type Record = Vertex;

        fn declared_tag(&self) -> u8 {
            waypost_io::TAG_VERTICES
        }

        fn next_record(&mut self) -> Result<Option<Vertex>> {
            Ok(self.0.next())
        }
    }

    fn vertex(id: i32, restrictions: Option<Vec<Restriction>>) -> Vertex {
        Vertex {
            id,
            clazz: 0,
            osm_id: 31_000_000 + id as i64,
            osm_name: String::new(),
            ref_count: 3,
            point: GeoPoint::new(10.0, 53.5),
            restrictions,
        }
    }

    #[test]
    fn test_restriction_token_rendering() {
        let list = vec![
            Restriction {
                clazz: 1,
                from: 5,
                to: 9,
            },
            Restriction {
                clazz: 0,
                from: 3,
                to: 7,
            },
        ];
        assert_eq!(restriction_token(Some(&list)), "'-5_9+3_7'");
        assert_eq!(restriction_token(None), "null");
        assert_eq!(restriction_token(Some(&[])), "null");
    }

    #[test]
    fn test_restriction_token_bitmask_only_checks_bit0() {
        let list = vec![Restriction {
            clazz: 0b11,
            from: 1,
            to: 2,
        }];
        assert_eq!(restriction_token(Some(&list)), "'-1_2'");
        let list = vec![Restriction {
            clazz: 0b10,
            from: 1,
            to: 2,
        }];
        assert_eq!(restriction_token(Some(&list)), "'+1_2'");
    }

    #[test]
    fn test_vertex_row() {
        let mut buf = Vec::new();
        let source = VecSource(
            vec![vertex(
                1,
                Some(vec![Restriction {
                    clazz: 1,
                    from: 5,
                    to: 9,
                }]),
            )]
            .into_iter(),
        );
        let total = export_vertices(source, &mut buf, &VertexExportConfig::new("v")).unwrap();
        assert_eq!(total, 1);

        let out = String::from_utf8(buf).unwrap();
        // Known point WKB for (10.0, 53.5).
        assert!(out.contains("'-5_9', '01010000000000000000002440000000000000C04A40')"));
        assert!(out.contains("(1, 0, 31000001, null, 3, "));
    }

    #[test]
    fn test_batching_at_fifty() {
        let vertices: Vec<Vertex> = (0..51).map(|i| vertex(i, None)).collect();
        let mut buf = Vec::new();
        export_vertices(
            VecSource(vertices.into_iter()),
            &mut buf,
            &VertexExportConfig::new("v"),
        )
        .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.matches("INSERT INTO v VALUES").count(), 2);
    }

    #[test]
    fn test_empty_stream_writes_schema_only() {
        let mut buf = Vec::new();
        let total = export_vertices(
            VecSource(Vec::new().into_iter()),
            &mut buf,
            &VertexExportConfig::new("v"),
        )
        .unwrap();
        assert_eq!(total, 0);
        let out = String::from_utf8(buf).unwrap();
        assert!(!out.contains("INSERT"));
        assert!(out.contains("CREATE TABLE v("));
        assert!(out.contains("PRIMARY KEY(id)"));
    }
}
