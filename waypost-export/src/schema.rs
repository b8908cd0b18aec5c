//! Schema DDL text: the preamble written before the insert stream and the
//! key/index postamble written after it.

const SRID: u32 = 4326;

fn comment_header() -> String {
    format!(
        "-- Created by  : waypost {}\n\
         -- Author      : waypost contributors\n\
         -- Date        : {}\n\n\
         SET client_encoding = 'UTF8';\n\n",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().to_rfc2822()
    )
}

fn drop_table(table: &str) -> String {
    format!(
        "DROP TABLE IF EXISTS {table};\n\
         -- SELECT DropGeometryTable('{table}');\n\n"
    )
}

/// Edge-table preamble. `multiline` selects the registered geometry subtype.
pub fn edge_preamble(table: &str, multiline: bool) -> String {
    let subtype = if multiline {
        "MULTILINESTRING"
    } else {
        "LINESTRING"
    };
    format!(
        "{}{}CREATE TABLE {table}(\
         id integer, osm_id bigint, \
         osm_name character varying, osm_meta character varying, \
         osm_source_id bigint, osm_target_id bigint, \
         clazz integer, flags integer, \
         source integer, target integer, \
         km double precision, kmh integer, \
         cost double precision, reverse_cost double precision, \
         x1 double precision, y1 double precision, \
         x2 double precision, y2 double precision\
         );\n\
         SELECT AddGeometryColumn('{table}', 'geom_way', {SRID}, '{subtype}', 2);\n",
        comment_header(),
        drop_table(table),
    )
}

pub fn edge_postamble(table: &str) -> String {
    format!(
        "\nALTER TABLE {table} ADD CONSTRAINT pkey_{table} PRIMARY KEY(id);\n\
         CREATE INDEX idx_{table}_source ON {table}(source);\n\
         CREATE INDEX idx_{table}_target ON {table}(target);\n\
         -- CREATE INDEX idx_{table}_osm_source_id ON {table}(osm_source_id);\n\
         -- CREATE INDEX idx_{table}_osm_target_id ON {table}(osm_target_id);\n\
         -- CREATE INDEX idx_{table}_geom_way ON {table} USING GIST (geom_way);\n"
    )
}

pub fn vertex_preamble(table: &str) -> String {
    format!(
        "{}{}CREATE TABLE {table}(\
         id integer, clazz integer, osm_id bigint, \
         osm_name character varying, ref_count integer, \
         restrictions character varying\
         );\n\
         SELECT AddGeometryColumn('{table}', 'geom_vertex', {SRID}, 'POINT', 2);\n",
        comment_header(),
        drop_table(table),
    )
}

pub fn vertex_postamble(table: &str) -> String {
    format!(
        "\nALTER TABLE {table} ADD CONSTRAINT pkey_{table} PRIMARY KEY(id);\n\
         CREATE INDEX idx_{table}_osm_id ON {table}(osm_id);\n\
         -- CREATE INDEX idx_{table}_geom_vertex ON {table} USING GIST (geom_vertex);\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_preamble_linestring_default() {
        let ddl = edge_preamble("osm_2po_4pgr", false);
        assert!(ddl.contains("SET client_encoding = 'UTF8';"));
        assert!(ddl.contains("DROP TABLE IF EXISTS osm_2po_4pgr;"));
        assert!(ddl.contains("CREATE TABLE osm_2po_4pgr("));
        assert!(ddl.contains("reverse_cost double precision"));
        assert!(ddl.contains("AddGeometryColumn('osm_2po_4pgr', 'geom_way', 4326, 'LINESTRING', 2)"));
    }

    #[test]
    fn test_edge_preamble_multiline_subtype() {
        let ddl = edge_preamble("osm_2po_4pgr", true);
        assert!(ddl.contains("'MULTILINESTRING'"));
    }

    #[test]
    fn test_edge_postamble() {
        let ddl = edge_postamble("osm_2po_4pgr");
        assert!(ddl.contains("ADD CONSTRAINT pkey_osm_2po_4pgr PRIMARY KEY(id);"));
        assert!(ddl.contains("CREATE INDEX idx_osm_2po_4pgr_source ON osm_2po_4pgr(source);"));
        assert!(ddl.contains("CREATE INDEX idx_osm_2po_4pgr_target ON osm_2po_4pgr(target);"));
        // Spatial index stays commented out, at operator discretion.
        assert!(ddl.contains("-- CREATE INDEX idx_osm_2po_4pgr_geom_way"));
    }

    #[test]
    fn test_vertex_ddl() {
        let pre = vertex_preamble("osm_2po_vertex");
        assert!(pre.contains("restrictions character varying"));
        assert!(
            pre.contains("AddGeometryColumn('osm_2po_vertex', 'geom_vertex', 4326, 'POINT', 2)")
        );
        let post = vertex_postamble("osm_2po_vertex");
        assert!(post.contains("CREATE INDEX idx_osm_2po_vertex_osm_id ON osm_2po_vertex(osm_id);"));
    }
}
