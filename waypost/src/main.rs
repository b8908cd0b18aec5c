//! waypost CLI: export segmented-way and vertex record streams to
//! pgRouting-compatible SQL load scripts.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use waypost_export::{
    export_edges, export_vertices, EdgeExportConfig, VertexExportConfig, EDGE_BATCH_SIZE,
    VERTEX_BATCH_SIZE,
};
use waypost_io::{VertexReader, WayReader};

#[derive(Parser)]
#[command(name = "waypost")]
#[command(about = "Routing graph to pgRouting SQL exporter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the segmented-way stream as the edge table script
    Edges {
        /// Segmented-way stream file from the upstream segmenter
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the generated .sql file
        #[arg(short, long, default_value = ".")]
        outdir: PathBuf,

        /// Table name prefix
        #[arg(short, long, default_value = "osm")]
        prefix: String,

        /// Write the script to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Encode geometry as MULTILINESTRING instead of LINESTRING
        #[arg(long)]
        multiline: bool,

        /// Rows per multi-row INSERT
        #[arg(long, default_value_t = EDGE_BATCH_SIZE)]
        batch_size: usize,
    },
    /// Export the vertex stream as the vertex table script
    Vertices {
        /// Vertex stream file from the upstream segmenter
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the generated .sql file
        #[arg(short, long, default_value = ".")]
        outdir: PathBuf,

        /// Table name prefix
        #[arg(short, long, default_value = "osm")]
        prefix: String,

        /// Write the script to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Rows per multi-row INSERT
        #[arg(long, default_value_t = VERTEX_BATCH_SIZE)]
        batch_size: usize,
    },
}

/// Where the SQL text goes: stdout, or a buffered file named after the table.
enum Sink {
    Stdout,
    File(PathBuf),
}

impl Sink {
    fn resolve(stdout: bool, outdir: &Path, table: &str) -> Self {
        if stdout {
            Sink::Stdout
        } else {
            Sink::File(outdir.join(format!("{table}.sql")))
        }
    }
}

fn run_edges(
    input: &Path,
    sink: Sink,
    table: &str,
    multiline: bool,
    batch_size: usize,
) -> Result<()> {
    if !input.exists() {
        error!("file not found: {}", input.display());
        return Ok(());
    }

    let reader = WayReader::open(input)
        .with_context(|| format!("failed to open way stream {}", input.display()))?;

    let mut config = EdgeExportConfig::new(table);
    config.multiline = multiline;
    config.batch_size = batch_size;

    match sink {
        Sink::Stdout => {
            info!("writing results to stdout");
            export_edges(reader, std::io::stdout().lock(), &config)?;
        }
        Sink::File(path) => {
            info!("creating sql file {}", path.display());
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            export_edges(reader, BufWriter::new(file), &config)?;
            print_psql_hint(&path);
        }
    }
    Ok(())
}

fn run_vertices(input: &Path, sink: Sink, table: &str, batch_size: usize) -> Result<()> {
    if !input.exists() {
        error!("file not found: {}", input.display());
        return Ok(());
    }

    let reader = VertexReader::open(input)
        .with_context(|| format!("failed to open vertex stream {}", input.display()))?;

    let mut config = VertexExportConfig::new(table);
    config.batch_size = batch_size;

    match sink {
        Sink::Stdout => {
            info!("writing results to stdout");
            export_vertices(reader, std::io::stdout().lock(), &config)?;
        }
        Sink::File(path) => {
            info!("creating sql file {}", path.display());
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            export_vertices(reader, BufWriter::new(file), &config)?;
            print_psql_hint(&path);
        }
    }
    Ok(())
}

fn print_psql_hint(path: &Path) {
    info!(
        "commandline template:\npsql -U [username] -d [dbname] -q -f \"{}\"",
        path.display()
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Edges {
            input,
            outdir,
            prefix,
            stdout,
            multiline,
            batch_size,
        } => {
            let table = format!("{}_2po_4pgr", prefix.to_lowercase());
            let sink = Sink::resolve(stdout, &outdir, &table);
            run_edges(&input, sink, &table, multiline, batch_size)
        }
        Commands::Vertices {
            input,
            outdir,
            prefix,
            stdout,
            batch_size,
        } => {
            let table = format!("{}_2po_vertex", prefix.to_lowercase());
            let sink = Sink::resolve(stdout, &outdir, &table);
            run_vertices(&input, sink, &table, batch_size)
        }
    }
}
