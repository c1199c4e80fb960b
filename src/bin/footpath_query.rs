//! Index a footpath CSV and answer point or range queries read from stdin.
//!
//! Matches go to the output file, traversal paths to stdout. Logs go to stderr, filtered by
//! `RUST_LOG`.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use footpath_quadtree::query::{self, Mode};
use footpath_quadtree::record::{index_footpaths, read_footpaths};
use footpath_quadtree::{Point, Rect};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QueryMode {
    /// Exact point lookups, `x y` per line
    #[value(alias = "1")]
    Point,
    /// Rectangle lookups, `bl_x bl_y tr_x tr_y` per line
    #[value(alias = "2")]
    Range,
}

impl From<QueryMode> for Mode {
    fn from(mode: QueryMode) -> Self {
        match mode {
            QueryMode::Point => Mode::Point,
            QueryMode::Range => Mode::Range,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about, allow_negative_numbers = true)]
struct Args {
    /// Kind of queries read from stdin
    #[arg(value_enum)]
    mode: QueryMode,
    /// Footpath CSV with a header line
    csv: PathBuf,
    /// File receiving the matched footpaths
    output: PathBuf,
    /// Longitude of the bottom left corner of the indexed area
    bl_x: f64,
    /// Latitude of the bottom left corner of the indexed area
    bl_y: f64,
    /// Longitude of the top right corner of the indexed area
    tr_x: f64,
    /// Latitude of the top right corner of the indexed area
    tr_y: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let input = File::open(&args.csv)
        .with_context(|| format!("failed to open {}", args.csv.display()))?;
    let footpaths = read_footpaths(BufReader::new(input))
        .with_context(|| format!("failed to read footpaths from {}", args.csv.display()))?;

    let bounds = Rect::new(
        Point::new(args.bl_x, args.bl_y),
        Point::new(args.tr_x, args.tr_y),
    );
    let tree = index_footpaths(bounds, &footpaths);

    let output = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut output = BufWriter::new(output);
    let stdout = io::stdout();
    let mut paths = stdout.lock();

    let summary = query::run(
        args.mode.into(),
        &tree,
        io::stdin().lock(),
        &mut output,
        &mut paths,
    )?;
    output.flush()?;
    paths.flush()?;

    info!(
        queries = summary.queries,
        hits = summary.hits,
        skipped = summary.skipped,
        "done"
    );
    Ok(())
}
