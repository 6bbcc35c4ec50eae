//! `shp2rdf`: Converts a statistical sector shapefile into RDF.
//!
//! Each sector becomes a `ramon:LAURegion` with its containment links, Dutch
//! and French labels, and its polygon as a `geo:wktLiteral`.
//!
//! **Usage:**
//! ```text
//! shp2rdf [--format ntriples|turtle] [--config <mapping.toml>] [--json] [-v] <INPUT> <OUTPUT>
//! ```
//!
//! **Exit codes:** `0` success, `1` input or configuration cannot be opened,
//! `2` I/O error while reading records or writing output, `3` a sector
//! geometry cannot be serialized, `64` usage error.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use statsectors::{convert_shapefile, ConversionStats, FeatureMapper, Format, MappingConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_INPUT: u8 = 1;
const EXIT_IO: u8 = 2;
const EXIT_GEOMETRY: u8 = 3;
const EXIT_USAGE: u8 = 64;

/// Convert statistical sectors to linked data.
#[derive(Parser)]
#[command(
    name = "shp2rdf",
    version,
    about = "Convert a statistical sector shapefile to N-Triples or Turtle"
)]
struct Args {
    /// Input shapefile (`.shp`, with `.shx` and `.dbf` next to it).
    input: PathBuf,

    /// Output file, replaced only when the conversion succeeds.
    output: PathBuf,

    /// Output encoding.
    #[arg(long, default_value_t = Format::NTriples)]
    format: Format,

    /// TOML mapping table overriding the built-in column names and namespaces.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the conversion statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            err.print().ok();
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(args.verbose);

    match run(&args) {
        Ok(stats) => match report(&stats, args.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("shp2rdf: {err:#}");
                ExitCode::from(EXIT_IO)
            }
        },
        Err(err) => {
            eprintln!("shp2rdf: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<ConversionStats> {
    let config = match &args.config {
        Some(path) => MappingConfig::load(path)
            .with_context(|| format!("Failed to load mapping table {}", path.display()))?,
        None => MappingConfig::default(),
    };
    let mapper = FeatureMapper::new(config).context("Invalid mapping table")?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        format = %args.format,
        "converting"
    );
    convert_shapefile(&args.input, &args.output, args.format, &mapper)
        .with_context(|| format!("Failed to convert {}", args.input.display()))
}

fn report(stats: &ConversionStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        println!(
            "{} features read, {} sectors written ({} triples), {} features skipped, {} triples skipped",
            stats.features_read,
            stats.entities_emitted,
            stats.triples_emitted,
            stats.features_skipped(),
            stats.triples_skipped
        );
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    use statsectors::Error;
    match err.downcast_ref::<Error>() {
        Some(Error::InputRead { .. } | Error::OutputWrite { .. }) => EXIT_IO,
        Some(Error::GeometrySerialization { .. }) => EXIT_GEOMETRY,
        _ => EXIT_INPUT,
    }
}
