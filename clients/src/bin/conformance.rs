//! `statsectors-conformance`: Validates converted sector output.
//!
//! Parses the file with a standard RDF parser and checks every entity for one
//! type, one polygonal geometry, and at most one label per language.
//!
//! **Usage:**
//! ```text
//! statsectors-conformance [--format ntriples|turtle] [--json] <FILE>
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use statsectors::Format;
use statsectors_conformance::{run_all, Severity};

/// Run the statsectors output conformance checks.
#[derive(Parser)]
#[command(
    name = "statsectors-conformance",
    about = "Validate converted statistical sector output"
)]
struct Args {
    /// N-Triples or Turtle file produced by `shp2rdf`.
    file: PathBuf,

    /// Encoding of the file (default: from its extension).
    #[arg(long)]
    format: Option<Format>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let report = run_all(&args.file, args.format)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Conformance Report: {}", args.file.display());
        println!();

        for result in &report.results {
            println!(
                "[{}] {} - {}",
                result.severity.tag(),
                result.validator,
                result.message
            );
            for detail in &result.details {
                println!("       {}", detail);
            }
        }

        println!();
        println!(
            "Summary: {} passed, {} warnings, {} failed",
            report.count(Severity::Pass),
            report.count(Severity::Warning),
            report.failure_count()
        );
    }

    let failed = report.failure_count();
    if failed > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    if !args.json {
        println!("Conformance PASSED.");
    }
    Ok(())
}
