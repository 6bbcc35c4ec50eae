//! Conformance checks for `statsectors` output.
//!
//! | Check | Standard |
//! |-------|----------|
//! | Syntax | RDF 1.1 N-Triples, Turtle 1.1 (parsed with `sophia_turtle`) |
//! | Entities | one `rdf:type`, one `geo:asWKT` polygon, one label per language |
//! | Round trip | both encodings parse back to the graph's own triples |
//!
//! # Entry Point
//!
//! ```no_run
//! use statsectors_conformance::run_all;
//! use std::path::Path;
//!
//! let report = run_all(Path::new("sectors.nt"), None)?;
//! assert!(report.all_passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::Path;

use anyhow::Context;
use statsectors::{Format, Graph};

pub mod report;
pub mod validators;

pub use report::{ConformanceReport, Severity, TestResult};

use validators::output::{entities, rdf, roundtrip};

/// Picks the encoding from the file extension: `.ttl` is Turtle, anything
/// else N-Triples.
#[must_use]
pub fn format_for_path(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("ttl") => Format::Turtle,
        _ => Format::NTriples,
    }
}

/// Validates serialized output held in memory.
///
/// Entity checks run only when the document parses.
pub fn validate_text(text: &str, format: Format) -> ConformanceReport {
    let (mut report, triples) = rdf::validate(text, format);
    if let Some(triples) = triples.filter(|t| !t.is_empty()) {
        report.extend(entities::validate(&triples));
    }
    report
}

/// Runs every file-level check on the converted output at `path`.
///
/// `format` defaults to [`format_for_path`].
///
/// # Errors
///
/// Returns an error only if the file cannot be read.
pub fn run_all(path: &Path, format: Option<Format>) -> anyhow::Result<ConformanceReport> {
    let format = format.unwrap_or_else(|| format_for_path(path));
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(validate_text(&text, format))
}

/// Checks an in-memory graph: entity shape, then a round trip through both
/// encodings.
///
/// # Errors
///
/// Returns an error if serializing into memory fails.
pub fn validate_graph(graph: &Graph) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    if !graph.is_empty() {
        report.extend(entities::validate(&rdf::lower_graph(graph)));
    }
    report.extend(roundtrip::validate(graph)?);
    Ok(report)
}
