//! Serialize → parse round trip.
//!
//! A graph written as N-Triples and as Turtle must parse back to its own
//! triples, as a multiset, in both encodings.

use statsectors::{Format, Graph};

use super::rdf::{self, ParsedTriple};
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "output/roundtrip";

/// Round-trips `graph` through every output format.
///
/// # Errors
///
/// Returns an error if serialization into memory fails or produces
/// non-UTF-8 text.
pub fn validate(graph: &Graph) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let mut expected = rdf::lower_graph(graph);
    expected.sort();

    for format in [Format::NTriples, Format::Turtle] {
        let mut buf = Vec::new();
        graph.serialize(format, &mut buf)?;
        let text = String::from_utf8(buf)?;
        report.push(compare(format, &text, &expected));
    }

    Ok(report)
}

fn compare(format: Format, text: &str, expected: &[ParsedTriple]) -> TestResult {
    let mut parsed = match rdf::parse(text, format) {
        Ok(parsed) => parsed,
        Err(message) => {
            return TestResult::fail_with_details(
                VALIDATOR,
                format!("serialized {format} does not parse"),
                vec![message],
            )
        }
    };
    parsed.sort();

    if parsed == expected {
        return TestResult::pass(
            VALIDATOR,
            format!("{format} round trip preserves {} triples", expected.len()),
        );
    }

    let missing = expected
        .iter()
        .filter(|t| !parsed.contains(t))
        .map(|t| format!("lost: {t:?}"));
    let extra = parsed
        .iter()
        .filter(|t| !expected.contains(t))
        .map(|t| format!("gained: {t:?}"));
    let mut details: Vec<String> = missing.chain(extra).take(10).collect();
    if details.is_empty() {
        details.push(format!(
            "multiplicity differs: {} written, {} parsed",
            expected.len(),
            parsed.len()
        ));
    }
    TestResult::fail_with_details(
        VALIDATOR,
        format!("{format} round trip changed the triple set"),
        details,
    )
}
