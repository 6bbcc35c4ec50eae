//! Per-entity shape of converted output.
//!
//! Every subject must carry exactly one `rdf:type` and one `geo:asWKT`
//! literal typed `geo:wktLiteral` holding a `POLYGON` or `MULTIPOLYGON`,
//! and at most one `rdfs:label` per language. A subject without any
//! `spatial:PP` link is reported as a warning.

use std::collections::BTreeMap;

use statsectors::vocab;

use super::rdf::{ParsedObject, ParsedTriple};
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "output/entities";
const MAX_DETAILS: usize = 10;

/// Validates the entities described by `triples`.
pub fn validate(triples: &[ParsedTriple]) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let mut by_subject: BTreeMap<&str, Vec<&ParsedTriple>> = BTreeMap::new();
    for t in triples {
        by_subject.entry(t.subject.as_str()).or_default().push(t);
    }

    let mut problems = Vec::new();
    let mut unlinked = Vec::new();
    for (subject, statements) in &by_subject {
        problems.extend(check_entity(subject, statements));
        if !statements.iter().any(|t| t.predicate == vocab::SPATIAL_PP.as_str()) {
            unlinked.push((*subject).to_owned());
        }
    }

    if problems.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{} entities have one type and one geometry", by_subject.len()),
        ));
    } else {
        let count = problems.len();
        problems.truncate(MAX_DETAILS);
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{count} entity shape violations"),
            problems,
        ));
    }

    if !unlinked.is_empty() {
        let count = unlinked.len();
        unlinked.truncate(MAX_DETAILS);
        report.push(TestResult::warn_with_details(
            VALIDATOR,
            format!("{count} entities have no spatial:PP link"),
            unlinked,
        ));
    }

    report
}

fn check_entity(subject: &str, statements: &[&ParsedTriple]) -> Vec<String> {
    let mut problems = Vec::new();
    let with = |predicate: &str| objects(statements, predicate);

    let types = with(vocab::RDF_TYPE.as_str());
    if types.len() != 1 {
        problems.push(format!("<{subject}>: {} rdf:type statements", types.len()));
    }
    if types.iter().any(|o| !matches!(o, ParsedObject::Node(_))) {
        problems.push(format!("<{subject}>: rdf:type object is a literal"));
    }

    let geometries = with(vocab::GEO_AS_WKT.as_str());
    match geometries.as_slice() {
        [ParsedObject::Typed { value, datatype }] => {
            if datatype != vocab::GEO_WKT_LITERAL.as_str() {
                problems.push(format!("<{subject}>: geometry typed <{datatype}>"));
            }
            if !is_polygonal_wkt(value) {
                problems.push(format!("<{subject}>: geometry is not a (multi)polygon"));
            }
        }
        [_] => problems.push(format!("<{subject}>: geometry is not a typed literal")),
        other => problems.push(format!("<{subject}>: {} geo:asWKT statements", other.len())),
    }

    let mut langs: BTreeMap<&str, usize> = BTreeMap::new();
    for label in with(vocab::RDFS_LABEL.as_str()) {
        match label {
            ParsedObject::LangString { lang, .. } => *langs.entry(lang.as_str()).or_default() += 1,
            _ => problems.push(format!("<{subject}>: label without a language tag")),
        }
    }
    for (lang, n) in langs {
        if n > 1 {
            problems.push(format!("<{subject}>: {n} labels tagged @{lang}"));
        }
    }

    problems
}

fn objects<'a>(statements: &[&'a ParsedTriple], predicate: &str) -> Vec<&'a ParsedObject> {
    statements
        .iter()
        .filter(|t| t.predicate == predicate)
        .map(|t| &t.object)
        .collect()
}

fn is_polygonal_wkt(value: &str) -> bool {
    let keyword: String = value
        .trim_start()
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    keyword == "POLYGON" || keyword == "MULTIPOLYGON"
}
