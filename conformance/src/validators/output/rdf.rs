//! RDF 1.1 syntax validator.
//!
//! Parses serialized output with `sophia_turtle` and lowers every triple to
//! plain strings, so the other validators can compare parsed output with a
//! [`Graph`] without caring which parser produced it.

use sophia_api::source::TripleSource;
use sophia_api::term::{Term, TermKind};
use sophia_api::triple::Triple;
use statsectors::{Format, Graph, Literal};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "output/syntax";

/// The object of a lowered triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParsedObject {
    /// An IRI, or a blank node written as `_:label`.
    Node(String),
    /// A language-tagged string; the tag is lowercase.
    LangString {
        /// Lexical form.
        value: String,
        /// Language tag.
        lang: String,
    },
    /// Any other literal.
    Typed {
        /// Lexical form.
        value: String,
        /// Datatype IRI.
        datatype: String,
    },
}

/// A triple reduced to strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParsedTriple {
    /// Subject IRI or `_:label`.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object.
    pub object: ParsedObject,
}

/// Parses `text` in `format`.
///
/// # Errors
///
/// Returns the parser's message, or a description of a term that cannot be
/// lowered (RDF-star quoted triples, variables).
pub fn parse(text: &str, format: Format) -> Result<Vec<ParsedTriple>, String> {
    let mut lowered = Vec::new();
    let parsed = match format {
        Format::NTriples => sophia_turtle::parser::nt::parse_str(text)
            .for_each_triple(|t| lowered.push(lower(&t)))
            .map_err(|err| err.to_string()),
        Format::Turtle => sophia_turtle::parser::turtle::parse_str(text)
            .for_each_triple(|t| lowered.push(lower(&t)))
            .map_err(|err| err.to_string()),
    };
    parsed?;
    lowered.into_iter().collect()
}

/// Lowers the triples of `graph` the same way [`parse`] lowers parsed ones.
#[must_use]
pub fn lower_graph(graph: &Graph) -> Vec<ParsedTriple> {
    graph
        .iter()
        .map(|t| ParsedTriple {
            subject: t.subject.to_string(),
            predicate: t.predicate.to_string(),
            object: match &t.object {
                statsectors::Term::Iri(iri) => ParsedObject::Node(iri.to_string()),
                statsectors::Term::Literal(Literal::LangString { value, lang }) => {
                    ParsedObject::LangString {
                        value: value.clone(),
                        lang: lang.to_ascii_lowercase(),
                    }
                }
                statsectors::Term::Literal(Literal::Typed { value, datatype }) => {
                    ParsedObject::Typed {
                        value: value.clone(),
                        datatype: datatype.to_string(),
                    }
                }
            },
        })
        .collect()
}

fn lower<T: Triple>(t: &T) -> Result<ParsedTriple, String> {
    Ok(ParsedTriple {
        subject: node(&t.s())?,
        predicate: node(&t.p())?,
        object: object(&t.o())?,
    })
}

fn node<T: Term>(term: &T) -> Result<String, String> {
    let lowered = match term.kind() {
        TermKind::Iri => term.iri().map(|iri| iri.as_str().to_owned()),
        TermKind::BlankNode => term.bnode_id().map(|id| format!("_:{}", id.as_str())),
        _ => None,
    };
    lowered.ok_or_else(|| format!("unsupported {:?} term in node position", term.kind()))
}

fn object<T: Term>(term: &T) -> Result<ParsedObject, String> {
    if term.kind() != TermKind::Literal {
        return node(term).map(ParsedObject::Node);
    }
    let value = term
        .lexical_form()
        .map(|lex| String::from(&*lex))
        .ok_or("literal without a lexical form")?;
    if let Some(tag) = term.language_tag() {
        return Ok(ParsedObject::LangString {
            value,
            lang: tag.as_str().to_ascii_lowercase(),
        });
    }
    let datatype = term
        .datatype()
        .map(|dt| dt.as_str().to_owned())
        .ok_or("literal without a datatype")?;
    Ok(ParsedObject::Typed { value, datatype })
}

/// Checks that `text` parses as `format`.
///
/// Returns the parsed triples alongside the report so later validators do not
/// parse twice; `None` when parsing failed.
pub fn validate(text: &str, format: Format) -> (ConformanceReport, Option<Vec<ParsedTriple>>) {
    let mut report = ConformanceReport::new();
    match parse(text, format) {
        Ok(triples) if triples.is_empty() => {
            report.push(TestResult::warn(
                VALIDATOR,
                format!("{format} document contains no triples"),
            ));
            (report, Some(triples))
        }
        Ok(triples) => {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("valid {format} ({} triples)", triples.len()),
            ));
            (report, Some(triples))
        }
        Err(message) => {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("document is not valid {format}"),
                vec![message],
            ));
            (report, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "<http://geo.belgif.org/nis2011/1#id> <http://www.w3.org/2000/01/rdf-schema#label> \"Centrum\"@nl .\n";

    #[test]
    fn lowers_language_strings() {
        let triples = parse(LINE, Format::NTriples).unwrap();
        assert_eq!(
            triples,
            vec![ParsedTriple {
                subject: "http://geo.belgif.org/nis2011/1#id".to_owned(),
                predicate: "http://www.w3.org/2000/01/rdf-schema#label".to_owned(),
                object: ParsedObject::LangString {
                    value: "Centrum".to_owned(),
                    lang: "nl".to_owned(),
                },
            }]
        );
    }

    #[test]
    fn turtle_prefixes_expand() {
        let ttl = "@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
                   <http://geo.belgif.org/nis2011/1#id> rdfs:label \"Centrum\"@nl .\n";
        assert_eq!(
            parse(ttl, Format::Turtle).unwrap(),
            parse(LINE, Format::NTriples).unwrap()
        );
    }

    #[test]
    fn syntax_error_fails() {
        let (report, triples) = validate("<not closed", Format::NTriples);
        assert!(triples.is_none());
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn empty_document_warns() {
        let (report, triples) = validate("", Format::NTriples);
        assert_eq!(triples, Some(Vec::new()));
        assert!(report.all_passed());
        assert_eq!(report.results[0].severity, crate::Severity::Warning);
    }
}
