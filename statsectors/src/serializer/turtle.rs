//! Turtle 1.1 serializer.
//!
//! Emits the graph's prefix declarations, then one block per run of
//! consecutive triples sharing a subject. IRIs under a declared namespace are
//! written as prefixed names when the local part is a plain name; `rdf:type`
//! is written as `a`.

use std::io::{self, Write};

use super::escape_literal;
use crate::graph::Graph;
use crate::model::{Literal, Term, Triple};
use crate::vocab;

/// Serializes the whole graph to a Turtle string.
#[must_use]
pub fn to_turtle(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 120 + 512);
    push_prefixes(&mut out, graph.prefixes());
    for block in graph.triples().chunk_by(|a, b| a.subject == b.subject) {
        push_block(&mut out, graph.prefixes(), block);
    }
    out
}

/// Streams the graph as Turtle, one subject block at a time.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_turtle<W: Write>(graph: &Graph, out: &mut W) -> io::Result<()> {
    let mut buf = String::with_capacity(1024);
    push_prefixes(&mut buf, graph.prefixes());
    out.write_all(buf.as_bytes())?;
    for block in graph.triples().chunk_by(|a, b| a.subject == b.subject) {
        buf.clear();
        push_block(&mut buf, graph.prefixes(), block);
        out.write_all(buf.as_bytes())?;
    }
    Ok(())
}

fn push_prefixes(out: &mut String, prefixes: &[(String, String)]) {
    for (short, namespace) in prefixes {
        out.push_str(&format!("@prefix {short}: <{namespace}> .\n"));
    }
    if !prefixes.is_empty() {
        out.push('\n');
    }
}

fn push_block(out: &mut String, prefixes: &[(String, String)], block: &[Triple]) {
    let Some(first) = block.first() else {
        return;
    };
    push_iri(out, prefixes, first.subject.as_str());
    for (i, t) in block.iter().enumerate() {
        out.push_str(if i == 0 { "\n  " } else { " ;\n  " });
        if t.predicate == vocab::RDF_TYPE {
            out.push('a');
        } else {
            push_iri(out, prefixes, t.predicate.as_str());
        }
        out.push(' ');
        match &t.object {
            Term::Iri(iri) => push_iri(out, prefixes, iri.as_str()),
            Term::Literal(lit) => push_literal(out, prefixes, lit),
        }
    }
    out.push_str(" .\n\n");
}

fn push_iri(out: &mut String, prefixes: &[(String, String)], iri: &str) {
    match compact(prefixes, iri) {
        Some((short, local)) => {
            out.push_str(short);
            out.push(':');
            out.push_str(local);
        }
        None => {
            out.push('<');
            out.push_str(iri);
            out.push('>');
        }
    }
}

fn push_literal(out: &mut String, prefixes: &[(String, String)], lit: &Literal) {
    out.push('"');
    escape_literal(out, lit.value());
    out.push('"');
    match lit {
        Literal::LangString { lang, .. } => {
            out.push('@');
            out.push_str(lang);
        }
        Literal::Typed { datatype, .. } => {
            out.push_str("^^");
            push_iri(out, prefixes, datatype.as_str());
        }
    }
}

/// Splits `iri` into the longest declared namespace and a plain local name.
fn compact<'a>(prefixes: &'a [(String, String)], iri: &'a str) -> Option<(&'a str, &'a str)> {
    prefixes
        .iter()
        .filter_map(|(short, ns)| {
            iri.strip_prefix(ns.as_str())
                .filter(|local| is_plain_local(local))
                .map(|local| (short.as_str(), ns.len(), local))
        })
        .max_by_key(|&(_, len, _)| len)
        .map(|(short, _, local)| (short, local))
}

// A conservative subset of PN_LOCAL: no escapes, no dots, no colons.
fn is_plain_local(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('-')
        && local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Iri;

    fn prefixed_graph() -> Graph {
        let mut graph = Graph::new();
        for (short, ns) in vocab::STANDARD_PREFIXES {
            graph.set_namespace_prefix(*short, *ns);
        }
        graph
    }

    fn sector(code: &str) -> Iri {
        Iri::parse(format!("http://geo.belgif.org/nis2011/{code}#id")).unwrap()
    }

    #[test]
    fn declares_every_prefix() {
        let turtle = to_turtle(&prefixed_graph());
        for (short, ns) in vocab::STANDARD_PREFIXES {
            assert!(
                turtle.contains(&format!("@prefix {short}: <{ns}> .")),
                "Missing prefix declaration for '{short}'"
            );
        }
    }

    #[test]
    fn groups_consecutive_subjects() {
        let mut graph = prefixed_graph();
        graph.add(sector("1"), vocab::RDF_TYPE, Iri::from_static(vocab::RAMON_LAU_REGION));
        graph.add(
            sector("1"),
            vocab::RDFS_LABEL,
            Literal::LangString {
                value: "Centrum".to_owned(),
                lang: "nl".to_owned(),
            },
        );
        graph.add(sector("2"), vocab::SPATIAL_PP, sector("1"));
        let turtle = to_turtle(&graph);
        assert!(turtle.contains(
            "<http://geo.belgif.org/nis2011/1#id>\n  a ramon:LAURegion ;\n  rdfs:label \"Centrum\"@nl .\n"
        ), "{turtle}");
        assert!(turtle.contains(
            "<http://geo.belgif.org/nis2011/2#id>\n  spatial:PP <http://geo.belgif.org/nis2011/1#id> .\n"
        ), "{turtle}");
    }

    #[test]
    fn datatype_is_compacted() {
        let mut graph = prefixed_graph();
        graph.add(
            sector("1"),
            vocab::GEO_AS_WKT,
            Literal::Typed {
                value: "POLYGON((0 0,1 0,1 1,0 0))".to_owned(),
                datatype: vocab::GEO_WKT_LITERAL,
            },
        );
        let turtle = to_turtle(&graph);
        assert!(turtle.contains("geo:asWKT \"POLYGON((0 0,1 0,1 1,0 0))\"^^geo:wktLiteral ."), "{turtle}");
    }

    #[test]
    fn undeclared_namespace_stays_absolute() {
        let mut graph = Graph::new();
        graph.add(sector("1"), vocab::SPATIAL_PP, sector("2"));
        let turtle = to_turtle(&graph);
        assert!(!turtle.contains("@prefix"));
        assert!(turtle.contains("<http://geovocab.org/spatial#PP>"));
    }

    #[test]
    fn longest_namespace_wins() {
        let prefixes = vec![
            ("ex".to_owned(), "http://example.org/".to_owned()),
            ("exv".to_owned(), "http://example.org/vocab/".to_owned()),
        ];
        assert_eq!(
            compact(&prefixes, "http://example.org/vocab/term"),
            Some(("exv", "term"))
        );
        assert_eq!(compact(&prefixes, "http://example.org/a/b"), None);
    }

    #[test]
    fn streaming_matches_string_output() {
        let mut graph = prefixed_graph();
        graph.add(sector("1"), vocab::SPATIAL_PP, sector("2"));
        let mut buf = Vec::new();
        write_turtle(&graph, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_turtle(&graph));
    }
}
