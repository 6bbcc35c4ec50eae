//! N-Triples serializer.
//!
//! Produces a valid N-Triples document (one triple per line, absolute IRIs).
//! N-Triples is suitable for streaming, bulk loading, and diff-friendly storage.
//! Prefix declarations are not part of the format and are ignored.

use std::io::{self, Write};

use super::escape_literal;
use crate::graph::Graph;
use crate::model::{Literal, Term, Triple};

/// Serializes the whole graph to an N-Triples string.
#[must_use]
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 160);
    for t in graph {
        push_triple(&mut out, t);
    }
    out
}

/// Streams the graph as N-Triples, one line per triple.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_ntriples<W: Write>(graph: &Graph, out: &mut W) -> io::Result<()> {
    let mut line = String::with_capacity(256);
    for t in graph {
        line.clear();
        push_triple(&mut line, t);
        out.write_all(line.as_bytes())?;
    }
    Ok(())
}

fn push_triple(out: &mut String, t: &Triple) {
    push_iri(out, t.subject.as_str());
    out.push(' ');
    push_iri(out, t.predicate.as_str());
    out.push(' ');
    match &t.object {
        Term::Iri(iri) => push_iri(out, iri.as_str()),
        Term::Literal(lit) => push_literal(out, lit),
    }
    out.push_str(" .\n");
}

fn push_iri(out: &mut String, iri: &str) {
    out.push('<');
    out.push_str(iri);
    out.push('>');
}

fn push_literal(out: &mut String, lit: &Literal) {
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
            push_iri(out, datatype.as_str());
        }
    }
}
