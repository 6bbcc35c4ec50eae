//! In-memory triple accumulator.
//!
//! The graph keeps triples in insertion order and does not deduplicate them.
//! It lives for exactly one conversion run and has a single writer.

use std::collections::HashSet;
use std::io::{self, Write};

use crate::model::{Iri, Term, Triple};
use crate::serializer::{ntriples, turtle, Format};

/// An ordered multiset of triples plus namespace-prefix metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: Vec<Triple>,
    prefixes: Vec<(String, String)>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a triple.
    pub fn add(&mut self, subject: Iri, predicate: Iri, object: impl Into<Term>) {
        self.triples.push(Triple {
            subject,
            predicate,
            object: object.into(),
        });
    }

    /// Declares `short:` as an abbreviation of `namespace`.
    ///
    /// Re-declaring a prefix replaces its namespace but keeps its position.
    pub fn set_namespace_prefix(&mut self, short: impl Into<String>, namespace: impl Into<String>) {
        let short = short.into();
        let namespace = namespace.into();
        match self.prefixes.iter_mut().find(|(s, _)| *s == short) {
            Some(slot) => slot.1 = namespace,
            None => self.prefixes.push((short, namespace)),
        }
    }

    /// Declared prefixes in declaration order.
    #[must_use]
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Triples in insertion order.
    #[must_use]
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Iterates over triples in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    /// Number of triples, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if no triple has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Number of distinct subjects.
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.triples
            .iter()
            .map(|t| &t.subject)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Triples with `subject`, in insertion order.
    pub fn about<'a>(&'a self, subject: &'a Iri) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| t.subject == *subject)
    }

    /// Writes the graph in `format`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `out`.
    pub fn serialize<W: Write>(&self, format: Format, out: &mut W) -> io::Result<()> {
        match format {
            Format::NTriples => ntriples::write_ntriples(self, out),
            Format::Turtle => turtle::write_turtle(self, out),
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab;

    fn sector(code: &str) -> Iri {
        Iri::parse(format!("http://geo.belgif.org/nis2011/{code}#id")).unwrap()
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut graph = Graph::new();
        let class = Iri::from_static(vocab::RAMON_LAU_REGION);
        graph.add(sector("2"), vocab::RDF_TYPE, class.clone());
        graph.add(sector("1"), vocab::RDF_TYPE, class.clone());
        graph.add(sector("1"), vocab::RDF_TYPE, class);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.subject_count(), 2);
        assert_eq!(graph.triples()[0].subject, sector("2"));
        assert_eq!(graph.about(&sector("1")).count(), 2);
    }

    #[test]
    fn redeclared_prefix_keeps_position() {
        let mut graph = Graph::new();
        graph.set_namespace_prefix("geo", "http://example.org/old#");
        graph.set_namespace_prefix("rdfs", vocab::NS_RDFS);
        graph.set_namespace_prefix("geo", vocab::NS_GEO);
        assert_eq!(
            graph.prefixes(),
            &[
                ("geo".to_owned(), vocab::NS_GEO.to_owned()),
                ("rdfs".to_owned(), vocab::NS_RDFS.to_owned()),
            ]
        );
    }
}
