//! Converted-output validators (RDF syntax, entity shape, round trip).

pub mod entities;
pub mod rdf;
pub mod roundtrip;
