//! Vocabulary IRIs used by the mapping table.

use crate::model::Iri;

/// `rdf:` namespace.
pub const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// `rdfs:` namespace.
pub const NS_RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// GeoSPARQL namespace (`geo:asWKT`, `geo:wktLiteral`).
pub const NS_GEO: &str = "http://www.opengis.net/ont/geosparql#";
/// Spatial relations vocabulary (`spatial:PP`).
pub const NS_SPATIAL: &str = "http://geovocab.org/spatial#";
/// Eurostat RAMON geographic ontology (`ramon:LAURegion`).
pub const NS_RAMON: &str = "http://ec.europa.eu/eurostat/ramon/ontologies/geographic.rdf#";

/// `rdf:type`
pub const RDF_TYPE: Iri = Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
/// `rdfs:label`
pub const RDFS_LABEL: Iri = Iri::from_static("http://www.w3.org/2000/01/rdf-schema#label");
/// `geo:asWKT`
pub const GEO_AS_WKT: Iri = Iri::from_static("http://www.opengis.net/ont/geosparql#asWKT");
/// `geo:wktLiteral`
pub const GEO_WKT_LITERAL: Iri =
    Iri::from_static("http://www.opengis.net/ont/geosparql#wktLiteral");
/// `spatial:PP`, the part-of relation.
pub const SPATIAL_PP: Iri = Iri::from_static("http://geovocab.org/spatial#PP");
/// `ramon:LAURegion`, the class of every emitted sector.
pub const RAMON_LAU_REGION: &str =
    "http://ec.europa.eu/eurostat/ramon/ontologies/geographic.rdf#LAURegion";

/// Prefixes declared on every graph, in output order.
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("rdf", NS_RDF),
    ("rdfs", NS_RDFS),
    ("geo", NS_GEO),
    ("spatial", NS_SPATIAL),
    ("ramon", NS_RAMON),
];
