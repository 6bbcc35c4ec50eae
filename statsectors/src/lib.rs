//! Statistical sector shapefiles as linked data.
//!
//! The `statsectors` crate turns a polygon layer with an attribute table into
//! RDF triples: one `ramon:LAURegion` entity per sector, with `spatial:PP`
//! links to the units that contain it, a Dutch and a French `rdfs:label`, and
//! the polygon as a `geo:wktLiteral`.
//!
//! # Entry Point
//!
//! ```
//! use geo_types::{polygon, Geometry};
//! use statsectors::{convert, Feature, FeatureMapper, Graph, MappingConfig, MemorySource};
//!
//! let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
//! let feature = Feature::new(Some(Geometry::Polygon(square)))
//!     .with_attribute("Cs012011", "12345.0")
//!     .with_attribute("Sector_nl", "Centrum")
//!     .with_attribute("Sector_fr", "Centre");
//!
//! let mapper = FeatureMapper::new(MappingConfig::default())?;
//! let mut graph = Graph::new();
//! let stats = convert(MemorySource::new(vec![feature]), &mapper, &mut graph)?;
//! assert_eq!(stats.entities_emitted, 1);
//! assert_eq!(
//!     graph.triples()[0].subject.as_str(),
//!     "http://geo.belgif.org/nis2011/12345#id"
//! );
//! # Ok::<(), statsectors::Error>(())
//! ```
//!
//! # Serialization
//!
//! ```
//! # let graph = statsectors::Graph::new();
//! let nt = statsectors::serializer::ntriples::to_ntriples(&graph);
//! let ttl = statsectors::serializer::turtle::to_turtle(&graph);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod identifier;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod serializer;
pub mod vocab;

pub use config::{ContainmentLink, EntityConfig, LabelField, MappingConfig};
pub use error::{Error, Result};
pub use geometry::{to_wkt, GeometryError};
pub use graph::Graph;
pub use identifier::IdentifierBuilder;
pub use mapper::{FeatureMapper, MapOutcome};
pub use model::{AttributeValue, Feature, Iri, Literal, SectorRecord, Term, Triple};
pub use normalize::normalize_sector_code;
pub use output::write_graph;
pub use pipeline::{convert, convert_shapefile, declare_prefixes, ConversionStats};
pub use reader::{FeatureSource, MemorySource, ShapefileSource};
pub use serializer::Format;
