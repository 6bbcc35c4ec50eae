//! Feature-to-triple mapping.
//!
//! Each feature goes through the same fixed sequence:
//!
//! 1. sector code absent → skip the feature
//! 2. normalized code does not build an identifier → skip the feature, warn
//! 3. `rdf:type`
//! 4. one `spatial:PP` per containment link that builds
//! 5. one `rdfs:label` per name column that is present
//! 6. `geo:asWKT` (a geometry that cannot be serialized aborts the run)
//!
//! The geometry is serialized before anything is appended, so a fatal error
//! never leaves half an entity in the graph.

use tracing::{debug, warn};

use crate::config::MappingConfig;
use crate::error::{Error, Result};
use crate::geometry;
use crate::graph::Graph;
use crate::identifier::IdentifierBuilder;
use crate::model::{Feature, Iri, Literal, SectorRecord};
use crate::normalize::normalize_sector_code;
use crate::vocab;

/// What happened to one feature.
#[derive(Debug)]
pub enum MapOutcome {
    /// An entity was written.
    Emitted {
        /// The entity's identifier.
        subject: Iri,
        /// Number of triples appended.
        triples: usize,
        /// Triples left out, each with its recovered error.
        skipped: Vec<Error>,
    },
    /// Nothing was written; the error says why.
    Skipped(Error),
}

/// Maps features onto the triple schema of a [`MappingConfig`].
///
/// The mapper is stateless between features: the outcome of
/// [`FeatureMapper::map`] depends only on the feature and the table.
#[derive(Debug, Clone)]
pub struct FeatureMapper {
    config: MappingConfig,
    class: Iri,
    identifiers: IdentifierBuilder,
}

impl FeatureMapper {
    /// Creates a mapper for a validated table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the table fails validation.
    pub fn new(config: MappingConfig) -> Result<Self> {
        config.validate()?;
        let class = Iri::parse(config.entity.class.clone())
            .map_err(|err| Error::Config(format!("entity.class: {err}")))?;
        let identifiers = IdentifierBuilder::new(config.identifier_suffix.clone());
        Ok(Self {
            config,
            class,
            identifiers,
        })
    }

    /// The mapping table.
    #[must_use]
    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Builds the subject identifier for a raw sector code.
    ///
    /// Returns `Ok(None)` when the code is empty once normalized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the code does not form an IRI.
    pub fn subject_for(&self, sector_code: &str) -> Result<Option<Iri>> {
        self.identifiers.build(
            &self.config.entity.prefix,
            Some(normalize_sector_code(sector_code)),
        )
    }

    /// Maps one feature, appending its triples to `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeometrySerialization`] when an identified feature's
    /// geometry cannot be written; every other anomaly is reported through
    /// [`MapOutcome`].
    pub fn map(&self, feature: Feature, graph: &mut Graph) -> Result<MapOutcome> {
        let record = SectorRecord::from_feature(feature, &self.config);
        let missing_sector = || Error::MissingAttribute {
            attribute: self.config.entity.attribute.clone(),
        };

        let Some(code) = record.sector_code.as_deref() else {
            debug!(attribute = %self.config.entity.attribute, "feature has no sector code, skipped");
            return Ok(MapOutcome::Skipped(missing_sector()));
        };
        let subject = match self.subject_for(code) {
            Ok(Some(subject)) => subject,
            Ok(None) => {
                debug!(code, "sector code is empty once normalized, skipped");
                return Ok(MapOutcome::Skipped(missing_sector()));
            }
            Err(err) => {
                warn!(code, error = %err, "feature skipped");
                return Ok(MapOutcome::Skipped(err));
            }
        };

        let wkt = geometry::to_wkt(record.geometry.as_ref()).map_err(|source| {
            Error::GeometrySerialization {
                subject: subject.to_string(),
                source,
            }
        })?;

        let before = graph.len();
        let mut skipped = Vec::new();

        graph.add(subject.clone(), vocab::RDF_TYPE, self.class.clone());

        for (link, value) in self.config.containment.iter().zip(&record.containment) {
            let Some(value) = value.as_deref() else {
                skipped.push(Error::MissingAttribute {
                    attribute: link.attribute.clone(),
                });
                continue;
            };
            let value = if link.normalize {
                normalize_sector_code(value)
            } else {
                value
            };
            match self.identifiers.build(&link.prefix, Some(value)) {
                Ok(Some(container)) => graph.add(subject.clone(), vocab::SPATIAL_PP, container),
                Ok(None) => skipped.push(Error::MissingAttribute {
                    attribute: link.attribute.clone(),
                }),
                Err(err) => {
                    warn!(%subject, attribute = %link.attribute, error = %err, "containment link skipped");
                    skipped.push(err);
                }
            }
        }

        for (field, name) in self.config.labels.iter().zip(record.labels) {
            match name {
                Some(value) => graph.add(
                    subject.clone(),
                    vocab::RDFS_LABEL,
                    Literal::LangString {
                        value,
                        lang: field.lang.to_ascii_lowercase(),
                    },
                ),
                None => skipped.push(Error::MissingAttribute {
                    attribute: field.attribute.clone(),
                }),
            }
        }

        graph.add(
            subject.clone(),
            vocab::GEO_AS_WKT,
            Literal::Typed {
                value: wkt,
                datatype: vocab::GEO_WKT_LITERAL,
            },
        );

        Ok(MapOutcome::Emitted {
            subject,
            triples: graph.len() - before,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeValue, Term};
    use geo_types::{polygon, Geometry, Point};

    fn square() -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
            (x: 0.0, y: 0.0)
        ])
    }

    fn mapper() -> FeatureMapper {
        FeatureMapper::new(MappingConfig::default()).unwrap()
    }

    fn full_feature(code: impl Into<AttributeValue>) -> Feature {
        Feature::new(Some(square()))
            .with_attribute("Cs012011", code)
            .with_attribute("Nis_012011", 21004.0)
            .with_attribute("Nuts3_new", "BE211")
            .with_attribute("Sector_nl", "Centrum")
            .with_attribute("Sector_fr", "Centre")
    }

    #[test]
    fn emits_triples_in_schema_order() {
        let mut graph = Graph::new();
        let outcome = mapper().map(full_feature("12345"), &mut graph).unwrap();
        let MapOutcome::Emitted { subject, triples, skipped } = outcome else {
            panic!("expected an entity");
        };
        assert_eq!(subject.as_str(), "http://geo.belgif.org/nis2011/12345#id");
        assert_eq!(triples, 6);
        assert!(skipped.is_empty());

        let predicates: Vec<&str> = graph.iter().map(|t| t.predicate.as_str()).collect();
        assert_eq!(
            predicates,
            vec![
                vocab::RDF_TYPE.as_str(),
                vocab::SPATIAL_PP.as_str(),
                vocab::SPATIAL_PP.as_str(),
                vocab::RDFS_LABEL.as_str(),
                vocab::RDFS_LABEL.as_str(),
                vocab::GEO_AS_WKT.as_str(),
            ]
        );
        assert_eq!(
            graph.triples()[1].object,
            Term::Iri(Iri::parse("http://nuts.geovocab.org/id/BE211#id").unwrap())
        );
        assert_eq!(
            graph.triples()[2].object,
            Term::Iri(Iri::parse("http://geo.belgif.org/nis2011/21004#id").unwrap())
        );
    }

    #[test]
    fn float_formatted_code_maps_to_same_subject() {
        let m = mapper();
        let mut a = Graph::new();
        let mut b = Graph::new();
        m.map(full_feature("12345"), &mut a).unwrap();
        m.map(full_feature(12345.0), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_sector_code_emits_nothing() {
        let mut graph = Graph::new();
        let feature = Feature::new(Some(square())).with_attribute("Sector_nl", "Centrum");
        let outcome = mapper().map(feature, &mut graph).unwrap();
        assert!(matches!(
            outcome,
            MapOutcome::Skipped(Error::MissingAttribute { ref attribute }) if attribute == "Cs012011"
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn null_sector_code_emits_nothing() {
        let mut graph = Graph::new();
        let feature = full_feature(AttributeValue::Null);
        let outcome = mapper().map(feature, &mut graph).unwrap();
        assert!(matches!(outcome, MapOutcome::Skipped(_)));
        assert!(graph.is_empty());
    }

    #[test]
    fn missing_sector_code_wins_over_bad_geometry() {
        let mut graph = Graph::new();
        let feature = Feature::new(None).with_attribute("Sector_nl", "Centrum");
        assert!(matches!(
            mapper().map(feature, &mut graph),
            Ok(MapOutcome::Skipped(_))
        ));
    }

    #[test]
    fn invalid_identifier_skips_feature() {
        let mut config = MappingConfig::default();
        config.entity.prefix = "nis2011/".to_owned();
        let m = FeatureMapper::new(config).unwrap();
        let mut graph = Graph::new();
        let outcome = m.map(full_feature("12345"), &mut graph).unwrap();
        assert!(matches!(
            outcome,
            MapOutcome::Skipped(Error::InvalidIdentifier { .. })
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn absent_fields_skip_only_their_triple() {
        let mut graph = Graph::new();
        let feature = Feature::new(Some(square()))
            .with_attribute("Cs012011", "12345")
            .with_attribute("Sector_fr", "Centre");
        let outcome = mapper().map(feature, &mut graph).unwrap();
        let MapOutcome::Emitted { triples, skipped, .. } = outcome else {
            panic!("expected an entity");
        };
        assert_eq!(triples, 3);
        let missing: Vec<String> = skipped
            .iter()
            .map(|e| match e {
                Error::MissingAttribute { attribute } => attribute.clone(),
                other => panic!("unexpected {other}"),
            })
            .collect();
        assert_eq!(missing, vec!["Nuts3_new", "Nis_012011", "Sector_nl"]);
    }

    #[test]
    fn broken_containment_link_does_not_block_the_rest() {
        let mut config = MappingConfig::default();
        config.containment[0].prefix = "nuts/".to_owned();
        let m = FeatureMapper::new(config).unwrap();
        let mut graph = Graph::new();
        let MapOutcome::Emitted { triples, skipped, .. } =
            m.map(full_feature("12345"), &mut graph).unwrap()
        else {
            panic!("expected an entity");
        };
        assert_eq!(triples, 5);
        assert!(matches!(skipped.as_slice(), [Error::InvalidIdentifier { .. }]));
    }

    #[test]
    fn bad_geometry_is_fatal_and_appends_nothing() {
        let mut graph = Graph::new();
        let feature = Feature::new(Some(Geometry::Point(Point::new(1.0, 1.0))))
            .with_attribute("Cs012011", "12345");
        let err = mapper().map(feature, &mut graph).unwrap_err();
        assert!(matches!(err, Error::GeometrySerialization { .. }));
        assert!(!err.is_recoverable());
        assert!(graph.is_empty());
    }

    #[test]
    fn labels_carry_language_tags() {
        let mut graph = Graph::new();
        mapper().map(full_feature("12345"), &mut graph).unwrap();
        let labels: Vec<&Term> = graph
            .iter()
            .filter(|t| t.predicate == vocab::RDFS_LABEL)
            .map(|t| &t.object)
            .collect();
        assert_eq!(
            labels,
            vec![
                &Term::Literal(Literal::LangString {
                    value: "Centrum".to_owned(),
                    lang: "nl".to_owned()
                }),
                &Term::Literal(Literal::LangString {
                    value: "Centre".to_owned(),
                    lang: "fr".to_owned()
                }),
            ]
        );
    }
}
