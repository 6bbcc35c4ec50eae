//! Property-based tests for code normalization and identifier construction.

use geo_types::{polygon, Geometry};
use proptest::prelude::*;
use statsectors::serializer::ntriples::to_ntriples;
use statsectors::{
    normalize_sector_code, AttributeValue, Feature, FeatureMapper, Graph, IdentifierBuilder,
    MapOutcome, MappingConfig,
};

fn square() -> Geometry<f64> {
    Geometry::Polygon(polygon![
        (x: 0.0, y: 0.0),
        (x: 1.0, y: 0.0),
        (x: 1.0, y: 1.0),
        (x: 0.0, y: 0.0)
    ])
}

fn sector(code: impl Into<AttributeValue>) -> Feature {
    Feature::new(Some(square()))
        .with_attribute("Cs012011", code)
        .with_attribute("Sector_nl", "Centrum")
        .with_attribute("Sector_fr", "Centre")
}

// =============================================================================
// Normalization
// =============================================================================

proptest! {
    /// A float rendering loses exactly its ".0" suffix.
    #[test]
    fn prop_strips_float_suffix(code in "[0-9]{1,9}") {
        let rendered = format!("{code}.0");
        prop_assert_eq!(normalize_sector_code(&rendered), code.as_str());
    }

    /// Integer renderings pass through untouched.
    #[test]
    fn prop_integer_rendering_unchanged(code in "[0-9]{1,9}") {
        prop_assert_eq!(normalize_sector_code(&code), code.as_str());
    }

    /// Normalizing a rendering twice changes nothing more.
    #[test]
    fn prop_idempotent_on_renderings(code in "[0-9]{1,9}", float in any::<bool>()) {
        let rendered = if float { format!("{code}.0") } else { code };
        let once = normalize_sector_code(&rendered);
        prop_assert_eq!(normalize_sector_code(once), once);
    }

    /// Other fractional parts are kept.
    #[test]
    fn prop_other_fractions_kept(code in "[0-9]{1,6}", frac in "[1-9][0-9]{0,2}") {
        let rendered = format!("{code}.{frac}");
        prop_assert_eq!(normalize_sector_code(&rendered), rendered.as_str());
    }
}

// =============================================================================
// Identifiers
// =============================================================================

proptest! {
    /// Any non-empty value yields a valid identifier under a valid prefix.
    #[test]
    fn prop_any_value_builds(value in "\\PC{1,16}") {
        let builder = IdentifierBuilder::default();
        let iri = builder.build("http://geo.belgif.org/nis2011/", Some(&value));
        prop_assert!(iri.is_ok(), "{value:?} rejected: {iri:?}");
        let iri = iri.unwrap().unwrap();
        prop_assert!(iri.as_str().starts_with("http://geo.belgif.org/nis2011/"));
        prop_assert!(iri.as_str().ends_with("#id"));
        prop_assert_eq!(iri.as_str().matches('#').count(), 1);
    }

    /// The subject depends only on the normalized sector code.
    #[test]
    fn prop_subject_from_normalized_code(code in "[0-9]{1,9}") {
        let mapper = FeatureMapper::new(MappingConfig::default()).unwrap();
        let plain = mapper.subject_for(&code).unwrap();
        let float = mapper.subject_for(&format!("{code}.0")).unwrap();
        prop_assert_eq!(plain, float);
    }

    /// Mapping is deterministic: the same feature gives the same triples.
    #[test]
    fn prop_mapping_is_deterministic(code in 1u32..=99_999_999) {
        let mapper = FeatureMapper::new(MappingConfig::default()).unwrap();
        let mut a = Graph::new();
        let mut b = Graph::new();
        mapper.map(sector(code.to_string()), &mut a).unwrap();
        mapper.map(sector(f64::from(code)), &mut b).unwrap();
        prop_assert_eq!(to_ntriples(&a), to_ntriples(&b));
    }

    /// Every emitted entity becomes one N-Triples line per triple.
    #[test]
    fn prop_one_line_per_triple(codes in prop::collection::vec(1u32..=99_999, 1..8)) {
        let mapper = FeatureMapper::new(MappingConfig::default()).unwrap();
        let mut graph = Graph::new();
        let mut emitted = 0;
        for code in &codes {
            if let MapOutcome::Emitted { triples, .. } = mapper.map(sector(code.to_string()), &mut graph).unwrap() {
                emitted += triples;
            }
        }
        prop_assert_eq!(emitted, graph.len());
        prop_assert_eq!(to_ntriples(&graph).lines().count(), graph.len());
    }
}
