//! Reader → mapper → graph, one feature at a time.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::mapper::{FeatureMapper, MapOutcome};
use crate::output::write_graph;
use crate::reader::{FeatureSource, ShapefileSource};
use crate::serializer::Format;
use crate::vocab;

/// Counters for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Features pulled from the source.
    pub features_read: usize,
    /// Entities written to the graph.
    pub entities_emitted: usize,
    /// Triples written to the graph.
    pub triples_emitted: usize,
    /// Features without a sector code.
    pub skipped_missing_sector: usize,
    /// Features whose sector code did not form an IRI.
    pub skipped_invalid_identifier: usize,
    /// Containment links and labels left out of emitted entities.
    pub triples_skipped: usize,
}

impl ConversionStats {
    /// Features that produced no entity.
    #[must_use]
    pub fn features_skipped(&self) -> usize {
        self.skipped_missing_sector + self.skipped_invalid_identifier
    }
}

/// Declares the vocabulary prefixes the mapping table uses.
pub fn declare_prefixes(graph: &mut Graph) {
    for (short, namespace) in vocab::STANDARD_PREFIXES {
        graph.set_namespace_prefix(*short, *namespace);
    }
}

/// Maps every feature of `source` into `graph`.
///
/// # Errors
///
/// Stops at the first read error or geometry serialization failure; triples
/// already appended stay in `graph`.
pub fn convert<S: FeatureSource>(
    source: S,
    mapper: &FeatureMapper,
    graph: &mut Graph,
) -> Result<ConversionStats> {
    declare_prefixes(graph);
    let mut stats = ConversionStats::default();

    for feature in source {
        let feature = feature?;
        stats.features_read += 1;
        match mapper.map(feature, graph)? {
            MapOutcome::Emitted {
                triples, skipped, ..
            } => {
                stats.entities_emitted += 1;
                stats.triples_emitted += triples;
                stats.triples_skipped += skipped.len();
            }
            MapOutcome::Skipped(Error::InvalidIdentifier { .. }) => {
                stats.skipped_invalid_identifier += 1;
            }
            MapOutcome::Skipped(_) => stats.skipped_missing_sector += 1,
        }
    }

    info!(
        features = stats.features_read,
        entities = stats.entities_emitted,
        triples = stats.triples_emitted,
        skipped_features = stats.features_skipped(),
        skipped_triples = stats.triples_skipped,
        "conversion finished"
    );
    Ok(stats)
}

/// Converts the shapefile at `input` and writes the graph to `output`.
///
/// The input is closed before the output is written; nothing is written
/// unless every feature was mapped.
///
/// # Errors
///
/// Returns [`Error::InputOpen`] if the dataset cannot be opened, and
/// otherwise as [`convert`] and [`write_graph`].
pub fn convert_shapefile(
    input: &Path,
    output: &Path,
    format: Format,
    mapper: &FeatureMapper,
) -> Result<ConversionStats> {
    let mut graph = Graph::new();
    let stats = {
        let mut source = ShapefileSource::open(input, &mapper.config().attribute_names())?;
        convert(source.features(), mapper, &mut graph)?
    };
    write_graph(&graph, output, format)?;
    Ok(stats)
}
