//! Error taxonomy for a conversion run.
//!
//! `MissingAttribute` and `InvalidIdentifier` are recovered inside the mapper
//! (the affected triple or feature is skipped and counted). Every other
//! variant aborts the run.

use std::path::PathBuf;

use crate::geometry::GeometryError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while reading, mapping, or writing a dataset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A feature lacks a value for an attribute the mapping table names.
    #[error("feature has no value for attribute `{attribute}`")]
    MissingAttribute {
        /// Name of the attribute in the source table.
        attribute: String,
    },

    /// Concatenating prefix, value and suffix did not produce an absolute IRI.
    #[error("invalid identifier <{iri}>: {reason}")]
    InvalidIdentifier {
        /// The rejected candidate IRI.
        iri: String,
        /// Why the IRI parser rejected it.
        reason: String,
    },

    /// The geometry of an identified feature could not be written as WKT.
    #[error("cannot serialize geometry of <{subject}>: {source}")]
    GeometrySerialization {
        /// Identifier of the entity whose geometry failed.
        subject: String,
        /// Underlying geometry problem.
        #[source]
        source: GeometryError,
    },

    /// The input dataset could not be opened.
    #[error("cannot open input {}: {reason}", path.display())]
    InputOpen {
        /// Path passed by the operator.
        path: PathBuf,
        /// Reader diagnostic.
        reason: String,
    },

    /// A record could not be decoded after the dataset was opened.
    #[error("cannot read feature #{index}: {source}")]
    InputRead {
        /// Zero-based position of the record in the dataset.
        index: usize,
        /// Reader error.
        #[source]
        source: shapefile::Error,
    },

    /// The serialized graph could not be written.
    #[error("cannot write output {}: {source}", path.display())]
    OutputWrite {
        /// Destination path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The mapping configuration file could not be read.
    #[error("cannot read mapping configuration {}: {source}", path.display())]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The mapping configuration is malformed or inconsistent.
    #[error("invalid mapping configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns true for the per-feature anomalies the mapper recovers from.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MissingAttribute { .. } | Error::InvalidIdentifier { .. }
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
