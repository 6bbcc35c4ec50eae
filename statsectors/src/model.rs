//! Core data model: graph terms, triples, and feature records.
//!
//! A [`Feature`] is what the reader hands over: a flat attribute row plus one
//! geometry. The mapper projects it once into a [`SectorRecord`], whose
//! optional fields carry every null check the mapping table needs. Triples are
//! built from [`Iri`] subjects and predicates and [`Term`] objects.

use std::borrow::Cow;
use std::fmt;

use geo_types::Geometry;

use crate::config::MappingConfig;
use crate::error::{Error, Result};

/// An absolute IRI.
///
/// Values built with [`Iri::parse`] are validated against the RFC 3987
/// grammar; [`Iri::from_static`] is reserved for vocabulary constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(Cow<'static, str>);

impl Iri {
    /// Wraps a compile-time IRI without validation.
    ///
    /// The caller guarantees `iri` is an absolute IRI.
    #[must_use]
    pub const fn from_static(iri: &'static str) -> Self {
        Self(Cow::Borrowed(iri))
    }

    /// Validates `candidate` as an absolute IRI.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if `candidate` is relative or
    /// contains characters the IRI grammar does not allow.
    pub fn parse(candidate: impl Into<String>) -> Result<Self> {
        let candidate = candidate.into();
        match sophia_iri::Iri::new(candidate.as_str()) {
            Ok(_) => Ok(Self(Cow::Owned(candidate))),
            Err(err) => Err(Error::InvalidIdentifier {
                reason: err.to_string(),
                iri: candidate,
            }),
        }
    }

    /// Returns the IRI text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An RDF literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Literal {
    /// A string with a BCP 47 language tag (`"Centrum"@nl`).
    LangString {
        /// Lexical value.
        value: String,
        /// Language tag, lowercase.
        lang: String,
    },
    /// A value with an explicit datatype (`"POLYGON (...)"^^geo:wktLiteral`).
    Typed {
        /// Lexical value.
        value: String,
        /// Datatype IRI.
        datatype: Iri,
    },
}

impl Literal {
    /// Returns the lexical value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Literal::LangString { value, .. } | Literal::Typed { value, .. } => value,
        }
    }
}

/// The object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// A resource.
    Iri(Iri),
    /// A literal value.
    Literal(Literal),
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

/// A single statement in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    /// Subject resource.
    pub subject: Iri,
    /// Predicate IRI.
    pub predicate: Iri,
    /// Object resource or literal.
    pub object: Term,
}

/// A value from the feature's attribute table.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// No value.
    Null,
    /// Character data.
    Text(String),
    /// A floating-point number (dBASE `N`, `F`, `B` columns).
    Number(f64),
    /// An integer.
    Integer(i64),
    /// A logical value.
    Bool(bool),
}

impl AttributeValue {
    /// Renders the value the way the attribute table prints it, or `None`
    /// when there is nothing to render.
    ///
    /// Floats keep their fractional digits, so an integral float renders with
    /// a trailing `.0` (`12345.0`). Text is trimmed; blank text is `None`.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            AttributeValue::Null => None,
            AttributeValue::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_owned())
            }
            AttributeValue::Number(n) if n.is_finite() => Some(format!("{n:?}")),
            AttributeValue::Number(_) => None,
            AttributeValue::Integer(i) => Some(i.to_string()),
            AttributeValue::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        AttributeValue::Text(text.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        AttributeValue::Text(text)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

/// One row of the input dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    attributes: Vec<(String, AttributeValue)>,
    geometry: Option<Geometry<f64>>,
}

impl Feature {
    /// Creates a feature with the given default geometry and no attributes.
    #[must_use]
    pub fn new(geometry: Option<Geometry<f64>>) -> Self {
        Self {
            attributes: Vec::new(),
            geometry,
        }
    }

    /// Appends an attribute, replacing an earlier value of the same name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Sets an attribute, replacing an earlier value of the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Looks up an attribute by column name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Attributes in column order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, AttributeValue)] {
        &self.attributes
    }

    /// The default geometry, if the row has one.
    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry<f64>> {
        self.geometry.as_ref()
    }

    fn rendered(&self, name: &str) -> Option<String> {
        self.attribute(name).and_then(AttributeValue::render)
    }
}

/// A feature projected onto the mapping table.
///
/// `containment` and `labels` are aligned index-for-index with
/// [`MappingConfig::containment`] and [`MappingConfig::labels`].
#[derive(Debug, Clone, PartialEq)]
pub struct SectorRecord {
    /// Raw (not yet normalized) sector code.
    pub sector_code: Option<String>,
    /// One optional raw code per configured containment link.
    pub containment: Vec<Option<String>>,
    /// One optional name per configured label language.
    pub labels: Vec<Option<String>>,
    /// The default geometry.
    pub geometry: Option<Geometry<f64>>,
}

impl SectorRecord {
    /// Builds the record, consuming the feature.
    #[must_use]
    pub fn from_feature(feature: Feature, config: &MappingConfig) -> Self {
        let sector_code = feature.rendered(&config.entity.attribute);
        let containment = config
            .containment
            .iter()
            .map(|link| feature.rendered(&link.attribute))
            .collect();
        let labels = config
            .labels
            .iter()
            .map(|label| feature.rendered(&label.attribute))
            .collect();
        Self {
            sector_code,
            containment,
            labels,
            geometry: feature.geometry,
        }
    }
}
