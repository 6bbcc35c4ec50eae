//! Identifier construction: `prefix + encoded value + suffix`.
//!
//! Raw attribute values are percent-encoded before they are embedded, so a
//! code containing a space, `#` or `%` still yields one well-formed IRI. The
//! result is validated as an absolute IRI; only a broken prefix or suffix can
//! make that check fail.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::Result;
use crate::model::Iri;

/// Characters that cannot stand for themselves inside one IRI path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Builds entity identifiers with a fixed suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierBuilder {
    suffix: String,
}

impl IdentifierBuilder {
    /// Creates a builder appending `suffix` (e.g. `#id`, or empty) to every
    /// identifier.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// The suffix appended to every identifier.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Builds `prefix + value + suffix`.
    ///
    /// Returns `Ok(None)` when `value` is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`](crate::Error::InvalidIdentifier)
    /// if the concatenation is not an absolute IRI.
    pub fn build(&self, prefix: &str, value: Option<&str>) -> Result<Option<Iri>> {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let encoded = utf8_percent_encode(value, SEGMENT);
        Iri::parse(format!("{prefix}{encoded}{}", self.suffix)).map(Some)
    }
}

impl Default for IdentifierBuilder {
    fn default() -> Self {
        Self::new("#id")
    }
}
