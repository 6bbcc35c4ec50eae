//! The attribute→predicate mapping table.
//!
//! [`MappingConfig::default`] describes the Belgian 2011 statistical sector
//! layer (`scbel01012011`). Other layouts of the same kind can be described in
//! TOML; keys left out fall back to the defaults:
//!
//! ```toml
//! identifier_suffix = "#id"
//!
//! [entity]
//! attribute = "Cs012011"
//! prefix = "http://geo.belgif.org/nis2011/"
//!
//! [[containment]]
//! attribute = "Nuts3_new"
//! prefix = "http://nuts.geovocab.org/id/"
//!
//! [[containment]]
//! attribute = "Nis_012011"
//! prefix = "http://geo.belgif.org/nis2011/"
//! normalize = true
//!
//! [[labels]]
//! attribute = "Sector_nl"
//! lang = "nl"
//!
//! [[labels]]
//! attribute = "Sector_fr"
//! lang = "fr"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vocab;

const PREFIX_NIS: &str = "http://geo.belgif.org/nis2011/";
const PREFIX_NUTS: &str = "http://nuts.geovocab.org/id/";

/// The full mapping table for one dataset layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingConfig {
    /// Sector identifier and class.
    pub entity: EntityConfig,
    /// Appended to every identifier, subject and containment links alike.
    pub identifier_suffix: String,
    /// `spatial:PP` links, emitted in this order.
    pub containment: Vec<ContainmentLink>,
    /// `rdfs:label` columns, emitted in this order.
    pub labels: Vec<LabelField>,
}

/// Where the subject identifier comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntityConfig {
    /// Sector code column.
    pub attribute: String,
    /// Namespace the normalized sector code is appended to.
    pub prefix: String,
    /// `rdf:type` of every sector.
    pub class: String,
}

/// One `spatial:PP` containment link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainmentLink {
    /// Column holding the containing unit's code.
    pub attribute: String,
    /// Namespace the code is appended to.
    pub prefix: String,
    /// Strip a trailing `.0` from the code first.
    #[serde(default)]
    pub normalize: bool,
}

/// One language-tagged label column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelField {
    /// Name column.
    pub attribute: String,
    /// BCP 47 language tag of that column.
    pub lang: String,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            attribute: "Cs012011".to_owned(),
            prefix: PREFIX_NIS.to_owned(),
            class: vocab::RAMON_LAU_REGION.to_owned(),
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            entity: EntityConfig::default(),
            identifier_suffix: "#id".to_owned(),
            containment: vec![
                ContainmentLink {
                    attribute: "Nuts3_new".to_owned(),
                    prefix: PREFIX_NUTS.to_owned(),
                    normalize: false,
                },
                ContainmentLink {
                    attribute: "Nis_012011".to_owned(),
                    prefix: PREFIX_NIS.to_owned(),
                    normalize: true,
                },
            ],
            labels: vec![
                LabelField {
                    attribute: "Sector_nl".to_owned(),
                    lang: "nl".to_owned(),
                },
                LabelField {
                    attribute: "Sector_fr".to_owned(),
                    lang: "fr".to_owned(),
                },
            ],
        }
    }
}

impl MappingConfig {
    /// Parses and validates a TOML mapping table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on syntax errors, unknown keys, or a table
    /// that fails [`MappingConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML mapping table from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`] if the file cannot be read, otherwise as
    /// [`MappingConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the table for values that would make every feature fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending entry.
    pub fn validate(&self) -> Result<()> {
        if self.entity.attribute.is_empty() {
            return Err(Error::Config("entity.attribute is empty".to_owned()));
        }
        if self.entity.prefix.is_empty() {
            return Err(Error::Config("entity.prefix is empty".to_owned()));
        }
        if sophia_iri::Iri::new(self.entity.class.as_str()).is_err() {
            return Err(Error::Config(format!(
                "entity.class <{}> is not an absolute IRI",
                self.entity.class
            )));
        }
        for (i, link) in self.containment.iter().enumerate() {
            if link.attribute.is_empty() || link.prefix.is_empty() {
                return Err(Error::Config(format!(
                    "containment[{i}] needs both attribute and prefix"
                )));
            }
        }
        if self.labels.is_empty() {
            return Err(Error::Config("at least one label column is required".to_owned()));
        }
        for (i, label) in self.labels.iter().enumerate() {
            if label.attribute.is_empty() {
                return Err(Error::Config(format!("labels[{i}].attribute is empty")));
            }
            if !is_language_tag(&label.lang) {
                return Err(Error::Config(format!(
                    "labels[{i}].lang `{}` is not a language tag",
                    label.lang
                )));
            }
        }
        Ok(())
    }

    /// Every column the mapping table reads, without duplicates.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names = vec![self.entity.attribute.as_str()];
        let rest = self
            .containment
            .iter()
            .map(|l| l.attribute.as_str())
            .chain(self.labels.iter().map(|l| l.attribute.as_str()));
        for name in rest {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

// `[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*`, the Turtle LANGTAG production.
fn is_language_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let primary_ok = parts
        .next()
        .is_some_and(|p| (1..=8).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_alphabetic()));
    primary_ok
        && parts.all(|p| (1..=8).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_alphanumeric()))
}
