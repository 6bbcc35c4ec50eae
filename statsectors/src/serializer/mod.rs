//! Serializers for the sector graph.
//!
//! Two text encodings are supported:
//! - **N-Triples** ([`ntriples`]): one triple per line, the default output
//! - **Turtle** ([`turtle`]): prefixed names, triples grouped by subject
//!
//! Both parse back to the same triple set.

use std::fmt;
use std::str::FromStr;

pub mod ntriples;
pub mod turtle;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// W3C N-Triples.
    #[default]
    NTriples,
    /// W3C Turtle 1.1.
    Turtle,
}

impl Format {
    /// Conventional file extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::NTriples => "nt",
            Format::Turtle => "ttl",
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Format::NTriples => "ntriples",
            Format::Turtle => "turtle",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ntriples" | "n-triples" | "nt" => Ok(Format::NTriples),
            "turtle" | "ttl" => Ok(Format::Turtle),
            other => Err(format!(
                "unknown RDF format `{other}` (expected `ntriples` or `turtle`)"
            )),
        }
    }
}

/// Escapes a literal's lexical form for a double-quoted N-Triples or Turtle
/// string.
pub(crate) fn escape_literal(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_round_trip() {
        for format in [Format::NTriples, Format::Turtle] {
            assert_eq!(format.to_string().parse::<Format>(), Ok(format));
        }
        assert_eq!("NT".parse::<Format>(), Ok(Format::NTriples));
        assert!("rdfxml".parse::<Format>().is_err());
    }

    #[test]
    fn escapes_quotes_and_line_breaks() {
        let mut out = String::new();
        escape_literal(&mut out, "a \"b\"\\\r\n");
        assert_eq!(out, r#"a \"b\"\\\r\n"#);
    }
}
