//! Attribute normalization.

/// Strips one trailing `.0` left behind when a code column was read as a
/// float instead of text.
///
/// This is a suffix match on the rendered text, not a numeric operation:
/// `"12345.0"` becomes `"12345"`, while `"12345.00"` and `"12345.5"` pass
/// through unchanged.
#[must_use]
pub fn normalize_sector_code(raw: &str) -> &str {
    raw.strip_suffix(".0").unwrap_or(raw)
}
