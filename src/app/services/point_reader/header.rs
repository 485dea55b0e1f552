//! Header row discovery and matching
//!
//! Anchors the true header row by positional prefix match rather than a
//! fixed row offset, so sources with preamble or banner lines can still be
//! decoded.

/// Split a comma-separated header-prefix declaration into trimmed labels
pub fn parse_header_prefixes(spec: &str) -> Vec<String> {
    if spec.is_empty() {
        return Vec::new();
    }

    spec.split(',').map(|s| s.trim().to_string()).collect()
}

/// Decide whether a candidate row is the header.
///
/// Compares `expected_prefixes` position by position against `fields`,
/// case-insensitively. When no expected prefix is blank, blank fields are
/// stripped first so ragged leading columns are insignificant. An empty
/// prefix list never matches; callers without anchoring use a different
/// header-acceptance rule.
pub fn is_header_row_matched(fields: &[String], expected_prefixes: &[String]) -> bool {
    if expected_prefixes.is_empty() {
        return false;
    }

    let candidates: Vec<&String> = if expected_prefixes.iter().any(|p| p.trim().is_empty()) {
        fields.iter().collect()
    } else {
        fields.iter().filter(|f| !f.trim().is_empty()).collect()
    };

    for (i, prefix) in expected_prefixes.iter().enumerate() {
        match candidates.get(i) {
            Some(field) => {
                if !prefix.eq_ignore_ascii_case(field.trim()) {
                    return false;
                }
            }
            None => return false,
        }
    }

    true
}
