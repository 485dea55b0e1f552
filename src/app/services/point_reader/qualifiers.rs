//! Qualifier-list decoding
//!
//! Qualifier columns carry an opaque external format: a comma- or
//! semicolon-delimited token list.

/// Split qualifier text into trimmed, non-empty tokens
pub fn parse_qualifiers(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}
