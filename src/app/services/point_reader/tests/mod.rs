//! Tests for the tabular point reader

pub mod excel_tests;
pub mod field_parser_tests;

use super::field_map::{FieldMap, FieldSpec};
use crate::config::ImportConfig;

/// Headerless config mapping column 1 to the timestamp and column 2 to the
/// value, the smallest valid import surface
pub fn index_config() -> ImportConfig {
    ImportConfig::default()
        .without_header_row()
        .with_fields(FieldMap {
            date_time: Some(FieldSpec::Index(1)),
            value: Some(FieldSpec::Index(2)),
            ..FieldMap::default()
        })
}
