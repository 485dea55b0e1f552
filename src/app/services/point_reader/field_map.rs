//! Column-to-attribute field mapping
//!
//! This module declares which source column supplies each logical point
//! attribute. A field is addressed either by a 1-based column index or by a
//! header label resolved against the discovered header row.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where one point attribute comes from in the source
///
/// Column indices are 1-based throughout the configuration surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldSpecRepr", into = "FieldSpecRepr")]
pub enum FieldSpec {
    /// Explicit 1-based column index
    Index(usize),

    /// Header label, resolved against the header row at load time
    Name(String),
}

/// Serde surface for [`FieldSpec`]: a bare integer or a string.
///
/// String digits are treated as an index so CLI and config file agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FieldSpecRepr {
    Index(usize),
    Name(String),
}

impl TryFrom<FieldSpecRepr> for FieldSpec {
    type Error = String;

    fn try_from(repr: FieldSpecRepr) -> std::result::Result<Self, String> {
        match repr {
            FieldSpecRepr::Index(0) => Err("column indices are 1-based".to_string()),
            FieldSpecRepr::Index(index) => Ok(FieldSpec::Index(index)),
            FieldSpecRepr::Name(name) => {
                FieldSpec::from_str(&name).map_err(|e| e.to_string())
            }
        }
    }
}

impl From<FieldSpec> for FieldSpecRepr {
    fn from(spec: FieldSpec) -> Self {
        match spec {
            FieldSpec::Index(index) => FieldSpecRepr::Index(index),
            FieldSpec::Name(name) => FieldSpecRepr::Name(name),
        }
    }
}

impl FromStr for FieldSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(Error::configuration("Field spec cannot be empty"));
        }

        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            let index: usize = trimmed.parse().map_err(|_| {
                Error::configuration(format!("Invalid column index '{}'", trimmed))
            })?;

            if index == 0 {
                return Err(Error::configuration(
                    "Column indices are 1-based; 0 is not a valid column".to_string(),
                ));
            }

            return Ok(FieldSpec::Index(index));
        }

        Ok(FieldSpec::Name(trimmed.to_string()))
    }
}

/// Per-attribute column declarations for one import
///
/// Absence of an attribute means "not present in the source"; that attribute
/// stays `None` on every decoded point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    /// Combined date-time column (mutually exclusive with `date_only`)
    pub date_time: Option<FieldSpec>,

    /// Date-only column (split timestamp mode)
    pub date_only: Option<FieldSpec>,

    /// Time-of-day column (split timestamp mode, defaults to midnight)
    pub time_only: Option<FieldSpec>,

    /// Numeric value column (required)
    pub value: Option<FieldSpec>,

    /// Integer grade-code column
    pub grade: Option<FieldSpec>,

    /// Qualifier-list column
    pub qualifiers: Option<FieldSpec>,

    /// Timezone name column
    pub timezone: Option<FieldSpec>,

    /// Freeform notes column
    pub notes: Option<FieldSpec>,
}

impl FieldMap {
    /// Whether any attribute is declared by header label rather than index
    pub fn has_named_fields(&self) -> bool {
        self.specs()
            .into_iter()
            .flatten()
            .any(|spec| matches!(spec, FieldSpec::Name(_)))
    }

    /// Resolve every declared attribute against a header row.
    ///
    /// Label-declared fields are matched case-insensitively against trimmed
    /// header cells. Fails fast naming every label the header is missing.
    pub fn resolve(&self, header_fields: &[String]) -> Result<ResolvedFieldMap> {
        let mut missing = Vec::new();

        let resolved = ResolvedFieldMap {
            date_time: resolve_spec(&self.date_time, header_fields, &mut missing),
            date_only: resolve_spec(&self.date_only, header_fields, &mut missing),
            time_only: resolve_spec(&self.time_only, header_fields, &mut missing),
            value: resolve_spec(&self.value, header_fields, &mut missing),
            grade: resolve_spec(&self.grade, header_fields, &mut missing),
            qualifiers: resolve_spec(&self.qualifiers, header_fields, &mut missing),
            timezone: resolve_spec(&self.timezone, header_fields, &mut missing),
            notes: resolve_spec(&self.notes, header_fields, &mut missing),
        };

        if !missing.is_empty() {
            return Err(Error::missing_header_columns(missing));
        }

        Ok(resolved)
    }

    /// Resolve without a header row: every declared attribute must carry an
    /// explicit column index.
    pub fn resolve_unlabeled(&self) -> Result<ResolvedFieldMap> {
        if self.has_named_fields() {
            return Err(Error::configuration(
                "Fields declared by header label require a header row".to_string(),
            ));
        }

        let index_of = |spec: &Option<FieldSpec>| match spec {
            Some(FieldSpec::Index(index)) => Some(*index),
            _ => None,
        };

        Ok(ResolvedFieldMap {
            date_time: index_of(&self.date_time),
            date_only: index_of(&self.date_only),
            time_only: index_of(&self.time_only),
            value: index_of(&self.value),
            grade: index_of(&self.grade),
            qualifiers: index_of(&self.qualifiers),
            timezone: index_of(&self.timezone),
            notes: index_of(&self.notes),
        })
    }

    fn specs(&self) -> [Option<&FieldSpec>; 8] {
        [
            self.date_time.as_ref(),
            self.date_only.as_ref(),
            self.time_only.as_ref(),
            self.value.as_ref(),
            self.grade.as_ref(),
            self.qualifiers.as_ref(),
            self.timezone.as_ref(),
            self.notes.as_ref(),
        ]
    }
}

/// Field map with every declared attribute reduced to a 1-based column index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFieldMap {
    pub date_time: Option<usize>,
    pub date_only: Option<usize>,
    pub time_only: Option<usize>,
    pub value: Option<usize>,
    pub grade: Option<usize>,
    pub qualifiers: Option<usize>,
    pub timezone: Option<usize>,
    pub notes: Option<usize>,
}

fn resolve_spec(
    spec: &Option<FieldSpec>,
    header_fields: &[String],
    missing: &mut Vec<String>,
) -> Option<usize> {
    match spec {
        None => None,
        Some(FieldSpec::Index(index)) => Some(*index),
        Some(FieldSpec::Name(name)) => {
            let position = header_fields
                .iter()
                .position(|field| field.trim().eq_ignore_ascii_case(name));

            match position {
                Some(position) => Some(position + 1),
                None => {
                    missing.push(name.clone());
                    None
                }
            }
        }
    }
}
