//! Legacy text normalization and parsing of field selections.
//!
//! Older query builders stored the selection as a Python-repr-like string
//! with single quotes and `u'...'` string markers. Normalization is a plain
//! textual substitution, not a parser: apostrophes inside values are turned
//! into double quotes too, and the result will not parse. Stored data
//! depends on that exact behavior, so it is kept as is.

use std::sync::LazyLock;

use regex::Regex;

use super::{FieldSpecError, FieldSpecResult};
use crate::model::FieldSpec;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Rewrite legacy single-quoted selection text into strict JSON.
///
/// Replaces every `'` with `"`, then every `: u"` with `:"`.
pub fn normalize_legacy(data: &str) -> String {
    data.replace('\'', "\"").replace(": u\"", ":\"")
}

/// Normalize, parse and validate a stored field selection.
///
/// Fails with [`FieldSpecError::NoData`] when `data` is blank or an empty list.
pub fn parse_field_specs(data: &str) -> FieldSpecResult<Vec<FieldSpec>> {
    if data.trim().is_empty() {
        return Err(FieldSpecError::NoData);
    }

    let specs: Vec<FieldSpec> = serde_json::from_str(&normalize_legacy(data))?;
    if specs.is_empty() {
        return Err(FieldSpecError::NoData);
    }

    for spec in &specs {
        check_identifier("field name", &spec.name)?;
        check_identifier("table alias", &spec.table_alias)?;
        if let Some(target) = spec.join_target() {
            check_identifier("join alias", target)?;
        }
    }

    Ok(specs)
}

fn check_identifier(kind: &'static str, value: &str) -> FieldSpecResult<()> {
    if IDENTIFIER.is_match(value) {
        Ok(())
    } else {
        Err(FieldSpecError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        })
    }
}
