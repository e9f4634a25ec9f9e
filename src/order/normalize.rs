//! Structure normalization: untrusted stored shapes into four clean id lists.

use std::collections::HashSet;

use serde_json::Value;

use crate::model::{RawStructure, Section, Structure};

/// Errors from reading a stored structure.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    /// The encoded form is not valid JSON.
    ///
    /// Never coerced to an empty structure: saving that back would drop
    /// every stored position. The caller picks the fallback.
    #[error("malformed structure: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Normalize a stored structure.
///
/// For each section: non-array or missing fields become empty, falsy and
/// non-string entries are dropped, and duplicates are removed keeping the
/// first occurrence. Absent input is an empty structure.
///
/// Only a JSON-encoded string that fails to parse is an error. Valid JSON
/// of the wrong shape is bad data and degrades to empty.
pub fn normalize_structure(raw: Option<&RawStructure>) -> Result<Structure, StructureError> {
    let parsed;
    let value = match raw {
        None => return Ok(Structure::default()),
        Some(RawStructure::Encoded(text)) => {
            parsed = serde_json::from_str::<Value>(text)?;
            &parsed
        }
        Some(RawStructure::Parsed(value)) => value,
    };

    let mut structure = Structure::default();
    for section in Section::ALL {
        *structure.section_mut(section) = clean_ids(value.get(section.as_str()));
    }
    Ok(structure)
}

fn clean_ids(field: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = field else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        let Value::String(id) = entry else {
            if is_truthy(entry) {
                tracing::debug!(%entry, "dropping non-string structure entry");
            }
            continue;
        };
        if !id.is_empty() && seen.insert(id.as_str()) {
            ids.push(id.clone());
        }
    }
    ids
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
