//! Sermon: the snapshot every ordering operation runs over.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Outline, RawStructure, Structure, Thought};
use crate::order::{StructureError, normalize_structure};

/// A sermon snapshot: thoughts, outline, and the stored ordering.
///
/// Deserializing goes through [`SermonRecord`], which accepts the structure
/// in any of its stored shapes and normalizes it once. A `Sermon` in hand
/// always holds a clean structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SermonRecord")]
pub struct Sermon {
    pub id: Uuid,
    pub title: String,
    pub created_at: Timestamp,
    pub thoughts: Vec<Thought>,
    pub outline: Outline,
    pub structure: Structure,
}

impl Sermon {
    /// A new, empty sermon.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: Timestamp::now(),
            thoughts: Vec::new(),
            outline: Outline::default(),
            structure: Structure::default(),
        }
    }
}

/// The wire shape of a sermon.
///
/// `thoughtsBySection` is the legacy name for `structure`, read only when
/// `structure` is absent or null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SermonRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(default)]
    title: String,
    created_at: Option<Timestamp>,
    #[serde(default)]
    thoughts: Vec<Thought>,
    #[serde(default)]
    outline: Option<Outline>,
    #[serde(default)]
    structure: Option<RawStructure>,
    #[serde(default)]
    thoughts_by_section: Option<RawStructure>,
}

impl TryFrom<SermonRecord> for Sermon {
    type Error = StructureError;

    fn try_from(record: SermonRecord) -> Result<Self, Self::Error> {
        let raw = record.structure.or(record.thoughts_by_section);
        let structure = normalize_structure(raw.as_ref())?;

        Ok(Self {
            id: record.id,
            title: record.title,
            created_at: record.created_at.unwrap_or_else(Timestamp::now),
            thoughts: record.thoughts,
            outline: record.outline.unwrap_or_default(),
            structure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "8c0b4a52-1f0e-4c1e-9a57-0d7f3f1b2c3d";

    #[test]
    fn reads_encoded_structure() {
        let json = format!(
            r#"{{"id":"{ID}","title":"Grace","structure":"{{\"main\":[\"2\",\"4\",\"2\"]}}"}}"#
        );
        let sermon: Sermon = serde_json::from_str(&json).unwrap();
        assert_eq!(sermon.structure.main, vec!["2", "4"]);
        assert!(sermon.structure.introduction.is_empty());
    }

    #[test]
    fn falls_back_to_thoughts_by_section() {
        let json = format!(
            r#"{{"id":"{ID}","structure":null,"thoughtsBySection":{{"ambiguous":["5"]}}}}"#
        );
        let sermon: Sermon = serde_json::from_str(&json).unwrap();
        assert_eq!(sermon.structure.ambiguous, vec!["5"]);
    }

    #[test]
    fn structure_wins_over_legacy_alias() {
        let json = format!(
            r#"{{"id":"{ID}","structure":{{"main":["1"]}},"thoughtsBySection":{{"main":["9"]}}}}"#
        );
        let sermon: Sermon = serde_json::from_str(&json).unwrap();
        assert_eq!(sermon.structure.main, vec!["1"]);
    }

    #[test]
    fn malformed_encoded_structure_is_rejected() {
        let json = format!(r#"{{"id":"{ID}","structure":"{{not json"}}"#);
        let err = serde_json::from_str::<Sermon>(&json).unwrap_err();
        assert!(err.to_string().contains("malformed structure"));
    }

    #[test]
    fn snapshot_without_id_gets_a_fresh_one() {
        let json = r#"{"thoughts":[{"id":"5","date":"2024-03-10T09:00:00Z"}],"structure":{"ambiguous":[]}}"#;
        let sermon: Sermon = serde_json::from_str(json).unwrap();
        assert!(!sermon.id.is_nil());
        assert_eq!(sermon.thoughts.len(), 1);
        assert!(sermon.structure.is_empty());
    }

    #[test]
    fn serializes_normalized_structure_as_object() {
        let sermon = Sermon::new("Grace");
        let value = serde_json::to_value(&sermon).unwrap();
        assert!(value["structure"]["main"].is_array());
        assert!(value.get("createdAt").is_some());
    }
}
