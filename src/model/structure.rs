//! Structure types: the cached per-section ordering of thought ids.

use serde::{Deserialize, Serialize};

use super::Section;

/// Per-section ordered thought ids.
///
/// A cache of the last computed or dragged ordering. It supplies
/// ordering preference, never section membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Structure {
    pub introduction: Vec<String>,
    pub main: Vec<String>,
    pub conclusion: Vec<String>,
    pub ambiguous: Vec<String>,
}

impl Structure {
    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Introduction => &self.introduction,
            Section::Main => &self.main,
            Section::Conclusion => &self.conclusion,
            Section::Ambiguous => &self.ambiguous,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Introduction => &mut self.introduction,
            Section::Main => &mut self.main,
            Section::Conclusion => &mut self.conclusion,
            Section::Ambiguous => &mut self.ambiguous,
        }
    }

    /// Total number of ids across all sections, duplicates included.
    pub fn len(&self) -> usize {
        Section::ALL.iter().map(|&s| self.section(s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A structure as it arrives from outside, before normalization.
///
/// Persisted sermons carry the structure either as an object or as a
/// JSON-encoded string. Neither form is trusted: fields may be missing,
/// non-arrays, or hold falsy entries. See [`crate::order::normalize_structure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawStructure {
    Encoded(String),
    Parsed(serde_json::Value),
}
