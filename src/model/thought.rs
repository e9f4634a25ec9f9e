//! Thought: a free-form note captured by the author.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A note that gets placed into a section and, optionally, under an outline point.
///
/// `outline_point_id` and structural `tags` are the two metadata signals
/// that say where a thought belongs. They may disagree with each other
/// and with the stored structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// When the thought was captured. Orders thoughts that have no stored position.
    pub date: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_point_id: Option<String>,
}

impl Thought {
    /// The outline point id, treating an empty string as unset.
    pub fn outline_point_id(&self) -> Option<&str> {
        self.outline_point_id.as_deref().filter(|id| !id.is_empty())
    }
}
