//! Outline types: ordered sub-headings within each section.

use serde::{Deserialize, Serialize};

use super::Section;

/// A sub-heading that groups thoughts within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlinePoint {
    pub id: String,

    #[serde(default)]
    pub text: String,
}

/// The author's outline. Array order is group order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outline {
    pub introduction: Vec<OutlinePoint>,
    pub main: Vec<OutlinePoint>,
    pub conclusion: Vec<OutlinePoint>,
}

impl Outline {
    /// The points of a section, in outline order. Ambiguous has none.
    pub fn points(&self, section: Section) -> &[OutlinePoint] {
        match section {
            Section::Introduction => &self.introduction,
            Section::Main => &self.main,
            Section::Conclusion => &self.conclusion,
            Section::Ambiguous => &[],
        }
    }

    /// Mutable access to a section's points, or `None` for ambiguous.
    pub fn points_mut(&mut self, section: Section) -> Option<&mut Vec<OutlinePoint>> {
        match section {
            Section::Introduction => Some(&mut self.introduction),
            Section::Main => Some(&mut self.main),
            Section::Conclusion => Some(&mut self.conclusion),
            Section::Ambiguous => None,
        }
    }
}
