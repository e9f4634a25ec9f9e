//! Section: the top-level bucket a thought belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four sermon sections.
///
/// Every thought canonically belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Introduction,
    Main,
    Conclusion,

    /// Not yet triaged: no outline point and no unambiguous structural tag.
    Ambiguous,
}

impl Section {
    /// Fixed processing and print order.
    pub const ALL: [Section; 4] = [
        Section::Introduction,
        Section::Main,
        Section::Conclusion,
        Section::Ambiguous,
    ];

    /// Sections that carry outline points.
    pub const OUTLINED: [Section; 3] = [Section::Introduction, Section::Main, Section::Conclusion];

    /// The wire name, matching the structure field for this section.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Main => "main",
            Self::Conclusion => "conclusion",
            Self::Ambiguous => "ambiguous",
        }
    }

    /// The structural tag written onto thoughts placed in this section.
    ///
    /// `None` for ambiguous: the absence of a tag is what makes a thought ambiguous.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Introduction => Some("Introduction"),
            Self::Main => Some("Main Part"),
            Self::Conclusion => Some("Conclusion"),
            Self::Ambiguous => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_structure_field_names() {
        for section in Section::ALL {
            let json = serde_json::to_string(&section).unwrap();
            assert_eq!(json, format!("\"{}\"", section.as_str()));
        }
    }

    #[test]
    fn only_ambiguous_has_no_label() {
        assert_eq!(Section::Main.label(), Some("Main Part"));
        assert_eq!(Section::Ambiguous.label(), None);
    }
}
