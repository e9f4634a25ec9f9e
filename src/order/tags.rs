//! Structural tag aliases.
//!
//! Thoughts written before outline points existed carry their section as a
//! free-text tag, in whichever language the author's UI used at the time.
//! Adding a locale means adding rows here; the resolver never changes.

use crate::model::Section;

/// Lowercase alias to section. Lookups trim and lowercase the raw tag first.
const ALIASES: &[(&str, Section)] = &[
    // English labels and short forms.
    ("introduction", Section::Introduction),
    ("intro", Section::Introduction),
    ("main part", Section::Main),
    ("main", Section::Main),
    ("conclusion", Section::Conclusion),
    // Translation keys stored verbatim by older clients.
    ("tags.introduction", Section::Introduction),
    ("tags.mainpart", Section::Main),
    ("tags.conclusion", Section::Conclusion),
    // Russian.
    ("вступление", Section::Introduction),
    ("основная часть", Section::Main),
    ("заключение", Section::Conclusion),
    // Ukrainian.
    ("вступ", Section::Introduction),
    ("основна частина", Section::Main),
    ("висновок", Section::Conclusion),
];

/// The section a single tag names, if it is a structural tag.
pub fn section_for_tag(tag: &str) -> Option<Section> {
    let key = tag.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|&(_, section)| section)
}

/// Whether a tag names a section (as opposed to a free topical tag).
pub fn is_structural_tag(tag: &str) -> bool {
    section_for_tag(tag).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_labels_and_short_forms() {
        assert_eq!(section_for_tag("Introduction"), Some(Section::Introduction));
        assert_eq!(section_for_tag("intro"), Some(Section::Introduction));
        assert_eq!(section_for_tag("Main Part"), Some(Section::Main));
        assert_eq!(section_for_tag("main"), Some(Section::Main));
        assert_eq!(section_for_tag("CONCLUSION"), Some(Section::Conclusion));
    }

    #[test]
    fn localized_aliases() {
        assert_eq!(section_for_tag("Вступление"), Some(Section::Introduction));
        assert_eq!(section_for_tag("Основная часть"), Some(Section::Main));
        assert_eq!(section_for_tag("Висновок"), Some(Section::Conclusion));
        assert_eq!(section_for_tag("Основна частина"), Some(Section::Main));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(section_for_tag("  Conclusion "), Some(Section::Conclusion));
    }

    #[test]
    fn topical_tags_are_not_structural() {
        assert!(!is_structural_tag("grace"));
        assert!(!is_structural_tag(""));
        assert!(!is_structural_tag("ambiguous"));
        assert!(is_structural_tag("tags.mainPart"));
    }
}
