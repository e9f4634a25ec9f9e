//! Section resolution: which section a thought's metadata points to.
//!
//! Priority, first match wins:
//!
//! 1. `outlinePointId` naming a point in the outline
//! 2. exactly one section named by structural tags
//! 3. ambiguous

use crate::model::{Outline, Section, Sermon, Thought};

use super::tags::section_for_tag;

/// The section implied by a thought's tags.
///
/// Resolves only when the tags name exactly one distinct section.
/// A thought tagged into two sections is unresolved rather than
/// arbitrarily placed.
pub fn section_for_tags(tags: &[String]) -> Option<Section> {
    let mut found = None;
    for section in tags.iter().filter_map(|tag| section_for_tag(tag)) {
        match found {
            None => found = Some(section),
            Some(s) if s == section => {}
            Some(_) => return None,
        }
    }
    found
}

/// The section owning an outline point.
///
/// `None` when the id is unset, empty, or stale.
pub fn section_for_outline_point(outline: &Outline, point_id: Option<&str>) -> Option<Section> {
    let point_id = point_id.filter(|id| !id.is_empty())?;
    Section::OUTLINED
        .into_iter()
        .find(|&section| outline.points(section).iter().any(|p| p.id == point_id))
}

/// The canonical section of an existing thought.
pub fn assign_section(thought: &Thought, outline: &Outline) -> Section {
    resolve(outline, thought.outline_point_id(), &thought.tags)
}

/// The section a thought about to be created will land in.
///
/// Same rule as [`assign_section`], without needing the thought to exist yet.
pub fn resolve_section_for_new_thought(
    sermon: &Sermon,
    outline_point_id: Option<&str>,
    tags: &[String],
) -> Section {
    resolve(&sermon.outline, outline_point_id, tags)
}

fn resolve(outline: &Outline, outline_point_id: Option<&str>, tags: &[String]) -> Section {
    section_for_outline_point(outline, outline_point_id)
        .or_else(|| section_for_tags(tags))
        .unwrap_or(Section::Ambiguous)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Structure;
    use crate::order::fixtures::{point, pointed, sermon, tagged, thought};

    fn outline() -> Outline {
        Outline {
            introduction: vec![point("p1")],
            main: vec![point("p2"), point("p4")],
            conclusion: vec![point("p3")],
        }
    }

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn single_structural_tag_resolves() {
        assert_eq!(
            section_for_tags(&tags(&["Introduction"])),
            Some(Section::Introduction)
        );
        assert_eq!(
            section_for_tags(&tags(&["faith", "Висновок"])),
            Some(Section::Conclusion)
        );
    }

    #[test]
    fn aliases_of_the_same_section_agree() {
        assert_eq!(
            section_for_tags(&tags(&["Introduction", "intro", "Вступ"])),
            Some(Section::Introduction)
        );
    }

    #[test]
    fn conflicting_tags_are_unresolved() {
        assert_eq!(section_for_tags(&tags(&["Introduction", "Main Part"])), None);
    }

    #[test]
    fn no_structural_tags_are_unresolved() {
        assert_eq!(section_for_tags(&tags(&["faith", "hope"])), None);
        assert_eq!(section_for_tags(&[]), None);
    }

    #[test]
    fn outline_point_lookup() {
        let outline = outline();
        assert_eq!(
            section_for_outline_point(&outline, Some("p1")),
            Some(Section::Introduction)
        );
        assert_eq!(
            section_for_outline_point(&outline, Some("p4")),
            Some(Section::Main)
        );
        assert_eq!(section_for_outline_point(&outline, Some("gone")), None);
        assert_eq!(section_for_outline_point(&outline, Some("")), None);
        assert_eq!(section_for_outline_point(&outline, None), None);
    }

    #[test]
    fn outline_point_wins_over_tag() {
        let mut t = pointed("1", 8, "p2");
        t.tags = tags(&["Introduction"]);
        assert_eq!(assign_section(&t, &outline()), Section::Main);
    }

    #[test]
    fn stale_outline_point_falls_through_to_tag() {
        let mut t = pointed("1", 8, "deleted");
        t.tags = tags(&["Conclusion"]);
        assert_eq!(assign_section(&t, &outline()), Section::Conclusion);
    }

    #[test]
    fn conflicting_tags_without_point_are_ambiguous() {
        let t = tagged("1", 8, &["Introduction", "Main Part"]);
        assert_eq!(assign_section(&t, &outline()), Section::Ambiguous);
    }

    #[test]
    fn no_signal_is_ambiguous() {
        assert_eq!(
            assign_section(&thought("1", 8), &Outline::default()),
            Section::Ambiguous
        );
    }

    #[test]
    fn new_thought_uses_same_priority() {
        let sermon = sermon(vec![], outline(), Structure::default());
        let intro = tags(&["Introduction"]);

        assert_eq!(
            resolve_section_for_new_thought(&sermon, Some("p3"), &intro),
            Section::Conclusion
        );
        assert_eq!(
            resolve_section_for_new_thought(&sermon, None, &intro),
            Section::Introduction
        );
        assert_eq!(
            resolve_section_for_new_thought(&sermon, Some("gone"), &[]),
            Section::Ambiguous
        );
    }
}
