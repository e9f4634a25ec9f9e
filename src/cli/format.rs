//! Output formatting for CLI display.

use pulpit::model::{Outline, Section, Structure, Thought};

use super::short_id;

pub(super) fn format_heading(section: Section) -> String {
    match section {
        Section::Introduction => "Introduction".to_string(),
        Section::Main => "Main part".to_string(),
        Section::Conclusion => "Conclusion".to_string(),
        Section::Ambiguous => "Under consideration".to_string(),
    }
}

/// One thought on one line: short id, outline point (if any), text, tags.
pub(super) fn format_thought(thought: &Thought, outline: &Outline) -> String {
    let mut line = short_id(&thought.id);

    if let Some(point_id) = thought.outline_point_id() {
        let heading = Section::OUTLINED
            .iter()
            .flat_map(|&s| outline.points(s))
            .find(|p| p.id == point_id)
            .map_or("missing point", |p| p.text.as_str());
        line.push_str(&format!("  [{heading}]"));
    }

    line.push_str("  ");
    line.push_str(&thought.text);

    if !thought.tags.is_empty() {
        let tags: Vec<String> = thought.tags.iter().map(|t| format!("#{t}")).collect();
        line.push_str("  ");
        line.push_str(&tags.join(" "));
    }
    line
}

/// Per-section count changes between two structures, skipping unchanged sections.
pub(super) fn format_structure_change(before: &Structure, after: &Structure) -> Vec<String> {
    Section::ALL
        .iter()
        .filter(|&&s| before.section(s) != after.section(s))
        .map(|&s| {
            let (was, now) = (before.section(s).len(), after.section(s).len());
            if was == now {
                format!("{s}: reordered {now} thought(s)")
            } else {
                format!("{s}: {was} → {now} thought(s)")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use pulpit::model::OutlinePoint;

    fn thought(point: Option<&str>, tags: &[&str]) -> Thought {
        Thought {
            id: "3f2a1b4c-0000".to_string(),
            text: "The father runs".to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            date: Timestamp::UNIX_EPOCH,
            outline_point_id: point.map(String::from),
        }
    }

    fn outline() -> Outline {
        Outline {
            main: vec![OutlinePoint {
                id: "p2".to_string(),
                text: "Welcome home".to_string(),
            }],
            ..Outline::default()
        }
    }

    #[test]
    fn plain_thought() {
        assert_eq!(
            format_thought(&thought(None, &[]), &outline()),
            "3f2a1b4c  The father runs"
        );
    }

    #[test]
    fn thought_with_point_and_tags() {
        assert_eq!(
            format_thought(&thought(Some("p2"), &["grace", "Main Part"]), &outline()),
            "3f2a1b4c  [Welcome home]  The father runs  #grace #Main Part"
        );
    }

    #[test]
    fn thought_with_stale_point() {
        assert_eq!(
            format_thought(&thought(Some("gone"), &[]), &outline()),
            "3f2a1b4c  [missing point]  The father runs"
        );
    }

    #[test]
    fn structure_change_lists_only_changed_sections() {
        let before = Structure {
            main: vec!["1".into(), "2".into()],
            ambiguous: vec!["3".into()],
            ..Structure::default()
        };
        let after = Structure {
            main: vec!["2".into(), "1".into()],
            conclusion: vec!["3".into()],
            ..Structure::default()
        };

        assert_eq!(
            format_structure_change(&before, &after),
            vec![
                "main: reordered 2 thought(s)".to_string(),
                "conclusion: 0 → 1 thought(s)".to_string(),
                "ambiguous: 1 → 0 thought(s)".to_string(),
            ]
        );
    }
}
