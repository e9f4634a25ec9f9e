//! Incremental structure edits: insert, move, remove, reorder.
//!
//! These run on every drag-end and edit, so they patch the stored
//! structure directly instead of recanonicalizing. The next load
//! recanonicalizes anyway.

use crate::model::{Section, Sermon, Structure, Thought};

use super::{ThoughtIndex, is_structural_tag, section_for_outline_point};

/// Where to insert a thought id.
#[derive(Debug, Clone, Copy)]
pub struct Insertion<'a> {
    pub section: Section,
    pub thought_id: &'a str,

    /// Insert after the last thought grouped under this point.
    pub outline_point_id: Option<&'a str>,
}

/// Insert a thought id into one section, removing it from every other.
///
/// With an outline point, the id goes right after the last id in the
/// target section whose thought shares that point, or at the end when no
/// sibling is listed. Without one, it goes at the end.
pub fn insert_thought_id(
    structure: &Structure,
    insertion: &Insertion<'_>,
    thoughts: &ThoughtIndex<'_>,
) -> Structure {
    let mut next = remove_thought_id(structure, insertion.thought_id);
    let target = next.section_mut(insertion.section);

    let after = insertion
        .outline_point_id
        .filter(|point| !point.is_empty())
        .and_then(|point| {
            target.iter().rposition(|id| {
                thoughts
                    .get(id)
                    .and_then(Thought::outline_point_id)
                    .is_some_and(|p| p == point)
            })
        });

    let id = insertion.thought_id.to_string();
    match after {
        Some(i) => target.insert(i + 1, id),
        None => target.push(id),
    }
    next
}

/// Remove a thought id from every section.
pub fn remove_thought_id(structure: &Structure, thought_id: &str) -> Structure {
    let mut next = structure.clone();
    for section in Section::ALL {
        next.section_mut(section).retain(|id| id != thought_id);
    }
    next
}

/// Replace one section's order with an externally proposed one.
///
/// The proposal is deduplicated and limited to ids already in the section;
/// ids it leaves out keep their relative order after it. Other sections
/// are untouched.
pub fn apply_section_order(structure: &Structure, section: Section, proposed: &[String]) -> Structure {
    let current = structure.section(section);
    let mut ordered: Vec<String> = Vec::with_capacity(current.len());

    for id in proposed {
        if current.contains(id) && !ordered.contains(id) {
            ordered.push(id.clone());
        }
    }
    let dropped = proposed.len() - ordered.len();
    if dropped > 0 {
        tracing::debug!(%section, dropped, "ignored proposed ids not in section");
    }
    for id in current {
        if !ordered.contains(id) {
            ordered.push(id.clone());
        }
    }

    let mut next = structure.clone();
    *next.section_mut(section) = ordered;
    next
}

/// The drop target of a move.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub section: Section,
    pub outline_point_id: Option<&'a str>,
}

/// The result of a move: both values need persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub structure: Structure,

    /// The moved thought with metadata matching its new place.
    pub thought: Thought,
}

/// Errors from moving a thought.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("thought not found: {0}")]
    ThoughtNotFound(String),

    #[error("outline point {point} is not in the {section} section")]
    PointOutsideSection { point: String, section: Section },
}

/// Move a thought and patch its metadata to agree with the move.
///
/// The patch sets `outlinePointId` to the target point (clearing it when
/// there is none) and replaces structural tags with the target section's
/// label when no point is given. Afterwards the thought's metadata resolves
/// to the target section, so canonicalization on the next load keeps it
/// where it was dropped.
pub fn move_thought(
    sermon: &Sermon,
    thought_id: &str,
    placement: &Placement<'_>,
) -> Result<Move, MoveError> {
    let index = ThoughtIndex::new(&sermon.thoughts);
    let thought = index
        .get(thought_id)
        .ok_or_else(|| MoveError::ThoughtNotFound(thought_id.to_string()))?;

    let point = placement.outline_point_id.filter(|p| !p.is_empty());
    if let Some(point) = point
        && section_for_outline_point(&sermon.outline, Some(point)) != Some(placement.section)
    {
        return Err(MoveError::PointOutsideSection {
            point: point.to_string(),
            section: placement.section,
        });
    }

    let structure = insert_thought_id(
        &sermon.structure,
        &Insertion {
            section: placement.section,
            thought_id,
            outline_point_id: point,
        },
        &index,
    );

    Ok(Move {
        structure,
        thought: patch_metadata(thought, placement.section, point),
    })
}

fn patch_metadata(thought: &Thought, section: Section, point: Option<&str>) -> Thought {
    let mut patched = thought.clone();
    patched.outline_point_id = point.map(str::to_string);
    patched.tags.retain(|tag| !is_structural_tag(tag));
    if point.is_none()
        && let Some(label) = section.label()
    {
        patched.tags.push(label.to_string());
    }
    patched
}
