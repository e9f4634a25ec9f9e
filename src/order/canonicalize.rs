//! Canonicalization: the authoritative structure for a sermon.
//!
//! Within each outlined section, outline points are walked in outline order.
//! Each group emits its thoughts in stored order first, then any thoughts the
//! stored structure never listed, oldest first. Ungrouped thoughts follow in
//! the same two passes. Ambiguous has no groups and gets only the last two.
//!
//! One [`Consumed`] accumulator spans all four sections, so an id listed
//! under two sections is emitted once. Feeding the output back in as the
//! stored structure reproduces it exactly.

use crate::model::{Section, Sermon, Structure, Thought};

use super::{Consumed, Placements, emit_by_date, emit_stored};

/// Derive the canonical structure from a sermon's thoughts, outline, and
/// stored structure.
///
/// Every thought appears exactly once, in the section its metadata assigns.
/// Stored ids with no matching thought are dropped.
pub fn canonicalize_structure(sermon: &Sermon) -> Structure {
    let placements = Placements::new(sermon);
    let mut consumed = Consumed::default();
    let mut canonical = Structure::default();

    for section in Section::ALL {
        let ordered = canonical_section(sermon, &placements, section, &mut consumed);
        tracing::trace!(%section, count = ordered.len(), "canonicalized section");
        *canonical.section_mut(section) = ordered.into_iter().map(|t| t.id.clone()).collect();
    }

    let stale = sermon
        .structure
        .ambiguous
        .iter()
        .chain(&sermon.structure.introduction)
        .chain(&sermon.structure.main)
        .chain(&sermon.structure.conclusion)
        .filter(|id| placements.get(id).is_none())
        .count();
    if stale > 0 {
        tracing::debug!(sermon = %sermon.id, stale, "dropped stale ids from structure");
    }

    canonical
}

fn canonical_section<'a>(
    sermon: &'a Sermon,
    placements: &Placements<'a>,
    section: Section,
    consumed: &mut Consumed<'a>,
) -> Vec<&'a Thought> {
    let stored = sermon.structure.section(section);
    let mut ordered = Vec::new();

    for point in sermon.outline.points(section) {
        let in_group = |p: &super::Placed<'a>| p.section == section && p.point == Some(point.id.as_str());
        emit_stored(&mut ordered, stored, placements, consumed, in_group);
        emit_by_date(&mut ordered, placements, consumed, in_group);
    }

    let ungrouped = |p: &super::Placed<'a>| p.section == section && p.point.is_none();
    emit_stored(&mut ordered, stored, placements, consumed, ungrouped);
    emit_by_date(&mut ordered, placements, consumed, ungrouped);

    ordered
}
