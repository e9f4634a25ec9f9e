//! Projection: ordered thoughts for display and preaching.
//!
//! Unlike canonicalization, projection trusts the stored structure for
//! what it lists, so a stale or partial structure still renders without
//! forcing a canonicalizing write first.

use crate::model::{Section, Sermon, Thought};

use super::{Consumed, Orphans, Placed, Placements, emit_by_date, section_for_outline_point};

/// Thoughts of one section in preaching order.
///
/// Stored ids come first, in stored order, minus ids with no thought.
/// With [`Orphans::Include`], thoughts assigned to this section but missing
/// from its stored list follow: grouped by outline point in outline order,
/// then the rest, each oldest first.
pub fn preach_ordered_thoughts_by_section(
    sermon: &Sermon,
    section: Section,
    orphans: Orphans,
) -> Vec<&Thought> {
    let placements = Placements::new(sermon);
    let mut consumed = Consumed::default();
    project_section(sermon, &placements, section, orphans, &mut consumed)
}

/// The whole sermon in preaching order: introduction, main, conclusion, ambiguous.
///
/// A thought already emitted by an earlier section is skipped.
pub fn preach_ordered_thoughts(sermon: &Sermon, orphans: Orphans) -> Vec<&Thought> {
    let placements = Placements::new(sermon);
    let mut consumed = Consumed::default();

    Section::ALL
        .into_iter()
        .flat_map(|section| project_section(sermon, &placements, section, orphans, &mut consumed))
        .collect()
}

/// Thoughts grouped under one outline point, in preaching order.
///
/// Empty when the point doesn't exist.
pub fn thoughts_for_outline_point<'a>(sermon: &'a Sermon, point_id: &str) -> Vec<&'a Thought> {
    let Some(section) = section_for_outline_point(&sermon.outline, Some(point_id)) else {
        return Vec::new();
    };

    preach_ordered_thoughts_by_section(sermon, section, Orphans::Include)
        .into_iter()
        .filter(|t| t.outline_point_id() == Some(point_id))
        .collect()
}

fn project_section<'a>(
    sermon: &'a Sermon,
    placements: &Placements<'a>,
    section: Section,
    orphans: Orphans,
    consumed: &mut Consumed<'a>,
) -> Vec<&'a Thought> {
    let mut ordered = Vec::new();

    for id in sermon.structure.section(section) {
        match placements.get(id) {
            Some(placed) => {
                if consumed.take(placed.thought.id.as_str()) {
                    ordered.push(placed.thought);
                }
            }
            None => tracing::debug!(%section, %id, "skipping stored id with no thought"),
        }
    }

    if orphans == Orphans::Include {
        for point in sermon.outline.points(section) {
            emit_by_date(&mut ordered, placements, consumed, |p: &Placed<'a>| {
                p.section == section && p.point == Some(point.id.as_str())
            });
        }
        emit_by_date(&mut ordered, placements, consumed, |p: &Placed<'a>| {
            p.section == section
        });
    }

    ordered
}
