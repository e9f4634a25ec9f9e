//! Thought ordering: one deterministic total order per section.
//!
//! A thought's placement can come from three sources that may disagree:
//! the stored structure, its `outlinePointId`, and legacy structural tags.
//! This module reconciles them. Everything here is a pure function over a
//! [`Sermon`] snapshot and never mutates its inputs.
//!
//! Section membership is decided by metadata alone
//! ([`assign_section`]). The stored structure only contributes relative
//! order within a group; thoughts it doesn't mention are placed oldest first.

mod canonicalize;
mod mutate;
mod normalize;
mod project;
mod resolve;
mod tags;

use std::collections::{HashMap, HashSet};

pub use canonicalize::canonicalize_structure;
pub use mutate::{
    Insertion, Move, MoveError, Placement, apply_section_order, insert_thought_id, move_thought,
    remove_thought_id,
};
pub use normalize::{StructureError, normalize_structure};
pub use project::{preach_ordered_thoughts, preach_ordered_thoughts_by_section, thoughts_for_outline_point};
pub use resolve::{
    assign_section, resolve_section_for_new_thought, section_for_outline_point, section_for_tags,
};
pub use tags::{is_structural_tag, section_for_tag};

use crate::model::{Section, Sermon, Thought};

/// Whether projections append thoughts missing from the stored structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orphans {
    /// Append them after the stored order. What display wants.
    #[default]
    Include,

    /// Show only what the stored structure lists.
    Exclude,
}

/// Lookup from thought id to thought.
///
/// When a sermon holds duplicate ids, the first thought wins.
#[derive(Debug)]
pub struct ThoughtIndex<'a> {
    by_id: HashMap<&'a str, &'a Thought>,
}

impl<'a> ThoughtIndex<'a> {
    pub fn new(thoughts: &'a [Thought]) -> Self {
        let mut by_id = HashMap::with_capacity(thoughts.len());
        for thought in thoughts {
            by_id.entry(thought.id.as_str()).or_insert(thought);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Thought> {
        self.by_id.get(id).copied()
    }
}

/// A thought with its resolved section and grouping point.
///
/// `point` is set only when the thought's `outlinePointId` names an outline
/// point of `section`. A stale id leaves the thought ungrouped.
#[derive(Debug, Clone, Copy)]
struct Placed<'a> {
    thought: &'a Thought,
    section: Section,
    point: Option<&'a str>,
}

/// Every unique thought of a sermon, placed, in sermon order.
struct Placements<'a> {
    placed: Vec<Placed<'a>>,
    by_id: HashMap<&'a str, usize>,
}

impl<'a> Placements<'a> {
    fn new(sermon: &'a Sermon) -> Self {
        let mut placed = Vec::with_capacity(sermon.thoughts.len());
        let mut by_id = HashMap::with_capacity(sermon.thoughts.len());

        for thought in &sermon.thoughts {
            if by_id.contains_key(thought.id.as_str()) {
                tracing::debug!(id = %thought.id, "duplicate thought id, keeping first");
                continue;
            }
            let section = assign_section(thought, &sermon.outline);
            let point = thought
                .outline_point_id()
                .filter(|id| sermon.outline.points(section).iter().any(|p| p.id == *id));
            by_id.insert(thought.id.as_str(), placed.len());
            placed.push(Placed {
                thought,
                section,
                point,
            });
        }

        Self { placed, by_id }
    }

    fn get(&self, id: &str) -> Option<&Placed<'a>> {
        self.by_id.get(id).map(|&i| &self.placed[i])
    }
}

/// Ids already emitted, threaded through a whole ordering pass so no thought
/// is emitted twice within or across sections.
#[derive(Debug, Default)]
struct Consumed<'a>(HashSet<&'a str>);

impl<'a> Consumed<'a> {
    /// Marks `id` consumed. Returns `false` if it already was.
    fn take(&mut self, id: &'a str) -> bool {
        self.0.insert(id)
    }

    fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }
}

/// Emits stored ids, in stored order, whose thought satisfies `belongs`.
///
/// Ids with no matching thought are dropped.
fn emit_stored<'a>(
    out: &mut Vec<&'a Thought>,
    stored: &[String],
    placements: &Placements<'a>,
    consumed: &mut Consumed<'a>,
    belongs: impl Fn(&Placed<'a>) -> bool,
) {
    for id in stored {
        let Some(placed) = placements.get(id) else {
            continue;
        };
        if belongs(placed) && consumed.take(placed.thought.id.as_str()) {
            out.push(placed.thought);
        }
    }
}

/// Emits every not-yet-consumed thought satisfying `belongs`, oldest first.
///
/// Equal dates keep sermon order.
fn emit_by_date<'a>(
    out: &mut Vec<&'a Thought>,
    placements: &Placements<'a>,
    consumed: &mut Consumed<'a>,
    belongs: impl Fn(&Placed<'a>) -> bool,
) {
    let mut pending: Vec<&'a Thought> = placements
        .placed
        .iter()
        .filter(|p| !consumed.contains(&p.thought.id) && belongs(p))
        .map(|p| p.thought)
        .collect();
    pending.sort_by_key(|t| t.date);

    for thought in pending {
        consumed.take(thought.id.as_str());
        out.push(thought);
    }
}
