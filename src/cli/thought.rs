//! Thought commands: add, move, delete.
//!
//! Each command writes the thought and the structure it produced.
//! The structure is canonicalized against the updated snapshot first.

use clap::Subcommand;
use jiff::Timestamp;
use uuid::Uuid;

use pulpit::model::{Section, Sermon, Structure, Thought};
use pulpit::order::{
    Insertion, Placement, ThoughtIndex, canonicalize_structure, insert_thought_id, move_thought,
    remove_thought_id, resolve_section_for_new_thought, section_for_outline_point,
};
use pulpit::storage::Storage;

use super::{SectionArg, resolve_thought_id, short_id};

#[derive(Debug, Subcommand)]
pub enum ThoughtCommand {
    /// Capture a new thought. Prints the thought ID.
    ///
    /// The section comes from `--point` if given, else from structural
    /// tags, else the thought waits in ambiguous.
    Add {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,

        /// The thought itself.
        text: String,

        /// Tags, e.g. "Introduction" or a topic. Repeatable.
        #[arg(long)]
        tag: Vec<String>,

        /// Outline point to group the thought under.
        #[arg(long)]
        point: Option<String>,
    },

    /// Move a thought to a section, optionally under an outline point.
    ///
    /// Updates the thought's outline point and section tag to match.
    Move {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,

        /// Thought ID: full ID or unambiguous prefix.
        thought: String,

        /// Target section.
        #[arg(long, value_enum)]
        section: SectionArg,

        /// Target outline point. Must belong to the target section.
        #[arg(long)]
        point: Option<String>,
    },

    /// Delete a thought.
    Delete {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,

        /// Thought ID: full ID or unambiguous prefix.
        thought: String,
    },
}

pub(super) fn cmd_add(
    storage: &Storage,
    sermon: &Sermon,
    text: &str,
    tags: Vec<String>,
    point: Option<&str>,
) -> Result<(), String> {
    if let Some(p) = point
        && section_for_outline_point(&sermon.outline, Some(p)).is_none()
    {
        return Err(format!("no outline point '{p}' in this sermon"));
    }

    let section = resolve_section_for_new_thought(sermon, point, &tags);
    let thought = Thought {
        id: Uuid::new_v4().to_string(),
        text: text.to_string(),
        tags,
        date: Timestamp::now(),
        outline_point_id: point.map(String::from),
    };

    let structure = insert_thought_id(
        &sermon.structure,
        &Insertion {
            section,
            thought_id: &thought.id,
            outline_point_id: point,
        },
        &ThoughtIndex::new(&sermon.thoughts),
    );

    let mut updated = sermon.clone();
    updated.thoughts.push(thought.clone());
    save(storage, &updated, &thought, structure)?;

    println!("{}", thought.id);
    eprintln!("Added to {section}");
    Ok(())
}

pub(super) fn cmd_move(
    storage: &Storage,
    sermon: &Sermon,
    reference: &str,
    section: Section,
    point: Option<&str>,
) -> Result<(), String> {
    let thought_id = resolve_thought_id(sermon, reference)?;
    let moved = move_thought(
        sermon,
        thought_id,
        &Placement {
            section,
            outline_point_id: point,
        },
    )
    .map_err(|e| e.to_string())?;

    let mut updated = sermon.clone();
    if let Some(t) = updated.thoughts.iter_mut().find(|t| t.id == thought_id) {
        *t = moved.thought.clone();
    }
    save(storage, &updated, &moved.thought, moved.structure)?;

    eprintln!("Moved {} to {section}", short_id(thought_id));
    Ok(())
}

pub(super) fn cmd_delete(storage: &Storage, sermon: &Sermon, reference: &str) -> Result<(), String> {
    let thought_id = resolve_thought_id(sermon, reference)?;

    let removed = storage
        .delete_thought(sermon.id, thought_id)
        .map_err(|e| format!("failed to delete thought: {e}"))?;
    if !removed {
        return Err(format!("thought {thought_id} is not stored"));
    }

    let structure = remove_thought_id(&sermon.structure, thought_id);
    storage
        .update_structure(sermon.id, &structure)
        .map_err(|e| format!("failed to update structure: {e}"))?;

    eprintln!("Deleted {}", short_id(thought_id));
    Ok(())
}

/// Persist a changed thought and the structure, canonicalized against the
/// updated snapshot.
fn save(
    storage: &Storage,
    updated: &Sermon,
    thought: &Thought,
    structure: Structure,
) -> Result<(), String> {
    let snapshot = Sermon {
        structure,
        ..updated.clone()
    };
    let canonical = canonicalize_structure(&snapshot);

    storage
        .update_thought(updated.id, thought)
        .map_err(|e| format!("failed to save thought: {e}"))?;
    storage
        .update_structure(updated.id, &canonical)
        .map_err(|e| format!("failed to update structure: {e}"))
}
