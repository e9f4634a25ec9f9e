//! Ordering commands: show, preach, canonicalize, sort.

use pulpit::model::{Section, Sermon};
use pulpit::order::{
    Orphans, apply_section_order, canonicalize_structure, preach_ordered_thoughts,
    preach_ordered_thoughts_by_section,
};
use pulpit::storage::Storage;

use super::format::{format_heading, format_structure_change, format_thought};

fn orphans(include: bool) -> Orphans {
    if include {
        Orphans::Include
    } else {
        Orphans::Exclude
    }
}

pub(super) fn cmd_show(sermon: &Sermon, section: Option<Section>, include_orphans: bool) {
    let mode = orphans(include_orphans);
    let sections = match section {
        Some(s) => vec![s],
        None => Section::ALL.to_vec(),
    };

    println!("{}", sermon.title);
    for section in sections {
        println!();
        println!("{}", format_heading(section));
        let thoughts = preach_ordered_thoughts_by_section(sermon, section, mode);
        if thoughts.is_empty() {
            println!("  (empty)");
        }
        for thought in thoughts {
            println!("  {}", format_thought(thought, &sermon.outline));
        }
    }
}

pub(super) fn cmd_preach(sermon: &Sermon, json: bool, include_orphans: bool) -> Result<(), String> {
    let thoughts = preach_ordered_thoughts(sermon, orphans(include_orphans));

    if json {
        let json = serde_json::to_string_pretty(&thoughts)
            .map_err(|e| format!("failed to serialize thoughts: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    for (n, thought) in thoughts.iter().enumerate() {
        println!("{:>3}. {}", n + 1, thought.text);
    }
    Ok(())
}

pub(super) fn cmd_canonicalize(storage: &Storage, sermon: &Sermon) -> Result<(), String> {
    let canonical = canonicalize_structure(sermon);
    if canonical == sermon.structure {
        eprintln!("Already canonical");
        return Ok(());
    }

    storage
        .update_structure(sermon.id, &canonical)
        .map_err(|e| format!("failed to update structure: {e}"))?;

    for line in format_structure_change(&sermon.structure, &canonical) {
        eprintln!("{line}");
    }
    Ok(())
}

pub(super) fn cmd_sort(
    storage: &Storage,
    sermon: &Sermon,
    section: Section,
    ids: &[String],
) -> Result<(), String> {
    // Sort proposals are made against what the author sees, so start canonical.
    let current = canonicalize_structure(sermon);
    let proposed = Sermon {
        structure: apply_section_order(&current, section, ids),
        ..sermon.clone()
    };
    let canonical = canonicalize_structure(&proposed);

    storage
        .update_structure(sermon.id, &canonical)
        .map_err(|e| format!("failed to update structure: {e}"))?;

    eprintln!("Sorted {section}: {} thought(s)", canonical.section(section).len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orphan_setting_maps_to_projection_mode() {
        assert_eq!(orphans(true), Orphans::Include);
        assert_eq!(orphans(false), Orphans::Exclude);
    }
}
