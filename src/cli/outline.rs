//! Outline commands: add and list outline points.

use clap::Subcommand;
use uuid::Uuid;

use pulpit::model::{OutlinePoint, Section, Sermon};
use pulpit::order::thoughts_for_outline_point;
use pulpit::storage::Storage;

use super::{SectionArg, format::format_heading, short_id};

#[derive(Debug, Subcommand)]
pub enum OutlineCommand {
    /// Append an outline point to a section. Prints the point ID.
    Add {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,

        /// Section to add the point to. Ambiguous has no outline.
        #[arg(value_enum)]
        section: SectionArg,

        /// Point heading.
        text: String,
    },

    /// List outline points with how many thoughts each groups.
    List {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,
    },
}

pub(super) fn cmd_add(
    storage: &Storage,
    sermon: &Sermon,
    section: Section,
    text: &str,
) -> Result<(), String> {
    let mut outline = sermon.outline.clone();
    let points = outline
        .points_mut(section)
        .ok_or_else(|| format!("the {section} section has no outline"))?;

    let point = OutlinePoint {
        id: Uuid::new_v4().to_string(),
        text: text.to_string(),
    };
    points.push(point.clone());

    storage
        .update_outline(sermon.id, &outline)
        .map_err(|e| format!("failed to update outline: {e}"))?;

    println!("{}", point.id);
    Ok(())
}

pub(super) fn cmd_list(sermon: &Sermon) {
    for section in Section::OUTLINED {
        println!("{}", format_heading(section));
        let points = sermon.outline.points(section);
        if points.is_empty() {
            println!("  (no points)");
        }
        for point in points {
            let count = thoughts_for_outline_point(sermon, &point.id).len();
            println!("  {}  {}  [{count}]", short_id(&point.id), point.text);
        }
    }
}
