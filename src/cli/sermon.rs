//! Sermon lifecycle commands: new, list, import, export.

use std::{fs, path::Path, path::PathBuf};

use clap::Subcommand;

use pulpit::model::Sermon;
use pulpit::order::canonicalize_structure;
use pulpit::storage::Storage;

use super::short_id;

#[derive(Debug, Subcommand)]
pub enum SermonCommand {
    /// Create a new, empty sermon. Prints the sermon ID.
    New {
        /// Working title.
        title: String,
    },

    /// List sermons, oldest first.
    List,

    /// Import a sermon snapshot from a JSON file.
    ///
    /// The structure may be an object or a JSON-encoded string, under
    /// `structure` or the legacy `thoughtsBySection`. It is canonicalized
    /// before storing. A structure string that isn't valid JSON is rejected.
    Import {
        /// Path to the snapshot JSON.
        path: PathBuf,
    },

    /// Print a sermon snapshot as JSON.
    Export {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,
    },
}

pub(super) fn cmd_new(storage: &Storage, title: &str) -> Result<(), String> {
    let sermon = Sermon::new(title);

    storage
        .create_sermon(&sermon)
        .map_err(|e| format!("failed to create sermon: {e}"))?;

    println!("{}", sermon.id);
    Ok(())
}

pub(super) fn cmd_list(storage: &Storage) -> Result<(), String> {
    let sermons = storage
        .list_sermons()
        .map_err(|e| format!("failed to list sermons: {e}"))?;

    if sermons.is_empty() {
        println!("No sermons");
        return Ok(());
    }

    for s in &sermons {
        println!(
            "{}  [{} thoughts]  {}",
            short_id(&s.id.to_string()),
            s.thoughts.len(),
            s.title
        );
    }

    Ok(())
}

pub(super) fn cmd_import(storage: &Storage, path: &Path) -> Result<(), String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    let mut sermon: Sermon = serde_json::from_str(&json)
        .map_err(|e| format!("invalid sermon snapshot in {}: {e}", path.display()))?;
    sermon.structure = canonicalize_structure(&sermon);

    storage
        .create_sermon(&sermon)
        .map_err(|e| format!("failed to store sermon: {e}"))?;

    println!("{}", sermon.id);
    eprintln!(
        "Imported \"{}\" with {} thought(s)",
        sermon.title,
        sermon.thoughts.len()
    );
    Ok(())
}

pub(super) fn cmd_export(sermon: &Sermon) -> Result<(), String> {
    let json = serde_json::to_string_pretty(sermon)
        .map_err(|e| format!("failed to serialize sermon: {e}"))?;
    println!("{json}");
    Ok(())
}
