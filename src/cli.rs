//! CLI interface for Pulpit.
//!
//! Each subcommand is non-interactive: arguments in, text or JSON out.
//! Every command that changes ordering recanonicalizes against the latest
//! snapshot before writing, so what is stored is always canonical.
//!
//! `--sermon` takes a full UUID or an unambiguous prefix.

mod arrange;
mod format;
mod outline;
mod sermon;
mod thought;

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use pulpit::model::{Section, Sermon};
use pulpit::storage::Storage;

use crate::config::Config;

use outline::OutlineCommand;
use sermon::SermonCommand;
use thought::ThoughtCommand;

/// Pulpit: arrange sermon thoughts into the order you preach them.
#[derive(Debug, Parser)]
#[command(name = "pulpit", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: from loose thoughts to a preaching order
  1. pulpit sermon new "The prodigal son"
     → prints a sermon ID (e.g. a3b0fc12)
  2. pulpit outline add --sermon a3b main "The father runs"
  3. pulpit thought add --sermon a3b "He was still far off" --tag "Main Part"
  4. pulpit thought move --sermon a3b 7c1 --section main --point 5e0
  5. pulpit preach --sermon a3b

Repair a sermon whose stored order drifted:
  pulpit canonicalize --sermon a3b"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage sermons: create, list, import, export.
    Sermon {
        #[command(subcommand)]
        command: SermonCommand,
    },

    /// Manage outline points.
    Outline {
        #[command(subcommand)]
        command: OutlineCommand,
    },

    /// Add, move, or delete thoughts.
    Thought {
        #[command(subcommand)]
        command: ThoughtCommand,
    },

    /// Show thoughts section by section.
    ///
    /// Reads the stored order as is, without rewriting it.
    Show {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,

        /// Only this section.
        #[arg(long, value_enum)]
        section: Option<SectionArg>,

        /// Hide thoughts missing from the stored order.
        #[arg(long)]
        no_orphans: bool,
    },

    /// Print the whole sermon in preaching order.
    ///
    /// Thoughts missing from the stored order are included unless
    /// `include-orphans` is off in the config.
    Preach {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,

        /// Output the ordered thoughts as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Recompute the canonical order and store it.
    Canonicalize {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,
    },

    /// Apply an externally proposed order to one section.
    ///
    /// Ids not in the section are ignored; ids left out keep their
    /// relative order after the proposed ones.
    Sort {
        /// Sermon ID: full UUID or unambiguous prefix.
        #[arg(long)]
        sermon: String,

        #[arg(value_enum)]
        section: SectionArg,

        /// Thought ids in the proposed order.
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// CLI-facing section, mapped to the domain `Section`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SectionArg {
    Introduction,
    Main,
    Conclusion,
    Ambiguous,
}

impl SectionArg {
    fn to_domain(self) -> Section {
        match self {
            Self::Introduction => Section::Introduction,
            Self::Main => Section::Main,
            Self::Conclusion => Section::Conclusion,
            Self::Ambiguous => Section::Ambiguous,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sermon { command } => match command {
            SermonCommand::New { title } => sermon::cmd_new(storage, &title),
            SermonCommand::List => sermon::cmd_list(storage),
            SermonCommand::Import { path } => sermon::cmd_import(storage, &path),
            SermonCommand::Export { sermon } => {
                let sermon = resolve_sermon(storage, &sermon)?;
                sermon::cmd_export(&sermon)
            }
        },
        Command::Outline { command } => match command {
            OutlineCommand::Add {
                sermon,
                section,
                text,
            } => {
                let sermon = resolve_sermon(storage, &sermon)?;
                outline::cmd_add(storage, &sermon, section.to_domain(), &text)
            }
            OutlineCommand::List { sermon } => {
                let sermon = resolve_sermon(storage, &sermon)?;
                outline::cmd_list(&sermon);
                Ok(())
            }
        },
        Command::Thought { command } => match command {
            ThoughtCommand::Add {
                sermon,
                text,
                tag,
                point,
            } => {
                let sermon = resolve_sermon(storage, &sermon)?;
                thought::cmd_add(storage, &sermon, &text, tag, point.as_deref())
            }
            ThoughtCommand::Move {
                sermon,
                thought,
                section,
                point,
            } => {
                let sermon = resolve_sermon(storage, &sermon)?;
                thought::cmd_move(
                    storage,
                    &sermon,
                    &thought,
                    section.to_domain(),
                    point.as_deref(),
                )
            }
            ThoughtCommand::Delete { sermon, thought } => {
                let sermon = resolve_sermon(storage, &sermon)?;
                thought::cmd_delete(storage, &sermon, &thought)
            }
        },
        Command::Show {
            sermon,
            section,
            no_orphans,
        } => {
            let sermon = resolve_sermon(storage, &sermon)?;
            let include_orphans = config.include_orphans && !no_orphans;
            arrange::cmd_show(&sermon, section.map(SectionArg::to_domain), include_orphans);
            Ok(())
        }
        Command::Preach { sermon, json } => {
            let sermon = resolve_sermon(storage, &sermon)?;
            arrange::cmd_preach(&sermon, json, config.include_orphans)
        }
        Command::Canonicalize { sermon } => {
            let sermon = resolve_sermon(storage, &sermon)?;
            arrange::cmd_canonicalize(storage, &sermon)
        }
        Command::Sort {
            sermon,
            section,
            ids,
        } => {
            let sermon = resolve_sermon(storage, &sermon)?;
            arrange::cmd_sort(storage, &sermon, section.to_domain(), &ids)
        }
    }
}

/// Resolve a sermon reference (full UUID or unambiguous prefix) to a sermon.
fn resolve_sermon(storage: &Storage, reference: &str) -> Result<Sermon, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_sermon(id)
            .map_err(|e| format!("failed to load sermon: {e}"));
    }

    let sermons = storage
        .list_sermons()
        .map_err(|e| format!("failed to list sermons: {e}"))?;

    let mut matches: Vec<Sermon> = sermons
        .into_iter()
        .filter(|s| s.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no sermon matching '{reference}'")),
        1 => Ok(matches.remove(0)),
        n => {
            let ids: Vec<String> = matches.iter().map(|s| short_id(&s.id.to_string())).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} sermons: {}",
                ids.join(", ")
            ))
        }
    }
}

/// Resolve a thought reference (full id or unambiguous prefix) within a sermon.
fn resolve_thought_id<'a>(sermon: &'a Sermon, reference: &str) -> Result<&'a str, String> {
    if let Some(t) = sermon.thoughts.iter().find(|t| t.id == reference) {
        return Ok(t.id.as_str());
    }

    let matches: Vec<&str> = sermon
        .thoughts
        .iter()
        .map(|t| t.id.as_str())
        .filter(|id| id.starts_with(reference))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no thought matching '{reference}'")),
        [id] => Ok(*id),
        _ => Err(format!(
            "'{reference}' is ambiguous: matches {} thoughts",
            matches.len()
        )),
    }
}

/// The first eight characters of an id, or the whole id if shorter.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
