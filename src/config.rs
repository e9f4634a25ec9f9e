//! Pulpit configuration.
//!
//! Loaded from `~/.pulpit/config.toml`. Every key is optional; a missing
//! file means defaults.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Pulpit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Where sermon files live. Defaults to `~/.pulpit/sermons/`.
    pub storage_root: Option<PathBuf>,

    /// Whether `show` lists thoughts missing from the stored structure.
    /// `--no-orphans` overrides per command.
    pub include_orphans: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_root: None,
            include_orphans: true,
        }
    }
}

impl Config {
    /// Load config from `~/.pulpit/config.toml`.
    /// Returns defaults if the file is missing, an error if it is invalid.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.pulpit/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pulpit").join("config.toml"))
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
