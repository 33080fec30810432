//! User configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::storage::LineEnding;
use crate::task::{CompletionDatePolicy, TaskConfig};
use crate::todotxt::{BlankLines, SaveOptions};

const APP_DIR_NAME: &str = "todotxt";
const DEFAULT_TODO_FILE: &str = "todo.txt";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the todo.txt file; `~/` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_file: Option<String>,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub save: SaveConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// URI schemes, in addition to the built-in ones, that are never read as
    /// `key:value` attributes.
    #[serde(default)]
    pub extra_keyvalue_allow: Vec<String>,

    #[serde(default)]
    pub blank_lines: BlankLines,

    #[serde(default)]
    pub completion_date: CompletionDatePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveConfig {
    #[serde(default = "default_true")]
    pub safe: bool,

    /// Forces a line ending instead of keeping the one found in the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_ending: Option<LineEnding>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            safe: true,
            line_ending: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Directory holding `config.toml`.
pub fn get_app_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    /// Load the user configuration, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parser settings shared by every task of the list.
    pub fn task_config(&self) -> Arc<TaskConfig> {
        let config = self
            .parser
            .extra_keyvalue_allow
            .iter()
            .filter(|scheme| {
                let blank = scheme.trim().is_empty();
                if blank {
                    warn!("ignoring empty entry in parser.extra_keyvalue_allow");
                }
                !blank
            })
            .fold(TaskConfig::default(), |config, scheme| {
                config.allow_scheme(scheme.trim())
            })
            .with_completion_date(self.parser.completion_date);
        Arc::new(config)
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            safe: self.save.safe,
            linesep: self.save.line_ending,
        }
    }

    /// The configured todo.txt path, falling back to `~/todo.txt`.
    pub fn todo_file(&self) -> PathBuf {
        match &self.todo_file {
            Some(path) => expand_home(path),
            None => dirs::home_dir()
                .map(|h| h.join(DEFAULT_TODO_FILE))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TODO_FILE)),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
