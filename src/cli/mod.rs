//! CLI command implementations

pub mod add;
pub mod definition;
pub mod done;
pub mod list;
pub mod show;
pub mod tag;

pub use definition::{Cli, Commands};

use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::Config;
use crate::task::Task;
use crate::todotxt::{TodoTxt, TodoTxtParser};

/// The configuration and the todo.txt list a command works on.
pub struct Workspace {
    pub config: Config,
    pub todo: TodoTxt,
}

impl Workspace {
    /// Load the user configuration and the list, with `file` overriding the
    /// configured path.
    pub fn open(file: Option<PathBuf>) -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with(config, file)
    }

    /// Open the list with an explicit configuration. A file that does not
    /// exist yet gives an empty list; it is created on the first save.
    pub fn open_with(config: Config, file: Option<PathBuf>) -> Result<Self> {
        let path = file.unwrap_or_else(|| config.todo_file());
        let parser = TodoTxtParser::new(config.task_config())
            .with_blank_lines(config.parser.blank_lines);
        let mut todo = TodoTxt::with_parser(path.clone(), parser);

        if path.exists() {
            todo.load()
                .with_context(|| format!("Failed to read {}", path.display()))?;
        } else {
            debug!("{} does not exist yet, starting empty", path.display());
        }

        Ok(Self { config, todo })
    }

    pub fn save(&self) -> Result<()> {
        self.todo
            .save_with(None, self.config.save_options())
            .with_context(|| format!("Failed to write {}", self.todo.path().display()))
    }

    pub fn task(&self, line: usize) -> Result<&Task> {
        let index = line_index(line)?;
        self.todo
            .task_by_line(index)
            .ok_or_else(|| anyhow!("No task on line {}", line))
    }

    pub fn task_mut(&mut self, line: usize) -> Result<&mut Task> {
        let index = line_index(line)?;
        self.todo
            .task_by_line_mut(index)
            .ok_or_else(|| anyhow!("No task on line {}", line))
    }
}

/// Lines are numbered from 1 on the command line.
fn line_index(line: usize) -> Result<usize> {
    if line == 0 {
        bail!("Line numbers start at 1");
    }
    Ok(line - 1)
}

/// Display number of a task, counting from 1.
pub fn display_line(task: &Task) -> Option<usize> {
    task.line_number.map(|n| n + 1)
}

/// Shorten `s` to at most `max` terminal columns, ending in `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }

    let (budget, ellipsis) = if max <= 3 { (max, "") } else { (max - 3, "...") };
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str(ellipsis);
    out
}
