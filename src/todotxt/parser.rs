//! todo.txt text parser

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::error::Result;
use crate::storage::{self, LineEnding};
use crate::task::{Task, TaskConfig, TaskRecord};

/// What to do with lines that hold nothing but whitespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankLines {
    /// Every line becomes a task; blank lines become empty tasks and keep
    /// their position.
    #[default]
    Keep,
    /// Blank lines are dropped and the remaining tasks are numbered
    /// consecutively.
    Skip,
}

/// Splits text into lines and parses each into a record of type `T`.
///
/// `T` defaults to [`Task`]; any [`TaskRecord`] can be produced instead.
#[derive(Debug)]
pub struct TodoTxtParser<T = Task> {
    config: Arc<TaskConfig>,
    blank_lines: BlankLines,
    linesep: LineEnding,
    record: PhantomData<fn() -> T>,
}

impl<T> Clone for TodoTxtParser<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            blank_lines: self.blank_lines,
            linesep: self.linesep,
            record: PhantomData,
        }
    }
}

impl<T: TaskRecord> Default for TodoTxtParser<T> {
    fn default() -> Self {
        Self::new(Arc::default())
    }
}

impl<T: TaskRecord> TodoTxtParser<T> {
    pub fn new(config: Arc<TaskConfig>) -> Self {
        Self {
            config,
            blank_lines: BlankLines::default(),
            linesep: LineEnding::platform_default(),
            record: PhantomData,
        }
    }

    pub fn with_blank_lines(mut self, blank_lines: BlankLines) -> Self {
        self.blank_lines = blank_lines;
        self
    }

    pub fn config(&self) -> &Arc<TaskConfig> {
        &self.config
    }

    pub fn blank_lines(&self) -> BlankLines {
        self.blank_lines
    }

    /// Line separator found by the last parse, or the platform default if
    /// that text had none.
    pub fn linesep(&self) -> LineEnding {
        self.linesep
    }

    /// Parse every line of `text`.
    ///
    /// One trailing separator at the very end of the text does not produce
    /// an extra empty line.
    pub fn parse_str(&mut self, text: &str) -> Vec<T> {
        self.parse_lines(text, LineEnding::detect(text))
    }

    /// Parse `text` whose separator was already detected, falling back to
    /// the platform default when it has none.
    fn parse_lines(&mut self, text: &str, detected: Option<LineEnding>) -> Vec<T> {
        self.linesep = detected.unwrap_or_else(LineEnding::platform_default);
        if has_stray_endings(text, self.linesep) {
            warn!("text mixes line endings, splitting on {} only", self.linesep);
        }

        let mut lines: Vec<&str> = text.split(self.linesep.as_str()).collect();
        if lines.last().is_some_and(|last| last.is_empty()) {
            lines.pop();
        }

        let lines = lines
            .into_iter()
            .filter(|line| self.blank_lines == BlankLines::Keep || !line.trim().is_empty());

        lines
            .enumerate()
            .map(|(line_number, line)| {
                let mut task = Task::parse_with(line, Arc::clone(&self.config));
                task.line_number = Some(line_number);
                T::from(task)
            })
            .collect()
    }

    /// Parse UTF-8 encoded bytes.
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<Vec<T>> {
        let text = String::from_utf8(bytes.to_vec())?;
        Ok(self.parse_str(&text))
    }

    /// Read `reader` to the end and parse it.
    pub fn parse_reader(&mut self, mut reader: impl Read) -> std::io::Result<Vec<T>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(self.parse_str(&text))
    }

    /// Parse the file at `path`.
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<T>> {
        let (text, detected) = storage::read_all_text(path)?;
        Ok(self.parse_lines(&text, detected))
    }
}

/// Whether `text` contains line breaks other than `linesep`.
fn has_stray_endings(text: &str, linesep: LineEnding) -> bool {
    match linesep {
        LineEnding::CrLf => {
            let pairs = text.matches("\r\n").count();
            text.matches('\n').count() != pairs || text.matches('\r').count() != pairs
        }
        LineEnding::Lf => text.contains('\r'),
        LineEnding::Cr => text.contains('\n'),
    }
}
