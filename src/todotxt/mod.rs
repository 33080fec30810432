//! A todo.txt file and its tasks

pub mod parser;

pub use parser::{BlankLines, TodoTxtParser};

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::storage::{self, LineEnding};
use crate::task::{Task, TaskRecord};

/// Identifies one [`TodoTxt`] instance.
///
/// Tasks point back at the list that owns them through this id instead of a
/// reference, so a task can outlive or move out of its list freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(Uuid);

impl CollectionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How [`TodoTxt::save_with`] writes the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Write to a temporary file first and rename it over the target.
    pub safe: bool,
    /// Overrides the list's own line separator.
    pub linesep: Option<LineEnding>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            safe: true,
            linesep: None,
        }
    }
}

/// The tasks of one todo.txt file.
///
/// ```
/// use todotxt::{Task, TodoTxt};
///
/// let mut todo = TodoTxt::new("todo.txt");
/// todo.parse_all("(A) call mom\nx 2020-01-02 2020-01-01 pay rent\n");
/// todo.append(Task::parse("buy milk +groceries"));
///
/// assert_eq!(todo.len(), 3);
/// assert_eq!(todo.tasks()[2].line_number, Some(2));
/// ```
#[derive(Debug)]
pub struct TodoTxt<T = Task> {
    id: CollectionId,
    path: PathBuf,
    linesep: LineEnding,
    tasks: Vec<T>,
    parser: TodoTxtParser<T>,
}

impl TodoTxt {
    /// An empty list of plain [`Task`]s bound to `path`. Nothing is read
    /// until [`TodoTxt::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_parser(path, TodoTxtParser::default())
    }
}

impl<T: TaskRecord> TodoTxt<T> {
    /// An empty list whose lines are parsed by `parser`.
    pub fn with_parser(path: impl Into<PathBuf>, parser: TodoTxtParser<T>) -> Self {
        Self {
            id: CollectionId::new(),
            path: path.into(),
            linesep: LineEnding::platform_default(),
            tasks: Vec::new(),
            parser,
        }
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parser(&self) -> &TodoTxtParser<T> {
        &self.parser
    }

    /// Line separator used when saving.
    pub fn linesep(&self) -> LineEnding {
        self.linesep
    }

    pub fn set_linesep(&mut self, linesep: LineEnding) {
        self.linesep = linesep;
    }

    pub fn tasks(&self) -> &[T] {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut [T] {
        &mut self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether `task` was added to or parsed into this list.
    pub fn owns(&self, task: &Task) -> bool {
        task.owner == Some(self.id)
    }

    pub fn task_by_line(&self, line_number: usize) -> Option<&T> {
        self.tasks
            .iter()
            .find(|t| t.as_ref().line_number == Some(line_number))
    }

    pub fn task_by_line_mut(&mut self, line_number: usize) -> Option<&mut T> {
        self.tasks
            .iter_mut()
            .find(|t| t.as_ref().line_number == Some(line_number))
    }

    /// Replace all tasks with the lines of `text`.
    ///
    /// The separator found in `text` becomes the list's separator.
    pub fn parse_all(&mut self, text: &str) -> &[T] {
        let tasks = self.parser.parse_str(text);
        self.adopt(tasks)
    }

    /// Re-read the bound file, replacing all tasks.
    pub fn load(&mut self) -> Result<&[T]> {
        let tasks = self.parser.parse_file(&self.path)?;
        Ok(self.adopt(tasks))
    }

    fn adopt(&mut self, mut tasks: Vec<T>) -> &[T] {
        for task in &mut tasks {
            task.as_mut().owner = Some(self.id);
        }
        self.tasks = tasks;
        self.linesep = self.parser.linesep();
        debug!(
            "parsed {} tasks ({} line endings)",
            self.tasks.len(),
            self.linesep
        );
        &self.tasks
    }

    /// Add `task` after the last numbered line and take ownership of it.
    pub fn append(&mut self, task: impl Into<T>) -> &mut T {
        let mut record: T = task.into();
        let next = self
            .tasks
            .iter()
            .filter_map(|t| t.as_ref().line_number)
            .max()
            .map_or(0, |n| n + 1);
        {
            let task = record.as_mut();
            task.line_number = Some(next);
            task.owner = Some(self.id);
        }
        self.tasks.push(record);
        let last = self.tasks.len() - 1;
        &mut self.tasks[last]
    }

    /// Remove the task at `line_number` and hand it back.
    pub fn remove_line(&mut self, line_number: usize) -> Option<T> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.as_ref().line_number == Some(line_number))?;
        let mut record = self.tasks.remove(index);
        record.as_mut().owner = None;
        Some(record)
    }

    /// Every task as text, ordered by line number.
    ///
    /// Tasks without a line number come after all numbered ones, in the
    /// order they were added.
    pub fn lines(&self) -> Vec<String> {
        let mut ordered: Vec<&T> = self.tasks.iter().collect();
        ordered.sort_by_key(|t| {
            let line_number = t.as_ref().line_number;
            (line_number.is_none(), line_number)
        });
        ordered.iter().map(|t| t.as_ref().to_text()).collect()
    }

    /// All tasks joined by `linesep`, without a trailing separator.
    pub fn serialize_all(&self, linesep: LineEnding) -> String {
        self.lines().join(linesep.as_str())
    }

    /// Save to the bound file with default options.
    pub fn save(&self) -> Result<()> {
        self.save_with(None, SaveOptions::default())
    }

    /// Save to `target` (or the bound file).
    ///
    /// A non-empty list is written with one trailing separator.
    pub fn save_with(&self, target: Option<&Path>, options: SaveOptions) -> Result<()> {
        let target = target.unwrap_or(&self.path);
        let linesep = options.linesep.unwrap_or(self.linesep);

        let mut text = self.serialize_all(linesep);
        if !self.tasks.is_empty() {
            text.push_str(linesep.as_str());
        }

        storage::write_all_text(target, &text, options.safe)?;
        debug!("saved {} tasks to {}", self.tasks.len(), target.display());
        Ok(())
    }
}
