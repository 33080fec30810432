//! Task data model

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::config::{CompletionDatePolicy, TaskConfig};
use super::grammar::{self, TagKind};
use crate::error::TaskError;
use crate::todotxt::CollectionId;

/// Prefix of the synthetic field names accepted by [`Task::lookup`].
pub const ATTRIBUTE_FIELD_PREFIX: &str = "attr_";

/// A single line of a todo.txt file.
///
/// ```
/// use todotxt::Task;
///
/// let task = Task::parse("(B) 2021-05-12 call mom +family @phone");
/// assert_eq!(task.priority.as_deref(), Some("B"));
/// assert_eq!(task.projects(), vec!["family"]);
/// assert_eq!(task.to_text(), "(B) 2021-05-12 call mom +family @phone");
/// ```
///
/// Projects, contexts and attributes are never stored separately: they are
/// read from `description` every time, so editing the description directly
/// is always consistent.
#[derive(Debug, Clone)]
pub struct Task {
    /// Free text left after the marker, dates and priority; `None` for a
    /// blank line.
    pub description: Option<String>,

    pub is_completed: bool,

    /// Priority letters without the parentheses
    pub priority: Option<String>,

    pub completion_date: Option<NaiveDate>,

    pub creation_date: Option<NaiveDate>,

    /// 0-based position inside the owning list, if any. Parsing never
    /// depends on it.
    pub line_number: Option<usize>,

    /// The list this task belongs to, if any.
    pub owner: Option<CollectionId>,

    config: Arc<TaskConfig>,
}

/// A value returned by [`Task::lookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(Option<String>),
    Flag(bool),
    Date(Option<NaiveDate>),
    Number(Option<usize>),
    List(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(Some(text)) => write!(f, "{}", text),
            Self::Flag(flag) => write!(f, "{}", flag),
            Self::Date(Some(date)) => write!(f, "{}", grammar::format_date(*date)),
            Self::Number(Some(n)) => write!(f, "{}", n),
            Self::List(items) => write!(f, "{}", items.join(", ")),
            Self::Text(None) | Self::Date(None) | Self::Number(None) => Ok(()),
        }
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::with_config(Arc::default())
    }
}

impl Task {
    /// An empty task: no description, not completed.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty task that will use `config` whenever it is (re)parsed.
    pub fn with_config(config: Arc<TaskConfig>) -> Self {
        Self {
            description: None,
            is_completed: false,
            priority: None,
            completion_date: None,
            creation_date: None,
            line_number: None,
            owner: None,
            config,
        }
    }

    /// Parse one line with the default allow-list.
    pub fn parse(line: &str) -> Self {
        Self::parse_with(line, Arc::default())
    }

    /// Parse one line with a shared parser configuration.
    pub fn parse_with(line: &str, config: Arc<TaskConfig>) -> Self {
        let mut task = Self::with_config(config);
        task.reparse(line);
        task
    }

    /// Replace every line field with the result of parsing `line`.
    ///
    /// Line number and owner are kept.
    pub fn reparse(&mut self, line: &str) {
        let mut rest = line.trim();

        let completed = grammar::strip_completion(rest);
        self.is_completed = completed.is_some();
        self.completion_date = None;
        if let Some(after_marker) = completed {
            let (date, after_date) = grammar::strip_date(after_marker);
            self.completion_date = date;
            rest = after_date;
        }

        let (priority, after_priority) = grammar::strip_priority(rest);
        self.priority = priority.map(str::to_string);

        let (creation_date, after_creation) = grammar::strip_date(after_priority);
        self.creation_date = creation_date;

        let description = after_creation.trim();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        };
    }

    pub fn config(&self) -> &Arc<TaskConfig> {
        &self.config
    }

    /// Mark the task as done on `date`.
    pub fn complete(&mut self, date: NaiveDate) {
        self.is_completed = true;
        self.completion_date = Some(date);
    }

    /// The todo.txt representation of this task.
    pub fn to_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        let completion_date = self.completion_date.filter(|_| match self.config.completion_date {
            CompletionDatePolicy::RequireCreationDate => self.creation_date.is_some(),
            CompletionDatePolicy::Always => true,
        });

        if self.is_completed {
            parts.push("x".to_string());
            if let Some(completed) = completion_date {
                parts.push(grammar::format_date(completed));
            }
        }

        // A completed task keeps its priority only where it separates `x`
        // from a creation date, which would otherwise read back as the
        // completion date.
        let shields_creation_date = completion_date.is_none() && self.creation_date.is_some();
        if let Some(priority) = &self.priority {
            if !self.is_completed || shields_creation_date {
                parts.push(format!("({})", priority));
            }
        }

        if let Some(created) = self.creation_date {
            parts.push(grammar::format_date(created));
        }

        if let Some(description) = &self.description {
            parts.push(description.clone());
        }

        parts.join(" ")
    }

    /// All `+project` names, in order of appearance.
    pub fn projects(&self) -> Vec<&str> {
        self.tags(TagKind::Project)
    }

    /// All `@context` names, in order of appearance.
    pub fn contexts(&self) -> Vec<&str> {
        self.tags(TagKind::Context)
    }

    fn tags(&self, kind: TagKind) -> Vec<&str> {
        match &self.description {
            Some(description) => grammar::tag_matches(kind, description)
                .map(|m| m.name.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// All `key:value` attributes, values in order of appearance.
    ///
    /// Keys naming an allow-listed URI scheme are skipped, so
    /// `https://example.org/` is not an `https` attribute.
    pub fn attributes(&self) -> BTreeMap<String, Vec<String>> {
        let mut attributes: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let Some(description) = &self.description else {
            return attributes;
        };

        for m in grammar::keyvalue_matches(description) {
            let key = m.key.as_str();
            if self.config.is_allowed_key(key) {
                continue;
            }
            attributes
                .entry(key.to_string())
                .or_default()
                .push(m.value.as_str().to_string());
        }
        attributes
    }

    /// Values of attribute `key`; empty when the task has none.
    pub fn get_attribute(&self, key: &str) -> Vec<String> {
        self.attributes().remove(key).unwrap_or_default()
    }

    /// The description without projects, contexts and attributes.
    ///
    /// Words that only look like attributes because of an allow-listed
    /// scheme (URLs) are kept.
    pub fn bare_description(&self) -> String {
        let Some(description) = &self.description else {
            return String::new();
        };

        description
            .split_whitespace()
            .filter(|word| !self.is_tag_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_tag_word(&self, word: &str) -> bool {
        if (word.starts_with('+') || word.starts_with('@')) && word.len() > 1 {
            return true;
        }
        grammar::is_keyvalue_token(word) && !self.config.is_allowed_key(word)
    }

    /// Look up a field by name.
    ///
    /// `attr_<key>` resolves to the values of attribute `key` (possibly
    /// empty). Names that match no field are an error.
    pub fn lookup(&self, name: &str) -> Result<FieldValue, TaskError> {
        if let Some(key) = name.strip_prefix(ATTRIBUTE_FIELD_PREFIX) {
            return Ok(FieldValue::List(self.get_attribute(key)));
        }

        let value = match name {
            "description" => FieldValue::Text(self.description.clone()),
            "bare_description" => FieldValue::Text(Some(self.bare_description())),
            "is_completed" => FieldValue::Flag(self.is_completed),
            "priority" => FieldValue::Text(self.priority.clone()),
            "completion_date" => FieldValue::Date(self.completion_date),
            "creation_date" => FieldValue::Date(self.creation_date),
            "line_number" => FieldValue::Number(self.line_number),
            "projects" => FieldValue::List(to_owned(self.projects())),
            "contexts" => FieldValue::List(to_owned(self.contexts())),
            _ => return Err(TaskError::UnknownField(name.to_string())),
        };
        Ok(value)
    }
}

fn to_owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

/// Equality compares what the line says; position, owner and parser
/// configuration are ignored.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.is_completed == other.is_completed
            && self.priority == other.priority
            && self.completion_date == other.completion_date
            && self.creation_date == other.creation_date
    }
}

impl Eq for Task {}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl std::str::FromStr for Task {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl AsRef<Task> for Task {
    fn as_ref(&self) -> &Task {
        self
    }
}

impl AsMut<Task> for Task {
    fn as_mut(&mut self) -> &mut Task {
        self
    }
}
