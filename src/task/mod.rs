//! Task module
//!
//! One todo.txt line and everything that can be done with it:
//! - Tokenize a line into completion marker, dates, priority and description
//! - Read `+project`, `@context` and `key:value` tags from the description
//! - Edit tags in place and write the line back

pub mod config;
mod edit;
pub mod grammar;
pub mod model;

pub use config::{CompletionDatePolicy, TaskConfig, DEFAULT_KEYVALUE_ALLOW};
pub use grammar::{format_date, parse_date, TagKind, DATE_FORMAT};
pub use model::{FieldValue, Task, ATTRIBUTE_FIELD_PREFIX};

/// A record type a list can be parsed into.
///
/// Any type that can be built from a parsed [`Task`] and hands it back out
/// qualifies, so callers can attach their own data to each line without
/// touching the parser.
pub trait TaskRecord: From<Task> + AsRef<Task> + AsMut<Task> {}

impl<T: From<Task> + AsRef<Task> + AsMut<Task>> TaskRecord for T {}
