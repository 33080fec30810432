//! todotxt library - Parse, edit and save todo.txt task lists
//!
//! A [`Task`] is one line of a todo.txt file; a [`TodoTxt`] is the ordered
//! list of tasks of one file.
//!
//! ```
//! use todotxt::{Task, TodoTxt};
//!
//! let mut todo = TodoTxt::new("todo.txt");
//! todo.parse_all("(A) call mom +family\n");
//!
//! let task: &mut Task = &mut todo.tasks_mut()[0];
//! task.add_context("phone");
//! assert_eq!(todo.serialize_all(todotxt::LineEnding::Lf), "(A) call mom +family @phone");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
pub mod task;
pub mod todotxt;

pub use error::{ConfigError, StorageError, TaskError};
pub use storage::LineEnding;
pub use task::{CompletionDatePolicy, FieldValue, Task, TaskConfig, TaskRecord};
pub use todotxt::{BlankLines, CollectionId, SaveOptions, TodoTxt, TodoTxtParser};
