//! Integration tests for todo.txt files on disk
//!
//! Loading, editing and saving a list through `TodoTxt`, including line
//! ending preservation, blank line handling and custom record types.

use std::fs;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use tempfile::TempDir;
use todotxt::{
    BlankLines, CompletionDatePolicy, LineEnding, SaveOptions, StorageError, Task, TaskConfig,
    TodoTxt, TodoTxtParser,
};

const LIST: &str = "\
(A) 2024-01-01 call mom +family @phone
x 2024-01-03 2024-01-02 pay rent +home
fix sink +home @house due:2024-02-01

read https://example.org/article @reading
(B) plan trip +travel dest:lisbon dest:porto
";

fn write_list(content: &str) -> Result<(TempDir, std::path::PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("todo.txt");
    fs::write(&path, content)?;
    Ok((dir, path))
}

#[test]
fn test_load_save_roundtrip_is_byte_identical() -> Result<()> {
    let (_dir, path) = write_list(LIST)?;

    let mut todo = TodoTxt::new(&path);
    assert_eq!(todo.load()?.len(), 6);
    todo.save()?;

    assert_eq!(fs::read_to_string(&path)?, LIST);
    Ok(())
}

#[test]
fn test_collection_roundtrip_field_for_field() -> Result<()> {
    let mut first = TodoTxt::new("a.txt");
    first.parse_all(LIST);

    let mut second = TodoTxt::new("b.txt");
    second.parse_all(&first.serialize_all(LineEnding::Lf));

    assert_eq!(first.len(), second.len());
    for (a, b) in first.tasks().iter().zip(second.tasks()) {
        assert_eq!(a, b);
        assert_eq!(a.line_number, b.line_number);
        assert_eq!(a.attributes(), b.attributes());
    }
    Ok(())
}

#[test]
fn test_edit_and_reload() -> Result<()> {
    let (_dir, path) = write_list(LIST)?;

    let mut todo = TodoTxt::new(&path);
    todo.load()?;

    let sink = todo.task_by_line_mut(2).unwrap();
    sink.complete(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    sink.creation_date = NaiveDate::from_ymd_opt(2024, 1, 4);
    assert!(sink.replace_attribute("due", "2024-02-01", "2024-01-10"));

    todo.append(Task::parse("(C) buy milk +groceries"));
    todo.save()?;

    let mut reloaded = TodoTxt::new(&path);
    let tasks = reloaded.load()?;
    assert_eq!(tasks.len(), 7);
    assert_eq!(
        tasks[2].to_text(),
        "x 2024-01-10 2024-01-04 fix sink +home @house due:2024-01-10"
    );
    assert_eq!(tasks[6].to_text(), "(C) buy milk +groceries");
    assert_eq!(tasks[6].line_number, Some(6));
    Ok(())
}

#[test]
fn test_untouched_completed_line_survives_save() -> Result<()> {
    let (_dir, path) = write_list("x (A) 2020-01-01 foo\n")?;

    let mut todo = TodoTxt::new(&path);
    todo.load()?;
    todo.append(Task::parse("other"));
    todo.save()?;
    assert_eq!(fs::read_to_string(&path)?, "x (A) 2020-01-01 foo\nother\n");

    let mut reloaded = TodoTxt::new(&path);
    let tasks = reloaded.load()?;
    assert_eq!(tasks[0].creation_date, NaiveDate::from_ymd_opt(2020, 1, 1));
    assert!(tasks[0].completion_date.is_none());
    Ok(())
}

#[test]
fn test_crlf_file_stays_crlf() -> Result<()> {
    let crlf = LIST.replace('\n', "\r\n");
    let (_dir, path) = write_list(&crlf)?;

    let mut todo = TodoTxt::new(&path);
    todo.load()?;
    assert_eq!(todo.linesep(), LineEnding::CrLf);
    assert_eq!(todo.tasks()[0].description.as_deref(), Some("call mom +family @phone"));

    todo.save()?;
    assert_eq!(fs::read_to_string(&path)?, crlf);
    Ok(())
}

#[test]
fn test_save_to_other_file_with_other_line_ending() -> Result<()> {
    let (dir, path) = write_list("one\ntwo\n")?;
    let copy = dir.path().join("copy.txt");

    let mut todo = TodoTxt::new(&path);
    todo.load()?;
    todo.save_with(
        Some(&copy),
        SaveOptions {
            safe: false,
            linesep: Some(LineEnding::Cr),
        },
    )?;

    assert_eq!(fs::read_to_string(&copy)?, "one\rtwo\r");
    assert_eq!(fs::read_to_string(&path)?, "one\ntwo\n");
    Ok(())
}

#[test]
fn test_missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let mut todo = TodoTxt::new(dir.path().join("absent.txt"));
    let err = todo.load().unwrap_err();
    assert!(matches!(err, StorageError::Read { .. }));
}

#[test]
fn test_skip_blank_lines_renumbers() -> Result<()> {
    let (_dir, path) = write_list(LIST)?;

    let parser = TodoTxtParser::default().with_blank_lines(BlankLines::Skip);
    let mut todo: TodoTxt = TodoTxt::with_parser(&path, parser);
    todo.load()?;

    assert_eq!(todo.len(), 5);
    assert_eq!(
        todo.task_by_line(3).and_then(|t| t.description.as_deref()),
        Some("read https://example.org/article @reading")
    );

    todo.save()?;
    assert_eq!(
        fs::read_to_string(&path)?,
        LIST.replace("due:2024-02-01\n\n", "due:2024-02-01\n")
    );
    Ok(())
}

#[test]
fn test_completion_date_policy_always() {
    let config =
        Arc::new(TaskConfig::default().with_completion_date(CompletionDatePolicy::Always));
    let mut todo: TodoTxt = TodoTxt::with_parser("todo.txt", TodoTxtParser::new(config));
    todo.parse_all("x 2024-01-03 pay rent\n");

    let task = &mut todo.tasks_mut()[0];
    task.add_project("home");
    assert_eq!(task.completion_date, NaiveDate::from_ymd_opt(2024, 1, 3));
    assert_eq!(todo.serialize_all(LineEnding::Lf), "x 2024-01-03 pay rent +home");
}

/// A record carrying data of its own next to the parsed line.
#[derive(Debug)]
struct Annotated {
    task: Task,
    note: Option<String>,
}

impl From<Task> for Annotated {
    fn from(task: Task) -> Self {
        Self { task, note: None }
    }
}

impl AsRef<Task> for Annotated {
    fn as_ref(&self) -> &Task {
        &self.task
    }
}

impl AsMut<Task> for Annotated {
    fn as_mut(&mut self) -> &mut Task {
        &mut self.task
    }
}

#[test]
fn test_custom_record_type_and_allow_list() -> Result<()> {
    let (_dir, path) = write_list("sync rsync://nas/share +backup\nticket:7 review\n")?;

    let config = Arc::new(TaskConfig::default().allow_scheme("rsync"));
    let parser: TodoTxtParser<Annotated> = TodoTxtParser::new(config);
    let mut todo = TodoTxt::with_parser(&path, parser);
    todo.load()?;

    let records = todo.tasks();
    assert!(records.iter().all(|r| todo.owns(r.as_ref())));
    assert!(records[0].as_ref().attributes().is_empty());
    assert_eq!(records[1].as_ref().get_attribute("ticket"), vec!["7"]);

    let appended = todo.append(Task::parse("new one"));
    assert_eq!(appended.as_ref().line_number, Some(2));
    appended.note = Some("added in test".to_string());

    let review = todo.task_by_line_mut(1).unwrap();
    review.note = Some("needs a desk".to_string());
    review.as_mut().add_context("desk");

    let notes: Vec<Option<&str>> = todo.tasks().iter().map(|r| r.note.as_deref()).collect();
    assert_eq!(notes, vec![None, Some("needs a desk"), Some("added in test")]);

    todo.save()?;
    assert_eq!(
        fs::read_to_string(&path)?,
        "sync rsync://nas/share +backup\nticket:7 review @desk\nnew one\n"
    );
    Ok(())
}
