//! `todo list` command implementation

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::Workspace;
use crate::task::Task;

const TABLE_COL_LINE: usize = 5;
const TABLE_COL_TEXT: usize = 72;

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Only tasks tagged with this project (without the `+`)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Only tasks tagged with this context (without the `@`)
    #[arg(short, long)]
    pub context: Option<String>,

    /// Hide completed tasks
    #[arg(long)]
    pub pending: bool,
}

#[derive(Serialize)]
struct TaskJson {
    line: usize,
    text: String,
    is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    creation_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completion_date: Option<NaiveDate>,
    description: String,
    projects: Vec<String>,
    contexts: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, Vec<String>>,
}

impl TaskJson {
    fn new(task: &Task) -> Self {
        Self {
            line: super::display_line(task).unwrap_or_default(),
            text: task.to_text(),
            is_completed: task.is_completed,
            priority: task.priority.clone(),
            creation_date: task.creation_date,
            completion_date: task.completion_date,
            description: task.description.clone().unwrap_or_default(),
            projects: task.projects().into_iter().map(String::from).collect(),
            contexts: task.contexts().into_iter().map(String::from).collect(),
            attributes: task.attributes(),
        }
    }
}

impl ListArgs {
    /// Whether `task` passes the filters. Blank lines never do.
    fn matches(&self, task: &Task) -> bool {
        if task.description.is_none() && !task.is_completed {
            return false;
        }
        if self.pending && task.is_completed {
            return false;
        }
        if let Some(project) = &self.project {
            if !task.projects().contains(&project.as_str()) {
                return false;
            }
        }
        if let Some(context) = &self.context {
            if !task.contexts().contains(&context.as_str()) {
                return false;
            }
        }
        true
    }

    fn select<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut selected: Vec<&Task> = tasks.iter().filter(|t| self.matches(t)).collect();
        selected.sort_by_key(|t| t.line_number);
        selected
    }
}

fn print_table_header() {
    println!("{:>width$}  TASK", "LINE", width = TABLE_COL_LINE);
    println!("{}", "-".repeat(TABLE_COL_LINE + TABLE_COL_TEXT + 2));
}

fn print_table_row(task: &Task) {
    let line = super::display_line(task).unwrap_or_default();
    println!(
        "{:>width$}  {}",
        line,
        super::truncate(&task.to_text(), TABLE_COL_TEXT),
        width = TABLE_COL_LINE
    );
}

pub fn run(file: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let ws = Workspace::open(file)?;
    let selected = args.select(ws.todo.tasks());

    if args.json {
        let tasks: Vec<TaskJson> = selected.iter().map(|t| TaskJson::new(t)).collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No tasks found in {}.", ws.todo.path().display());
        return Ok(());
    }

    print_table_header();
    for task in &selected {
        print_table_row(task);
    }
    println!("\nTotal: {} of {} tasks", selected.len(), ws.todo.len());

    Ok(())
}
