//! `todo add` command implementation

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use super::Workspace;
use crate::task::{Task, TaskConfig};

#[derive(Args)]
pub struct AddArgs {
    /// Task text, e.g. `call mom +family @phone due:2024-05-01`
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub text: Vec<String>,

    /// Priority letter(s), e.g. A
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Stamp today's date as the creation date
    #[arg(short, long)]
    pub date: bool,
}

pub fn run(file: Option<PathBuf>, args: AddArgs) -> Result<()> {
    let mut ws = Workspace::open(file)?;
    let today = Local::now().date_naive();
    let task = build_task(&args, Arc::clone(ws.todo.parser().config()), today)?;

    let added = ws.todo.append(task);
    let line = super::display_line(added).unwrap_or_default();
    let text = added.to_text();

    ws.save()?;
    println!("✓ Added task {}: {}", line, text);
    Ok(())
}

/// Parse the words given on the command line into a task, applying the
/// `--priority` and `--date` flags on top of whatever the text says.
pub fn build_task(args: &AddArgs, config: Arc<TaskConfig>, today: NaiveDate) -> Result<Task> {
    let text = args.text.join(" ");
    if text.trim().is_empty() {
        bail!("Task text cannot be empty");
    }

    let mut task = Task::parse_with(&text, config);

    if let Some(priority) = &args.priority {
        let priority = priority.to_uppercase();
        if priority.is_empty() || !priority.chars().all(|c| c.is_ascii_uppercase()) {
            bail!("Invalid priority '{}': expected letters A-Z", priority);
        }
        task.priority = Some(priority);
    }

    if args.date && task.creation_date.is_none() {
        task.creation_date = Some(today);
    }

    Ok(task)
}
