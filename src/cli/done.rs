//! `todo done` command implementation

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

use super::Workspace;
use crate::task::Task;

#[derive(Args)]
pub struct DoneArgs {
    /// Line number as shown by `todo list`
    pub line: usize,
}

pub fn run(file: Option<PathBuf>, args: DoneArgs) -> Result<()> {
    let mut ws = Workspace::open(file)?;
    let today = Local::now().date_naive();

    let task = ws.task_mut(args.line)?;
    if !mark_done(task, today) {
        println!("Task {} is already done.", args.line);
        return Ok(());
    }
    let text = task.to_text();

    ws.save()?;
    println!("✓ Completed task {}: {}", args.line, text);
    Ok(())
}

/// Complete `task` on `today`. Returns false if it was already completed.
///
/// A task without a creation date gets `today` as one too, otherwise the
/// completion date would not be written out.
pub fn mark_done(task: &mut Task, today: NaiveDate) -> bool {
    if task.is_completed {
        return false;
    }
    if task.creation_date.is_none() {
        task.creation_date = Some(today);
    }
    task.complete(today);
    true
}
