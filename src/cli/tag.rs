//! `todo tag` command implementation

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::Workspace;
use crate::task::Task;

#[derive(Args)]
pub struct TagArgs {
    /// Line number as shown by `todo list`
    pub line: usize,

    #[command(subcommand)]
    pub action: TagAction,
}

#[derive(Subcommand)]
pub enum TagAction {
    /// Append a tag to the end of the task
    #[command(subcommand)]
    Add(AddTag),

    /// Remove a tag
    #[command(subcommand)]
    Remove(RemoveTag),

    /// Rename a tag or change an attribute's value
    #[command(subcommand)]
    Replace(ReplaceTag),
}

#[derive(Subcommand)]
pub enum AddTag {
    /// Add `+name`
    Project { name: String },
    /// Add `@name`
    Context { name: String },
    /// Add `key:value`
    Attr { key: String, value: String },
}

#[derive(Subcommand)]
pub enum RemoveTag {
    /// Remove the first `+name`
    Project { name: String },
    /// Remove the first `@name`
    Context { name: String },
    /// Remove every `key:value`, or only those with the given value
    Attr { key: String, value: Option<String> },
}

#[derive(Subcommand)]
pub enum ReplaceTag {
    /// Rename the first `+old` to `+new`
    Project { old: String, new: String },
    /// Rename the first `@old` to `@new`
    Context { old: String, new: String },
    /// Change the first `key:value` to `key:new_value`
    Attr {
        key: String,
        value: String,
        new_value: String,
    },
}

pub fn run(file: Option<PathBuf>, args: TagArgs) -> Result<()> {
    let mut ws = Workspace::open(file)?;
    let task = ws.task_mut(args.line)?;

    if !apply(task, &args.action)? {
        println!("Task {} has no such tag, nothing changed.", args.line);
        return Ok(());
    }
    let text = task.to_text();

    ws.save()?;
    println!("✓ Updated task {}: {}", args.line, text);
    Ok(())
}

/// Apply `action` to `task`. Returns whether the task changed.
pub fn apply(task: &mut Task, action: &TagAction) -> Result<bool> {
    let changed = match action {
        TagAction::Add(tag) => {
            match tag {
                AddTag::Project { name } => task.add_project(check_name(name)?),
                AddTag::Context { name } => task.add_context(check_name(name)?),
                AddTag::Attr { key, value } => {
                    task.add_attribute(check_name(key)?, check_name(value)?)
                }
            }
            true
        }
        TagAction::Remove(tag) => match tag {
            RemoveTag::Project { name } => task.remove_project(name),
            RemoveTag::Context { name } => task.remove_context(name),
            RemoveTag::Attr { key, value } => task.remove_attribute(key, value.as_deref()),
        },
        TagAction::Replace(tag) => match tag {
            ReplaceTag::Project { old, new } => task.replace_project(old, check_name(new)?),
            ReplaceTag::Context { old, new } => task.replace_context(old, check_name(new)?),
            ReplaceTag::Attr {
                key,
                value,
                new_value,
            } => task.replace_attribute(key, value, check_name(new_value)?),
        },
    };
    Ok(changed)
}

/// Tag names and values are single words.
fn check_name(name: &str) -> Result<&str> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        bail!("'{}' must be a single word", name);
    }
    Ok(name)
}
