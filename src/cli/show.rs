//! `todo show` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::Workspace;
use crate::task::{FieldValue, Task, ATTRIBUTE_FIELD_PREFIX};

/// Fields printed when no `--field` is given, before the attributes.
const DEFAULT_FIELDS: &[&str] = &[
    "description",
    "bare_description",
    "is_completed",
    "priority",
    "creation_date",
    "completion_date",
    "projects",
    "contexts",
];

#[derive(Args)]
pub struct ShowArgs {
    /// Line number as shown by `todo list`
    pub line: usize,

    /// Field to print, e.g. `priority`, `projects` or `attr_due`; repeatable
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(file: Option<PathBuf>, args: ShowArgs) -> Result<()> {
    let ws = Workspace::open(file)?;
    let task = ws.task(args.line)?;
    let fields = collect_fields(task, &args.fields)?;

    if args.json {
        let mut map = serde_json::Map::new();
        for (name, value) in fields {
            map.insert(name, serde_json::to_value(value)?);
        }
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    println!("Line {}: {}\n", args.line, task);
    for (name, value) in &fields {
        println!("  {:<width$}  {}", name, value, width = width);
    }
    Ok(())
}

/// Resolve `names` on `task`, or every standard field plus one `attr_` entry
/// per attribute key when `names` is empty.
pub fn collect_fields(task: &Task, names: &[String]) -> Result<Vec<(String, FieldValue)>> {
    let names: Vec<String> = if names.is_empty() {
        DEFAULT_FIELDS
            .iter()
            .map(|name| name.to_string())
            .chain(
                task.attributes()
                    .into_keys()
                    .map(|key| format!("{}{}", ATTRIBUTE_FIELD_PREFIX, key)),
            )
            .collect()
    } else {
        names.to_vec()
    };

    names
        .into_iter()
        .map(|name| {
            let value = task.lookup(&name)?;
            Ok((name, value))
        })
        .collect()
}
