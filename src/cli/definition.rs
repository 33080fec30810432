//! CLI argument definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::add::AddArgs;
use super::done::DoneArgs;
use super::list::ListArgs;
use super::show::ShowArgs;
use super::tag::TagArgs;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Read and edit todo.txt task lists")]
#[command(version)]
pub struct Cli {
    /// todo.txt file to use instead of the configured one
    #[arg(short, long, global = true, env = "TODO_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks with their line numbers
    #[command(alias = "ls")]
    List(ListArgs),

    /// Append a task
    #[command(alias = "a")]
    Add(AddArgs),

    /// Mark a task as completed today
    Done(DoneArgs),

    /// Print the fields of a task
    Show(ShowArgs),

    /// Add, remove or replace projects, contexts and attributes
    Tag(TagArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
