//! todo - Command-line front end for todo.txt files

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use todotxt::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    if std::env::var("TODOTXT_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("todotxt=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let file = cli.file;

    match cli.command {
        Commands::Completion { shell } => {
            generate(shell, &mut Cli::command(), "todo", &mut std::io::stdout());
            Ok(())
        }
        Commands::List(args) => cli::list::run(file, args),
        Commands::Add(args) => cli::add::run(file, args),
        Commands::Done(args) => cli::done::run(file, args),
        Commands::Show(args) => cli::show::run(file, args),
        Commands::Tag(args) => cli::tag::run(file, args),
    }
}
