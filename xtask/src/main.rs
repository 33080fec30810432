//! xtask - Development tasks for todotxt

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_REFERENCE: &str = "docs/cli/reference.md";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for todotxt")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the `todo` CLI reference from its clap definitions
    GenDocs {
        /// Where to write the reference
        #[arg(long, default_value = DEFAULT_REFERENCE)]
        out: PathBuf,

        /// Only verify that the reference on disk is current
        #[arg(long)]
        check: bool,
    },
}

fn main() -> ExitCode {
    let args = Xtask::parse();
    let result = match args.command {
        Commands::GenDocs { out, check } => gen_docs(&out, check),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn gen_docs(out: &Path, check: bool) -> Result<(), String> {
    let markdown = clap_markdown::help_markdown::<todotxt::cli::Cli>();

    if check {
        let current = fs::read_to_string(out)
            .map_err(|e| format!("cannot read {}: {}", out.display(), e))?;
        if current != markdown {
            return Err(format!(
                "{} is out of date, run `cargo xtask gen-docs`",
                out.display()
            ));
        }
        println!("{} is up to date", out.display());
        return Ok(());
    }

    if let Some(dir) = out.parent() {
        fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {}", dir.display(), e))?;
    }
    fs::write(out, markdown).map_err(|e| format!("cannot write {}: {}", out.display(), e))?;

    println!("Generated CLI documentation at {}", out.display());
    Ok(())
}
