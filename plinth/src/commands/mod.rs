mod completions;
mod convert;
mod files;
mod fs;
mod modules;
mod resolve;
mod strip;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use convert::ConvertCommand;
use eyre::Result;
use files::FilesCommand;
use fs::{MkdirCommand, TouchCommand, WriteCommand};
use modules::ModulesCommand;
use plinth_core::Settings;
use resolve::ResolveCommand;
use strip::StripCommand;
use tracing::debug;

use crate::logging;

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for plinth_core::config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for plinth_resolve::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "plinth")]
#[command(version)]
#[command(about = "Resolve, convert and materialize plugin identifiers")]
pub(crate) struct Cli {
    /// Path to plinth.toml (defaults to ./plinth.toml, optional)
    #[arg(short, long, global = true, default_value = "plinth.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let settings = Settings::load(&self.config).unwrap_or_exit();
        logging::init(&settings.logging)?;
        debug!(config = %self.config.display(), "Loaded settings");

        match &self.command {
            Commands::Convert(cmd) => cmd.run(),
            Commands::Resolve(cmd) => cmd.run(&settings),
            Commands::Modules(cmd) => cmd.run(),
            Commands::Write(cmd) => cmd.run(&settings),
            Commands::Touch(cmd) => cmd.run(),
            Commands::Mkdir(cmd) => cmd.run(),
            Commands::Files(cmd) => cmd.run(),
            Commands::Strip(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an identifier between naming conventions
    Convert(ConvertCommand),

    /// Resolve an object from a registered module
    Resolve(ResolveCommand),

    /// List registered modules, or every module nested in a package
    Modules(ModulesCommand),

    /// Write content to a file unless it already exists
    Write(WriteCommand),

    /// Create an empty file if it does not exist
    Touch(TouchCommand),

    /// Create a directory tree if it does not exist
    Mkdir(MkdirCommand),

    /// List non-empty files of a directory in name order
    Files(FilesCommand),

    /// Drop null values from a JSON document and print it compactly
    Strip(StripCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Read an argument, or stdin when it is absent.
fn arg_or_stdin(value: Option<&str>) -> Result<String> {
    match value {
        Some(value) => Ok(value.to_string()),
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}
