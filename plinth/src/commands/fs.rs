use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use plinth_core::{Overwrite, Settings, WriteResult, mkdir_p, touch, write};

use super::arg_or_stdin;

#[derive(Args)]
pub struct WriteCommand {
    /// File to write
    path: PathBuf,

    /// Content to write (read from stdin when omitted)
    #[arg(long)]
    content: Option<String>,

    /// Replace the file if it already exists
    #[arg(long)]
    overwrite: bool,
}

impl WriteCommand {
    pub fn run(&self, settings: &Settings) -> Result<()> {
        let content = arg_or_stdin(self.content.as_deref())?;
        let overwrite = if self.overwrite {
            Overwrite::Always
        } else {
            settings.overwrite()
        };

        match write(&self.path, content, overwrite)? {
            WriteResult::Written => println!("✓ wrote {}", self.path.display()),
            WriteResult::Skipped => {
                println!("skipped {} (already exists)", self.path.display())
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct TouchCommand {
    /// File to create
    path: PathBuf,
}

impl TouchCommand {
    pub fn run(&self) -> Result<()> {
        touch(&self.path)
    }
}

#[derive(Args)]
pub struct MkdirCommand {
    /// Directory to create, with its parents
    path: PathBuf,
}

impl MkdirCommand {
    pub fn run(&self) -> Result<()> {
        mkdir_p(&self.path)
    }
}
