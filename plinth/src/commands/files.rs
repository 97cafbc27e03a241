use std::{io::BufRead, path::PathBuf};

use clap::Args;
use eyre::Result;
use plinth_core::iter_files;

#[derive(Args)]
pub struct FilesCommand {
    /// Directory or single file to inspect
    path: PathBuf,

    /// Only include paths ending with this suffix (e.g. ".yml")
    #[arg(short, long)]
    ext: Option<String>,
}

impl FilesCommand {
    pub fn run(&self) -> Result<()> {
        for file in iter_files(&self.path, self.ext.as_deref())? {
            let file = file?;
            let path = file.path().to_path_buf();
            let lines = file.lines().count();
            println!(
                "{} ({} line{})",
                path.display(),
                lines,
                if lines == 1 { "" } else { "s" }
            );
        }
        Ok(())
    }
}
