use std::{
    fs,
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
    vec,
};

use eyre::{Result, WrapErr, bail};
use tracing::info;

/// How to handle existing files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (regenerated code)
    Always,
    /// Only create if file doesn't exist (stubs, user-edited files)
    #[default]
    IfMissing,
}

impl From<bool> for Overwrite {
    fn from(overwrite: bool) -> Self {
        if overwrite {
            Overwrite::Always
        } else {
            Overwrite::IfMissing
        }
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

impl WriteResult {
    /// Whether content actually reached the disk.
    pub fn is_written(&self) -> bool {
        matches!(self, WriteResult::Written)
    }
}

/// Create a directory tree, doing nothing if it already exists.
pub fn mkdir_p(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    info!("Creating directory `{}`", path.display());
    fs::create_dir_all(path)
        .wrap_err_with(|| format!("failed to create directory `{}`", path.display()))
}

/// Create an empty file along with its parent directories.
///
/// An existing file is left untouched, its content is never truncated.
pub fn touch(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        mkdir_p(parent)?;
    }
    if path.exists() {
        return Ok(());
    }
    info!("Creating file `{}`", path.display());
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to create file `{}`", path.display()))?;
    Ok(())
}

/// Write content to a file, creating the directory tree if necessary.
///
/// With [`Overwrite::IfMissing`] an existing file is kept as-is and
/// [`WriteResult::Skipped`] is returned.
pub fn write(
    path: impl AsRef<Path>,
    content: impl AsRef<[u8]>,
    overwrite: Overwrite,
) -> Result<WriteResult> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        mkdir_p(parent)?;
    }
    if overwrite == Overwrite::IfMissing && path.exists() {
        return Ok(WriteResult::Skipped);
    }
    info!("Writing into file `{}`", path.display());
    fs::write(path, content)
        .wrap_err_with(|| format!("failed to write `{}`", path.display()))?;
    Ok(WriteResult::Written)
}

/// Iterate over non-empty files in a directory, or over a single file.
///
/// Directory entries are visited in name order. Entries whose path does not
/// end with `ext`, that vanish before they are visited, that are empty, or
/// that are not regular files are skipped. A missing `path` yields nothing.
pub fn iter_files(path: impl AsRef<Path>, ext: Option<&str>) -> Result<IterFiles> {
    let path = path.as_ref();
    let paths = if !path.exists() {
        Vec::new()
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        let mut entries = fs::read_dir(path)
            .wrap_err_with(|| format!("failed to read directory `{}`", path.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        entries
    } else {
        bail!(
            "path `{}` exists but is neither a file nor a directory",
            path.display()
        );
    };

    Ok(IterFiles {
        paths: paths.into_iter(),
        ext: ext.filter(|e| !e.is_empty()).map(str::to_owned),
    })
}

/// Lazy, single-pass iterator returned by [`iter_files`].
#[derive(Debug)]
pub struct IterFiles {
    paths: vec::IntoIter<PathBuf>,
    ext: Option<String>,
}

impl IterFiles {
    fn matches_ext(&self, path: &Path) -> bool {
        match &self.ext {
            Some(ext) => path.to_string_lossy().ends_with(ext.as_str()),
            None => true,
        }
    }
}

impl Iterator for IterFiles {
    type Item = Result<OpenFile>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.paths.next() {
            if !self.matches_ext(&path) {
                continue;
            }

            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Some(
                        Err(e).wrap_err_with(|| format!("failed to stat `{}`", path.display())),
                    );
                }
            };
            if !metadata.is_file() || metadata.len() == 0 {
                continue;
            }

            match fs::File::open(&path) {
                Ok(file) => {
                    return Some(Ok(OpenFile {
                        path,
                        reader: BufReader::new(file),
                    }));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Some(
                        Err(e).wrap_err_with(|| format!("failed to open `{}`", path.display())),
                    );
                }
            }
        }
        None
    }
}

/// A file opened for reading by [`iter_files`]. Closed when dropped.
#[derive(Debug)]
pub struct OpenFile {
    path: PathBuf,
    reader: BufReader<fs::File>,
}

impl OpenFile {
    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the remaining content as text.
    pub fn into_string(mut self) -> Result<String> {
        let mut content = String::new();
        self.reader
            .read_to_string(&mut content)
            .wrap_err_with(|| format!("failed to read `{}`", self.path.display()))?;
        Ok(content)
    }
}

impl Read for OpenFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for OpenFile {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}
