//! `plinth.toml` settings.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "[plinth] {}"
//!
//! [output]
//! overwrite = false
//! ```

use std::{path::Path, str::FromStr};

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use crate::{FormattedLogger, Overwrite};

/// Result type for settings loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<ConfigError>>;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(plinth::config::io))]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(plinth::config::parse))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(ConfigError::Parse {
            filename: filename.to_string(),
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}

/// Root of `plinth.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Template applied to messages of the formatted logger
    pub format: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Replace existing files when writing
    pub overwrite: bool,
}

impl FromStr for Settings {
    type Err = Box<ConfigError>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "plinth.toml")
    }
}

impl Settings {
    /// Load settings from a file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse settings from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::parse(e, content, filename))
    }

    /// Default overwrite rule for written files.
    pub fn overwrite(&self) -> Overwrite {
        Overwrite::from(self.output.overwrite)
    }

    /// Create a formatted logger using the configured template.
    pub fn logger(&self, name: impl Into<String>) -> FormattedLogger {
        FormattedLogger::new(name, self.logging.format.clone())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::Log;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_str("").unwrap();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, None);
        assert_eq!(settings.overwrite(), Overwrite::IfMissing);
    }

    #[test]
    fn test_parse_full() {
        let settings = Settings::from_str(
            r#"
            [logging]
            level = "plinth=debug"
            format = "[plinth] {}"

            [output]
            overwrite = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.logging.level, "plinth=debug");
        assert_eq!(settings.overwrite(), Overwrite::Always);

        let logger = settings.logger("plinth.test");
        assert_eq!(logger.name(), "plinth.test");
        assert_eq!(logger.format("ready"), "[plinth] ready");
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = Settings::from_str("[logging]\nlevel = 3\n").unwrap_err();
        match *err {
            ConfigError::Parse { span, filename, .. } => {
                assert!(span.is_some());
                assert_eq!(filename, "plinth.toml");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Settings::from_str("[output]\nforce = true\n").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(temp.path().join("plinth.toml")).unwrap();
        assert!(!settings.output.overwrite);
    }

    #[test]
    fn test_load_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plinth.toml");
        std::fs::write(&path, "[logging]\nformat = \"> {}\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.logging.format.as_deref(), Some("> {}"));
    }
}
