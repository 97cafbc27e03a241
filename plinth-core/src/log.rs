//! Named loggers and a template-applying wrapper.
//!
//! [`Log`] is the capability shared by every logger. [`FormattedLogger`]
//! implements it by forwarding to an inner logger and only rewrites the
//! message on the emission path.

use std::borrow::Cow;

use tracing::Level;

/// Logging operations available on every logger.
pub trait Log {
    /// Name the logger routes under.
    fn name(&self) -> &str;

    /// Whether an event at `level` would be recorded.
    fn enabled(&self, level: Level) -> bool;

    /// Emit a message at `level`.
    fn log(&self, level: Level, message: &str);

    fn trace(&self, message: &str) {
        self.log(Level::TRACE, message)
    }

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message)
    }

    fn info(&self, message: &str) {
        self.log(Level::INFO, message)
    }

    fn warn(&self, message: &str) {
        self.log(Level::WARN, message)
    }

    fn error(&self, message: &str) {
        self.log(Level::ERROR, message)
    }
}

/// A named logger backed by `tracing`.
///
/// The name is attached to every event as the `logger` field. Events keep the
/// static target `plinth_core::log`, so `RUST_LOG` directives cannot select
/// one logger by name; filter on the target and read the `logger` field in
/// the output instead.
///
/// ```
/// use plinth_core::{Log, Logger};
///
/// let logger = Logger::new("plinth.resolve");
/// assert_eq!(logger.name(), "plinth.resolve");
/// logger.info("events carry logger=plinth.resolve");
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Log for Logger {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::ERROR => tracing::enabled!(Level::ERROR),
            Level::WARN => tracing::enabled!(Level::WARN),
            Level::INFO => tracing::enabled!(Level::INFO),
            Level::DEBUG => tracing::enabled!(Level::DEBUG),
            _ => tracing::enabled!(Level::TRACE),
        }
    }

    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(logger = %self.name, "{}", message),
            Level::WARN => tracing::warn!(logger = %self.name, "{}", message),
            Level::INFO => tracing::info!(logger = %self.name, "{}", message),
            Level::DEBUG => tracing::debug!(logger = %self.name, "{}", message),
            _ => tracing::trace!(logger = %self.name, "{}", message),
        }
    }
}

/// Logger wrapper that renders every message through a template.
///
/// The template takes the message in place of `{}` or `{0}`; `{{` and `}}`
/// produce literal braces. Without a template (or with an empty one),
/// messages pass through unchanged.
///
/// # Example
///
/// ```
/// use plinth_core::{FormattedLogger, Log};
///
/// let logger = FormattedLogger::new("plinth.index", Some("[tezos] {}".to_string()));
/// assert_eq!(logger.format("synced"), "[tezos] synced");
/// logger.info("synced");
/// ```
#[derive(Debug, Clone)]
pub struct FormattedLogger<L = Logger> {
    inner: L,
    fmt: Option<String>,
}

impl FormattedLogger<Logger> {
    /// Create a formatting wrapper around a fresh named logger.
    pub fn new(name: impl Into<String>, fmt: Option<String>) -> Self {
        Self::wrap(Logger::new(name), fmt)
    }
}

impl<L: Log> FormattedLogger<L> {
    /// Wrap an existing logger.
    pub fn wrap(inner: L, fmt: Option<String>) -> Self {
        Self {
            inner,
            fmt: fmt.filter(|f| !f.is_empty()),
        }
    }

    /// Get the wrapped logger.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Get the configured template.
    pub fn template(&self) -> Option<&str> {
        self.fmt.as_deref()
    }

    /// Render a message through the template.
    pub fn format<'a>(&self, message: &'a str) -> Cow<'a, str> {
        match &self.fmt {
            Some(fmt) => Cow::Owned(render(fmt, message)),
            None => Cow::Borrowed(message),
        }
    }
}

impl<L: Log> Log for FormattedLogger<L> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn log(&self, level: Level, message: &str) {
        self.inner.log(level, &self.format(message))
    }
}

/// Substitute `message` into a single-placeholder template.
///
/// Placeholders other than `{}` and `{0}` are kept verbatim.
fn render(template: &str, message: &str) -> String {
    let mut result = String::with_capacity(template.len() + message.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        result.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (replacement, consumed) = if tail.starts_with("{{") {
            ("{", 2)
        } else if tail.starts_with("}}") {
            ("}", 2)
        } else if tail.starts_with("{}") {
            (message, 2)
        } else if tail.starts_with("{0}") {
            (message, 3)
        } else {
            (&tail[..1], 1)
        };
        result.push_str(replacement);
        rest = &tail[consumed..];
    }
    result.push_str(rest);
    result
}
