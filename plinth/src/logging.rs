//! Tracing subscriber setup for the CLI.

use eyre::Result;
use plinth_core::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Events go to
/// stderr so command output on stdout stays machine-readable.
pub fn init(settings: &LoggingSettings) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();

    Ok(())
}
