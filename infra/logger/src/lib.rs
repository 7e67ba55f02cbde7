//! # Logger
//!
//! One place to install the global `tracing` subscriber for forgehand binaries.
//!
//! Diagnostics go to **stderr** so that the operator-facing messages a binary
//! prints on stdout stay readable and scriptable. A daily rolling log file can
//! be added with [`LoggerBuilder::log_dir`], optionally as JSON lines.
//! `RUST_LOG` directives are honoured on top of the configured level.
//!
//! ## Example
//!
//! ```rust
//! # use fh_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("forgehand")
//!     .level(LevelFilter::WARN)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use std::fs;
use std::io::IsTerminal;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const MAX_LOG_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    log_dir: Option<PathBuf>,
    level: LevelFilter,
    json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { log_dir: None, level: LevelFilter::WARN, json: false }
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct WithFiles;

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for WithFiles {}

/// Builder for the global subscriber. A name is mandatory before [`LoggerBuilder::init`]
/// becomes available; file-only knobs unlock after [`LoggerBuilder::log_dir`].
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, F: Sealed = ConsoleOnly> {
    config: LoggerConfig,
    name: N,
    files: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<Unnamed, F> {
    /// Names the logger. The name prefixes rolling log files (`forgehand.2026-10-16.log`).
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { config: self.config, name: Named(name.into()), files: PhantomData }
    }
}

impl LoggerBuilder<Named, WithFiles> {
    /// Writes the log file as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }
}

impl<F: Sealed> LoggerBuilder<Named, F> {
    /// Minimum level emitted when no filter directive says otherwise.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds a rolling file layer writing into `dir`.
    pub fn log_dir(self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFiles> {
        let mut config = self.config;
        config.log_dir = Some(dir.into());
        LoggerBuilder { config, name: self.name, files: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until exit: it owns the worker that
    /// flushes the non-blocking file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let LoggerBuilder { config, name: Named(name), .. } = self;
        validate(&name)?;

        let filter = EnvFilter::builder().with_default_directive(config.level.into()).from_env_lossy();

        let ansi = std::io::stderr().is_terminal();
        let mut layers = vec![layer().compact().with_writer(std::io::stderr).with_ansi(ansi).boxed()];

        let guard = match &config.log_dir {
            Some(dir) => {
                fs::create_dir_all(dir)
                    .context(format!("Failed to create log directory {}", dir.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(MAX_LOG_FILES)
                    .build(dir)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(if config.json { file.json().boxed() } else { file.boxed() });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, "Logging initialized");

        Ok(Logger { _guard: guard })
    }
}

/// Handle to the installed subscriber.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    _guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring the global subscriber.
    ///
    /// ```rust
    /// use fh_logger::{LevelFilter, Logger};
    ///
    /// let builder = Logger::builder().name("forgehand").level(LevelFilter::DEBUG);
    /// # drop(builder);
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: Unnamed, files: PhantomData }
    }
}

fn validate(name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn builder_defaults_to_warn_on_console() {
        let builder = Logger::builder().name("forgehand");
        assert_eq!(builder.config.level, LevelFilter::WARN);
        assert!(builder.config.log_dir.is_none());
        assert!(!builder.config.json);
    }

    #[test]
    fn file_options_are_recorded() {
        let builder = Logger::builder()
            .name("forgehand")
            .level(LevelFilter::DEBUG)
            .log_dir("logs")
            .json(true);

        assert_eq!(builder.config.level, LevelFilter::DEBUG);
        assert!(builder.config.json);
        assert_eq!(builder.config.log_dir.as_deref(), Some(std::path::Path::new("logs")));
    }

    #[test]
    #[serial]
    fn blank_name_is_rejected() {
        let err = Logger::builder().name("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
