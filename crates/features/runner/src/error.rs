use fh_kernel::process::{CommandStatus, ProcessError};
use std::borrow::Cow;
use std::path::PathBuf;

/// Error types for runner registration and startup.
#[fh_derive::fh_error]
pub enum RunnerError {
    /// `FORGEJO_RUNNER_REGISTRATION_TOKEN` is absent or blank.
    #[error("Runner registration token is not set{}", format_context(.context))]
    MissingToken { context: Option<Cow<'static, str>> },

    /// Startup was requested before a registration marker exists.
    #[error(
        "Runner is not registered{}: {} does not exist",
        format_context(.context),
        .marker.display()
    )]
    NotRegistered { marker: PathBuf, context: Option<Cow<'static, str>> },

    /// The external CLI ran but exited unsuccessfully.
    #[error("External command failed{}: `{command}` ended with {status}", format_context(.context))]
    CommandFailed { command: String, status: CommandStatus, context: Option<Cow<'static, str>> },

    /// The external CLI could not be started.
    #[error("Process error{}: {source}", format_context(.context))]
    Process { source: ProcessError, context: Option<Cow<'static, str>> },

    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

impl RunnerError {
    /// `true` for operator-fixable precondition failures, `false` for failures of the external tooling.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingToken { .. } | Self::NotRegistered { .. })
    }
}
