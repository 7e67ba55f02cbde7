use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

const MASK: &str = "********";

/// Errors raised while launching an external program.
#[fh_derive::fh_error]
pub enum ProcessError {
    /// The program could not be started at all (missing binary, bad working directory).
    #[error("Failed to spawn process{}: {source}", format_context(.context))]
    Spawn { source: std::io::Error, context: Option<Cow<'static, str>> },
}

/// A program invocation: executable, arguments and optional working directory.
///
/// Arguments added with [`CommandSpec::secret_arg`] are passed through verbatim
/// but masked whenever the spec is displayed or logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    secrets: Vec<usize>,
    current_dir: Option<PathBuf>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), secrets: Vec::new(), current_dir: None }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends an argument that must never show up in output.
    #[must_use]
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secrets.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The raw arguments, secrets included.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    #[must_use]
    pub fn is_secret(&self, index: usize) -> bool {
        self.secrets.contains(&index)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (i, arg) in self.args.iter().enumerate() {
            let shown = if self.is_secret(i) { MASK } else { arg.as_str() };
            write!(f, " {shown}")?;
        }
        Ok(())
    }
}

/// Exit status of a finished program. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    #[must_use]
    pub const fn signaled() -> Self {
        Self { code: None }
    }

    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }

    #[must_use]
    pub const fn code(self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for CommandStatus {
    fn from(status: ExitStatus) -> Self {
        Self { code: status.code() }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Narrow seam over process execution: run a spec, report how it exited.
pub trait CommandRunner {
    /// Runs `spec` to completion.
    ///
    /// # Errors
    /// Returns [`ProcessError`] only when the program could not be started; a
    /// non-zero exit is reported through the returned [`CommandStatus`].
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, ProcessError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, ProcessError> {
        (**self).run(spec)
    }
}

/// Runs programs on the host, blocking, with the caller's stdio inherited.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, ProcessError> {
        debug!(command = %spec, dir = ?spec.working_dir(), "Spawning process");

        let mut command = Command::new(spec.program());
        command
            .args(spec.arguments())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = spec.working_dir() {
            command.current_dir(dir);
        }

        let status = command.status().context(format!(
            "Failed to execute `{}`. Is it installed and in your PATH?",
            spec.program()
        ))?;

        debug!(command = %spec, %status, "Process finished");
        Ok(status.into())
    }
}

/// Test doubles for [`CommandRunner`].
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use super::{CommandRunner, CommandSpec, CommandStatus, ProcessError};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, Copy)]
    enum Reply {
        Exit(CommandStatus),
        SpawnFailure,
    }

    /// Records every spec it is asked to run and answers from a script.
    ///
    /// Replies are consumed in order; once the script is exhausted every run succeeds.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        calls: RefCell<Vec<CommandSpec>>,
        replies: RefCell<VecDeque<Reply>>,
    }

    impl RecordingRunner {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues an exit code for the next unanswered run.
        #[must_use]
        pub fn then_exit(self, code: i32) -> Self {
            self.replies.borrow_mut().push_back(Reply::Exit(CommandStatus::from_code(code)));
            self
        }

        /// Queues a spawn failure (as if the program were not installed).
        #[must_use]
        pub fn then_spawn_failure(self) -> Self {
            self.replies.borrow_mut().push_back(Reply::SpawnFailure);
            self
        }

        #[must_use]
        pub fn calls(&self) -> Vec<CommandSpec> {
            self.calls.borrow().clone()
        }

        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, spec: &CommandSpec) -> Result<CommandStatus, ProcessError> {
            self.calls.borrow_mut().push(spec.clone());
            match self.replies.borrow_mut().pop_front() {
                Some(Reply::Exit(status)) => Ok(status),
                Some(Reply::SpawnFailure) => Err(ProcessError::Spawn {
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
                    context: Some(format!("Failed to execute `{}`", spec.program()).into()),
                }),
                None => Ok(CommandStatus::SUCCESS),
            }
        }
    }
}
