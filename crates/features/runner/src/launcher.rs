use crate::RUNNER_SERVICE;
use crate::error::RunnerError;
use crate::layout::RunnerLayout;
use fh_kernel::process::{CommandRunner, CommandSpec};
use tracing::info;

/// Starts a registered runner as a detached compose service.
#[derive(Debug)]
pub struct Launcher<'a, R> {
    layout: &'a RunnerLayout,
    runner: R,
}

impl<'a, R: CommandRunner> Launcher<'a, R> {
    pub const fn new(layout: &'a RunnerLayout, runner: R) -> Self {
        Self { layout, runner }
    }

    /// Fails with [`RunnerError::NotRegistered`] unless the marker exists.
    ///
    /// # Errors
    /// [`RunnerError::NotRegistered`] when the marker is absent.
    pub fn ensure_registered(&self) -> Result<(), RunnerError> {
        let marker = self.layout.marker();
        if marker.is_present() {
            return Ok(());
        }
        Err(RunnerError::NotRegistered { marker: marker.path().to_path_buf(), context: None })
    }

    /// Checks the marker, then runs [`start_command`].
    ///
    /// # Errors
    /// * [`RunnerError::NotRegistered`] when the marker is absent; nothing is spawned.
    /// * [`RunnerError::Process`] if docker cannot be started.
    /// * [`RunnerError::CommandFailed`] if `docker compose` exits non-zero.
    pub fn start(&self) -> Result<(), RunnerError> {
        self.ensure_registered()?;

        let spec = start_command(self.layout);
        info!(service = RUNNER_SERVICE, dir = %self.layout.root().display(), "Starting runner service");

        let status = self.runner.run(&spec)?;
        if !status.success() {
            return Err(RunnerError::CommandFailed {
                command: spec.to_string(),
                status,
                context: Some("runner startup".into()),
            });
        }

        Ok(())
    }
}

/// `docker compose up -d forgejo-runner`, run from the deployment root.
#[must_use]
pub fn start_command(layout: &RunnerLayout) -> CommandSpec {
    CommandSpec::new("docker")
        .args(["compose", "up", "-d", RUNNER_SERVICE])
        .current_dir(layout.root())
}
