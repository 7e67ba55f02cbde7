use crate::error::RunnerError;
use crate::layout::RunnerLayout;
use crate::settings::{RegistrationToken, RunnerSettings};
use crate::{RUNNER_IMAGE, RUNNER_NETWORK, RUNNER_SERVICE};
use fh_kernel::process::{CommandRunner, CommandSpec};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Mount point of the runner data directory inside the container.
const CONTAINER_DATA_DIR: &str = "/data";

/// How a registration attempt ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The registration container ran and exited successfully.
    Registered,
    /// The marker already existed; nothing was run.
    AlreadyRegistered { marker: PathBuf },
}

/// Registers the runner with the Forgejo instance, once.
#[derive(Debug)]
pub struct Registrar<'a, R> {
    settings: &'a RunnerSettings,
    layout: &'a RunnerLayout,
    runner: R,
}

impl<'a, R: CommandRunner> Registrar<'a, R> {
    pub const fn new(settings: &'a RunnerSettings, layout: &'a RunnerLayout, runner: R) -> Self {
        Self { settings, layout, runner }
    }

    /// Runs the registration procedure.
    ///
    /// 1. Fails with [`RunnerError::MissingToken`] when no token is configured.
    /// 2. Creates the data directory.
    /// 3. Returns [`Registration::AlreadyRegistered`] when the marker exists.
    /// 4. Runs [`registration_command`].
    ///
    /// # Errors
    /// * [`RunnerError::MissingToken`] before anything touches the disk or spawns.
    /// * [`RunnerError::Io`] if the data directory cannot be prepared.
    /// * [`RunnerError::Process`] if docker cannot be started.
    /// * [`RunnerError::CommandFailed`] if the registration container exits non-zero.
    pub fn register(&self) -> Result<Registration, RunnerError> {
        let token =
            self.settings.registration_token().ok_or(RunnerError::MissingToken { context: None })?;

        let data_dir = self.layout.ensure_data_dir()?;

        let marker = self.layout.marker();
        if marker.is_present() {
            warn!(marker = %marker.path().display(), "Runner already registered, skipping");
            return Ok(Registration::AlreadyRegistered { marker: marker.path().to_path_buf() });
        }

        let spec = registration_command(self.settings, token, &data_dir);
        info!(
            instance_url = %self.settings.instance_url,
            name = %self.settings.name,
            labels = %self.settings.labels,
            "Registering runner"
        );

        let status = self.runner.run(&spec)?;
        if !status.success() {
            return Err(RunnerError::CommandFailed {
                command: spec.to_string(),
                status,
                context: Some("runner registration".into()),
            });
        }

        info!(name = %self.settings.name, "Runner registered");
        Ok(Registration::Registered)
    }
}

/// `docker run` invocation that registers the runner inside a throwaway container.
///
/// `data_dir` must be absolute; it is bind-mounted at `/data`, which is where
/// the runner writes its marker. The token is masked in the spec's display form.
#[must_use]
pub fn registration_command(
    settings: &RunnerSettings,
    token: &RegistrationToken,
    data_dir: &Path,
) -> CommandSpec {
    CommandSpec::new("docker")
        .args(["run", "--rm", "--network", RUNNER_NETWORK, "-v"])
        .arg(format!("{}:{CONTAINER_DATA_DIR}", data_dir.display()))
        .args(["--entrypoint", RUNNER_SERVICE, RUNNER_IMAGE, "register"])
        .args(["--instance", settings.instance_url.as_str()])
        .arg("--token")
        .secret_arg(token.expose())
        .args(["--name", settings.name.as_str(), "--labels", settings.labels.as_str()])
        .arg("--no-interactive")
}
