use crate::models::args::Cli;
use anyhow::{Context, Result};
use fh_kernel::config::EnvSources;
use fh_runner::{RunnerLayout, RunnerSettings};

/// Everything a handler needs, resolved once at startup.
#[derive(Debug)]
pub struct AppContext {
    pub layout: RunnerLayout,
    pub settings: RunnerSettings,
}

impl AppContext {
    /// Resolves the deployment layout and reads runner settings from the env file
    /// and the process environment.
    ///
    /// # Errors
    /// Returns an error if the env file cannot be read or the settings are malformed.
    pub fn load(cli: &Cli) -> Result<Self> {
        let layout = RunnerLayout::new(&cli.dir);
        let env_file = cli.env_file.clone().unwrap_or_else(|| layout.env_file());

        let sources = EnvSources::capture(&env_file)
            .with_context(|| format!("Failed to load {}", env_file.display()))?;
        let settings =
            RunnerSettings::load(&sources).context("Critical: runner configuration is malformed")?;

        Ok(Self { layout, settings })
    }
}
