use fh_kernel::config::{ConfigError, EnvSources, load_env_config};
use serde::Deserialize;
use std::fmt;

/// Prefix shared by every runner variable (`FORGEJO_INSTANCE_URL`, ...).
pub const ENV_PREFIX: &str = "FORGEJO";

pub const DEFAULT_INSTANCE_URL: &str = "http://forgejo:3000";
pub const DEFAULT_RUNNER_NAME: &str = "forgejo-runner";
pub const DEFAULT_RUNNER_LABELS: &str =
    "ubuntu-latest:docker://node:20-bookworm,ubuntu-22.04:docker://node:20-bookworm";

/// Runner registration token. Never printed: `Debug` and `Display` are redacted.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RegistrationToken(String);

impl RegistrationToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for handing to the registration command.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for RegistrationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RegistrationToken(<redacted>)")
    }
}

impl fmt::Display for RegistrationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Runner configuration, read once per invocation and never written back.
///
/// | Field | Variable | Default |
/// |-------|----------|---------|
/// | token | `FORGEJO_RUNNER_REGISTRATION_TOKEN` | none |
/// | `instance_url` | `FORGEJO_INSTANCE_URL` | [`DEFAULT_INSTANCE_URL`] |
/// | `name` | `FORGEJO_RUNNER_NAME` | [`DEFAULT_RUNNER_NAME`] |
/// | `labels` | `FORGEJO_RUNNER_LABELS` | [`DEFAULT_RUNNER_LABELS`] |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    #[serde(rename = "runner_registration_token")]
    registration_token: Option<RegistrationToken>,
    pub instance_url: String,
    #[serde(rename = "runner_name")]
    pub name: String,
    /// Comma-separated `label:scheme://image` entries, passed through verbatim.
    #[serde(rename = "runner_labels")]
    pub labels: String,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            registration_token: None,
            instance_url: DEFAULT_INSTANCE_URL.to_owned(),
            name: DEFAULT_RUNNER_NAME.to_owned(),
            labels: DEFAULT_RUNNER_LABELS.to_owned(),
        }
    }
}

impl RunnerSettings {
    /// Reads `FORGEJO_*` variables from `sources`, falling back to the defaults above.
    ///
    /// A missing token is not an error here; only registration requires it.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the sources cannot be merged or deserialized.
    pub fn load(sources: &EnvSources) -> Result<Self, ConfigError> {
        let settings: Self = load_env_config(ENV_PREFIX, sources)?;
        tracing::debug!(
            instance_url = %settings.instance_url,
            name = %settings.name,
            has_token = settings.registration_token().is_some(),
            "Runner settings loaded"
        );
        Ok(settings)
    }

    #[must_use]
    pub fn with_registration_token(mut self, token: impl Into<String>) -> Self {
        self.registration_token = Some(RegistrationToken::new(token));
        self
    }

    /// The token, or `None` when it is unset or only whitespace.
    #[must_use]
    pub fn registration_token(&self) -> Option<&RegistrationToken> {
        self.registration_token.as_ref().filter(|token| !token.is_blank())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use fh_kernel::config::EnvMap;

    fn vars(pairs: &[(&str, &str)]) -> EnvMap {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = RunnerSettings::load(&EnvSources::default()).unwrap();

        assert!(settings.registration_token().is_none());
        assert_eq!(settings.instance_url, DEFAULT_INSTANCE_URL);
        assert_eq!(settings.name, DEFAULT_RUNNER_NAME);
        assert_eq!(settings.labels, DEFAULT_RUNNER_LABELS);
    }

    #[test]
    fn dotenv_overrides_process_environment() {
        let dotenv = vars(&[
            ("FORGEJO_RUNNER_REGISTRATION_TOKEN", "from-dotenv"),
            ("FORGEJO_RUNNER_NAME", "dotenv-runner"),
        ]);
        let process = vars(&[
            ("FORGEJO_RUNNER_NAME", "env-runner"),
            ("FORGEJO_INSTANCE_URL", "http://env:3000"),
            ("PATH", "/usr/bin"),
        ]);

        let settings = RunnerSettings::load(&EnvSources::new(dotenv, process)).unwrap();

        assert_eq!(settings.registration_token().map(RegistrationToken::expose), Some("from-dotenv"));
        assert_eq!(settings.name, "dotenv-runner");
        assert_eq!(settings.instance_url, "http://env:3000");
    }

    #[test]
    fn lower_case_variable_names_are_not_read() {
        let process = vars(&[("forgejo_runner_name", "lower")]);

        let settings = RunnerSettings::load(&EnvSources::new(EnvMap::default(), process)).unwrap();

        assert_eq!(settings.name, DEFAULT_RUNNER_NAME);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let process = vars(&[
            ("FORGEJO_RUNNER_REGISTRATION_TOKEN", ""),
            ("FORGEJO_INSTANCE_URL", ""),
        ]);

        let settings = RunnerSettings::load(&EnvSources::new(EnvMap::default(), process)).unwrap();

        assert!(settings.registration_token().is_none());
        assert_eq!(settings.instance_url, DEFAULT_INSTANCE_URL);
    }

    #[test]
    fn blank_token_is_treated_as_missing() {
        let settings = RunnerSettings::default().with_registration_token("   ");
        assert!(settings.registration_token().is_none());
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let settings = RunnerSettings::default().with_registration_token("very-secret");
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("very-secret"), "token leaked: {rendered}");
    }
}
