use config::{Config, Environment, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Variables in environment form (`KEY` -> `value`).
pub type EnvMap = Map<String, String>;

/// Errors raised while assembling configuration.
#[fh_derive::fh_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Env file error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

/// The two environment layers a configuration is assembled from.
///
/// Values from `dotenv` override values from `process`, the same as assigning
/// every dotenv line into the environment before reading it. Empty values in
/// either layer are treated as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvSources {
    dotenv: EnvMap,
    process: EnvMap,
}

impl EnvSources {
    #[must_use]
    pub const fn new(dotenv: EnvMap, process: EnvMap) -> Self {
        Self { dotenv, process }
    }

    /// Captures the current process environment plus the dotenv file at `env_file`.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the dotenv file exists but cannot be read.
    pub fn capture(env_file: &Path) -> Result<Self, ConfigError> {
        let dotenv = read_env_file(env_file)?;
        let process = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Ok(Self { dotenv, process })
    }

    #[must_use]
    pub const fn dotenv(&self) -> &EnvMap {
        &self.dotenv
    }

    #[must_use]
    pub const fn process(&self) -> &EnvMap {
        &self.process
    }
}

/// Reads a dotenv file. A missing file yields an empty map.
///
/// # Errors
/// Returns [`ConfigError::Io`] for any read failure other than "not found".
pub fn read_env_file(path: &Path) -> Result<EnvMap, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let vars = parse_env_file(&contents);
            debug!(path = %path.display(), count = vars.len(), "Loaded env file");
            Ok(vars)
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No env file, skipping");
            Ok(EnvMap::default())
        },
        Err(e) => Err::<EnvMap, _>(e).context(format!("Failed to read {}", path.display())),
    }
}

/// Parses `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped, an `export ` prefix is accepted,
/// and one pair of matching surrounding quotes is stripped from the value.
/// Lines without `=` or with an empty key are ignored. Later keys win.
#[must_use]
pub fn parse_env_file(contents: &str) -> EnvMap {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_owned(), unquote(value.trim()).to_owned()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Builds `T` from variables sharing `prefix` (e.g. `FORGEJO_INSTANCE_URL` -> `instance_url`).
///
/// Layering, lowest precedence first:
/// 1. `T`'s `#[serde(default)]` values,
/// 2. the process environment,
/// 3. the dotenv map.
///
/// Only upper-case names are read (`FORGEJO_RUNNER_NAME`, never
/// `forgejo_runner_name`). They are then lower-cased and stripped of `<prefix>_`;
/// no nesting separator is applied.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the sources cannot be merged or do not fit `T`.
///
/// # Example
/// ```rust
/// use fh_kernel::config::{EnvMap, EnvSources, load_env_config};
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct Settings {
///     instance_url: String,
/// }
///
/// let process = EnvMap::from_iter([("FORGEJO_INSTANCE_URL".to_owned(), "http://git:3000".to_owned())]);
/// let sources = EnvSources::new(EnvMap::default(), process);
/// let settings: Settings = load_env_config("FORGEJO", &sources).unwrap();
/// assert_eq!(settings.instance_url, "http://git:3000");
/// ```
pub fn load_env_config<T>(prefix: &str, sources: &EnvSources) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let layer = |vars: &EnvMap| {
        Environment::with_prefix(prefix).ignore_empty(true).source(Some(exact_case(prefix, vars)))
    };

    debug!(
        prefix,
        dotenv = sources.dotenv.len(),
        process = sources.process.len(),
        "Assembling configuration"
    );

    let config = Config::builder()
        .add_source(layer(&sources.process))
        .add_source(layer(&sources.dotenv))
        .build()
        .context("Failed to merge environment sources")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Keeps `<PREFIX>_*` names written entirely in upper case.
///
/// The `config` crate matches prefixes case-insensitively, so mixed-case
/// spellings have to be dropped before they reach it.
fn exact_case(prefix: &str, vars: &EnvMap) -> EnvMap {
    let wanted = format!("{}_", prefix.to_uppercase());
    vars.iter()
        .filter(|(key, _)| key.starts_with(&wanted) && !key.chars().any(|c| c.is_lowercase()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
