use crate::error::{RunnerError, RunnerErrorExt};
use crate::marker::RegistrationMarker;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of a runner deployment, rooted at the compose project directory.
///
/// ```text
/// <root>/
/// ├── .env
/// ├── docker-compose.yml
/// └── data/runner/.runner
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerLayout {
    root: PathBuf,
}

impl RunnerLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Default dotenv file for this deployment.
    #[must_use]
    pub fn env_file(&self) -> PathBuf {
        self.root.join(".env")
    }

    /// Directory mounted as `/data` into the runner container.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data").join("runner")
    }

    #[must_use]
    pub fn marker(&self) -> RegistrationMarker {
        RegistrationMarker::in_dir(&self.data_dir())
    }

    /// Creates the data directory if needed and returns its absolute path
    /// (docker requires absolute paths for bind mounts).
    ///
    /// # Errors
    /// Returns [`RunnerError::Io`] if the directory cannot be created or resolved.
    pub fn ensure_data_dir(&self) -> Result<PathBuf, RunnerError> {
        let dir = self.data_dir();
        fs::create_dir_all(&dir).context(format!("Failed to create {}", dir.display()))?;
        std::path::absolute(&dir).context(format!("Failed to resolve {}", dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_derive_from_root() {
        let layout = RunnerLayout::new("/srv/forgejo");
        assert_eq!(layout.env_file(), PathBuf::from("/srv/forgejo/.env"));
        assert_eq!(layout.data_dir(), PathBuf::from("/srv/forgejo/data/runner"));
        assert_eq!(layout.marker().path(), Path::new("/srv/forgejo/data/runner/.runner"));
    }

    #[test]
    fn ensure_data_dir_creates_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = RunnerLayout::new(tmp.path());

        let first = layout.ensure_data_dir().unwrap();
        let second = layout.ensure_data_dir().unwrap();

        assert!(first.is_dir());
        assert!(first.is_absolute());
        assert_eq!(first, second);
    }

    #[test]
    fn ensure_data_dir_reports_blocked_path() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("data"), b"not a directory").unwrap();

        let err = RunnerLayout::new(tmp.path()).ensure_data_dir().unwrap_err();
        assert!(matches!(err, RunnerError::Io { context: Some(_), .. }));
    }
}
