use std::path::{Path, PathBuf};

/// File name the runner writes into its data directory once registered.
pub const MARKER_FILE_NAME: &str = ".runner";

/// The sentinel whose existence means "registration has completed".
///
/// Only existence is consulted. Nothing in this crate creates, edits or
/// removes the file; the runner container writes it during registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationMarker {
    path: PathBuf,
}

impl RegistrationMarker {
    /// The marker inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self { path: data_dir.join(MARKER_FILE_NAME) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_follows_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let marker = RegistrationMarker::in_dir(dir.path());

        assert_eq!(marker.path(), dir.path().join(".runner"));
        assert!(!marker.is_present());

        std::fs::write(marker.path(), b"{}").unwrap();
        assert!(marker.is_present());
    }
}
