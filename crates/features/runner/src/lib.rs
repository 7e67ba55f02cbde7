//! # Runner
//!
//! Registers a Forgejo Actions runner and starts it as a compose service.
//!
//! Both procedures hinge on one file: the registration marker
//! (`<root>/data/runner/.runner`). The runner container writes it during a
//! successful `register`; this crate only ever checks whether it exists.
//!
//! * [`Registrar`] refuses to run without a token, skips when the marker exists,
//!   otherwise runs `forgejo-runner register` inside a throwaway container.
//! * [`Launcher`] refuses to run without the marker, otherwise runs
//!   `docker compose up -d forgejo-runner`.
//!
//! External programs run through [`fh_kernel::process::CommandRunner`], so the
//! procedures can be exercised with a fake runner.

mod error;
pub mod launcher;
pub mod layout;
pub mod marker;
pub mod registrar;
pub mod settings;

pub use crate::error::{RunnerError, RunnerErrorExt};
pub use crate::launcher::Launcher;
pub use crate::layout::RunnerLayout;
pub use crate::marker::RegistrationMarker;
pub use crate::registrar::{Registrar, Registration};
pub use crate::settings::{RegistrationToken, RunnerSettings};

/// Compose service (and container entrypoint) name of the runner.
pub const RUNNER_SERVICE: &str = "forgejo-runner";
/// Docker network shared with the Forgejo instance.
pub const RUNNER_NETWORK: &str = "forgejo_net";
/// Runner image used for the one-off registration container.
pub const RUNNER_IMAGE: &str = "code.forgejo.org/forgejo/runner:12";
