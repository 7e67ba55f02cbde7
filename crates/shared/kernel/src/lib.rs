//! Kernel utilities shared across slices.
//!
//! * [`config`] layers defaults, a dotenv file and the process environment into a typed struct.
//! * [`process`] runs external CLIs behind the [`process::CommandRunner`] seam so slices can be
//!   tested without docker or git on the machine.
//!
//! ```rust
//! use fh_kernel::process::CommandSpec;
//!
//! let spec = CommandSpec::new("docker").args(["compose", "up", "-d", "forgejo-runner"]);
//! assert_eq!(spec.to_string(), "docker compose up -d forgejo-runner");
//! ```
pub mod config;
pub mod process;
