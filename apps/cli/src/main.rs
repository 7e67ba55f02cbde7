#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::{push, register, start};
use crate::models::args::{AppCommands, Cli};
use crate::services::context::AppContext;
use crate::services::logging;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = logging::init(&cli)?;
    let ctx = AppContext::load(&cli)?;
    tracing::debug!(command = ?cli.command, root = %ctx.layout.root().display(), "Dispatching");

    match cli.command {
        AppCommands::Register {} => register::register_runner(&ctx)?,
        AppCommands::Start {} => start::start_runner(&ctx)?,
        AppCommands::Push {} => push::push_changes(&ctx)?,
    }

    Ok(())
}
