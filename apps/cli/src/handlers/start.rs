use crate::services::context::AppContext;
use anyhow::Result;
use fh_kernel::process::SystemRunner;
use fh_runner::Launcher;

/// Starts the registered runner service.
///
/// # Errors
/// Returns an error if the runner is not registered yet or `docker compose` fails.
pub fn start_runner(ctx: &AppContext) -> Result<()> {
    let launcher = Launcher::new(&ctx.layout, SystemRunner);

    let started = launcher.ensure_registered().and_then(|()| {
        println!("🚀 Starting the Forgejo runner service...");
        launcher.start()
    });

    match started {
        Ok(()) => {
            println!("✅ Runner service started");
            println!();
            println!("Follow the logs: docker compose logs -f forgejo-runner");
            Ok(())
        },
        Err(err) if err.is_configuration() => {
            println!("❌ Error: the runner is not registered yet");
            println!();
            println!("Run the registration first:");
            println!("  forgehand register");
            Err(err.into())
        },
        Err(err) => {
            println!("❌ Failed to start the runner service");
            Err(err.into())
        },
    }
}
