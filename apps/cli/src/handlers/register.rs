use crate::services::context::AppContext;
use anyhow::Result;
use fh_kernel::process::SystemRunner;
use fh_runner::{Registrar, Registration, RunnerSettings};

const RULE: &str = "==========================================";

/// Registers the runner, printing operator guidance along the way.
///
/// # Result
/// Returns `Ok(())` when the runner was registered or already is.
///
/// # Errors
/// Returns an error if the token is missing, the data directory cannot be
/// prepared, or the registration container fails.
pub fn register_runner(ctx: &AppContext) -> Result<()> {
    if ctx.settings.registration_token().is_some() {
        print_banner(&ctx.settings);
    }

    match Registrar::new(&ctx.settings, &ctx.layout, SystemRunner).register() {
        Ok(Registration::Registered) => {
            println!("✅ Runner registered successfully!");
            println!();
            println!("Next steps:");
            println!("1. Start the runner service: forgehand start");
            println!("   (or: docker compose up -d forgejo-runner)");
            println!("2. Follow the runner logs:   docker compose logs -f forgejo-runner");
            Ok(())
        },
        Ok(Registration::AlreadyRegistered { marker }) => {
            println!("⚠️  Warning: runner is already registered ({} exists)", marker.display());
            println!("To register again, delete it first: {}", marker.display());
            Ok(())
        },
        Err(err) if err.is_configuration() => {
            print_token_guidance();
            Err(err.into())
        },
        Err(err) => {
            println!("❌ Runner registration failed");
            Err(err.into())
        },
    }
}

fn print_banner(settings: &RunnerSettings) {
    println!("{RULE}");
    println!("Registering Forgejo runner");
    println!("{RULE}");
    println!("Instance URL:  {}", settings.instance_url);
    println!("Runner name:   {}", settings.name);
    println!("Runner labels: {}", settings.labels);
    println!("{RULE}");
}

fn print_token_guidance() {
    println!("❌ Error: FORGEJO_RUNNER_REGISTRATION_TOKEN is not set");
    println!();
    println!("To obtain a global runner registration token:");
    println!("1. Open the Forgejo web UI: http://localhost:3000");
    println!("2. Sign in with an administrator account");
    println!("3. Go to: Site administration > Actions > Runners");
    println!("4. Click 'Create new Runner' and choose the 'Global' scope");
    println!("5. Copy the registration token");
    println!("6. Put it in your .env file: FORGEJO_RUNNER_REGISTRATION_TOKEN=<token>");
    println!();
    println!("Or generate one from the command line:");
    println!("  docker exec forgejo forgejo forgejo-cli actions generate-runner-token");
}
