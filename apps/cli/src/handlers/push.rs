use crate::services::context::AppContext;
use anyhow::Result;
use chrono::Local;
use fh_kernel::process::SystemRunner;
use fh_sync::GitSync;

/// Stages everything, commits with the current local time, pulls and pushes.
///
/// # Errors
/// Returns an error if `git add`, `git pull` or `git push` fails, or git is missing.
pub fn push_changes(ctx: &AppContext) -> Result<()> {
    let repo = ctx.layout.root();
    let shown = std::path::absolute(repo).unwrap_or_else(|_| repo.to_path_buf());
    println!("📦 Syncing {}...", shown.display());

    let report = GitSync::new(repo, SystemRunner).sync(Local::now().naive_local())?;

    if report.committed() {
        println!("✅ Committed \"{}\" and pushed", report.message);
    } else {
        println!("⚠️  Commit skipped (git exited with {}); pulled and pushed", report.commit_status);
    }
    Ok(())
}
