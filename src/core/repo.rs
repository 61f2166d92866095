//! Supabase sparse checkout bootstrap.
//!
//! Only the `docker/` subtree of the Supabase repository is needed, so
//! the clone is blobless with cone sparse-checkout.

use std::path::Path;

use tracing::info;

use crate::core::exec::run_command;
use crate::error::Result;

const SUPABASE_REPO_URL: &str = "https://github.com/supabase/supabase.git";

/// Ensure a usable Supabase checkout exists at `dir`.
///
/// - Missing directory: sparse clone limited to `docker/`.
/// - Directory with `.git`: pull the latest.
/// - Directory without `.git`: vendored checkout, leave it alone.
///
/// # Errors
///
/// Returns `CommandFailed` if any git invocation exits non-zero.
pub fn ensure_supabase_checkout(dir: &Path) -> Result<()> {
    let dir_str = dir.to_string_lossy().into_owned();

    if !dir.exists() {
        info!("cloning the supabase repository");
        run_command(
            "git",
            &[
                "clone",
                "--filter=blob:none",
                "--no-checkout",
                SUPABASE_REPO_URL,
                dir_str.as_str(),
            ],
        )?;
        run_command(
            "git",
            &["-C", dir_str.as_str(), "sparse-checkout", "init", "--cone"],
        )?;
        run_command(
            "git",
            &["-C", dir_str.as_str(), "sparse-checkout", "set", "docker"],
        )?;
        run_command("git", &["-C", dir_str.as_str(), "checkout", "master"])?;
        return Ok(());
    }

    if dir.join(".git").exists() {
        info!("supabase repository already exists, updating");
        run_command("git", &["-C", dir_str.as_str(), "pull"])?;
    } else {
        info!("supabase directory exists without .git, skipping update");
    }

    Ok(())
}
