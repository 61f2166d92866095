//! Provision command.
//!
//! Runs the file-level provisioning steps (checkout, secrets, env merge,
//! compose toggle) without invoking docker. Useful for inspecting what
//! `up` would write before launching anything.

use crate::cli::output;
use crate::core::constants;
use crate::error::Result;

/// Provision secrets and config files without touching docker.
pub fn execute() -> Result<()> {
    super::up::provision_files()?;

    output::success("environment provisioned");
    output::dimmed(&format!(
        "secrets persisted to {}, merged env written to {}",
        constants::ROOT_ENV_FILE,
        constants::SUPABASE_ENV_TARGET
    ));
    output::hint(&format!("run {} to start the stack", output::cmd("deckhand up")));

    Ok(())
}
