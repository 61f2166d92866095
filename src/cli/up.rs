//! Up command.
//!
//! Full bootstrap: ensure the Supabase checkout, provision secrets and
//! config files, then tear down and relaunch the docker compose project.

use std::path::Path;

use crate::cli::output;
use crate::core::launch::{Environment, Profile};
use crate::core::{compose, constants, harden, launch, repo};
use crate::error::Result;

/// Provision the environment and start all services.
pub fn execute(profile: Profile, environment: Environment) -> Result<()> {
    provision_files()?;

    launch::stop_project(profile)?;
    launch::start_stack(profile, environment)?;

    output::success("all services started");
    output::kv("profile:", profile);
    output::kv("environment:", environment);

    Ok(())
}

/// Run every file-level provisioning step in order.
///
/// Shared with the `provision` command, which stops here instead of
/// invoking docker.
pub(crate) fn provision_files() -> Result<()> {
    repo::ensure_supabase_checkout(Path::new(constants::SUPABASE_DIR))?;

    harden::ensure_gateway_token(Path::new(constants::ROOT_ENV_FILE))?;

    harden::seed_settings_key(
        Path::new(constants::SEARXNG_SETTINGS_BASE),
        Path::new(constants::SEARXNG_SETTINGS),
    )?;

    harden::prepare_supabase_env(
        Path::new(constants::SUPABASE_ENV_TEMPLATE),
        Path::new(constants::ROOT_ENV_FILE),
        Path::new(constants::SUPABASE_ENV_TARGET),
    )?;

    compose::sync_searxng_caps(
        Path::new(constants::COMPOSE_FILE),
        Path::new(constants::SEARXNG_MARKER),
    )?;

    Ok(())
}
