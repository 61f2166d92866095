//! Template/override merge and secret hardening.
//!
//! The root `.env` is authoritative: a value the operator put there is
//! never overwritten unless it is a known placeholder. Freshly generated
//! secrets are persisted back to the root `.env` so repeated runs see
//! them as operator-provided and leave them alone.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::constants::{self, is_insecure_default};
use crate::core::env::{self, EnvFile};
use crate::core::secrets::{self, SecretBundle};
use crate::error::Result;

/// Merge the Supabase env template with root overrides and write the
/// effective environment, hardening insecure secrets along the way.
///
/// Steps:
/// 1. Parse the template (missing template: warn and skip).
/// 2. Parse the root override file if present.
/// 3. Run a hardening pass when any gate key is absent or insecure,
///    persisting every replaced key back to the root override file.
/// 4. Write template ∪ overrides to `target`, override winning on
///    collision, template order first.
///
/// # Errors
///
/// Returns error on file read/write failures or claim serialization.
pub fn prepare_supabase_env(template: &Path, root_env: &Path, target: &Path) -> Result<()> {
    if !template.exists() {
        warn!(path = %template.display(), "supabase env template not found, skipping");
        return Ok(());
    }

    info!(target = %target.display(), "preparing supabase environment");

    let defaults = EnvFile::load(template)?;
    let mut overrides = if root_env.exists() {
        EnvFile::load(root_env)?
    } else {
        EnvFile::default()
    };

    if needs_hardening(&overrides) {
        info!("insecure or missing supabase secrets detected, generating replacements");
        let bundle = SecretBundle::generate()?;
        harden_overrides(&mut overrides, &bundle, root_env)?;
    } else {
        debug!("all gate keys present and secure, skipping hardening");
    }

    // Template order first, override-only keys appended in their own order.
    let mut merged = defaults.clone();
    for (key, value) in overrides.entries() {
        merged.set(key, value);
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    merged.save(
        target,
        &[
            "Generated by deckhand - merged and hardened configuration",
            "Defaults from supabase/docker/.env.example, overrides from root .env",
        ],
    )?;

    info!(entries = merged.len(), "supabase environment written");
    Ok(())
}

/// Whether any gate key is absent from the overrides or still a
/// known placeholder.
fn needs_hardening(overrides: &EnvFile) -> bool {
    constants::HARDENING_GATE_KEYS.iter().any(|key| {
        overrides
            .get(key)
            .map_or(true, |val| val.is_empty() || is_insecure_default(val))
    })
}

/// Apply generated secrets to the overrides, replacing only absent or
/// insecure values, and persist each replacement to the root env file.
fn harden_overrides(overrides: &mut EnvFile, bundle: &SecretBundle, root_env: &Path) -> Result<()> {
    for (key, value) in bundle.entries() {
        let current = overrides.get(key);
        let replace = match current {
            None => true,
            Some(existing) => existing.is_empty() || is_insecure_default(existing),
        };

        if replace {
            debug!(key, "hardening secret");
            overrides.set(key, value);
            env::set_key(root_env, key, value)?;
        }
    }
    Ok(())
}

/// Guarantee the gateway token exists in the root .env.
///
/// Creates the file when absent and appends a fresh token when the key
/// is missing. An existing value is never replaced.
///
/// # Errors
///
/// Returns error if the file cannot be read or written.
pub fn ensure_gateway_token(root_env: &Path) -> Result<()> {
    let existing = if root_env.exists() {
        EnvFile::load(root_env)?
    } else {
        info!(path = %root_env.display(), "creating root env file");
        EnvFile::default()
    };

    if existing.contains(constants::GATEWAY_TOKEN_KEY) {
        debug!("gateway token already present");
        return Ok(());
    }

    info!(key = constants::GATEWAY_TOKEN_KEY, "generating gateway token");
    env::set_key(root_env, constants::GATEWAY_TOKEN_KEY, &secrets::token_hex(32))?;
    Ok(())
}

/// Seed the SearXNG settings file and replace its placeholder secret key.
///
/// Copies `base` to `settings` when the latter is absent (missing base:
/// warn and skip), then rewrites the literal placeholder with a fresh
/// hex token. Once replaced, later runs find no placeholder and leave
/// the file untouched.
///
/// # Errors
///
/// Returns error if the files cannot be read or written.
pub fn seed_settings_key(base: &Path, settings: &Path) -> Result<()> {
    if !settings.exists() {
        if !base.exists() {
            warn!(path = %base.display(), "searxng base settings not found, skipping");
            return Ok(());
        }
        info!(from = %base.display(), to = %settings.display(), "seeding searxng settings");
        if let Some(parent) = settings.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(base, settings)?;
    }

    let content = std::fs::read_to_string(settings)?;
    if content.contains(constants::SEARXNG_PLACEHOLDER) {
        info!("generating searxng secret key");
        let replaced = content.replace(constants::SEARXNG_PLACEHOLDER, &secrets::token_hex(32));
        std::fs::write(settings, replaced)?;
    }

    Ok(())
}
