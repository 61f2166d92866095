//! Constants used throughout deckhand.
//!
//! Centralizes file locations, compose invocation inputs, and the set of
//! placeholder secrets that must never survive provisioning.

use std::time::Duration;

/// Root environment override file, user-editable and authoritative.
pub const ROOT_ENV_FILE: &str = ".env";

/// Supabase checkout directory.
pub const SUPABASE_DIR: &str = "supabase";

/// Read-only template shipped with the Supabase checkout.
pub const SUPABASE_ENV_TEMPLATE: &str = "supabase/docker/.env.example";

/// Effective environment consumed by the Supabase compose stack.
pub const SUPABASE_ENV_TARGET: &str = "supabase/docker/.env";

/// Supabase compose file inside the checkout.
pub const SUPABASE_COMPOSE_FILE: &str = "supabase/docker/docker-compose.yml";

/// AI stack compose file at the project root.
pub const COMPOSE_FILE: &str = "docker-compose.yml";

/// Optional resource-limit overlays, applied when present on disk.
pub const SUPABASE_LIMITS_FILE: &str = "docker-compose.supabase-limits.yml";
pub const AI_LIMITS_FILE: &str = "docker-compose.ai-limits.yml";

/// Environment-specific compose overlays.
pub const OVERRIDE_PRIVATE: &str = "docker-compose.override.private.yml";
pub const OVERRIDE_PUBLIC: &str = "docker-compose.override.public.yml";
pub const OVERRIDE_PUBLIC_SUPABASE: &str = "docker-compose.override.public.supabase.yml";

/// SearXNG settings file and the base it is seeded from.
pub const SEARXNG_SETTINGS: &str = "searxng/settings.yml";
pub const SEARXNG_SETTINGS_BASE: &str = "searxng/settings-base.yml";

/// Placeholder secret shipped in the SearXNG base settings.
pub const SEARXNG_PLACEHOLDER: &str = "ultrasecretkey";

/// Marker written by SearXNG once its own initialization completed.
/// Absent means first run.
pub const SEARXNG_MARKER: &str = "searxng/uwsgi.ini";

/// Gateway token key guaranteed to exist in the root .env.
pub const GATEWAY_TOKEN_KEY: &str = "OPENCLAW_GATEWAY_TOKEN";

/// Compose project name shared by both stacks.
pub const PROJECT_NAME: &str = "localai";

/// Settle interval between the Supabase and AI stack launches.
pub const SETTLE_INTERVAL: Duration = Duration::from_secs(10);

/// Known placeholder secrets shipped in example configuration.
///
/// A root override equal to any of these is treated the same as a missing
/// value and replaced during hardening.
pub const INSECURE_DEFAULTS: &[&str] = &[
    "your-super-secret-and-long-postgres-password",
    "your-super-secret-jwt-token-with-at-least-32-characters-long",
    "this_password_is_insecure_and_should_be_updated",
    "your-32-character-encryption-key",
    "your-encryption-key-32-chars-min",
    "your-super-secret-and-long-logflare-key-public",
    "your-super-secret-and-long-logflare-key-private",
];

/// Keys whose state decides whether a hardening pass runs at all.
///
/// Only these three gate the decision; the generated bundle covers more
/// keys, each still replaced only when absent or insecure.
pub const HARDENING_GATE_KEYS: &[&str] = &["POSTGRES_PASSWORD", "JWT_SECRET", "DASHBOARD_PASSWORD"];

/// Membership test against [`INSECURE_DEFAULTS`].
pub fn is_insecure_default(value: &str) -> bool {
    INSECURE_DEFAULTS.contains(&value)
}
