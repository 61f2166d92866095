//! docker compose invocation sequence.
//!
//! Both stacks share one compose project so `down` catches everything.
//! Startup is staged: Supabase first, a fixed settle interval, then the
//! AI stack with profile- and environment-specific overlays appended.

use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::core::constants;
use crate::core::exec::run_command;
use crate::error::Result;

/// Docker compose profile selecting the AI stack's compute flavor.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    Cpu,
    GpuNvidia,
    GpuAmd,
    None,
}

impl Profile {
    /// Flag value passed to `docker compose --profile`, if any.
    pub fn as_flag(&self) -> Option<&'static str> {
        match self {
            Self::Cpu => Some("cpu"),
            Self::GpuNvidia => Some("gpu-nvidia"),
            Self::GpuAmd => Some("gpu-amd"),
            Self::None => None,
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_flag().unwrap_or("none"))
    }
}

/// Deployment environment selecting which compose overlays apply.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Private,
    Public,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Private => f.write_str("private"),
            Self::Public => f.write_str("public"),
        }
    }
}

/// Stop and remove the project's existing containers.
///
/// # Errors
///
/// Returns `CommandFailed` if the docker invocation exits non-zero.
pub fn stop_project(profile: Profile) -> Result<()> {
    info!("stopping existing project containers");

    let mut args = compose_base(constants::COMPOSE_FILE);
    if let Some(flag) = profile.as_flag() {
        args.extend(["--profile", flag]);
    }
    args.push("down");

    run_command("docker", &args)
}

/// Bring up both stacks in order: Supabase, settle interval, AI stack.
///
/// # Errors
///
/// Returns `CommandFailed` on the first non-zero docker exit; later
/// stages are not attempted.
pub fn start_stack(profile: Profile, environment: Environment) -> Result<()> {
    start_supabase(environment)?;

    info!(
        "waiting for supabase to initialize ({}s)",
        constants::SETTLE_INTERVAL.as_secs()
    );
    std::thread::sleep(constants::SETTLE_INTERVAL);

    start_ai_stack(profile, environment)
}

fn start_supabase(environment: Environment) -> Result<()> {
    info!("starting supabase services");

    let mut args = compose_base(constants::SUPABASE_COMPOSE_FILE);

    if Path::new(constants::SUPABASE_LIMITS_FILE).exists() {
        info!(
            "applying resource limits from {}",
            constants::SUPABASE_LIMITS_FILE
        );
        args.extend(["-f", constants::SUPABASE_LIMITS_FILE]);
    }

    if environment == Environment::Public {
        args.extend(["-f", constants::OVERRIDE_PUBLIC_SUPABASE]);
    }

    args.extend(["up", "-d"]);
    run_command("docker", &args)
}

fn start_ai_stack(profile: Profile, environment: Environment) -> Result<()> {
    info!("starting local AI services");

    let mut args = compose_base(constants::COMPOSE_FILE);

    if let Some(flag) = profile.as_flag() {
        args.extend(["--profile", flag]);
    }

    if Path::new(constants::AI_LIMITS_FILE).exists() {
        info!("applying resource limits from {}", constants::AI_LIMITS_FILE);
        args.extend(["-f", constants::AI_LIMITS_FILE]);
    }

    match environment {
        Environment::Private => args.extend(["-f", constants::OVERRIDE_PRIVATE]),
        Environment::Public => args.extend(["-f", constants::OVERRIDE_PUBLIC]),
    }

    args.extend(["up", "-d"]);
    run_command("docker", &args)
}

/// Common prefix: `compose -p localai -f <file>`.
fn compose_base(compose_file: &'static str) -> Vec<&'static str> {
    vec!["compose", "-p", constants::PROJECT_NAME, "-f", compose_file]
}
