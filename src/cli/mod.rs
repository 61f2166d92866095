//! Command-line interface.

pub mod completions;
pub mod down;
pub mod output;
pub mod provision;
pub mod up;

use clap::{Parser, Subcommand};

use crate::core::launch::{Environment, Profile};

/// Deckhand - provision secrets and launch a self-hosted AI stack.
#[derive(Parser)]
#[command(
    name = "deckhand",
    about = "Provision secrets and launch a self-hosted AI stack",
    version,
    after_help = "Swab the decks. Ship safe. ⚓"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Provision the environment and start all services
    Up {
        /// Docker compose profile for the AI stack
        #[arg(long, value_enum, default_value_t = Profile::Cpu)]
        profile: Profile,

        /// Deployment environment
        #[arg(long, value_enum, default_value_t = Environment::Private)]
        environment: Environment,
    },

    /// Provision secrets and config files without touching docker
    Provision,

    /// Stop and remove the project containers
    Down {
        /// Docker compose profile for the AI stack
        #[arg(long, value_enum, default_value_t = Profile::Cpu)]
        profile: Profile,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Up {
            profile,
            environment,
        } => up::execute(profile, environment),
        Provision => provision::execute(),
        Down { profile } => down::execute(profile),
        Completions { shell } => completions::execute(shell),
    }
}
