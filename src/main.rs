//! Deckhand - provision secrets and launch a self-hosted AI stack.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use deckhand::cli::output;
use deckhand::cli::{execute, Cli};
use deckhand::error::DeckhandError;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("DECKHAND_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("deckhand=debug")
        } else {
            EnvFilter::new("deckhand=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            DeckhandError::CommandFailed { command, .. } if command.starts_with("docker") => {
                Some("is the docker daemon running?")
            }
            DeckhandError::CommandFailed { command, .. } if command.starts_with("git") => {
                Some("check network access and that git is installed")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
