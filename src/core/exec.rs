//! Child process runner.
//!
//! Every external invocation goes through here so the operator sees the
//! exact command line before it runs, and every non-zero exit surfaces
//! as a fatal [`DeckhandError::CommandFailed`].

use std::process::Command;

use tracing::{error, info};

use crate::error::{DeckhandError, Result};

/// Run a command to completion, inheriting stdio.
///
/// # Errors
///
/// Returns `CommandFailed` on a non-zero exit, or io error if the
/// program could not be spawned.
pub fn run_command(program: &str, args: &[&str]) -> Result<()> {
    let command_line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    info!("running: {}", command_line);

    let status = Command::new(program).args(args).status()?;

    if !status.success() {
        let code = status.code().unwrap_or(1);
        error!(code, "command failed: {}", command_line);
        return Err(DeckhandError::CommandFailed {
            command: command_line,
            code,
        });
    }

    Ok(())
}
