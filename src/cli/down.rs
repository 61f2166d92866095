//! Down command.

use crate::cli::output;
use crate::core::launch::{self, Profile};
use crate::error::Result;

/// Stop and remove the project containers.
pub fn execute(profile: Profile) -> Result<()> {
    launch::stop_project(profile)?;
    output::success("project containers stopped");
    Ok(())
}
