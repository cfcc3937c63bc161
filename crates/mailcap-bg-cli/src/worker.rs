//! Worker role: run the command against the scratch copy, then delete it.
//!
//! # Design
//! - The worker first leaves the launcher's session so a terminal hangup or
//!   the caller's exit does not take it down.
//! - `Running -> CommandFailed` is terminal: a failed command is reported and
//!   the scratch copy stays on disk. Only a successful command moves on to
//!   `Deleting`, which ends in `Deleted` or `DeleteFailed`.

use std::process::Command;

use anyhow::{Context, anyhow};
use mailcap_bg_fsops::remove_scratch;
use tracing::info;

use crate::error::{CliError, CliResult};
use crate::invocation::Invocation;

/// Detach, run the command to completion, then remove the scratch file.
pub(crate) fn run(invocation: &Invocation) -> CliResult<()> {
    detach_session();
    run_and_clean_up(invocation)
}

pub(crate) fn run_and_clean_up(invocation: &Invocation) -> CliResult<()> {
    let program = invocation.program();
    let scratch = invocation.file();
    info!(
        command = %program.to_string_lossy(),
        scratch = %scratch.display(),
        "running command"
    );

    let status = Command::new(program)
        .args(invocation.arguments())
        .status()
        .with_context(|| format!("command '{}' could not be started", program.to_string_lossy()))
        .map_err(CliError::failure)?;
    if !status.success() {
        return Err(CliError::failure(anyhow!(
            "command '{}' finished with error: {status}",
            program.to_string_lossy()
        )));
    }
    info!(%status, "command finished");

    remove_scratch(scratch)
        .with_context(|| format!("unable to remove file '{}'", scratch.display()))
        .map_err(CliError::failure)?;
    info!(scratch = %scratch.display(), "scratch file removed");
    Ok(())
}

#[cfg(unix)]
fn detach_session() {
    if let Err(err) = nix::unistd::setsid() {
        tracing::warn!(error = %err, "could not start a new session");
    }
}

#[cfg(not(unix))]
const fn detach_session() {}
