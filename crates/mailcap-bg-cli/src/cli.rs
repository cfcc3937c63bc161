//! Argument parsing, role dispatch, and exit status mapping.

use std::env;
use std::error::Error;
use std::ffi::OsString;
use std::iter;

use clap::Parser;
use mailcap_bg_telemetry::{TelemetryError, init_logging};
use tracing::{error, info};

use crate::config::{PROGRAM_NAME, Settings};
use crate::error::{CliError, CliResult};
use crate::invocation::{Invocation, Role};
use crate::{launcher, worker};

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Open a file with a mailcap viewer in the background, on a private copy"
)]
pub(crate) struct Cli {
    /// Set when the launcher re-invokes itself as the worker.
    #[arg(long, hide = true)]
    pub(crate) child: bool,
    /// Command, its options, and the file to open (last).
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) args: Vec<OsString>,
}

/// Parses the process arguments, runs the selected role, and reports any
/// failure. Returns the process exit code.
#[must_use]
pub fn run() -> i32 {
    run_with_args(env::args_os())
}

pub(crate) fn run_with_args(args: impl IntoIterator<Item = OsString>) -> i32 {
    let args: Vec<OsString> = args.into_iter().collect();
    let program = args.first().map_or_else(
        || PROGRAM_NAME.to_string(),
        |arg0| arg0.to_string_lossy().into_owned(),
    );
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };
    let role = Role::from_child_flag(cli.child);
    let settings = Settings::from_env();

    match execute(role, cli.args, &program, &settings) {
        Ok(()) => 0,
        Err(err) => {
            let message = err.display_message();
            if matches!(err, CliError::Usage(_)) {
                println!("{message}");
            } else {
                // Stderr gets the message once; the tracing copy is for the log file.
                if settings.logs_to_file() {
                    error!(role = role.as_str(), "{message}");
                }
                eprintln!("error: {message}");
            }
            err.exit_code()
        }
    }
}

fn execute(
    role: Role,
    tokens: Vec<OsString>,
    program: &str,
    settings: &Settings,
) -> CliResult<()> {
    let invocation = Invocation::from_tokens(tokens).ok_or_else(|| CliError::usage(program))?;

    if let Err(err) = init_logging(&settings.logging()) {
        eprintln!("{}", logging_warning(&err));
    }

    match role {
        Role::Launcher => {
            let launched = launcher::launch(&invocation, settings)?;
            info!(
                role = role.as_str(),
                pid = launched.pid,
                source = %launched.source.display(),
                scratch = %launched.scratch.display(),
                "handed off to worker"
            );
            Ok(())
        }
        Role::Worker => worker::run(&invocation),
    }
}

/// Renders a logging setup failure with its target and full cause chain.
fn logging_warning(err: &TelemetryError) -> String {
    let target = match err {
        TelemetryError::LogFile { path, .. } => format!(" '{}'", path.display()),
        TelemetryError::SubscriberInstall { .. } => String::new(),
    };
    let causes: String = iter::successors(err.source(), |&cause| cause.source())
        .map(|cause| format!(": {cause}"))
        .collect();
    format!("warning: {err}{target}{causes}; continuing without logs")
}
