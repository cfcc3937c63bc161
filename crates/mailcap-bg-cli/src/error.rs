//! CLI-level error type and exit status mapping.

use std::fmt::{self, Display, Formatter};

/// Exit status for every failed run, usage errors included.
pub(crate) const EXIT_FAILURE: i32 = 1;

/// CLI-level error type to distinguish usage from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    /// Malformed invocation; carries the usage line printed to stdout.
    Usage(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn usage(program: &str) -> Self {
        Self::Usage(format!(
            "usage: {program} command [command_option] [...] file"
        ))
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Failure(_) => EXIT_FAILURE,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Usage(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn usage_names_the_program() {
        let err = CliError::usage("/usr/bin/run-mailcap-bg");
        assert_eq!(
            err.display_message(),
            "usage: /usr/bin/run-mailcap-bg command [command_option] [...] file"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn failure_message_includes_context_chain() {
        let err = CliError::failure(
            Err::<(), _>(anyhow!("permission denied"))
                .context("unable to remove file '/tmp/x'")
                .expect_err("error was constructed"),
        );
        assert_eq!(
            err.display_message(),
            "unable to remove file '/tmp/x': permission denied"
        );
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "cli error");
    }
}
