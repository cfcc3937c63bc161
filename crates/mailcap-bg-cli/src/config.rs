//! Environment-derived settings shared by both roles.
//!
//! The worker inherits the launcher's environment, so both processes resolve
//! the same scratch directory and logging setup.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use mailcap_bg_fsops::RuntimeDir;
use mailcap_bg_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, QUIET_LOG_LEVEL};

/// Name of the per-program scratch directory and fallback argv[0].
pub(crate) const PROGRAM_NAME: &str = "run-mailcap-bg";
pub(crate) const ENV_RUNTIME_DIR: &str = "XDG_RUNTIME_DIR";
pub(crate) const ENV_LOG_FORMAT: &str = "RUN_MAILCAP_BG_LOG_FORMAT";
pub(crate) const ENV_LOG_FILE: &str = "RUN_MAILCAP_BG_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    runtime_dir: RuntimeDir,
    log_format: LogFormat,
    log_file: Option<PathBuf>,
}

impl Settings {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| env::var_os(key))
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let runtime_base = lookup(ENV_RUNTIME_DIR).map(PathBuf::from);
        let log_format = lookup(ENV_LOG_FORMAT);
        let log_file = lookup(ENV_LOG_FILE)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            runtime_dir: RuntimeDir::resolve(PROGRAM_NAME, runtime_base.as_deref()),
            log_format: LogFormat::from_setting(log_format.as_deref().and_then(OsStr::to_str)),
            log_file,
        }
    }

    pub(crate) const fn runtime_dir(&self) -> &RuntimeDir {
        &self.runtime_dir
    }

    pub(crate) const fn logs_to_file(&self) -> bool {
        self.log_file.is_some()
    }

    /// Stderr only carries warnings unless `RUST_LOG` says otherwise. A log
    /// file gets the full `info` trail.
    pub(crate) fn logging(&self) -> LoggingConfig<'_> {
        LoggingConfig {
            level: if self.logs_to_file() {
                DEFAULT_LOG_LEVEL
            } else {
                QUIET_LOG_LEVEL
            },
            format: self.log_format,
            file: self.log_file.as_deref(),
        }
    }
}
