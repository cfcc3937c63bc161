//! Argument vectors exchanged between the launcher and the worker.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Role marker prepended to the worker's argument vector.
pub(crate) const CHILD_FLAG: &str = "--child";

/// Which half of the self-invocation protocol this process plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    Launcher,
    Worker,
}

impl Role {
    pub(crate) const fn from_child_flag(child: bool) -> Self {
        if child { Self::Worker } else { Self::Launcher }
    }

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Launcher => "launcher",
            Self::Worker => "worker",
        }
    }
}

/// A command with its options plus the file it should open, which is always
/// the final token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    program: OsString,
    options: Vec<OsString>,
    file: PathBuf,
}

impl Invocation {
    /// Split positional tokens into command and file. `None` unless there is
    /// at least a command and a file.
    pub(crate) fn from_tokens(tokens: Vec<OsString>) -> Option<Self> {
        let mut tokens = tokens.into_iter();
        let program = tokens.next()?;
        let mut options: Vec<OsString> = tokens.collect();
        let file = options.pop()?;
        Some(Self {
            program,
            options,
            file: PathBuf::from(file),
        })
    }

    pub(crate) fn program(&self) -> &OsStr {
        &self.program
    }

    pub(crate) fn file(&self) -> &Path {
        &self.file
    }

    /// Options followed by the file: the argv handed to [`Self::program`].
    pub(crate) fn arguments(&self) -> impl Iterator<Item = &OsStr> {
        self.options
            .iter()
            .map(OsString::as_os_str)
            .chain(std::iter::once(self.file.as_os_str()))
    }

    /// Same command pointed at a different file.
    pub(crate) fn with_file(&self, file: &Path) -> Self {
        Self {
            program: self.program.clone(),
            options: self.options.clone(),
            file: file.to_path_buf(),
        }
    }

    /// Arguments for re-invoking this binary as the worker.
    pub(crate) fn worker_args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.options.len() + 3);
        args.push(OsString::from(CHILD_FLAG));
        args.push(self.program.clone());
        args.extend(self.arguments().map(OsStr::to_os_string));
        args
    }
}
