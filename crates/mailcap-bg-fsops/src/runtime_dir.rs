//! Per-program scratch directory resolution.
//!
//! # Design
//! - The directory lives under `$XDG_RUNTIME_DIR` when it is set and non-empty,
//!   otherwise under the system temporary directory.
//! - The directory is created on demand and never cleaned up here; stale
//!   scratch copies are left for the runtime directory's own reaper.

use std::env;
use std::fs::DirBuilder;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;

use crate::error::{FsOpsError, FsOpsResult};

/// Mode requested for every missing directory component (subject to umask).
pub const RUNTIME_DIR_MODE: u32 = 0o777;

/// Location of the scratch directory for a single program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeDir {
    path: PathBuf,
}

impl RuntimeDir {
    /// Resolve `<base>/<program>` where `base` is `xdg_runtime_dir` when it is
    /// present and non-empty, falling back to [`env::temp_dir`].
    #[must_use]
    pub fn resolve(program: &str, xdg_runtime_dir: Option<&Path>) -> Self {
        let base = xdg_runtime_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(env::temp_dir, Path::to_path_buf);
        Self {
            path: base.join(program),
        }
    }

    /// Path of the scratch directory. It may not exist yet.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::Io`] when a component cannot be created, including
    /// when a non-directory already occupies the path.
    pub fn ensure(&self) -> FsOpsResult<&Path> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(RUNTIME_DIR_MODE);
        builder
            .create(&self.path)
            .map_err(|err| FsOpsError::io("create_runtime_dir", &self.path, err))?;
        Ok(&self.path)
    }
}
