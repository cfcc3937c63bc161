//! Scratch-file staging and removal.
//!
//! # Design
//! - A scratch file is a private copy of the caller's file named
//!   `<basename>_<YYYY-MM-DDThh:mm:ss>` inside the runtime directory.
//! - The copy is flushed to disk before staging reports success.
//! - Names have second granularity; two stagings of the same file within one
//!   second share a name and the later copy replaces the earlier one.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::{FsOpsError, FsOpsResult};

/// `chrono` format used for the timestamp suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Build the scratch name for `source` at time `at`.
///
/// # Errors
///
/// Returns [`FsOpsError::InvalidInput`] when `source` has no final file name
/// component (for example `/` or a path ending in `..`).
pub fn scratch_name(source: &Path, at: NaiveDateTime) -> FsOpsResult<OsString> {
    let base = source.file_name().ok_or_else(|| FsOpsError::InvalidInput {
        field: "file",
        reason: "path has no file name",
        value: Some(source.display().to_string()),
    })?;
    let mut name = base.to_os_string();
    name.push("_");
    name.push(at.format(TIMESTAMP_FORMAT).to_string());
    Ok(name)
}

/// Copy every byte of `source` into `destination`, creating or truncating it,
/// and sync the written data before returning the number of bytes copied.
///
/// # Errors
///
/// Returns [`FsOpsError::Io`] tagged with the failing step: `open_source`,
/// `create_scratch`, `copy_contents` or `sync_scratch`.
pub fn copy_contents(source: &Path, destination: &Path) -> FsOpsResult<u64> {
    let mut input =
        File::open(source).map_err(|err| FsOpsError::io("open_source", source, err))?;
    let mut output = File::create(destination)
        .map_err(|err| FsOpsError::io("create_scratch", destination, err))?;
    let copied = io::copy(&mut input, &mut output)
        .map_err(|err| FsOpsError::io("copy_contents", destination, err))?;
    output
        .sync_all()
        .map_err(|err| FsOpsError::io("sync_scratch", destination, err))?;
    Ok(copied)
}

/// Delete a scratch file.
///
/// # Errors
///
/// Returns [`FsOpsError::Io`] with operation `remove_scratch` when the file is
/// missing or cannot be unlinked.
pub fn remove_scratch(path: &Path) -> FsOpsResult<()> {
    fs::remove_file(path).map_err(|err| FsOpsError::io("remove_scratch", path, err))?;
    debug!(scratch = %path.display(), "scratch file removed");
    Ok(())
}

/// A staged private copy of a caller-owned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchFile {
    source: PathBuf,
    path: PathBuf,
}

impl ScratchFile {
    /// Copy `source` into `dir` under its timestamped scratch name.
    ///
    /// `dir` must already exist. On failure no [`ScratchFile`] is returned; a
    /// partially written copy may remain on disk.
    ///
    /// # Errors
    ///
    /// Propagates [`scratch_name`] and [`copy_contents`] failures.
    pub fn stage(source: &Path, dir: &Path, at: NaiveDateTime) -> FsOpsResult<Self> {
        let path = dir.join(scratch_name(source, at)?);
        let bytes = copy_contents(source, &path)?;
        info!(
            source = %source.display(),
            scratch = %path.display(),
            bytes,
            "staged scratch file"
        );
        Ok(Self {
            source: source.to_path_buf(),
            path,
        })
    }

    /// Caller-owned file the copy was taken from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Location of the private copy.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Give up the handle, keeping only the copy's path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
