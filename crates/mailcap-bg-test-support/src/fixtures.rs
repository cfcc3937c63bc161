//! Test fixtures and environment helpers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Interval between checks in [`wait_for`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Create a fresh temporary directory with a recognisable prefix.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn temp_dir() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix("run-mailcap-bg-")
        .tempdir()
        .context("failed to create test temp dir")
}

/// Poll `condition` until it returns `true` or `timeout` elapses.
///
/// Returns whether the condition held. It is checked at least once.
#[must_use]
pub fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Sorted paths of the entries directly under `dir`; empty when `dir` is absent.
///
/// # Errors
///
/// Returns an error if `dir` exists but cannot be read.
pub fn dir_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err).with_context(|| format!("failed to read {}", dir.display())),
    };
    let mut paths = entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("failed to list {}", dir.display()))?;
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_for_returns_once_condition_holds() {
        let mut calls = 0;
        assert!(wait_for(Duration::from_secs(1), || {
            calls += 1;
            calls == 3
        }));
        assert_eq!(calls, 3);
    }

    #[test]
    fn wait_for_gives_up_after_timeout() {
        assert!(!wait_for(Duration::from_millis(50), || false));
    }

    #[test]
    fn dir_entries_lists_sorted_and_tolerates_missing_dir() -> Result<()> {
        let temp = temp_dir()?;
        fs::write(temp.path().join("b"), b"")?;
        fs::write(temp.path().join("a"), b"")?;

        assert_eq!(
            dir_entries(temp.path())?,
            vec![temp.path().join("a"), temp.path().join("b")]
        );
        assert!(dir_entries(&temp.path().join("absent"))?.is_empty());
        Ok(())
    }
}
