//! Launcher role: stage a private copy of the file and hand it to a detached
//! worker.
//!
//! # Design
//! - No worker is spawned unless the scratch copy was written and synced.
//! - Responsibility for deleting the copy moves to the worker through its
//!   argument vector; the launcher never touches the copy again.
//! - The launcher does not wait for the worker and returns as soon as it has
//!   been started.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use mailcap_bg_fsops::{RuntimeDir, ScratchFile};
use tracing::info;

use crate::config::Settings;
use crate::error::{CliError, CliResult};
use crate::invocation::Invocation;

/// What the launcher left behind for the worker.
#[derive(Debug)]
pub(crate) struct Launched {
    pub(crate) source: PathBuf,
    pub(crate) scratch: PathBuf,
    pub(crate) pid: u32,
}

/// Stage the file, then start this executable again as the worker.
pub(crate) fn launch(invocation: &Invocation, settings: &Settings) -> CliResult<Launched> {
    let exe = env::current_exe()
        .context("error resolving path of executable")
        .map_err(CliError::failure)?;
    launch_with(
        invocation,
        settings.runtime_dir(),
        &exe,
        Local::now().naive_local(),
    )
}

pub(crate) fn launch_with(
    invocation: &Invocation,
    runtime_dir: &RuntimeDir,
    exe: &Path,
    at: NaiveDateTime,
) -> CliResult<Launched> {
    let scratch = stage(invocation, runtime_dir, at)?;
    let worker = invocation.with_file(scratch.path());
    let pid = spawn_worker(exe, &worker.worker_args())?;
    Ok(Launched {
        source: scratch.source().to_path_buf(),
        scratch: scratch.into_path(),
        pid,
    })
}

/// Ensure the scratch directory exists and copy the invocation's file into it.
pub(crate) fn stage(
    invocation: &Invocation,
    runtime_dir: &RuntimeDir,
    at: NaiveDateTime,
) -> CliResult<ScratchFile> {
    let dir = runtime_dir
        .ensure()
        .with_context(|| {
            format!(
                "could not create directory '{}'",
                runtime_dir.path().display()
            )
        })
        .map_err(CliError::failure)?;
    ScratchFile::stage(invocation.file(), dir, at)
        .with_context(|| {
            format!(
                "error copying '{}' into '{}'",
                invocation.file().display(),
                dir.display()
            )
        })
        .map_err(CliError::failure)
}

/// Start `exe` with `args` and null stdio, without keeping a handle to wait on.
// The worker is reparented to init once the launcher exits.
#[allow(clippy::zombie_processes)]
pub(crate) fn spawn_worker(exe: &Path, args: &[OsString]) -> CliResult<u32> {
    let child = Command::new(exe)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("could not start worker '{}'", exe.display()))
        .map_err(CliError::failure)?;
    let pid = child.id();
    info!(pid, exe = %exe.display(), "worker spawned");
    Ok(pid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use mailcap_bg_test_support::fixtures::temp_dir;
    use nix::sys::wait::{WaitStatus, waitpid};
    use nix::unistd::Pid;
    use std::fs;

    fn new_year() -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .context("invalid fixture date")
    }

    fn invocation(command: &str, file: &Path) -> Invocation {
        Invocation::from_tokens(vec![command.into(), file.as_os_str().to_os_string()])
            .expect("valid invocation")
    }

    #[test]
    fn stage_copies_file_into_runtime_dir() -> Result<()> {
        let temp = temp_dir()?;
        let source = temp.path().join("report.txt");
        fs::write(&source, b"attachment body")?;
        let runtime_dir = RuntimeDir::resolve("run-mailcap-bg", Some(&temp.path().join("xdg")));

        let scratch = stage(
            &invocation("echo", &source),
            &runtime_dir,
            new_year()?,
        )
        .map_err(|err| anyhow::anyhow!(err.display_message()))?;

        assert_eq!(
            scratch.path(),
            temp.path()
                .join("xdg/run-mailcap-bg/report.txt_2024-01-01T00:00:00")
                .as_path()
        );
        assert_eq!(fs::read(scratch.path())?, b"attachment body");
        Ok(())
    }

    #[test]
    fn stage_fails_when_runtime_dir_cannot_be_created() -> Result<()> {
        let temp = temp_dir()?;
        let source = temp.path().join("report.txt");
        fs::write(&source, b"body")?;
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"not a directory")?;
        let runtime_dir = RuntimeDir::resolve("run-mailcap-bg", Some(&blocker));

        let err = stage(
            &invocation("echo", &source),
            &runtime_dir,
            new_year()?,
        )
        .expect_err("runtime dir sits below a regular file");

        assert!(
            err.display_message()
                .starts_with(&format!("could not create directory '{}'", runtime_dir.path().display()))
        );
        Ok(())
    }

    #[test]
    fn launch_does_not_spawn_when_copy_fails() -> Result<()> {
        let temp = temp_dir()?;
        let runtime_dir = RuntimeDir::resolve("run-mailcap-bg", Some(temp.path()));
        let missing = temp.path().join("missing.txt");

        let err = launch_with(
            &invocation("echo", &missing),
            &runtime_dir,
            Path::new("/definitely/not/an/executable"),
            new_year()?,
        )
        .expect_err("source file is missing");

        assert!(err.display_message().starts_with("error copying"));
        assert!(fs::read_dir(runtime_dir.path())?.next().is_none());
        Ok(())
    }

    #[test]
    fn spawn_worker_reports_missing_executable() {
        let err = spawn_worker(Path::new("/definitely/not/an/executable"), &[])
            .expect_err("executable does not exist");
        assert!(
            err.display_message()
                .starts_with("could not start worker '/definitely/not/an/executable'")
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn launch_hands_scratch_path_to_worker() -> Result<()> {
        let temp = temp_dir()?;
        let source = temp.path().join("report.txt");
        fs::write(&source, b"body")?;
        let runtime_dir = RuntimeDir::resolve("run-mailcap-bg", Some(temp.path()));
        // Stands in for the worker: ignores its arguments and exits 0.
        let stand_in = ["/usr/bin/true", "/bin/true"]
            .into_iter()
            .map(Path::new)
            .find(|path| path.exists())
            .context("no `true` binary on this system")?;

        let launched = launch_with(
            &invocation("echo", &source),
            &runtime_dir,
            stand_in,
            new_year()?,
        )
        .map_err(|err| anyhow::anyhow!(err.display_message()))?;

        let status = waitpid(Pid::from_raw(i32::try_from(launched.pid)?), None)?;
        assert!(matches!(status, WaitStatus::Exited(_, 0)), "{status:?}");
        assert_eq!(launched.source, source);
        assert_eq!(
            launched.scratch,
            runtime_dir.path().join("report.txt_2024-01-01T00:00:00")
        );
        assert_eq!(fs::read(&launched.scratch)?, b"body");
        Ok(())
    }
}
