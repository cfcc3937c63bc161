#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Background launcher for mailcap viewers.
//!
//! The binary runs twice per file. The launcher copies the file into a
//! scratch directory and re-invokes itself with `--child`; the worker runs the
//! viewer on the copy and deletes it afterwards.
//!
//! Layout:
//! - `cli.rs`: argument parsing, role dispatch, exit status mapping
//! - `invocation.rs`: command/file split and the worker's argument vector
//! - `launcher.rs`: scratch staging and worker spawn
//! - `worker.rs`: command execution and scratch cleanup
//! - `config.rs`: environment-derived settings
//! - `error.rs`: `CliError`
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod invocation;
pub(crate) mod launcher;
pub(crate) mod worker;

pub use cli::run;
