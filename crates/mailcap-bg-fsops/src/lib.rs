//! Scratch-file staging for the background mailcap shim.
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
#![allow(clippy::module_name_repetitions)]

//! Layout: `runtime_dir.rs` (scratch directory resolution), `scratch.rs`
//! (naming, copying and removal), `error.rs` (`FsOpsError`).

pub mod error;
pub mod runtime_dir;
pub mod scratch;

pub use error::{FsOpsError, FsOpsResult};
pub use runtime_dir::{RUNTIME_DIR_MODE, RuntimeDir};
pub use scratch::{ScratchFile, TIMESTAMP_FORMAT, copy_contents, remove_scratch, scratch_name};
