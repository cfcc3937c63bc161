#![forbid(unsafe_code)]

//! `run-mailcap-bg` entrypoint.

use std::process;

fn main() {
    process::exit(mailcap_bg_cli::run());
}
