//! Multicall binary entrypoint for the single-binary Ansible distribution.
//!
//! The file name under which this binary is invoked selects the command
//! personality; everything after argv[0] belongs to the selected command.

use std::ffi::OsString;

mod debug_log;
mod dispatch;
mod normalize;

/// Resolves the invoked personality, runs it, and exits with its status.
fn main() {
    // args_os: operands are not required to be valid Unicode.
    let argv: Vec<OsString> = std::env::args_os().collect();
    let code = dispatch::run(argv);
    std::process::exit(code);
}
