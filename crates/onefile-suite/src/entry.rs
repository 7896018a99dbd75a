// SPDX-License-Identifier: Apache-2.0

//! One entry function per command personality.
//!
//! Shared call contract: `args[0]` is the invocation identity the caller
//! resolved (packaging suffixes already stripped), `args[1..]` are operand
//! arguments forwarded verbatim. The return value is the delegated tool's
//! exit status; every failure to reach the tool surfaces as an error.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::manifest::PayloadManifest;
use crate::payload;

/// Executes the ad-hoc task CLI (the plain `ansible` personality).
pub fn adhoc(args: &[OsString]) -> Result<i32> {
    delegate("ansible", args)
}

/// Executes the playbook runner.
pub fn playbook(args: &[OsString]) -> Result<i32> {
    delegate("ansible-playbook", args)
}

/// Executes the collection and role manager.
pub fn galaxy(args: &[OsString]) -> Result<i32> {
    delegate("ansible-galaxy", args)
}

/// Executes the secret management CLI.
pub fn vault(args: &[OsString]) -> Result<i32> {
    delegate("ansible-vault", args)
}

/// Executes the interactive console.
pub fn console(args: &[OsString]) -> Result<i32> {
    delegate("ansible-console", args)
}

/// Executes the configuration inspector.
pub fn config(args: &[OsString]) -> Result<i32> {
    delegate("ansible-config", args)
}

/// Executes the documentation viewer.
pub fn doc(args: &[OsString]) -> Result<i32> {
    delegate("ansible-doc", args)
}

/// Executes the inventory inspector.
pub fn inventory(args: &[OsString]) -> Result<i32> {
    delegate("ansible-inventory", args)
}

/// Executes the pull-mode runner.
pub fn pull(args: &[OsString]) -> Result<i32> {
    delegate("ansible-pull", args)
}

/// Runs one bundled tool with inherited stdio and environment.
fn delegate(tool: &str, args: &[OsString]) -> Result<i32> {
    let root = payload::payload_root()?;
    delegate_from(&root, tool, args)
}

/// Runs a payload tool under an explicit root. Split out so tests can point
/// at temporary payloads without touching the process environment.
fn delegate_from(root: &Path, tool: &str, args: &[OsString]) -> Result<i32> {
    let manifest = PayloadManifest::load(root)?;
    let program = manifest.tool_path(root, tool)?;

    let mut command = Command::new(&program);
    command.args(args.get(1..).unwrap_or_default());
    set_invocation_name(&mut command, args.first());

    let status = command
        .status()
        .with_context(|| format!("failed to launch {}", program.display()))?;
    Ok(exit_code(status))
}

/// Lets the child observe the emulated program name as its argv[0].
#[cfg(unix)]
fn set_invocation_name(command: &mut Command, identity: Option<&OsString>) {
    use std::os::unix::process::CommandExt;

    if let Some(identity) = identity.filter(|name| !name.is_empty()) {
        command.arg0(identity);
    }
}

/// argv[0] emulation cannot be expressed on this platform.
#[cfg(not(unix))]
fn set_invocation_name(_command: &mut Command, _identity: Option<&OsString>) {}

/// Translates a child exit status into the launcher's own exit code.
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    if let Some(code) = status.code() {
        return code;
    }
    // Shell convention for a signal-terminated child.
    status.signal().map(|signal| 128 + signal).unwrap_or(1)
}

/// Translates a child exit status into the launcher's own exit code.
#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
