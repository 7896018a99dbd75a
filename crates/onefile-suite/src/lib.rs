// SPDX-License-Identifier: Apache-2.0

//! CLI entry functions for the single-binary Ansible distribution.
//!
//! The launcher binary resolves an invocation to one of the public functions
//! in [`entry`]; each of them locates the matching tool inside the packaged
//! payload and runs it with the caller's operand arguments, inherited stdio,
//! and inherited environment. The payload itself is laid down by the
//! packaging pipeline and described by a small TOML manifest ([`manifest`]).

pub mod entry;
pub mod manifest;
pub mod payload;

/// Returns crate version for diagnostics/tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }
}
