//! Invocation-identity handling: base-name extraction and stripping of
//! packaging-artifact suffixes from argv[0].

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::Path;

/// Suffix appended to launcher scripts by the Windows scripting subsystem.
const WINDOWED_SCRIPT_SUFFIX: &str = "-script.pyw";

/// Native executable suffix.
const EXECUTABLE_SUFFIX: &str = ".exe";

/// Returns the identity token: the base name of argv[0], path stripped.
///
/// The token is a textual view used for table matching and diagnostics;
/// bytes that are not valid Unicode are replaced, so such a name can never
/// equal a registered token.
pub fn program_identity(argv0: &OsStr) -> Cow<'_, str> {
    Path::new(argv0)
        .file_name()
        .unwrap_or(argv0)
        .to_string_lossy()
}

/// Strips one known packaging-artifact suffix from argv[0].
///
/// The windowed-script marker takes priority over the executable suffix;
/// the rules are mutually exclusive and applied at most once, so an
/// already-normalized name comes back unchanged.
pub fn normalize_argv0(argv0: &OsStr) -> &OsStr {
    if let Some(stripped) = strip_suffix(argv0, WINDOWED_SCRIPT_SUFFIX) {
        return stripped;
    }
    if let Some(stripped) = strip_suffix(argv0, EXECUTABLE_SUFFIX) {
        return stripped;
    }
    argv0
}

/// Byte-wise suffix stripping; names that are not valid Unicode still
/// normalize.
#[cfg(unix)]
fn strip_suffix<'a>(name: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    use std::os::unix::ffi::OsStrExt;

    name.as_bytes()
        .strip_suffix(suffix.as_bytes())
        .map(OsStr::from_bytes)
}

/// Suffix stripping through the Unicode view; names that are not valid
/// Unicode pass through untouched.
#[cfg(not(unix))]
fn strip_suffix<'a>(name: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    name.to_str()
        .and_then(|name| name.strip_suffix(suffix))
        .map(OsStr::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- identity extraction ---

    #[test]
    fn identity_strips_path_components() {
        assert_eq!(
            program_identity(OsStr::new("/usr/local/bin/ansible-playbook")),
            "ansible-playbook"
        );
    }

    #[test]
    fn identity_of_a_bare_name_is_the_name() {
        assert_eq!(program_identity(OsStr::new("ansible")), "ansible");
    }

    #[test]
    fn identity_of_empty_argv0_is_empty() {
        assert_eq!(program_identity(OsStr::new("")), "");
    }

    #[cfg(unix)]
    #[test]
    fn identity_of_a_non_unicode_name_is_lossy() {
        use std::os::unix::ffi::OsStrExt;

        let identity = program_identity(OsStr::from_bytes(b"ansible-\xff"));
        assert_eq!(identity, "ansible-\u{fffd}");
    }

    // --- suffix normalization ---

    #[test]
    fn windowed_script_suffix_is_stripped() {
        assert_eq!(normalize_argv0(OsStr::new("foo-script.pyw")), "foo");
    }

    #[test]
    fn executable_suffix_is_stripped() {
        assert_eq!(normalize_argv0(OsStr::new("foo.exe")), "foo");
    }

    #[test]
    fn plain_names_are_untouched() {
        assert_eq!(normalize_argv0(OsStr::new("foo")), "foo");
    }

    #[test]
    fn normalization_is_idempotent() {
        assert_eq!(
            normalize_argv0(normalize_argv0(OsStr::new("foo-script.pyw"))),
            "foo"
        );
        assert_eq!(
            normalize_argv0(normalize_argv0(OsStr::new("foo.exe"))),
            "foo"
        );
    }

    #[test]
    fn only_the_first_matching_rule_applies() {
        // The windowed-script rule wins and the embedded .exe survives.
        assert_eq!(normalize_argv0(OsStr::new("foo.exe-script.pyw")), "foo.exe");
    }

    #[test]
    fn path_components_are_preserved() {
        assert_eq!(
            normalize_argv0(OsStr::new("/opt/dist/ansible-playbook.exe")),
            "/opt/dist/ansible-playbook"
        );
    }

    #[test]
    fn unknown_suffixes_are_left_alone() {
        assert_eq!(normalize_argv0(OsStr::new("foo.bat")), "foo.bat");
        assert_eq!(normalize_argv0(OsStr::new("foo.pyw")), "foo.pyw");
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_names_normalize_bytewise() {
        use std::os::unix::ffi::OsStrExt;

        assert_eq!(
            normalize_argv0(OsStr::from_bytes(b"deploy-\xff.exe")),
            OsStr::from_bytes(b"deploy-\xff")
        );
    }
}
