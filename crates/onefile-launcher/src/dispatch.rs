// SPDX-License-Identifier: Apache-2.0

//! Maps the invoked program identity to a command personality and runs it.

use colored::Colorize;
use onefile_suite::entry;
use std::ffi::OsString;

use crate::debug_log;
use crate::normalize;

/// Call contract shared by every personality entry function. Arguments are
/// platform-native strings so operand bytes survive delegation untouched.
pub type CliEntry = fn(&[OsString]) -> anyhow::Result<i32>;

/// Exit code for a delegated call ended by a user interrupt.
const INTERRUPT_EXIT_CODE: i32 = 130;

/// Exit code for any other failure escaping a delegated call.
const FAILURE_EXIT_CODE: i32 = 1;

/// One command personality of the multicall binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    Adhoc,
    Playbook,
    Galaxy,
    Vault,
    Console,
    Config,
    Doc,
    Inventory,
    Pull,
}

impl Personality {
    /// Every personality, in dispatch-table order. `Adhoc` doubles as the
    /// fallback for unrecognized invocation names.
    pub const ALL: [Personality; 9] = [
        Personality::Adhoc,
        Personality::Playbook,
        Personality::Galaxy,
        Personality::Vault,
        Personality::Console,
        Personality::Config,
        Personality::Doc,
        Personality::Inventory,
        Personality::Pull,
    ];

    /// The identity token that selects this personality.
    pub fn token(self) -> &'static str {
        match self {
            Personality::Adhoc => "ansible",
            Personality::Playbook => "ansible-playbook",
            Personality::Galaxy => "ansible-galaxy",
            Personality::Vault => "ansible-vault",
            Personality::Console => "ansible-console",
            Personality::Config => "ansible-config",
            Personality::Doc => "ansible-doc",
            Personality::Inventory => "ansible-inventory",
            Personality::Pull => "ansible-pull",
        }
    }

    /// The entry function this personality dispatches to.
    pub fn entry(self) -> CliEntry {
        match self {
            Personality::Adhoc => entry::adhoc,
            Personality::Playbook => entry::playbook,
            Personality::Galaxy => entry::galaxy,
            Personality::Vault => entry::vault,
            Personality::Console => entry::console,
            Personality::Config => entry::config,
            Personality::Doc => entry::doc,
            Personality::Inventory => entry::inventory,
            Personality::Pull => entry::pull,
        }
    }
}

/// Resolves an identity token to its personality.
///
/// Lookup is exact and case-sensitive. Unknown names select the ad-hoc
/// personality so a renamed or copied binary still runs something useful.
pub fn resolve(program_name: &str) -> Personality {
    Personality::ALL
        .into_iter()
        .find(|personality| personality.token() == program_name)
        .unwrap_or(Personality::Adhoc)
}

/// Dispatches one invocation and returns the process exit code.
pub fn run(argv: Vec<OsString>) -> i32 {
    let argv0 = argv.first().cloned().unwrap_or_default();
    // Resolution sees the raw base name; only the forwarded vector carries
    // the normalized argv[0]. Matching is textual, so a name that is not
    // valid Unicode never equals a registered token.
    let identity = normalize::program_identity(&argv0);
    let personality = resolve(&identity);
    let forwarded = forwarded_args(&argv);

    let code = match invoke(personality.entry(), forwarded) {
        Invocation::Completed(Ok(code)) => code,
        Invocation::Completed(Err(error)) => report_failure(&error),
        Invocation::Interrupted => report_interrupt(),
    };

    let _ = debug_log::record(&argv0.to_string_lossy(), &identity, personality, code);
    code
}

/// Builds the argument vector handed to the entry function: normalized
/// argv[0], operands byte-for-byte. The caller's vector is left untouched.
fn forwarded_args(argv: &[OsString]) -> Vec<OsString> {
    let mut forwarded = argv.to_vec();
    if let Some(first) = forwarded.first_mut() {
        let normalized = normalize::normalize_argv0(first).to_os_string();
        *first = normalized;
    }
    forwarded
}

/// Outcome of running an entry function under the interrupt relay.
enum Invocation {
    Completed(anyhow::Result<i32>),
    Interrupted,
}

/// Runs an entry function while listening for a user interrupt.
///
/// The blocking call runs on a worker so the signal can be observed during
/// the wait. An observed interrupt does not decide the outcome by itself:
/// the entry keeps running and its own result settles the invocation, so a
/// delegated tool that handles the signal keeps its exit status. When no
/// runtime or signal hook is available the relay degrades to a plain
/// synchronous call; an externally delivered interrupt then ends the
/// process with the platform's own convention.
fn invoke(entry: CliEntry, args: Vec<OsString>) -> Invocation {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()
    {
        Ok(runtime) => runtime,
        Err(_) => return Invocation::Completed(entry(&args)),
    };

    let invocation = runtime.block_on(async {
        let mut task = tokio::task::spawn_blocking(move || entry(&args));
        let signal = tokio::select! {
            // Polled first so a signal racing the entry's completion is
            // still observed.
            biased;
            signal = tokio::signal::ctrl_c() => signal,
            joined = &mut task => return Invocation::Completed(flatten_join(joined)),
        };
        let joined = flatten_join(task.await);
        match signal {
            Ok(()) => classify_after_interrupt(joined),
            Err(_) => Invocation::Completed(joined),
        }
    });
    // The entry has joined by now; teardown must not delay process exit.
    runtime.shutdown_background();
    invocation
}

/// Decides what an observed interrupt means once the entry has finished.
///
/// A delegated call that survived the signal and completed on its own keeps
/// its status. The interrupt outcome is reserved for a call the signal
/// actually ended: a child killed by SIGINT surfaces here as the shell
/// convention 130, and an entry error under a pending interrupt is the
/// interrupt escaping the delegation.
fn classify_after_interrupt(joined: anyhow::Result<i32>) -> Invocation {
    match joined {
        Ok(INTERRUPT_EXIT_CODE) => Invocation::Interrupted,
        Ok(code) => Invocation::Completed(Ok(code)),
        Err(_) => Invocation::Interrupted,
    }
}

/// Folds a worker panic into the ordinary failure path.
fn flatten_join(
    joined: Result<anyhow::Result<i32>, tokio::task::JoinError>,
) -> anyhow::Result<i32> {
    joined.unwrap_or_else(|join_error| Err(anyhow::anyhow!("entry function aborted: {join_error}")))
}

/// Reports a user interrupt and returns the conventional exit code.
fn report_interrupt() -> i32 {
    // Blank lines separate the notice from whatever the command printed.
    eprintln!();
    eprintln!();
    eprintln!("{} User interrupted execution", "!".yellow().bold());
    INTERRUPT_EXIT_CODE
}

/// Reports a delegated failure with its full error chain.
fn report_failure(error: &anyhow::Error) -> i32 {
    eprintln!("{} Error: {error}", "✗".red().bold());
    eprintln!("{error:?}");
    FAILURE_EXIT_CODE
}
