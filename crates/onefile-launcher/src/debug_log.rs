//! Opt-in JSONL record of every dispatch.
//!
//! The default-fallback policy means an unrecognized invocation name runs
//! the ad-hoc personality without comment; pointing `ONEFILE_DEBUG_LOG` at a
//! file makes the resolved personality observable after the fact.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::dispatch::Personality;

/// Environment variable naming the dispatch log file.
pub const DEBUG_LOG_ENV: &str = "ONEFILE_DEBUG_LOG";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DispatchRecord<'a> {
    timestamp_epoch_secs: u64,
    argv0: &'a str,
    program: &'a str,
    personality: &'a str,
    exit_code: i32,
}

/// Appends one dispatch record when the log is enabled; inert otherwise.
pub fn record(
    argv0: &str,
    program: &str,
    personality: Personality,
    exit_code: i32,
) -> io::Result<()> {
    let Some(path) = std::env::var_os(DEBUG_LOG_ENV) else {
        return Ok(());
    };
    record_to(Path::new(&path), argv0, program, personality, exit_code)
}

/// Appends one dispatch record to an explicit log path.
fn record_to(
    path: &Path,
    argv0: &str,
    program: &str,
    personality: Personality,
    exit_code: i32,
) -> io::Result<()> {
    let record = DispatchRecord {
        timestamp_epoch_secs: now_epoch_secs(),
        argv0,
        program,
        personality: personality.token(),
        exit_code,
    };
    let json = serde_json::to_string(&record)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{json}")
}

/// Returns current unix timestamp in seconds.
fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
