//! Shared fixtures for rule-set integration tests.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Fixed epoch offset so tests never depend on the wall clock's resolution.
const BASE_SECS: u64 = 1_700_000_000;

/// Write `contents` to `path` and pin its mtime to `BASE_SECS + tick`.
///
/// Use a larger `tick` for every write that must be seen as newer.
pub fn write_rules(path: &Path, contents: &str, tick: u64) {
    fs::write(path, contents).unwrap();
    set_tick(path, tick);
}

/// Move the modification time of an existing file without touching its contents.
#[allow(dead_code)]
pub fn set_tick(path: &Path, tick: u64) {
    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(BASE_SECS + tick);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}
