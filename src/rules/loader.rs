//! Rule-set loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::rules::checker::Checker;
use crate::rules::mode::MatchMode;

/// Error type for rule-set loading.
///
/// A missing file is not an error; it loads as [`Checker::NoMatch`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Split file contents into rule lines.
///
/// Each line is trimmed; blank lines and `#` comments are dropped.
pub fn parse_rule_lines(contents: &str) -> Vec<&str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Read `path` and compile it for `mode`.
pub fn load_checker(mode: MatchMode, path: &Path) -> Result<Checker, LoadError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Checker::NoMatch),
        Err(source) => {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let contents = String::from_utf8_lossy(&bytes);
    let rules = parse_rule_lines(&contents);
    Ok(Checker::compile(mode, &rules))
}
