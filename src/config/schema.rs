//! Configuration schema definitions.
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::observability::logging::DEFAULT_FILTER;
use crate::protocol::session::DEFAULT_MAX_LINE_BYTES;
use crate::protocol::Delimiter;

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Where rule sets live and how the front-end picks one.
    pub rules: RulesConfig,

    /// Request line handling.
    pub protocol: ProtocolConfig,

    /// Diagnostics output.
    pub logging: LoggingConfig,
}

/// Rule-set location and front-end selection.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Base directory for rule-set files. Defaults to the executable's directory.
    pub base_dir: Option<PathBuf>,

    /// Serve a single rule set; every input line is a bare lookup value.
    pub rule_set: Option<String>,

    /// Serve `<dir>/<stem>.conf` named after the running binary.
    pub from_executable: bool,
}

/// Request line handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Separator between rule-set name and value in per-line mode.
    pub delimiter: Delimiter,

    /// Longer lines are answered `NULL` without being parsed.
    pub max_line_bytes: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Whitespace,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Diagnostics output. Always stderr.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,

    pub format: LogFormat,

    /// ANSI colors in log output.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Pretty,
            ansi: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert!(config.rules.base_dir.is_none());
        assert!(config.rules.rule_set.is_none());
        assert!(!config.rules.from_executable);
        assert_eq!(config.protocol.delimiter, Delimiter::Whitespace);
        assert_eq!(config.protocol.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn full_document() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [rules]
            base_dir = "/etc/rewrite-map"
            rule_set = "users.list"

            [protocol]
            delimiter = ";"
            max_line_bytes = 4096

            [logging]
            filter = "rewrite_map=debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.rules.base_dir, Some(PathBuf::from("/etc/rewrite-map")));
        assert_eq!(config.rules.rule_set.as_deref(), Some("users.list"));
        assert_eq!(config.protocol.delimiter, Delimiter::Char(';'));
        assert_eq!(config.protocol.max_line_bytes, 4096);
        assert_eq!(config.logging.filter, "rewrite_map=debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.logging.ansi);
    }

    #[test]
    fn bad_delimiter_is_a_parse_error() {
        let result: Result<ServiceConfig, _> = toml::from_str("[protocol]\ndelimiter = \"::\"\n");
        assert!(result.is_err());
    }
}
