//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, ConfigError, LogFormat, ServiceConfig};
use crate::protocol::Delimiter;

#[derive(Debug, Parser)]
#[command(name = "rewrite-map")]
#[command(about = "Line-oriented rule-set lookup helper (answers FOUND or NULL per line)", long_about = None)]
pub struct Cli {
    /// TOML settings file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding rule-set files (default: the executable's directory).
    #[arg(short = 'd', long)]
    pub rules_dir: Option<PathBuf>,

    /// Serve one rule set; input lines are bare lookup values.
    #[arg(short, long, conflicts_with = "from_executable")]
    pub rule_set: Option<String>,

    /// Serve <dir>/<binary name>.conf, with the mode picked from the binary name.
    #[arg(long)]
    pub from_executable: bool,

    /// Separator between rule-set name and value: "whitespace" or one character.
    #[arg(long)]
    pub delimiter: Option<Delimiter>,

    /// Longest accepted request line in bytes.
    #[arg(long)]
    pub max_line_bytes: Option<usize>,

    /// Log filter directive (overridden by RUST_LOG).
    #[arg(long)]
    pub log_filter: Option<String>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Load the settings file (if any) and apply command-line overrides.
    pub fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(self, config: &mut ServiceConfig) {
        if let Some(dir) = self.rules_dir {
            config.rules.base_dir = Some(dir);
        }
        if let Some(name) = self.rule_set {
            config.rules.rule_set = Some(name);
            config.rules.from_executable = false;
        }
        if self.from_executable {
            config.rules.from_executable = true;
            config.rules.rule_set = None;
        }
        if let Some(delimiter) = self.delimiter {
            config.protocol.delimiter = delimiter;
        }
        if let Some(max) = self.max_line_bytes {
            config.protocol.max_line_bytes = max;
        }
        if let Some(filter) = self.log_filter {
            config.logging.filter = filter;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}
