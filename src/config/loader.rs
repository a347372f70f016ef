//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a TOML settings file. Validation runs separately, after CLI overrides.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Validate a merged configuration.
pub fn check_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rewrite-map.toml");
        fs::write(&path, "[protocol]\ndelimiter = \"|\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.protocol.delimiter, crate::protocol::Delimiter::Char('|'));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn validation_message_lists_all() {
        let mut config = ServiceConfig::default();
        config.protocol.max_line_bytes = 0;
        config.rules.rule_set = Some("x.txt".into());

        let err = check_config(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("max_line_bytes"));
        assert!(message.contains("x.txt"));
    }
}
