//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic checks that serde cannot express
//! - Reject rule-set names and delimiters that would make requests ambiguous
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: `&ServiceConfig → Result<(), Vec<ValidationError>>`

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::protocol::Delimiter;
use crate::ruleset::{NameError, RuleSetName};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("protocol.max_line_bytes must be greater than zero")]
    ZeroLineLimit,

    #[error("rules.rule_set: {0}")]
    RuleSetName(NameError),

    #[error("rules.rule_set and rules.from_executable are mutually exclusive")]
    ConflictingFrontEnds,

    #[error("protocol.delimiter {0:?} can appear inside rule-set names")]
    AmbiguousDelimiter(char),
}

/// Check a fully merged configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.protocol.max_line_bytes == 0 {
        errors.push(ValidationError::ZeroLineLimit);
    }

    if let Some(raw) = &config.rules.rule_set {
        if let Err(e) = RuleSetName::parse(raw) {
            errors.push(ValidationError::RuleSetName(e));
        }
        if config.rules.from_executable {
            errors.push(ValidationError::ConflictingFrontEnds);
        }
    }

    if let Delimiter::Char(c) = config.protocol.delimiter {
        if c.is_alphanumeric() || c == '.' || c.is_whitespace() {
            errors.push(ValidationError::AmbiguousDelimiter(c));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
