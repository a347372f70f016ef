//! Rule-set name sanitization.
//!
//! Names arrive from untrusted request lines and are joined onto the rules
//! directory, so they are checked against a strict allow-list before any
//! filesystem access:
//!
//! ```text
//! <alphanumeric>[.ri|.re|.net].list
//! ```

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::rules::MatchMode;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?:\.(ri|re|net))?\.list$").expect("rule-set name pattern is valid")
});

/// Reasons a rule-set name is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("empty rule-set name")]
    Empty,

    #[error("rule-set name {0:?} must not contain path components")]
    PathComponent(String),

    #[error("rule-set name {0:?} must match name[.(ri|re|net)].list")]
    Pattern(String),
}

/// A validated rule-set file name and the mode its suffix selects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleSetName {
    name: String,
    mode: MatchMode,
}

impl RuleSetName {
    /// Validate a raw name. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }

        let path = Path::new(name);
        if path.file_name().and_then(|f| f.to_str()) != Some(name) {
            return Err(NameError::PathComponent(name.to_owned()));
        }

        let captures = NAME_PATTERN
            .captures(name)
            .ok_or_else(|| NameError::Pattern(name.to_owned()))?;

        let mode = match captures.get(1).map(|tag| tag.as_str()) {
            Some("ri") => MatchMode::RegexCaseInsensitive,
            Some("re") => MatchMode::RegexCaseSensitive,
            Some("net") => MatchMode::Network,
            _ => MatchMode::Literal,
        };

        Ok(Self {
            name: name.to_owned(),
            mode,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn into_string(self) -> String {
        self.name
    }
}

impl fmt::Display for RuleSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_mode_from_suffix() {
        let cases = [
            ("users.list", MatchMode::Literal),
            ("agents.ri.list", MatchMode::RegexCaseInsensitive),
            ("report.re.list", MatchMode::RegexCaseSensitive),
            ("allow.net.list", MatchMode::Network),
            ("Mixed42.list", MatchMode::Literal),
        ];
        for (raw, mode) in cases {
            let name = RuleSetName::parse(raw).unwrap();
            assert_eq!(name.as_str(), raw);
            assert_eq!(name.mode(), mode, "{raw}");
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let name = RuleSetName::parse("  users.list\t").unwrap();
        assert_eq!(name.as_str(), "users.list");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(RuleSetName::parse(""), Err(NameError::Empty));
        assert_eq!(RuleSetName::parse("   "), Err(NameError::Empty));
    }

    #[test]
    fn rejects_path_components() {
        for raw in ["../escape.list", "sub/dir.list", "/etc/passwd", "..", ".", "a/"] {
            assert!(
                matches!(RuleSetName::parse(raw), Err(NameError::PathComponent(_))),
                "{raw} should be rejected as a path"
            );
        }
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in [
            "name.txt",
            "bad name.list",
            ".list",
            "users.list.bak",
            "users.xx.list",
            "users.ri.re.list",
            "under_score.list",
            "dash-name.list",
        ] {
            assert!(
                matches!(RuleSetName::parse(raw), Err(NameError::Pattern(_))),
                "{raw} should be rejected by pattern"
            );
        }
    }
}
