//! Matching modes.

use std::fmt;

/// How the rules of a rule set are interpreted.
///
/// The mode is fixed when a rule set is first resolved; it never depends on
/// file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Exact, byte-for-byte string membership.
    Literal,
    /// Unanchored regular expressions, ignoring case.
    RegexCaseInsensitive,
    /// Unanchored regular expressions, case-sensitive.
    RegexCaseSensitive,
    /// Bare IP addresses and CIDR blocks.
    Network,
}

impl MatchMode {
    /// Short tag used in log fields and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Literal => "literal",
            MatchMode::RegexCaseInsensitive => "regex-ci",
            MatchMode::RegexCaseSensitive => "regex",
            MatchMode::Network => "nets",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
