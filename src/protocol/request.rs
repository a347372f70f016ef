//! Request line parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for a malformed `<name><delim><value>` line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("empty input")]
    Empty,

    #[error("missing lookup value")]
    MissingDelimiter,

    #[error("missing rule-set name or lookup value")]
    MissingSegment,
}

/// Separator between the rule-set name and the lookup value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Delimiter {
    /// First space or tab.
    #[default]
    Whitespace,
    /// First occurrence of a specific character.
    Char(char),
}

impl Delimiter {
    /// Byte offset and length of the first delimiter in `line`.
    fn find(&self, line: &str) -> Option<(usize, usize)> {
        match *self {
            Delimiter::Whitespace => line
                .char_indices()
                .find(|(_, c)| *c == ' ' || *c == '\t')
                .map(|(i, c)| (i, c.len_utf8())),
            Delimiter::Char(delim) => line.find(delim).map(|i| (i, delim.len_utf8())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("delimiter must be \"whitespace\" or a single character, got {0:?}")]
pub struct DelimiterParseError(String);

impl FromStr for Delimiter {
    type Err = DelimiterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("whitespace") {
            return Ok(Delimiter::Whitespace);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Delimiter::Char(c)),
            _ => Err(DelimiterParseError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = DelimiterParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Delimiter> for String {
    fn from(value: Delimiter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Whitespace => f.write_str("whitespace"),
            Delimiter::Char(c) => write!(f, "{c}"),
        }
    }
}

/// One parsed request: which rule set, and what to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub rule_set: &'a str,
    pub value: &'a str,
}

impl<'a> Request<'a> {
    /// Split on the first delimiter. Whitespace inside the value is preserved.
    pub fn parse(line: &'a str, delimiter: Delimiter) -> Result<Self, RequestError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(RequestError::Empty);
        }

        let (at, len) = delimiter.find(line).ok_or(RequestError::MissingDelimiter)?;
        let rule_set = line[..at].trim();
        let value = line[at + len..].trim();
        if rule_set.is_empty() || value.is_empty() {
            return Err(RequestError::MissingSegment);
        }

        Ok(Self { rule_set, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_delimiter_preserves_inner_spaces() {
        let req = Request::parse("ua.list;Mozilla/5.0 (Mac OS)", Delimiter::Char(';')).unwrap();
        assert_eq!(req.rule_set, "ua.list");
        assert_eq!(req.value, "Mozilla/5.0 (Mac OS)");
    }

    #[test]
    fn whitespace_splits_on_first_run_only() {
        let req = Request::parse("  ua.list \t Mozilla/5.0 (X11; Linux)  \n", Delimiter::Whitespace).unwrap();
        assert_eq!(req.rule_set, "ua.list");
        assert_eq!(req.value, "Mozilla/5.0 (X11; Linux)");
    }

    #[test]
    fn later_delimiters_stay_in_value() {
        let req = Request::parse("a.list;x;y", Delimiter::Char(';')).unwrap();
        assert_eq!(req.value, "x;y");
    }

    #[test]
    fn missing_delimiter() {
        assert_eq!(
            Request::parse("users.list", Delimiter::Whitespace),
            Err(RequestError::MissingDelimiter)
        );
        assert_eq!(
            Request::parse("users.list value", Delimiter::Char(';')),
            Err(RequestError::MissingDelimiter)
        );
    }

    #[test]
    fn empty_line() {
        assert_eq!(Request::parse("", Delimiter::Whitespace), Err(RequestError::Empty));
        assert_eq!(Request::parse(" \t \r\n", Delimiter::Whitespace), Err(RequestError::Empty));
    }

    #[test]
    fn empty_segments() {
        assert_eq!(
            Request::parse(";value", Delimiter::Char(';')),
            Err(RequestError::MissingSegment)
        );
        assert_eq!(
            Request::parse("users.list;   ", Delimiter::Char(';')),
            Err(RequestError::MissingSegment)
        );
    }

    #[test]
    fn delimiter_from_str() {
        assert_eq!("whitespace".parse::<Delimiter>(), Ok(Delimiter::Whitespace));
        assert_eq!(";".parse::<Delimiter>(), Ok(Delimiter::Char(';')));
        assert_eq!("|".parse::<Delimiter>(), Ok(Delimiter::Char('|')));
        assert!("".parse::<Delimiter>().is_err());
        assert!(";;".parse::<Delimiter>().is_err());
    }
}
