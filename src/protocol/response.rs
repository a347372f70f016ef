//! Response tokens.

use std::fmt;

/// The single token written back for every input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Found,
    Null,
}

impl Response {
    pub fn as_str(&self) -> &'static str {
        match self {
            Response::Found => "FOUND",
            Response::Null => "NULL",
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Response::Found)
    }
}

impl From<bool> for Response {
    fn from(matched: bool) -> Self {
        if matched {
            Response::Found
        } else {
            Response::Null
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
