//! Rule-set lookup service for line-oriented front-ends.
//!
//! A front-end (typically a mail or web server "map" helper) writes one
//! lookup per line; the service answers `FOUND` or `NULL` per line. Rule
//! sets are plain-text files that hot-reload when they change on disk.

pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod protocol;
pub mod rules;
pub mod ruleset;

pub use config::ServiceConfig;
pub use protocol::{Resolver, Response, Session};
pub use rules::{Checker, MatchMode};
pub use ruleset::{RuleSetCache, RuleSetManager};
