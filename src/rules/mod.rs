//! Rule compilation subsystem.
//!
//! # Data Flow
//! ```text
//! rule-set file (plain text, one rule per line)
//!     → loader.rs (read, trim, drop blanks and comments)
//!     → mode.rs (which checker family to build)
//!     → checker.rs / network.rs (compile rules)
//!     → Checker (immutable, shared by reference)
//! ```
//!
//! # Design Decisions
//! - Checkers are compiled once and never mutated; a reload builds a new one
//! - A single bad rule line is dropped with a warning, never fails the load
//! - A missing file compiles to `Checker::NoMatch` instead of an error
//! - Matching is total: invalid input simply does not match

pub mod checker;
pub mod loader;
pub mod mode;
pub mod network;

pub use checker::Checker;
pub use loader::{load_checker, LoadError};
pub use mode::MatchMode;
pub use network::NetworkMatcher;
