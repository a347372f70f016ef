//! Rule-set management subsystem.
//!
//! # Data Flow
//! ```text
//! raw name from request line
//!     → name.rs (allow-list check, mode from suffix)
//!     → cache.rs (existing manager, or build one)
//!     → manager.rs (reload_if_needed: stat, compare mtime, load, swap)
//!     → manager.matches(value)
//! ```
//!
//! # Design Decisions
//! - At most one live manager per name; managers are never evicted
//! - Readers never block on a reload in flight
//! - File deletion is an explicit transition to "match nothing"

pub mod cache;
pub mod manager;
pub mod name;

pub use cache::RuleSetCache;
pub use manager::{ReloadOutcome, RuleSetManager, Snapshot};
pub use name::{NameError, RuleSetName};
