//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rules / ruleset / protocol produce:
//!     → logging.rs (structured events on stderr)
//!     → metrics.rs (counters through the `metrics` facade)
//! ```
//!
//! # Design Decisions
//! - stdout belongs to the protocol; diagnostics never go there
//! - No exporter is installed here; an embedding process may add a recorder

pub mod logging;
pub mod metrics;
