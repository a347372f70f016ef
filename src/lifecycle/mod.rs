//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load settings → Apply CLI → Validate → Build resolver → Serve stdin
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → stop serving, exit cleanly
//! ```
//!
//! # Design Decisions
//! - Startup errors are the only fatal errors
//! - Nothing after the first request line can abort the process

pub mod signals;
pub mod startup;

pub use signals::shutdown_signal;
pub use startup::{build_resolver, ExecutableIdentity, StartupError};
