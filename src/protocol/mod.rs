//! Line protocol subsystem.
//!
//! # Data Flow
//! ```text
//! input stream (one request per line)
//!     → session.rs (bounded line read, UTF-8 check)
//!     → request.rs (split "<rule set><delim><value>", per-line front-end only)
//!     → Resolver (cache lookup or fixed manager, reload_if_needed, match)
//!     → response.rs ("FOUND" / "NULL")
//!     → output stream (flushed per line)
//! ```
//!
//! # Design Decisions
//! - Exactly one response line per input line, errors included
//! - Errors never reach the caller as anything but `NULL`; details go to the log
//! - Only I/O failure of the stream itself ends a session

pub mod request;
pub mod response;
pub mod session;

pub use request::{Delimiter, Request, RequestError};
pub use response::Response;
pub use session::{Resolver, Session, SessionSummary};
