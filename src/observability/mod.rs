//! Observability subsystem for pagewise
//!
//! Structured logging goes through `tracing`; this module owns the event
//! vocabulary. The crate never installs a subscriber.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on compilation or assembly
//! 3. Cursor tokens are never logged, only their length
//!
//! # Usage
//!
//! ```ignore
//! use pagewise::observability::Event;
//!
//! tracing::debug!(event = %Event::PlanCompiled, limit = 10, "plan compiled");
//! ```

mod events;

pub use events::Event;

use crate::errors::PaginationError;

/// Log a rejected request at WARN
pub fn log_rejection(event: Event, err: &PaginationError) {
    tracing::warn!(
        event = %event,
        code = err.code(),
        request_error = err.is_request_error(),
        "{}",
        err
    );
}
