//! Observability for Quick Shelf workloads.
//!
//! - `StructuredLogger` - Structured logging with request context
//! - `LogSink` - Where log lines go (stderr, `tracing`, or memory for tests)

mod logging;

pub use logging::*;

// Re-export RequestId from shelf-core for convenience
pub use shelf_core::RequestId;
