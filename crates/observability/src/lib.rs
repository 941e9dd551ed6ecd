//! Logging setup shared by the binaries.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! binary's job.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging with JSON output and an `info` default.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize logging with an explicit output format and default filter.
pub fn init_with(format: LogFormat, default_filter: &str) {
    tracing::init_with(format, default_filter);
}
