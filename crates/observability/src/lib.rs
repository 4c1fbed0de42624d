//! Tracing and logging (shared setup).

/// Initialize process-wide logging with the given options.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(options: &tracing::LogOptions) {
    tracing::init(options);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{LogFormat, LogOptions};
