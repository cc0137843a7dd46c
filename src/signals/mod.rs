/*!
 * Signals Module
 * POSIX signal identification and process-wide disposition setup
 */

pub mod disposition;
pub mod types;

// Re-export public API
pub use disposition::ensure_default_dispositions;
pub use types::{Signal, SignalError, SignalResult};
