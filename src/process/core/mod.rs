/*!
 * Process Core Types
 * Fundamental types for child-process management
 */

pub mod types;

// Re-export everything for convenience
pub use types::*;
