/*!
 * Core Types
 * Common types used across the engine
 */

/// OS-level process ID type
///
/// Signed to match the kernel's `pid_t`; always positive for a spawned child.
pub type OsPid = i32;

/// Engine-internal handle ID assigned by the registry
pub type HandleId = u64;
