/*!
 * Engine Limits and Constants
 *
 * Centralized location for the engine's tunable constants.
 * All values include rationale comments explaining WHY they exist.
 */

use std::time::Duration;

// =============================================================================
// PIPE I/O
// =============================================================================

/// Bytes read per non-blocking read attempt (4KB)
/// One chunk per call; callers drain larger output by reading repeatedly.
/// [PERF] Aligned with common page size
pub const PIPE_READ_CHUNK: usize = 4 * 1024;

/// Typical OS pipe buffer capacity (64KB)
/// Advisory only: a child that writes past this while the parent does not
/// read will block in the kernel. Not enforced by the engine.
/// [LINUX-COMPAT] Default pipe capacity since Linux 2.6.11
pub const PIPE_CAPACITY_HINT: usize = 64 * 1024;

// =============================================================================
// WAIT ENGINE
// =============================================================================

/// Sleep between liveness polls inside a timed wait (2ms)
/// Small enough to keep timeout overshoot negligible, large enough to avoid
/// busy-spinning on the child's zombie slot.
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(2);
