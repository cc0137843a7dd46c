/*!
 * Signal Disposition Setup
 *
 * One-time, process-wide correction of signal dispositions before the engine
 * issues its first wait-family call. Hosting runtimes routinely install their
 * own SIGCHLD handling; the wait engine needs the OS default so blocking and
 * non-blocking waits observe child termination directly. SIGPIPE is ignored
 * so a write to a pipe whose reader is gone surfaces as an EPIPE error on the
 * write path instead of terminating the managing process.
 */

use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};

static DISPOSITIONS_APPLIED: AtomicBool = AtomicBool::new(false);

/// Apply the engine's signal dispositions exactly once
///
/// Idempotent: repeated calls after the first are no-ops, as are calls on
/// non-POSIX platforms. A failing OS call is logged and not retried; it never
/// propagates to the caller.
pub fn ensure_default_dispositions() {
    if DISPOSITIONS_APPLIED.swap(true, Ordering::SeqCst) {
        return;
    }
    apply();
}

#[cfg(unix)]
fn apply() {
    use nix::sys::signal::{signal, SigHandler, Signal};

    // Safe with respect to the handler contract: SIG_DFL and SIG_IGN install
    // no user code, and this runs before any wait-family call.
    unsafe {
        if let Err(e) = signal(Signal::SIGCHLD, SigHandler::SigDfl) {
            warn!("Failed to restore SIGCHLD default disposition: {}", e);
        }
        if let Err(e) = signal(Signal::SIGPIPE, SigHandler::SigIgn) {
            warn!("Failed to ignore SIGPIPE: {}", e);
        }
    }
}

#[cfg(not(unix))]
fn apply() {}
