/*!
 * Signal Sender
 * Signal delivery to a live child with PID-reuse protection
 */

use super::handle::ProcessHandle;
use crate::signals::{Signal, SignalError, SignalResult};
use log::debug;
use nix::sys::signal::kill;
use nix::unistd::Pid;

impl ProcessHandle {
    /// Deliver a signal to the child
    ///
    /// Refused with `AlreadyExited` once the child has been reaped, whether
    /// by `wait`, `wait_timeout`, or an `is_alive` poll: after the reap the
    /// kernel may hand the PID to an unrelated process, so no kill is ever
    /// issued for it. Successful delivery does not change the observable
    /// status; termination is only observed through the wait engine.
    pub fn signal(&self, signal: Signal) -> SignalResult<()> {
        // Held across the kill so the refusal stays consistent with a reap
        // completing on another thread.
        let status = self.status.lock();
        if status.is_some() {
            return Err(SignalError::AlreadyExited);
        }

        let sig = nix::sys::signal::Signal::try_from(signal.number() as i32)
            .map_err(|_| SignalError::Unsupported(signal))?;

        kill(Pid::from_raw(self.pid()), sig)
            .map_err(|e| SignalError::DeliveryFailed(e.to_string()))?;
        debug!("Sent {} to PID {}", signal, self.pid());
        Ok(())
    }

    /// Deliver SIGKILL
    pub fn kill(&self) -> SignalResult<()> {
        self.signal(Signal::SIGKILL)
    }
}
