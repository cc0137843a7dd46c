/*!
 * Wait Engine
 * Blocking, timed, and non-blocking collection of child exit status
 */

use super::core::{ExitStatus, ProcessError, ProcessResult};
use super::handle::ProcessHandle;
use crate::core::limits::WAIT_POLL_INTERVAL;
use log::{info, warn};
use std::thread;
use std::time::{Duration, Instant};

impl ProcessHandle {
    /// Block until the child terminates and return its exit status
    ///
    /// Once the status has been collected it is cached; every later call
    /// returns the cached value without an OS call, including after a
    /// non-blocking poll reaped the child first.
    pub fn wait(&self) -> ProcessResult<ExitStatus> {
        if let Some(status) = *self.status.lock() {
            return Ok(status);
        }

        let mut child = self.child.lock();
        // A poll on another thread may have reaped between the cache check
        // and taking the child lock.
        if let Some(status) = *self.status.lock() {
            return Ok(status);
        }
        let os_status = child
            .wait()
            .map_err(|e| ProcessError::WaitFailed(e.to_string()))?;
        let status = ExitStatus::from_os(os_status);
        *self.status.lock() = Some(status);
        info!("PID {} {}", self.pid(), status);
        Ok(status)
    }

    /// Wait for termination with a deadline
    ///
    /// Returns `None` if the deadline elapses first, leaving the child
    /// running and the handle fully intact. A zero duration performs a
    /// single liveness poll. The wait is a bounded poll loop; it never
    /// overshoots the deadline by more than one poll interval.
    pub fn wait_timeout(&self, timeout: Duration) -> ProcessResult<Option<ExitStatus>> {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            // Unrepresentable deadline: the caller asked for an unbounded wait.
            None => return self.wait().map(Some),
        };

        loop {
            if let Some(status) = self.try_reap()? {
                return Ok(Some(status));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep(WAIT_POLL_INTERVAL.min(deadline - now));
        }
    }

    /// Non-blocking liveness check
    ///
    /// Never suspends the caller. A child discovered dead here is reaped on
    /// the spot, so the exit status is cached and the PID-reuse guard
    /// engages immediately; repeated calls after that return `false` cheaply.
    pub fn is_alive(&self) -> bool {
        match self.try_reap() {
            Ok(None) => true,
            Ok(Some(_)) => false,
            Err(e) => {
                warn!("Liveness check failed for PID {}: {}", self.pid(), e);
                false
            }
        }
    }

    /// Single non-blocking reap attempt; caches the status when it succeeds
    pub(crate) fn try_reap(&self) -> ProcessResult<Option<ExitStatus>> {
        if let Some(status) = *self.status.lock() {
            return Ok(Some(status));
        }

        let mut child = self.child.lock();
        match child.try_wait() {
            Ok(Some(os_status)) => {
                let status = ExitStatus::from_os(os_status);
                *self.status.lock() = Some(status);
                info!("PID {} {}", self.pid(), status);
                Ok(Some(status))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(ProcessError::WaitFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::process::core::SpawnConfig;
    use crate::process::spawn::spawn;
    use std::time::{Duration, Instant};

    fn sh(script: &str) -> SpawnConfig {
        SpawnConfig::new("sh").with_args(vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_wait_reports_exit_code() {
        let handle = spawn(sh("exit 7")).unwrap();
        let status = handle.wait().unwrap();
        assert_eq!(status.code, 7);
        assert!(!status.via_signal);
    }

    #[test]
    fn test_wait_is_idempotent() {
        let handle = spawn(sh("exit 3")).unwrap();
        let first = handle.wait().unwrap();
        let second = handle.wait().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_wait_timeout_expires_without_teardown() {
        let handle = spawn(SpawnConfig::new("sleep").with_args(vec!["5".to_string()])).unwrap();
        let start = Instant::now();
        let result = handle.wait_timeout(Duration::from_millis(50)).unwrap();
        assert!(result.is_none());
        assert!(start.elapsed() < Duration::from_secs(2));
        // The child keeps running and stays fully usable.
        assert!(handle.is_alive());
        handle.kill().unwrap();
        handle.wait().unwrap();
    }

    #[test]
    fn test_wait_timeout_zero_is_single_poll() {
        let handle = spawn(SpawnConfig::new("sleep").with_args(vec!["5".to_string()])).unwrap();
        let result = handle.wait_timeout(Duration::ZERO).unwrap();
        assert!(result.is_none());
        handle.kill().unwrap();
        handle.wait().unwrap();
    }

    #[test]
    fn test_wait_timeout_observes_exit() {
        let handle = spawn(sh("exit 11")).unwrap();
        let status = handle
            .wait_timeout(Duration::from_secs(5))
            .unwrap()
            .expect("child should exit within the window");
        assert_eq!(status.code, 11);
    }

    #[test]
    fn test_is_alive_reaps_and_stays_false() {
        let handle = spawn(sh("exit 0")).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while handle.is_alive() {
            assert!(Instant::now() < deadline, "child never exited");
            std::thread::sleep(Duration::from_millis(5));
        }
        // Idempotent after the reap, and wait returns the cached status.
        assert!(!handle.is_alive());
        assert!(handle.wait().unwrap().success());
    }
}
