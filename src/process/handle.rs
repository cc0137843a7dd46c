/*!
 * Process Handle
 * Owning handle for one spawned child: identity, status cache, and pipe ends
 */

use super::core::{ExitStatus, ProcessStatus, StdioSpec};
use crate::core::types::OsPid;
use parking_lot::Mutex;
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout};

/// Parent-side slot for one piped stream
///
/// `Absent` means the stream was never configured as a pipe; `Closed` means
/// the caller closed it. The distinction drives the deterministic outcomes of
/// read/write/close on non-open streams.
#[derive(Debug)]
pub(crate) enum PipeSlot<T> {
    Open(T),
    Closed,
    Absent,
}

impl<T> PipeSlot<T> {
    pub(crate) fn from_option(inner: Option<T>) -> Self {
        match inner {
            Some(stream) => PipeSlot::Open(stream),
            None => PipeSlot::Absent,
        }
    }
}

/// Owning handle for a single spawned child process
///
/// Exactly one handle exists per spawn; it is never reused for another child.
/// All mutation goes through internal locks, so a shared `Arc<ProcessHandle>`
/// can be polled, signaled, and read from concurrently. Dropping the handle
/// closes any parent-side pipe descriptors it still holds; the child itself
/// is not killed by the drop.
///
/// Lock ordering: `child` before `status`. The cached status is written only
/// while the `child` lock is held, so a populated cache is the single
/// authority for "this PID has been reaped and must not be signaled".
#[derive(Debug)]
pub struct ProcessHandle {
    pid: OsPid,
    command: String,
    args: Vec<String>,
    stdio: StdioSpec,
    pub(crate) child: Mutex<Child>,
    pub(crate) status: Mutex<Option<ExitStatus>>,
    pub(crate) stdin_pipe: Mutex<PipeSlot<ChildStdin>>,
    pub(crate) stdout_pipe: Mutex<PipeSlot<ChildStdout>>,
    pub(crate) stderr_pipe: Mutex<PipeSlot<ChildStderr>>,
}

impl ProcessHandle {
    pub(crate) fn new(
        mut child: Child,
        command: String,
        args: Vec<String>,
        stdio: StdioSpec,
    ) -> Self {
        let pid = child.id() as OsPid;
        let stdin_pipe = PipeSlot::from_option(child.stdin.take());
        let stdout_pipe = PipeSlot::from_option(child.stdout.take());
        let stderr_pipe = PipeSlot::from_option(child.stderr.take());
        Self {
            pid,
            command,
            args,
            stdio,
            child: Mutex::new(child),
            status: Mutex::new(None),
            stdin_pipe: Mutex::new(stdin_pipe),
            stdout_pipe: Mutex::new(stdout_pipe),
            stderr_pipe: Mutex::new(stderr_pipe),
        }
    }

    /// OS process ID of the child
    ///
    /// Only a safe target for signals while the handle reports `Running`;
    /// after the reap the kernel may recycle it.
    #[inline]
    #[must_use]
    pub fn pid(&self) -> OsPid {
        self.pid
    }

    /// The spawned executable
    #[inline]
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The exact argv passed after the command
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Stream routing fixed at spawn time
    #[inline]
    #[must_use]
    pub fn stdio(&self) -> &StdioSpec {
        &self.stdio
    }

    /// Current observable status
    ///
    /// `Exited` is terminal: once returned, every later call returns the same
    /// cached value without touching the OS.
    #[must_use]
    pub fn status(&self) -> ProcessStatus {
        match *self.status.lock() {
            Some(exit) => ProcessStatus::Exited(exit),
            None => ProcessStatus::Running,
        }
    }
}
