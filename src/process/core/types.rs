/*!
 * Process Types
 * Common types for child-process management
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Process operation result
///
/// # Must Use
/// Process operations can fail and must be handled to prevent resource leaks
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone)]
pub enum ProcessError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Stdio setup failed for {stream}: {reason}")]
    StdioSetup { stream: PipeStream, reason: String },

    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Wait failed: {0}")]
    WaitFailed(String),
}

/// Pipe operation result
pub type PipeResult<T> = Result<T, PipeError>;

/// Pipe errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipeError {
    #[error("Stream {0} is not piped")]
    NotPiped(PipeStream),

    #[error("Broken pipe: the child closed its end of {0}")]
    BrokenPipe(PipeStream),

    #[error("Pipe I/O failed on {stream}: {reason}")]
    Io { stream: PipeStream, reason: String },
}

/// The three standard streams of a child process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeStream {
    Stdin,
    Stdout,
    Stderr,
}

impl fmt::Display for PipeStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipeStream::Stdin => write!(f, "stdin"),
            PipeStream::Stdout => write!(f, "stdout"),
            PipeStream::Stderr => write!(f, "stderr"),
        }
    }
}

/// Routing for one standard stream, fixed at spawn time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdioConfig {
    /// Connect the stream to the platform null device
    Null,
    /// Create an OS pipe; the parent keeps a non-blocking end
    Pipe,
    /// Share the managing process's own descriptor
    Inherit,
    /// Connect the stream directly to a file (read for stdin,
    /// create/truncate for stdout and stderr)
    File(PathBuf),
}

impl StdioConfig {
    /// Check if runtime read/write/close operations apply to this stream
    #[inline]
    #[must_use]
    pub const fn is_pipe(&self) -> bool {
        matches!(self, StdioConfig::Pipe)
    }
}

/// Per-stream routing for all three standard streams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StdioSpec {
    pub stdin: StdioConfig,
    pub stdout: StdioConfig,
    pub stderr: StdioConfig,
}

impl StdioSpec {
    /// Get the configuration for one stream
    #[inline]
    #[must_use]
    pub fn stream(&self, stream: PipeStream) -> &StdioConfig {
        match stream {
            PipeStream::Stdin => &self.stdin,
            PipeStream::Stdout => &self.stdout,
            PipeStream::Stderr => &self.stderr,
        }
    }
}

/// Terminal status of a reaped child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExitStatus {
    /// Exit code: the child's own code for a normal exit,
    /// `128 + signal` for a signal death
    pub code: i32,
    /// True when the child was terminated by a signal
    pub via_signal: bool,
}

impl ExitStatus {
    /// Derive the engine's exit status from the OS report
    pub(crate) fn from_os(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self {
                code,
                via_signal: false,
            };
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self {
                    code: 128 + signal,
                    via_signal: true,
                };
            }
        }
        Self {
            code: -1,
            via_signal: false,
        }
    }

    /// Check for a clean zero exit
    #[inline]
    #[must_use]
    pub const fn success(&self) -> bool {
        self.code == 0
    }

    /// The terminating signal number, for signal deaths
    #[inline]
    #[must_use]
    pub const fn signal(&self) -> Option<i32> {
        if self.via_signal {
            Some(self.code - 128)
        } else {
            None
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.via_signal {
            write!(f, "killed by signal {} (code {})", self.code - 128, self.code)
        } else {
            write!(f, "exited with code {}", self.code)
        }
    }
}

/// Observable process state; monotonic from `Running` to `Exited`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// Not yet observed to have terminated
    Running,
    /// Terminated and reaped; the status is cached for all later queries
    Exited(ExitStatus),
}

impl ProcessStatus {
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, ProcessStatus::Running)
    }
}

/// Outcome of a single non-blocking read attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// One chunk of output; call again to drain more
    Data(Vec<u8>),
    /// No data available right now; the peer has not closed
    WouldBlock,
    /// The peer closed its end and no buffered data remains
    Eof,
}

/// Outcome of a single non-blocking write attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The entire payload was accepted by the kernel
    Written,
    /// Only the first `n` bytes were accepted; retry with the remainder
    Partial(usize),
    /// The pipe buffer is full; nothing was accepted
    WouldBlock,
}

/// Configuration for spawning a child process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpawnConfig {
    pub command: String,
    pub args: Vec<String>,
    pub env_vars: Vec<(String, String)>,
    pub working_dir: Option<PathBuf>,
    pub stdin: StdioConfig,
    pub stdout: StdioConfig,
    pub stderr: StdioConfig,
}

impl SpawnConfig {
    /// New configuration with inherited streams, environment, and directory
    #[inline]
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: vec![],
            env_vars: vec![],
            working_dir: None,
            stdin: StdioConfig::Inherit,
            stdout: StdioConfig::Inherit,
            stderr: StdioConfig::Inherit,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Environment overrides, merged over the inherited environment
    /// (override wins on key collision)
    #[inline]
    #[must_use]
    pub fn with_env(mut self, env_vars: Vec<(String, String)>) -> Self {
        self.env_vars = env_vars;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_stdin(mut self, config: StdioConfig) -> Self {
        self.stdin = config;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_stdout(mut self, config: StdioConfig) -> Self {
        self.stdout = config;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_stderr(mut self, config: StdioConfig) -> Self {
        self.stderr = config;
        self
    }

    /// Pipe all three streams
    #[inline]
    #[must_use]
    pub fn piped(self) -> Self {
        self.with_stdin(StdioConfig::Pipe)
            .with_stdout(StdioConfig::Pipe)
            .with_stderr(StdioConfig::Pipe)
    }

    /// The stdio routing this configuration describes
    #[inline]
    #[must_use]
    pub fn stdio_spec(&self) -> StdioSpec {
        StdioSpec {
            stdin: self.stdin.clone(),
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        }
    }
}
