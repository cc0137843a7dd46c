/*!
 * Process Engine Library
 * Child-process lifecycle and non-blocking I/O for a managing runtime
 */

pub mod core;
pub mod process;
pub mod signals;

// Re-exports
pub use process::registry::ProcessRegistry;
pub use process::spawn::spawn;
pub use process::{
    ExitStatus, PipeError, PipeResult, PipeStream, ProcessError, ProcessHandle, ProcessResult,
    ProcessStatus, ReadOutcome, SpawnConfig, StdioConfig, StdioSpec, WriteOutcome,
};
pub use signals::{Signal, SignalError, SignalResult};
