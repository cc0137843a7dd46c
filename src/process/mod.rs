/*!
 * Process Module
 * Child-process spawning, lifecycle, signaling, and pipe I/O
 */

pub mod core;
pub mod handle;
pub mod pipe;
pub mod reaper;
pub mod registry;
pub mod signal;
pub mod spawn;

// Re-export for convenience
pub use core::{
    ExitStatus, PipeError, PipeResult, PipeStream, ProcessError, ProcessResult, ProcessStatus,
    ReadOutcome, SpawnConfig, StdioConfig, StdioSpec, WriteOutcome,
};
pub use handle::ProcessHandle;
pub use registry::ProcessRegistry;
pub use spawn::spawn;
