/*!
 * Pipe I/O
 * Single-attempt non-blocking read/write/close over piped streams
 */

use super::core::{PipeError, PipeResult, PipeStream, ReadOutcome, WriteOutcome};
use super::handle::{PipeSlot, ProcessHandle};
use crate::core::limits::PIPE_READ_CHUNK;
use log::debug;
use std::io::{self, Read, Write};

impl ProcessHandle {
    /// One non-blocking read attempt from the child's stdout
    ///
    /// Returns at most one chunk of `PIPE_READ_CHUNK` bytes; callers drain
    /// larger output by reading repeatedly. Content is raw bytes, not
    /// assumed to be valid text.
    pub fn read_stdout(&self) -> PipeResult<ReadOutcome> {
        read_slot(PipeStream::Stdout, &mut self.stdout_pipe.lock())
    }

    /// One non-blocking read attempt from the child's stderr
    pub fn read_stderr(&self) -> PipeResult<ReadOutcome> {
        read_slot(PipeStream::Stderr, &mut self.stderr_pipe.lock())
    }

    /// One non-blocking write attempt to the child's stdin
    ///
    /// `Partial(n)` means the kernel accepted only the first `n` bytes;
    /// retry with the remainder. A child that closed its read end (or
    /// exited) yields `BrokenPipe` as an ordinary error.
    pub fn write_stdin(&self, data: &[u8]) -> PipeResult<WriteOutcome> {
        let mut slot = self.stdin_pipe.lock();
        let pipe = match &mut *slot {
            PipeSlot::Open(pipe) => pipe,
            PipeSlot::Closed => return Err(PipeError::BrokenPipe(PipeStream::Stdin)),
            PipeSlot::Absent => return Err(PipeError::NotPiped(PipeStream::Stdin)),
        };
        match pipe.write(data) {
            Ok(n) if n == data.len() => Ok(WriteOutcome::Written),
            Ok(n) => Ok(WriteOutcome::Partial(n)),
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => Ok(WriteOutcome::WouldBlock),
            Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => {
                Err(PipeError::BrokenPipe(PipeStream::Stdin))
            }
            Err(e) => Err(PipeError::Io {
                stream: PipeStream::Stdin,
                reason: e.to_string(),
            }),
        }
    }

    /// Close the parent-side descriptor for one stream
    ///
    /// Closing stdin signals end-of-input to the child; closing stdout or
    /// stderr makes the child's next write to that stream a broken-pipe
    /// condition. Closing an already-closed stream is a no-op; afterwards
    /// reads report `Eof` and writes report `BrokenPipe`.
    pub fn close(&self, stream: PipeStream) -> PipeResult<()> {
        let result = match stream {
            PipeStream::Stdin => close_slot(stream, &mut self.stdin_pipe.lock()),
            PipeStream::Stdout => close_slot(stream, &mut self.stdout_pipe.lock()),
            PipeStream::Stderr => close_slot(stream, &mut self.stderr_pipe.lock()),
        };
        if result.is_ok() {
            debug!("Closed {} for PID {}", stream, self.pid());
        }
        result
    }
}

fn read_slot<T: Read>(stream: PipeStream, slot: &mut PipeSlot<T>) -> PipeResult<ReadOutcome> {
    let pipe = match slot {
        PipeSlot::Open(pipe) => pipe,
        PipeSlot::Closed => return Ok(ReadOutcome::Eof),
        PipeSlot::Absent => return Err(PipeError::NotPiped(stream)),
    };
    let mut buf = [0u8; PIPE_READ_CHUNK];
    match pipe.read(&mut buf) {
        Ok(0) => Ok(ReadOutcome::Eof),
        Ok(n) => Ok(ReadOutcome::Data(buf[..n].to_vec())),
        Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => Ok(ReadOutcome::WouldBlock),
        Err(e) => Err(PipeError::Io {
            stream,
            reason: e.to_string(),
        }),
    }
}

fn close_slot<T>(stream: PipeStream, slot: &mut PipeSlot<T>) -> PipeResult<()> {
    match slot {
        PipeSlot::Open(_) => {
            // Replacing the slot drops the descriptor.
            *slot = PipeSlot::Closed;
            Ok(())
        }
        PipeSlot::Closed => Ok(()),
        PipeSlot::Absent => Err(PipeError::NotPiped(stream)),
    }
}
