/*!
 * Process Spawner
 * Stdio wiring and OS-level child creation
 */

use super::core::{PipeStream, ProcessError, ProcessResult, SpawnConfig, StdioConfig};
use super::handle::ProcessHandle;
use crate::signals::disposition::ensure_default_dispositions;
use log::{error, info};
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use std::fs::File;
use std::os::unix::io::AsRawFd;
use std::process::{Child, Command, Stdio};

#[cfg(target_os = "linux")]
use std::os::unix::process::CommandExt;

/// Spawn a child process with the configured stream routing
///
/// The command is executed directly with its exact argv; nothing is passed
/// through a shell. Environment overrides merge over the inherited
/// environment and the working directory is inherited unless set. On any
/// failure no child is left running and no descriptors leak.
pub fn spawn(config: SpawnConfig) -> ProcessResult<ProcessHandle> {
    ensure_default_dispositions();

    if config.command.trim().is_empty() {
        return Err(ProcessError::InvalidCommand("empty command".to_string()));
    }

    let mut command = Command::new(&config.command);
    command.args(&config.args);

    // Merged over the inherited environment; override wins on collision.
    for (key, value) in &config.env_vars {
        command.env(key, value);
    }

    if let Some(ref dir) = config.working_dir {
        command.current_dir(dir);
    }

    command.stdin(stdio_for(PipeStream::Stdin, &config.stdin)?);
    command.stdout(stdio_for(PipeStream::Stdout, &config.stdout)?);
    command.stderr(stdio_for(PipeStream::Stderr, &config.stderr)?);

    // The child must not outlive a crashed manager.
    #[cfg(target_os = "linux")]
    unsafe {
        command.pre_exec(|| {
            nix::sys::prctl::set_pdeathsig(nix::sys::signal::Signal::SIGKILL)
                .map_err(std::io::Error::from)
        });
    }

    let mut child = command
        .spawn()
        .map_err(|e| ProcessError::SpawnFailed(format!("{}: {}", config.command, e)))?;

    let pid = child.id();

    if let Err(e) = configure_pipe_ends(&child) {
        error!("Killing PID {} after pipe setup failure: {}", pid, e);
        let _ = child.kill();
        let _ = child.wait();
        return Err(e);
    }

    info!("Spawned '{}' (PID {})", config.command, pid);

    let stdio = config.stdio_spec();
    Ok(ProcessHandle::new(child, config.command, config.args, stdio))
}

/// Translate one stream's configuration into the descriptor setup for the child
fn stdio_for(stream: PipeStream, config: &StdioConfig) -> ProcessResult<Stdio> {
    match config {
        StdioConfig::Null => Ok(Stdio::null()),
        StdioConfig::Pipe => Ok(Stdio::piped()),
        StdioConfig::Inherit => Ok(Stdio::inherit()),
        StdioConfig::File(path) => {
            let file = match stream {
                PipeStream::Stdin => File::open(path),
                PipeStream::Stdout | PipeStream::Stderr => File::create(path),
            }
            .map_err(|e| ProcessError::StdioSetup {
                stream,
                reason: format!("{}: {}", path.display(), e),
            })?;
            Ok(Stdio::from(file))
        }
    }
}

/// Switch every retained parent-side pipe end to non-blocking mode
fn configure_pipe_ends(child: &Child) -> ProcessResult<()> {
    if let Some(ref stdin) = child.stdin {
        set_nonblocking(stdin).map_err(|e| ProcessError::StdioSetup {
            stream: PipeStream::Stdin,
            reason: e.to_string(),
        })?;
    }
    if let Some(ref stdout) = child.stdout {
        set_nonblocking(stdout).map_err(|e| ProcessError::StdioSetup {
            stream: PipeStream::Stdout,
            reason: e.to_string(),
        })?;
    }
    if let Some(ref stderr) = child.stderr {
        set_nonblocking(stderr).map_err(|e| ProcessError::StdioSetup {
            stream: PipeStream::Stderr,
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

/// Set O_NONBLOCK on a descriptor, preserving its other flags
fn set_nonblocking<T: AsRawFd>(stream: &T) -> nix::Result<()> {
    let fd = stream.as_raw_fd();
    let flags = fcntl(fd, FcntlArg::F_GETFL)?;
    fcntl(
        fd,
        FcntlArg::F_SETFL(OFlag::from_bits_truncate(flags) | OFlag::O_NONBLOCK),
    )?;
    Ok(())
}
