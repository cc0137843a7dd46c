/*!
 * Signal Types
 * UNIX-style signal definitions and result types
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Signal errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalError {
    #[error("Process already exited; its PID may have been reused")]
    AlreadyExited,

    #[error("Invalid signal: {0}")]
    InvalidSignal(u32),

    #[error("Unknown signal name: {0}")]
    UnknownName(String),

    #[error("Signal not supported on this platform: {0}")]
    Unsupported(Signal),

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// UNIX-style signal numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Signal {
    /// Hangup detected on controlling terminal or death of controlling process
    SIGHUP = 1,
    /// Interrupt from keyboard (Ctrl+C)
    SIGINT = 2,
    /// Quit from keyboard (Ctrl+\)
    SIGQUIT = 3,
    /// Illegal instruction
    SIGILL = 4,
    /// Trace/breakpoint trap
    SIGTRAP = 5,
    /// Abort signal
    SIGABRT = 6,
    /// Bus error (bad memory access)
    SIGBUS = 7,
    /// Floating-point exception
    SIGFPE = 8,
    /// Kill signal (cannot be caught or ignored)
    SIGKILL = 9,
    /// User-defined signal 1
    SIGUSR1 = 10,
    /// Invalid memory reference
    SIGSEGV = 11,
    /// User-defined signal 2
    SIGUSR2 = 12,
    /// Broken pipe
    SIGPIPE = 13,
    /// Timer signal
    SIGALRM = 14,
    /// Termination signal
    SIGTERM = 15,
    /// Coprocessor stack fault
    SIGSTKFLT = 16,
    /// Child process stopped or terminated
    SIGCHLD = 17,
    /// Continue if stopped
    SIGCONT = 18,
    /// Stop process (cannot be caught or ignored)
    SIGSTOP = 19,
    /// Stop typed at terminal (Ctrl+Z)
    SIGTSTP = 20,
    /// Terminal input for background process
    SIGTTIN = 21,
    /// Terminal output for background process
    SIGTTOU = 22,
    /// Urgent condition on socket
    SIGURG = 23,
    /// CPU time limit exceeded
    SIGXCPU = 24,
    /// File size limit exceeded
    SIGXFSZ = 25,
    /// Virtual alarm clock
    SIGVTALRM = 26,
    /// Profiling timer expired
    SIGPROF = 27,
    /// Window resize signal
    SIGWINCH = 28,
    /// I/O now possible
    SIGIO = 29,
    /// Power failure
    SIGPWR = 30,
    /// Bad system call
    SIGSYS = 31,
}

impl Signal {
    /// Convert from signal number
    pub fn from_number(n: u32) -> SignalResult<Self> {
        match n {
            1 => Ok(Signal::SIGHUP),
            2 => Ok(Signal::SIGINT),
            3 => Ok(Signal::SIGQUIT),
            4 => Ok(Signal::SIGILL),
            5 => Ok(Signal::SIGTRAP),
            6 => Ok(Signal::SIGABRT),
            7 => Ok(Signal::SIGBUS),
            8 => Ok(Signal::SIGFPE),
            9 => Ok(Signal::SIGKILL),
            10 => Ok(Signal::SIGUSR1),
            11 => Ok(Signal::SIGSEGV),
            12 => Ok(Signal::SIGUSR2),
            13 => Ok(Signal::SIGPIPE),
            14 => Ok(Signal::SIGALRM),
            15 => Ok(Signal::SIGTERM),
            16 => Ok(Signal::SIGSTKFLT),
            17 => Ok(Signal::SIGCHLD),
            18 => Ok(Signal::SIGCONT),
            19 => Ok(Signal::SIGSTOP),
            20 => Ok(Signal::SIGTSTP),
            21 => Ok(Signal::SIGTTIN),
            22 => Ok(Signal::SIGTTOU),
            23 => Ok(Signal::SIGURG),
            24 => Ok(Signal::SIGXCPU),
            25 => Ok(Signal::SIGXFSZ),
            26 => Ok(Signal::SIGVTALRM),
            27 => Ok(Signal::SIGPROF),
            28 => Ok(Signal::SIGWINCH),
            29 => Ok(Signal::SIGIO),
            30 => Ok(Signal::SIGPWR),
            31 => Ok(Signal::SIGSYS),
            _ => Err(SignalError::InvalidSignal(n)),
        }
    }

    /// Convert from symbolic name
    ///
    /// Accepts the bare POSIX name ("TERM") or the prefixed form ("SIGTERM"),
    /// case-insensitively.
    pub fn from_name(name: &str) -> SignalResult<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("SIG").unwrap_or(&upper);
        match bare {
            "HUP" => Ok(Signal::SIGHUP),
            "INT" => Ok(Signal::SIGINT),
            "QUIT" => Ok(Signal::SIGQUIT),
            "ILL" => Ok(Signal::SIGILL),
            "TRAP" => Ok(Signal::SIGTRAP),
            "ABRT" => Ok(Signal::SIGABRT),
            "BUS" => Ok(Signal::SIGBUS),
            "FPE" => Ok(Signal::SIGFPE),
            "KILL" => Ok(Signal::SIGKILL),
            "USR1" => Ok(Signal::SIGUSR1),
            "SEGV" => Ok(Signal::SIGSEGV),
            "USR2" => Ok(Signal::SIGUSR2),
            "PIPE" => Ok(Signal::SIGPIPE),
            "ALRM" => Ok(Signal::SIGALRM),
            "TERM" => Ok(Signal::SIGTERM),
            "STKFLT" => Ok(Signal::SIGSTKFLT),
            "CHLD" => Ok(Signal::SIGCHLD),
            "CONT" => Ok(Signal::SIGCONT),
            "STOP" => Ok(Signal::SIGSTOP),
            "TSTP" => Ok(Signal::SIGTSTP),
            "TTIN" => Ok(Signal::SIGTTIN),
            "TTOU" => Ok(Signal::SIGTTOU),
            "URG" => Ok(Signal::SIGURG),
            "XCPU" => Ok(Signal::SIGXCPU),
            "XFSZ" => Ok(Signal::SIGXFSZ),
            "VTALRM" => Ok(Signal::SIGVTALRM),
            "PROF" => Ok(Signal::SIGPROF),
            "WINCH" => Ok(Signal::SIGWINCH),
            "IO" => Ok(Signal::SIGIO),
            "PWR" => Ok(Signal::SIGPWR),
            "SYS" => Ok(Signal::SIGSYS),
            _ => Err(SignalError::UnknownName(name.to_string())),
        }
    }

    /// Get signal number
    pub fn number(&self) -> u32 {
        *self as u32
    }

    /// Check if signal can be caught/blocked
    pub fn can_catch(&self) -> bool {
        !matches!(self, Signal::SIGKILL | Signal::SIGSTOP)
    }

    /// Check if signal is fatal by default
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Signal::SIGKILL
                | Signal::SIGTERM
                | Signal::SIGQUIT
                | Signal::SIGABRT
                | Signal::SIGSEGV
                | Signal::SIGILL
                | Signal::SIGBUS
                | Signal::SIGFPE
                | Signal::SIGSYS
        )
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Signal::SIGHUP => "Hangup",
            Signal::SIGINT => "Interrupt",
            Signal::SIGQUIT => "Quit",
            Signal::SIGILL => "Illegal instruction",
            Signal::SIGTRAP => "Trace/breakpoint trap",
            Signal::SIGABRT => "Aborted",
            Signal::SIGBUS => "Bus error",
            Signal::SIGFPE => "Floating point exception",
            Signal::SIGKILL => "Killed",
            Signal::SIGUSR1 => "User defined signal 1",
            Signal::SIGSEGV => "Segmentation fault",
            Signal::SIGUSR2 => "User defined signal 2",
            Signal::SIGPIPE => "Broken pipe",
            Signal::SIGALRM => "Alarm clock",
            Signal::SIGTERM => "Terminated",
            Signal::SIGSTKFLT => "Stack fault",
            Signal::SIGCHLD => "Child status changed",
            Signal::SIGCONT => "Continued",
            Signal::SIGSTOP => "Stopped (signal)",
            Signal::SIGTSTP => "Stopped",
            Signal::SIGTTIN => "Stopped (tty input)",
            Signal::SIGTTOU => "Stopped (tty output)",
            Signal::SIGURG => "Urgent I/O condition",
            Signal::SIGXCPU => "CPU time limit exceeded",
            Signal::SIGXFSZ => "File size limit exceeded",
            Signal::SIGVTALRM => "Virtual timer expired",
            Signal::SIGPROF => "Profiling timer expired",
            Signal::SIGWINCH => "Window size changed",
            Signal::SIGIO => "I/O possible",
            Signal::SIGPWR => "Power failure",
            Signal::SIGSYS => "Bad system call",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_from_number() {
        assert_eq!(Signal::from_number(1).unwrap(), Signal::SIGHUP);
        assert_eq!(Signal::from_number(9).unwrap(), Signal::SIGKILL);
        assert_eq!(Signal::from_number(16).unwrap(), Signal::SIGSTKFLT);
        assert_eq!(Signal::from_number(31).unwrap(), Signal::SIGSYS);
        assert!(Signal::from_number(0).is_err());
        assert!(Signal::from_number(99).is_err());
    }

    #[test]
    fn test_signal_from_name() {
        assert_eq!(Signal::from_name("KILL").unwrap(), Signal::SIGKILL);
        assert_eq!(Signal::from_name("SIGKILL").unwrap(), Signal::SIGKILL);
        assert_eq!(Signal::from_name("term").unwrap(), Signal::SIGTERM);
        assert_eq!(Signal::from_name("sigusr1").unwrap(), Signal::SIGUSR1);
        assert!(matches!(
            Signal::from_name("NOPE"),
            Err(SignalError::UnknownName(_))
        ));
    }

    #[test]
    fn test_name_number_agreement() {
        for n in 1..=31 {
            let sig = Signal::from_number(n).unwrap();
            assert_eq!(sig.number(), n);
            let name = format!("{:?}", sig);
            assert_eq!(Signal::from_name(&name).unwrap(), sig);
        }
    }

    #[test]
    fn test_signal_properties() {
        // SIGKILL and SIGSTOP cannot be caught
        assert!(!Signal::SIGKILL.can_catch());
        assert!(!Signal::SIGSTOP.can_catch());
        assert!(Signal::SIGTERM.can_catch());

        // Fatal signals
        assert!(Signal::SIGKILL.is_fatal());
        assert!(Signal::SIGSEGV.is_fatal());
        assert!(!Signal::SIGUSR1.is_fatal());
        assert!(!Signal::SIGCHLD.is_fatal());
    }
}
