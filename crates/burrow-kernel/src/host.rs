//! The syscall surface the kernel presents to its host.
//!
//! burrow runs as if it were a small program under a POSIX-like host:
//!
//! | Call                | Behaviour                                         |
//! |---------------------|---------------------------------------------------|
//! | `fd_read(0, ..)`    | blocking read from the stdin [`InputSource`]      |
//! | `fd_write(1\|2, ..)`| forwarded as a `Stdout` / `Stderr` message        |
//! | `proc_exit(code)`   | forwarded as an `Exit` message                    |
//! | `clock_time_get`    | host-provided clock                               |
//! | `random_get`        | host-provided random bytes                        |
//! | `args_get`, `environ_get`, `path_open`, `path_filestat_get` | `ENOSYS` |
//!
//! Files are only ever reached through [`crate::vfs::FileSystem`], never
//! through path syscalls.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use crate::channel::InputSource;
use crate::shell::OutputSink;

/// Standard input descriptor.
pub const STDIN: u32 = 0;
/// Standard output descriptor.
pub const STDOUT: u32 = 1;
/// Standard error descriptor.
pub const STDERR: u32 = 2;

/// What the kernel tells the UI side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
    /// The shell is waiting for a line; render this prompt.
    Prompt(String),
    /// The kernel finished with this exit code.
    Exit(u8),
}

/// Syscall failures, with WASI errno numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Errno {
    #[error("bad file descriptor")]
    BadF,

    #[error("function not implemented")]
    NoSys,

    #[error("broken pipe")]
    Pipe,
}

impl Errno {
    /// Numeric errno as a WASI host would report it.
    pub fn code(self) -> u16 {
        match self {
            Errno::BadF => 8,
            Errno::NoSys => 52,
            Errno::Pipe => 64,
        }
    }
}

type Clock = Box<dyn Fn() -> u64 + Send>;
type Random = Box<dyn FnMut(&mut [u8]) + Send>;

/// The syscall table: stdin source, outbound message queue, and the
/// host-provided clock and random source.
pub struct Syscalls<I> {
    stdin: I,
    messages: UnboundedSender<HostMessage>,
    clock: Clock,
    random: Random,
}

impl<I: InputSource> Syscalls<I> {
    /// Wire stdin to `stdin` and everything outbound to `messages`.
    ///
    /// The clock defaults to wall-clock nanoseconds and the random source
    /// to a xorshift stream seeded from it.
    pub fn new(stdin: I, messages: UnboundedSender<HostMessage>) -> Self {
        let mut state = wall_clock_ns() | 1;
        Self {
            stdin,
            messages,
            clock: Box::new(wall_clock_ns),
            random: Box::new(move |buf: &mut [u8]| {
                for byte in buf.iter_mut() {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    *byte = state as u8;
                }
            }),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl Fn() -> u64 + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the random source.
    pub fn with_random(mut self, random: impl FnMut(&mut [u8]) + Send + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    /// Read from a descriptor. Only stdin is readable; this blocks until
    /// input arrives or the source ends (0).
    pub fn fd_read(&mut self, fd: u32, buf: &mut [u8]) -> Result<usize, Errno> {
        match fd {
            STDIN => Ok(self.stdin.read(buf)),
            _ => Err(Errno::BadF),
        }
    }

    /// Write to stdout or stderr by forwarding a message.
    pub fn fd_write(&mut self, fd: u32, bytes: &[u8]) -> Result<usize, Errno> {
        let message = match fd {
            STDOUT => HostMessage::Stdout(bytes.to_vec()),
            STDERR => HostMessage::Stderr(bytes.to_vec()),
            _ => return Err(Errno::BadF),
        };
        self.send(message)?;
        Ok(bytes.len())
    }

    /// Report the final exit code.
    pub fn proc_exit(&mut self, code: u8) -> Result<(), Errno> {
        trace!(code, "proc_exit");
        self.send(HostMessage::Exit(code))
    }

    /// Current time in nanoseconds, as the host reports it.
    pub fn clock_time_get(&self) -> u64 {
        (self.clock)()
    }

    /// Fill `buf` from the host's random source.
    pub fn random_get(&mut self, buf: &mut [u8]) {
        (self.random)(buf);
    }

    /// Program arguments are not provided.
    pub fn args_get(&self) -> Result<Vec<String>, Errno> {
        Err(Errno::NoSys)
    }

    /// The environment is not provided.
    pub fn environ_get(&self) -> Result<Vec<(String, String)>, Errno> {
        Err(Errno::NoSys)
    }

    /// Path-based opens are not supported; use the VFS.
    pub fn path_open(&self, _path: &str) -> Result<u32, Errno> {
        Err(Errno::NoSys)
    }

    /// Path-based stat is not supported; use the VFS.
    pub fn path_filestat_get(&self, _path: &str) -> Result<u64, Errno> {
        Err(Errno::NoSys)
    }

    fn send(&self, message: HostMessage) -> Result<(), Errno> {
        self.messages.send(message).map_err(|_| Errno::Pipe)
    }
}

fn wall_clock_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

impl<I: InputSource> InputSource for Syscalls<I> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        self.fd_read(STDIN, buf).unwrap_or(0)
    }
}

impl<I: InputSource> OutputSink for Syscalls<I> {
    fn stdout(&mut self, bytes: &[u8]) {
        if let Err(e) = self.fd_write(STDOUT, bytes) {
            trace!(error = %e, "stdout dropped");
        }
    }

    fn stderr(&mut self, bytes: &[u8]) {
        if let Err(e) = self.fd_write(STDERR, bytes) {
            trace!(error = %e, "stderr dropped");
        }
    }

    fn prompt(&mut self, prompt: &str) {
        if let Err(e) = self.send(HostMessage::Prompt(prompt.to_string())) {
            trace!(error = %e, "prompt dropped");
        }
    }
}
