//! The Kernel — the shell running on its own thread.
//!
//! The kernel thread owns the filesystem and the shell. The host side owns
//! the producer end of the stdin ring and the receiving end of the message
//! queue:
//!
//! ```text
//!            host / UI thread                      kernel thread
//!  ┌──────────────────────────────┐     ┌──────────────────────────────┐
//!  │ send_line ──▶ Writer ═══ring═══▶ Reader ──▶ Syscalls::fd_read   │
//!  │                              │     │             │                │
//!  │ recv ◀── HostMessage ◀═══mpsc═══ Syscalls::fd_write ◀── Shell    │
//!  └──────────────────────────────┘     └──────────────────────────────┘
//! ```
//!
//! The session runs until `exit` or until the host closes input, then the
//! kernel reports `HostMessage::Exit` and the thread ends.

use std::collections::VecDeque;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{debug, warn};

use crate::channel::{Writer, channel};
use crate::config::{ConfigError, KernelConfig};
use crate::host::{HostMessage, Syscalls};
use crate::session;
use crate::shell::Shell;
use crate::vfs::FsError;

/// Failures starting or joining the kernel thread.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bootstrap filesystem: {0}")]
    Bootstrap(#[from] FsError),

    #[error("failed to spawn kernel thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("kernel thread panicked")]
    Panicked,
}

/// A running kernel and the host's ends of its two channels.
#[derive(Debug)]
pub struct Kernel {
    input: Writer,
    messages: UnboundedReceiver<HostMessage>,
    thread: Option<JoinHandle<u8>>,
}

impl Kernel {
    /// Build and seed a shell from `config` and start it on a new thread.
    pub fn spawn(config: &KernelConfig) -> Result<Self, KernelError> {
        config.validate()?;
        let shell = Shell::from_config(config)?;
        Self::spawn_shell(shell, config.channel_capacity)
    }

    /// Start an already built shell on a new thread.
    pub fn spawn_shell(mut shell: Shell, channel_capacity: usize) -> Result<Self, KernelError> {
        let (input, reader) = channel(channel_capacity);
        let (tx, messages) = unbounded_channel();

        let thread = thread::Builder::new()
            .name("burrow-kernel".to_string())
            .spawn(move || {
                let mut sys = Syscalls::new(reader, tx);
                let code = session::run(&mut shell, &mut sys);
                if let Err(e) = sys.proc_exit(code) {
                    debug!(error = %e, "host gone before exit");
                }
                code
            })
            .map_err(KernelError::Spawn)?;

        debug!(capacity = input.ring().capacity(), "kernel spawned");
        Ok(Self {
            input,
            messages,
            thread: Some(thread),
        })
    }

    /// Queue one line of input. Returns the bytes accepted, which is less
    /// than `line.len() + 1` if the ring was too full for all of it.
    ///
    /// A line that does not fit is cut on a char boundary so the `\n`
    /// still lands; a reader blocked in `read_line` always wakes.
    pub fn send_line(&mut self, line: &str) -> usize {
        let room = self.input.ring().available().saturating_sub(1);
        let mut end = line.len().min(room);
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        if end < line.len() {
            warn!(len = line.len(), kept = end, "input line cut to fit channel");
        }
        let mut text = String::with_capacity(end + 1);
        text.push_str(&line[..end]);
        text.push('\n');
        self.input.write(&text)
    }

    /// Queue raw bytes.
    pub fn send_bytes(&mut self, bytes: &[u8]) -> usize {
        self.input.write_bytes(bytes)
    }

    /// Signal end of input. The shell stops once it has drained the ring.
    pub fn close_input(&mut self) {
        self.input.close();
    }

    /// The stdin producer, for inspecting the ring.
    pub fn input(&self) -> &Writer {
        &self.input
    }

    /// Block for the next message. `None` once the kernel thread is gone
    /// and every message has been taken.
    pub fn recv_blocking(&mut self) -> Option<HostMessage> {
        self.messages.blocking_recv()
    }

    /// Take the next message if one is ready.
    pub fn try_recv(&mut self) -> Option<HostMessage> {
        self.messages.try_recv().ok()
    }

    /// Await the next message from async code.
    pub async fn recv(&mut self) -> Option<HostMessage> {
        self.messages.recv().await
    }

    /// Close input and wait for the kernel thread. Returns its exit code.
    pub fn join(mut self) -> Result<u8, KernelError> {
        self.input.close();
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| KernelError::Panicked),
            None => Err(KernelError::Panicked),
        }
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        self.input.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("kernel thread panicked");
            }
        }
    }
}

/// Everything a scripted session produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: u8,
    /// Prompts shown, in order.
    pub prompts: Vec<String>,
}

/// Run `lines` through a kernel thread, one line per prompt, then close
/// input. Returns the collected output and exit code.
///
/// Feeding one line per prompt keeps the ring from ever overflowing, however
/// long the script is.
pub fn run_script<I, S>(config: &KernelConfig, lines: I) -> Result<Transcript, KernelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kernel = Kernel::spawn(config)?;
    let mut pending: VecDeque<S> = lines.into_iter().collect();
    let mut transcript = Transcript::default();
    let mut exited = false;

    while let Some(message) = kernel.recv_blocking() {
        match message {
            HostMessage::Stdout(bytes) => transcript.stdout.push_str(&String::from_utf8_lossy(&bytes)),
            HostMessage::Stderr(bytes) => transcript.stderr.push_str(&String::from_utf8_lossy(&bytes)),
            HostMessage::Prompt(prompt) => {
                transcript.prompts.push(prompt);
                match pending.pop_front() {
                    Some(line) => {
                        kernel.send_line(line.as_ref());
                    }
                    None => kernel.close_input(),
                }
            }
            HostMessage::Exit(code) => {
                transcript.exit_code = code;
                exited = true;
                break;
            }
        }
    }

    let code = kernel.join()?;
    if !exited {
        transcript.exit_code = code;
    }
    Ok(transcript)
}
