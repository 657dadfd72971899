//! burrow-kernel: an in-memory POSIX-like execution environment.
//!
//! This crate provides:
//!
//! - **VFS**: an inode tree with path resolution and a filesystem facade
//! - **Lexer**: whitespace/quote/backslash tokenizer for command lines
//! - **Shell**: built-in command table, dispatcher, and prompt
//! - **Channel**: single-producer/single-consumer byte ring with blocking reads
//! - **Host**: the syscall surface (stdin reads, stdout/stderr/exit messages)
//! - **Kernel**: the shell running on its own thread behind the channel
//!
//! ```no_run
//! use burrow_kernel::{KernelConfig, run_script};
//!
//! let transcript = run_script(&KernelConfig::default(), ["mkdir -p a/b", "ls a"])?;
//! assert_eq!(transcript.stdout, "b\n");
//! # Ok::<(), burrow_kernel::KernelError>(())
//! ```

pub mod channel;
pub mod config;
pub mod host;
pub mod kernel;
pub mod lexer;
pub mod session;
pub mod shell;
pub mod vfs;

pub use channel::{InputSource, QueueSource, Reader, Writer};
pub use config::{ConfigError, KernelConfig, SeedConfig, SeedFile};
pub use host::{Errno, HostMessage, Syscalls};
pub use kernel::{Kernel, KernelError, Transcript, run_script};
pub use lexer::{LexError, tokenize};
pub use shell::{CapturedOutput, OutputSink, RunState, Shell};
pub use vfs::{FileSystem, FsError, FsResult};
