//! Byte streams feeding the shell's standard input.
//!
//! The session reads through [`InputSource`]. Two sources exist:
//!
//! - [`Reader`]: the consumer end of a [`SharedRing`], fed by a [`Writer`]
//!   on another thread. This is the only cross-thread boundary in burrow.
//! - [`QueueSource`]: an in-process byte queue, for tests and scripts.

mod notify;
mod queue;
mod ring;

pub use queue::QueueSource;
pub use ring::{Reader, SharedRing, Writer, channel};

/// A blocking byte source.
pub trait InputSource {
    /// Block until at least one byte is available and copy up to
    /// `buf.len()` bytes into `buf`. Returns 0 at end of input.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Read one byte, or `None` at end of input.
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.read(&mut byte) {
            0 => None,
            _ => Some(byte[0]),
        }
    }

    /// Read up to and excluding the next line feed. Carriage returns are
    /// dropped. A final unterminated line is still returned; `None` means
    /// the input was already exhausted.
    fn read_line(&mut self) -> Option<String> {
        let mut line = Vec::new();
        loop {
            match self.read_byte() {
                Some(b'\n') => break,
                Some(b'\r') => {}
                Some(byte) => line.push(byte),
                None if line.is_empty() => return None,
                None => break,
            }
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}
