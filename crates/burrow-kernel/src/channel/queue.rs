//! In-process input queue.

use std::collections::VecDeque;

use super::InputSource;

/// A fixed script of input bytes. Reads never block; once the queue is
/// drained every read reports end of input.
#[derive(Debug, Default, Clone)]
pub struct QueueSource {
    bytes: VecDeque<u8>,
}

impl QueueSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append more input.
    pub fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes);
    }

    /// Bytes not yet read.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&str> for QueueSource {
    fn from(text: &str) -> Self {
        Self {
            bytes: text.bytes().collect(),
        }
    }
}

impl InputSource for QueueSource {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let count = buf.len().min(self.bytes.len());
        for (slot, byte) in buf.iter_mut().zip(self.bytes.drain(..count)) {
            *slot = byte;
        }
        count
    }
}
