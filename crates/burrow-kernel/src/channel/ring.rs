//! Single-producer/single-consumer byte ring shared between two threads.
//!
//! # Memory layout
//!
//! ```text
//! header: write index | read index | closed      (atomics)
//! data:   [u8; capacity]                         (atomic bytes)
//! ```
//!
//! Both indices stay in `0..capacity`. `used = (write - read) mod capacity`,
//! so at most `capacity - 1` bytes are resident: one slot stays empty to
//! tell "full" from "empty".
//!
//! The writer never blocks. A write larger than the free space is cut down
//! to fit and the excess is dropped. The reader parks on the write index
//! while the ring is empty.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use tracing::{trace, warn};

use super::InputSource;
use super::notify::Notifier;
use crate::config::MIN_CHANNEL_CAPACITY;

/// The shared region. Reach it through a [`Writer`] and a [`Reader`].
#[derive(Debug)]
pub struct SharedRing {
    write: AtomicUsize,
    read: AtomicUsize,
    closed: AtomicBool,
    data: Box<[AtomicU8]>,
    notifier: Notifier,
}

impl SharedRing {
    fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CHANNEL_CAPACITY);
        Self {
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
            data: (0..capacity).map(|_| AtomicU8::new(0)).collect(),
            notifier: Notifier::new(),
        }
    }

    /// Size of the data region. One byte of it is always reserved.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes written but not yet read.
    pub fn len(&self) -> usize {
        let cap = self.capacity();
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        (write + cap - read) % cap
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes a write could accept right now.
    pub fn available(&self) -> usize {
        self.capacity() - self.len() - 1
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Readers currently suspended waiting for data.
    pub fn parked_readers(&self) -> usize {
        self.notifier.parked()
    }

    /// Producer side: copy as much of `bytes` as fits, then wake the reader.
    fn push(&self, bytes: &[u8]) -> usize {
        if self.is_closed() {
            return 0;
        }
        let cap = self.capacity();
        let write = self.write.load(Ordering::Relaxed);
        let read = self.read.load(Ordering::Acquire);
        let available = cap - (write + cap - read) % cap - 1;
        let count = bytes.len().min(available);

        for (offset, byte) in bytes[..count].iter().enumerate() {
            self.data[(write + offset) % cap].store(*byte, Ordering::Relaxed);
        }
        self.write.store((write + count) % cap, Ordering::Release);

        if count < bytes.len() {
            warn!(
                requested = bytes.len(),
                written = count,
                "stdin channel full, write truncated"
            );
        }
        trace!(count, "channel write");
        if count > 0 {
            self.notifier.wake_all();
        }
        count
    }

    /// Consumer side: copy out up to `buf.len()` resident bytes.
    fn pop(&self, buf: &mut [u8]) -> usize {
        let cap = self.capacity();
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Relaxed);
        let count = ((write + cap - read) % cap).min(buf.len());

        for (offset, slot) in buf[..count].iter_mut().enumerate() {
            *slot = self.data[(read + offset) % cap].load(Ordering::Relaxed);
        }
        self.read.store((read + count) % cap, Ordering::Release);
        if count > 0 {
            trace!(count, "channel read");
        }
        count
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            trace!("channel closed");
            self.notifier.wake_all();
        }
    }
}

/// Create a ring of `capacity` bytes and its two endpoints.
///
/// Capacities below 2 are raised to 2.
pub fn channel(capacity: usize) -> (Writer, Reader) {
    let ring = Arc::new(SharedRing::new(capacity));
    (
        Writer {
            ring: Arc::clone(&ring),
        },
        Reader { ring },
    )
}

/// Producer endpoint. Dropping it closes the channel.
#[derive(Debug)]
pub struct Writer {
    ring: Arc<SharedRing>,
}

impl Writer {
    /// Enqueue text. Returns how many bytes were accepted.
    pub fn write(&mut self, text: &str) -> usize {
        self.ring.push(text.as_bytes())
    }

    /// Enqueue bytes. Returns how many bytes were accepted; the rest were
    /// dropped because the ring was full.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        self.ring.push(bytes)
    }

    /// Signal end of input. Bytes already written stay readable.
    pub fn close(&mut self) {
        self.ring.close();
    }

    /// The shared ring, for inspection.
    pub fn ring(&self) -> &SharedRing {
        &self.ring
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        self.ring.close();
    }
}

/// Consumer endpoint.
#[derive(Debug)]
pub struct Reader {
    ring: Arc<SharedRing>,
}

impl Reader {
    /// Copy out whatever is resident without waiting. Returns 0 if empty.
    pub fn try_read(&mut self, buf: &mut [u8]) -> usize {
        self.ring.pop(buf)
    }

    /// The shared ring, for inspection.
    pub fn ring(&self) -> &SharedRing {
        &self.ring
    }
}

impl InputSource for Reader {
    /// Wait until at least one byte is resident, then copy out up to
    /// `buf.len()` bytes. Returns 0 only once the channel is closed and
    /// drained (or for an empty `buf`).
    fn read(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        loop {
            let count = self.ring.pop(buf);
            if count > 0 {
                return count;
            }
            if self.ring.is_closed() {
                // Bytes written just before close are still owed.
                return self.ring.pop(buf);
            }
            let write = self.ring.write.load(Ordering::Acquire);
            if write != self.ring.read.load(Ordering::Relaxed) {
                continue;
            }
            self.ring.notifier.wait(&self.ring.write, write, &self.ring.closed);
        }
    }
}
