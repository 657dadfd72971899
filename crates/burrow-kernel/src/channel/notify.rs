//! Futex-style wait/wake on an atomic word.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};

/// Parks threads until a watched word moves away from an expected value.
///
/// The lock guards nothing but the check-then-sleep window, so a wake that
/// lands between a reader's check and its sleep is never lost.
#[derive(Debug, Default)]
pub(crate) struct Notifier {
    lock: Mutex<()>,
    cond: Condvar,
    parked: AtomicUsize,
}

impl Notifier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sleep while `word == expected` and `closed` is unset.
    pub(crate) fn wait(&self, word: &AtomicUsize, expected: usize, closed: &AtomicBool) {
        let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.parked.fetch_add(1, Ordering::SeqCst);
        while word.load(Ordering::Acquire) == expected && !closed.load(Ordering::Acquire) {
            guard = self
                .cond
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
        self.parked.fetch_sub(1, Ordering::SeqCst);
    }

    /// Wake every parked thread. Call after updating the watched word.
    pub(crate) fn wake_all(&self) {
        drop(self.lock.lock().unwrap_or_else(PoisonError::into_inner));
        self.cond.notify_all();
    }

    /// Threads currently inside `wait`.
    pub(crate) fn parked(&self) -> usize {
        self.parked.load(Ordering::SeqCst)
    }
}
