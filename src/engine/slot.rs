// ABOUTME: First-write-wins error holder shared between batch workers
// ABOUTME: Its occupancy is the fail-fast signal checked before submitting or running work

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Holds the first error offered to it. Later offers are dropped.
#[derive(Debug)]
pub struct ErrorSlot<E> {
    occupied: AtomicBool,
    value: Mutex<Option<E>>,
}

impl<E> ErrorSlot<E> {
    pub fn new() -> Self {
        Self {
            occupied: AtomicBool::new(false),
            value: Mutex::new(None),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied.load(Ordering::Acquire)
    }

    /// Store `error` if the slot is empty. Returns whether it was stored.
    pub fn offer(&self, error: E) -> bool {
        let mut value = self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if value.is_some() {
            return false;
        }

        *value = Some(error);
        self.occupied.store(true, Ordering::Release);
        true
    }

    /// Take the stored error, if any
    pub fn take(&self) -> Option<E> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}

impl<E> Default for ErrorSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}
