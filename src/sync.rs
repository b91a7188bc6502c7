//! Synchronization primitives shared between the driver, the search and
//! the network reader.
//!
//! Provides the search stop flag and the notification queue drivers poll.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// A thread-safe stop flag for controlling search termination.
///
/// This wraps `Arc<AtomicBool>` so the search and its deadline timer can
/// share one flag.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Check if the stop flag is set.
    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Set the stop flag.
    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable FIFO of notifications.
///
/// Producers (game state, network session) push; the driver drains at its
/// own pace. Clones share the same queue.
#[derive(Debug)]
pub struct EventQueue<T>(Arc<Mutex<VecDeque<T>>>);

impl<T> EventQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        EventQueue(Arc::new(Mutex::new(VecDeque::new())))
    }

    pub fn push(&self, event: T) {
        self.0.lock().push_back(event);
    }

    /// Take the oldest pending event, if any
    pub fn pop(&self) -> Option<T> {
        self.0.lock().pop_front()
    }

    /// Take all pending events in arrival order
    pub fn drain(&self) -> Vec<T> {
        self.0.lock().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

impl<T> Clone for EventQueue<T> {
    fn clone(&self) -> Self {
        EventQueue(Arc::clone(&self.0))
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
