//! Move-time budget for the search.
//!
//! `DeadlineTimer` parks a helper thread on a channel until the budget runs
//! out, then raises the search's stop flag. Dropping the timer wakes the
//! thread early and it exits without touching the flag.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::warn;

use crate::sync::StopFlag;

/// Raises a [`StopFlag`] once a move-time budget is spent.
pub struct DeadlineTimer {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DeadlineTimer {
    /// Start a timer for `budget`.
    ///
    /// A zero budget raises the flag at once and returns `None`; depth 1 of
    /// the search still completes.
    #[must_use]
    pub fn start(budget: Duration, stop_flag: StopFlag) -> Option<Self> {
        if budget.is_zero() {
            stop_flag.stop();
            return None;
        }

        let (cancel, cancelled) = mpsc::channel::<()>();
        let flag = stop_flag.clone();
        let spawned = thread::Builder::new()
            .name("search-deadline".into())
            .spawn(move || {
                if let Err(RecvTimeoutError::Timeout) = cancelled.recv_timeout(budget) {
                    flag.stop();
                }
            });

        match spawned {
            Ok(handle) => Some(DeadlineTimer {
                cancel: Some(cancel),
                handle: Some(handle),
            }),
            Err(e) => {
                warn!("could not spawn deadline timer, searching without one: {e}");
                None
            }
        }
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        // Closing the channel wakes the thread, so the join is immediate.
        self.cancel.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
