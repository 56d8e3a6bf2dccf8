use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::time::{MonotonicClock, TimeSource};

use super::source::{PollCallback, PollSource, PollSubscription};

/// Poll source backed by a dedicated thread.
///
/// The thread sleeps on a channel until the next deadline, so cancellation
/// wakes it immediately instead of waiting out the cadence.
#[derive(Debug, Clone)]
pub struct ThreadPollSource<C: TimeSource + Clone = MonotonicClock> {
    clock: C,
    thread_name: String,
}

impl ThreadPollSource<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for ThreadPollSource<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TimeSource + Clone> ThreadPollSource<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            thread_name: "strobe-poll".to_string(),
        }
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

impl<C: TimeSource + Clone> PollSource for ThreadPollSource<C> {
    type Subscription = ThreadSubscription;

    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn subscribe(&mut self, cadence: Duration, mut callback: PollCallback) -> Result<ThreadSubscription> {
        let cadence = cadence.max(Duration::from_micros(100));
        let clock = self.clock.clone();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = std::thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || {
                log::debug!("poll thread running every {cadence:?}");
                let mut deadline = Instant::now() + cadence;

                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    callback(clock.now());

                    // Re-base after a stall instead of firing a burst of polls.
                    let now = Instant::now();
                    deadline += cadence;
                    if deadline <= now {
                        deadline = now + cadence;
                    }
                }

                log::debug!("poll thread exiting");
            })
            .context("failed to spawn poll thread")?;

        Ok(ThreadSubscription {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }
}

/// Subscription to a [`ThreadPollSource`]. Cancelling joins the poll thread.
#[derive(Debug)]
pub struct ThreadSubscription {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadSubscription {
    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // A send error means the thread already exited.
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("poll thread panicked");
            }
        }
    }
}

impl PollSubscription for ThreadSubscription {
    fn cancel(mut self) {
        self.shutdown();
    }
}

impl Drop for ThreadSubscription {
    fn drop(&mut self) {
        self.shutdown();
    }
}
