#![forbid(unsafe_code)]

//! Declarative interval subscriptions.
//!
//! The model declares the timers it needs from `subscriptions()`; after every
//! update the runtime reconciles that set against what is running, starting
//! new timers and stopping removed ones. A timer therefore cannot outlive the
//! view that declared it — teardown is the reconcile pass, not garbage
//! collection.
//!
//! Each running subscription owns a worker thread parked on a condition
//! variable, so stopping is immediate rather than waiting out the interval.

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

/// Stable identifier for deduplicating subscriptions across updates.
pub type SubId = u64;

/// An event source that feeds messages into the update loop.
pub trait Subscription<M: Send + 'static>: Send {
    /// Identifier used by the reconciler; equal ids mean "same timer, keep
    /// it running".
    fn id(&self) -> SubId;

    /// Run on a worker thread, sending messages until stopped or the
    /// receiver is dropped.
    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal);
}

/// Cooperative stop flag checked by subscription workers.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    fn pair() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            StopTrigger { inner },
        )
    }

    /// Whether stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        lock.lock().map(|g| *g).unwrap_or(true)
    }

    /// Block for up to `timeout`; returns `true` if stopped, `false` on
    /// timeout. Spurious wakeups re-wait for the remaining time.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let Ok(mut stopped) = lock.lock() else {
            return true;
        };
        let start = std::time::Instant::now();
        loop {
            if *stopped {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return false;
            }
            match cvar.wait_timeout(stopped, timeout - elapsed) {
                Ok((guard, _)) => stopped = guard,
                Err(_) => return true,
            }
        }
    }
}

/// Runtime-side handle that flips the matching [`StopSignal`].
struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        if let Ok(mut stopped) = lock.lock() {
            *stopped = true;
        }
        cvar.notify_all();
    }
}

struct RunningSub {
    id: SubId,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningSub {
    fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RunningSub {
    fn drop(&mut self) {
        // Signal without joining; joining in drop could block shutdown.
        self.trigger.stop();
    }
}

/// Owns the running subscriptions for a program.
pub struct SubscriptionManager<M: Send + 'static> {
    active: Vec<RunningSub>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> SubscriptionManager<M> {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            active: Vec::new(),
            sender,
            receiver,
        }
    }

    /// Reconcile the declared set against what is running: start new ids,
    /// stop missing ids, leave matching ids untouched.
    pub fn reconcile(&mut self, declared: Vec<Box<dyn Subscription<M>>>) {
        let wanted: HashSet<SubId> = declared.iter().map(|s| s.id()).collect();

        let mut kept = Vec::new();
        for running in self.active.drain(..) {
            if wanted.contains(&running.id) {
                kept.push(running);
            } else {
                tracing::debug!(sub_id = running.id, "stopping subscription");
                running.stop();
            }
        }
        self.active = kept;

        let mut running_ids: HashSet<SubId> = self.active.iter().map(|r| r.id).collect();
        for sub in declared {
            let id = sub.id();
            if !running_ids.insert(id) {
                continue;
            }
            tracing::debug!(sub_id = id, "starting subscription");
            let (signal, trigger) = StopSignal::pair();
            let sender = self.sender.clone();
            let thread = thread::spawn(move || sub.run(sender, signal));
            self.active.push(RunningSub {
                id,
                trigger,
                thread: Some(thread),
            });
        }
    }

    /// Collect messages produced since the last drain.
    #[must_use]
    pub fn drain(&self) -> Vec<M> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Number of running subscriptions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Stop everything (also happens on drop).
    pub fn stop_all(&mut self) {
        for running in self.active.drain(..) {
            running.stop();
        }
    }
}

impl<M: Send + 'static> Default for SubscriptionManager<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send + 'static> Drop for SubscriptionManager<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

/// Fires a message at a fixed interval.
pub struct Every<M: Send + 'static> {
    id: SubId,
    interval: Duration,
    make_msg: Box<dyn Fn() -> M + Send + Sync>,
}

impl<M: Send + 'static> Every<M> {
    /// A tick subscription with an explicit id.
    ///
    /// Ids are chosen by the caller so two views wanting the same interval
    /// stay distinct.
    pub fn new(id: SubId, interval: Duration, make_msg: impl Fn() -> M + Send + Sync + 'static) -> Self {
        Self {
            id,
            interval,
            make_msg: Box::new(make_msg),
        }
    }
}

impl<M: Send + 'static> Subscription<M> for Every<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal) {
        loop {
            if stop.wait_timeout(self.interval) {
                break;
            }
            if sender.send((self.make_msg)()).is_err() {
                break;
            }
        }
    }
}
