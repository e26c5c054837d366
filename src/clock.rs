//! Clock capability.
//!
//! Everything time-driven in the crate waits through [`Clock::sleep`], so
//! tests can swap in [`VirtualClock`] and step time forward instantly.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::oneshot;

/// Number of cooperative yields used to let woken tasks run to their next
/// suspension point.
const SETTLE_YIELDS: usize = 16;

/// Time source that can suspend the calling task.
///
/// Dropping the returned future cancels the wait.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real time, backed by `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Manually driven clock for deterministic tests.
///
/// Time only moves when [`advance`](Self::advance) is called. Sleepers are
/// woken in deadline order and virtual `now` is moved to each deadline before
/// its sleeper is released, so a task that immediately sleeps again gets a
/// deadline measured from the moment it woke, not from the end of the
/// advance.
///
/// Only usable on a current-thread Tokio runtime (the `#[tokio::test]`
/// default). Between firings `advance` yields so the woken task can run up to
/// its next sleep; with worker threads the task may still be mid-poll when the
/// next deadline is popped, so `advance` refuses to run there.
#[derive(Debug, Default)]
pub struct VirtualClock {
    inner: Mutex<VirtualClockInner>,
}

#[derive(Debug, Default)]
struct VirtualClockInner {
    now: Duration,
    next_id: u64,
    sleepers: BTreeMap<(Duration, u64), oneshot::Sender<()>>,
}

impl VirtualClockInner {
    /// Remove the earliest live sleeper due at or before `target`.
    fn pop_due(&mut self, target: Duration) -> Option<oneshot::Sender<()>> {
        while let Some(entry) = self.sleepers.first_entry() {
            let (deadline, _) = *entry.key();
            if deadline > target {
                return None;
            }
            let tx = entry.remove();
            if tx.is_closed() {
                continue;
            }
            self.now = self.now.max(deadline);
            return Some(tx);
        }
        None
    }
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since construction.
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Sleepers still waiting (cancelled ones excluded).
    pub fn pending(&self) -> usize {
        self.inner
            .lock()
            .sleepers
            .values()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    /// Move time forward by `by`, waking every sleeper that falls due, in order.
    ///
    /// # Panics
    ///
    /// Panics unless called from a current-thread Tokio runtime, which must
    /// also be the runtime the sleeping tasks were spawned on.
    pub async fn advance(&self, by: Duration) {
        assert_current_thread();
        let target = self.now() + by;
        loop {
            settle().await;
            let due = self.inner.lock().pop_due(target);
            match due {
                Some(tx) => {
                    let _ = tx.send(());
                }
                None => break,
            }
        }
        {
            let mut inner = self.inner.lock();
            inner.now = inner.now.max(target);
        }
        settle().await;
    }
}

#[async_trait]
impl Clock for VirtualClock {
    async fn sleep(&self, duration: Duration) {
        let rx = {
            let mut inner = self.inner.lock();
            let (tx, rx) = oneshot::channel();
            if duration.is_zero() {
                let _ = tx.send(());
            } else {
                let deadline = inner.now + duration;
                let id = inner.next_id;
                inner.next_id += 1;
                inner.sleepers.insert((deadline, id), tx);
            }
            rx
        };
        let _ = rx.await;
    }
}

fn assert_current_thread() {
    let flavor = Handle::try_current().map(|handle| handle.runtime_flavor());
    assert!(
        matches!(flavor, Ok(RuntimeFlavor::CurrentThread)),
        "VirtualClock::advance requires a current-thread tokio runtime"
    );
}

async fn settle() {
    for _ in 0..SETTLE_YIELDS {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn sleeper_wakes_only_once_deadline_is_reached() {
        let clock = Arc::new(VirtualClock::new());
        let task = tokio::spawn({
            let clock = clock.clone();
            async move { clock.sleep(Duration::from_secs(2)).await }
        });

        clock.advance(Duration::from_millis(1999)).await;
        assert!(!task.is_finished());
        assert_eq!(clock.pending(), 1);

        clock.advance(Duration::from_millis(1)).await;
        assert!(task.is_finished());
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn repeated_sleeps_fire_once_per_interval() {
        let clock = Arc::new(VirtualClock::new());
        let ticks = Arc::new(AtomicUsize::new(0));
        let task = tokio::spawn({
            let clock = clock.clone();
            let ticks = ticks.clone();
            async move {
                loop {
                    clock.sleep(Duration::from_secs(1)).await;
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        clock.advance(Duration::from_millis(3500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        clock.advance(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 4);

        task.abort();
    }

    #[tokio::test]
    async fn dropped_sleepers_are_not_counted() {
        let clock = Arc::new(VirtualClock::new());
        let task = tokio::spawn({
            let clock = clock.clone();
            async move { clock.sleep(Duration::from_secs(5)).await }
        });
        clock.advance(Duration::ZERO).await;
        assert_eq!(clock.pending(), 1);

        task.abort();
        let _ = task.await;
        assert_eq!(clock.pending(), 0);

        clock.advance(Duration::from_secs(10)).await;
        assert_eq!(clock.now(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn zero_sleep_returns_immediately() {
        let clock = VirtualClock::new();
        clock.sleep(Duration::ZERO).await;
        assert_eq!(clock.pending(), 0);
    }

    #[tokio::test]
    async fn interleaved_loops_wake_in_deadline_order() {
        let clock = Arc::new(VirtualClock::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let tasks: Vec<_> = [("fast", 300u64), ("slow", 700)]
            .into_iter()
            .map(|(name, every)| {
                let clock = clock.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    loop {
                        clock.sleep(Duration::from_millis(every)).await;
                        log.lock().push((clock.now().as_millis(), name));
                    }
                })
            })
            .collect();

        clock.advance(Duration::from_millis(1500)).await;
        assert_eq!(
            *log.lock(),
            vec![
                (300, "fast"),
                (600, "fast"),
                (700, "slow"),
                (900, "fast"),
                (1200, "fast"),
                (1400, "slow"),
                (1500, "fast"),
            ]
        );

        for task in tasks {
            task.abort();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    #[should_panic(expected = "current-thread")]
    async fn advance_rejects_multi_thread_runtime() {
        VirtualClock::new().advance(Duration::from_secs(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_clock_follows_tokio_time() {
        let start = tokio::time::Instant::now();
        TokioClock.sleep(Duration::from_secs(5)).await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
