//! Carousel view-model: owns the card index and the timer loop.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::ui::mvi::Reducer;

use super::intent::CarouselIntent;
use super::reducer::{CarouselEffect, CarouselReducer};
use super::state::CarouselState;

/// View-model behind the timed carousel.
///
/// While running, one background task sleeps `interval` on the injected
/// clock and then advances the index, forever. Stopping aborts that task and
/// freezes the index; restarting waits a full fresh interval before the next
/// advance. Dropping the view-model stops it.
pub struct CarouselViewModel {
    inner: Arc<CarouselInner>,
}

struct CarouselInner {
    state: watch::Sender<CarouselState>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CarouselInner {
    fn dispatch(&self, intent: CarouselIntent) -> Option<CarouselEffect> {
        let mut effect = None;
        self.state.send_if_modified(|state| {
            let (next, next_effect) = CarouselReducer::reduce(state.clone(), intent);
            effect = next_effect;
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });
        effect
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.borrow().is_current(generation)
    }

    fn abort_task(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }
}

impl CarouselViewModel {
    /// Fails with [`Error::InvalidArgument`] for an empty `items` list or a
    /// zero `interval`.
    pub fn new(items: Vec<String>, interval: Duration, clock: Arc<dyn Clock>) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::invalid_argument(
                "carousel interval must be greater than zero",
            ));
        }
        let (state, _) = watch::channel(CarouselState::new(items)?);
        Ok(Self {
            inner: Arc::new(CarouselInner {
                state,
                clock,
                interval,
                task: Mutex::new(None),
            }),
        })
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Begin advancing. Calling it while running changes nothing.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn start(&self) {
        match self.inner.dispatch(CarouselIntent::Start) {
            Some(CarouselEffect::Schedule { generation }) => {
                tracing::info!(generation, interval = ?self.inner.interval, "carousel started");
                let task = tokio::spawn(run(
                    Arc::downgrade(&self.inner),
                    Arc::clone(&self.inner.clock),
                    self.inner.interval,
                    generation,
                ));
                if let Some(previous) = self.inner.task.lock().replace(task) {
                    previous.abort();
                }
            }
            Some(CarouselEffect::Cancel) | None => {
                tracing::debug!("carousel already running");
            }
        }
    }

    /// Stop advancing, keeping the current index. No-op when stopped.
    pub fn stop(&self) {
        match self.inner.dispatch(CarouselIntent::Stop) {
            Some(CarouselEffect::Cancel) => {
                self.inner.abort_task();
                tracing::info!(index = self.current_index(), "carousel stopped");
            }
            Some(CarouselEffect::Schedule { .. }) | None => {
                tracing::debug!("carousel already stopped");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.state.borrow().running
    }

    pub fn current_index(&self) -> usize {
        self.inner.state.borrow().current_index()
    }

    pub fn current_card(&self) -> String {
        self.inner.state.borrow().current_card().to_string()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CarouselState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselState> {
        self.inner.state.subscribe()
    }
}

impl Drop for CarouselViewModel {
    fn drop(&mut self) {
        self.inner.abort_task();
    }
}

impl std::fmt::Debug for CarouselViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselViewModel")
            .field("state", &*self.inner.state.borrow())
            .field("interval", &self.inner.interval)
            .finish_non_exhaustive()
    }
}

/// Sleep/advance loop for one run. Exits once its generation is no longer live.
async fn run(inner: Weak<CarouselInner>, clock: Arc<dyn Clock>, interval: Duration, generation: u64) {
    loop {
        clock.sleep(interval).await;

        let Some(strong) = inner.upgrade() else {
            return;
        };
        strong.dispatch(CarouselIntent::Tick { generation });
        if !strong.is_current(generation) {
            tracing::debug!(generation, "carousel loop superseded");
            return;
        }
        let index = strong.state.borrow().current_index();
        tracing::trace!(generation, index, "carousel advanced");
    }
}
