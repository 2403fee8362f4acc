use std::time::{Duration, Instant};

use crate::session::store::SessionStore;

/// Throttle interval giving roughly 30 epochs per second.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(33);

/// Throttled driver for continuous training.
///
/// Not a thread and not a timer: the host owns the scheduling primitive
/// (frame callback, timer loop, whatever it has) and pumps `tick` as often as
/// it likes. The driver only decides whether enough time has passed since the
/// last epoch and whether the store is in the Training state. This keeps the
/// whole system single-threaded and cooperative: an epoch runs to completion
/// inside the tick that started it, so a renderer reading the network between
/// ticks never observes a half-applied weight update.
///
/// Stopping training on the store takes effect immediately: every subsequent
/// tick is a no-op, with no trailing epoch.
#[derive(Debug)]
pub struct TrainingDriver {
    interval: Duration,
    last_epoch: Option<Instant>,
}

impl TrainingDriver {
    pub fn new() -> TrainingDriver {
        TrainingDriver::with_interval(DEFAULT_INTERVAL)
    }

    /// The throttle threshold is policy, not physics; hosts with slower
    /// render loops can widen it.
    pub fn with_interval(interval: Duration) -> TrainingDriver {
        TrainingDriver { interval, last_epoch: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one epoch if the store is Training and the throttle allows it.
    /// Returns whether an epoch ran. The first tick after construction (or
    /// after `reset_clock`) is never throttled.
    pub fn tick(&mut self, store: &mut SessionStore, now: Instant) -> bool {
        if !store.is_training() {
            return false;
        }
        if let Some(last) = self.last_epoch {
            if now.duration_since(last) < self.interval {
                return false;
            }
        }
        store.train_one_epoch();
        self.last_epoch = Some(now);
        true
    }

    /// Forgets the last-epoch timestamp, so the next tick trains immediately.
    /// Call after a long pause to avoid an artificial initial delay.
    pub fn reset_clock(&mut self) {
        self.last_epoch = None;
    }
}

impl Default for TrainingDriver {
    fn default() -> Self {
        TrainingDriver::new()
    }
}
