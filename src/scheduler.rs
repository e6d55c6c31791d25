use std::time::{Duration, Instant};

use log::debug;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct PeriodicTask {
    id: u64,
    interval: Duration,
    next_due: Instant,
}

/// Cancellable fixed-period tick driver polled by the main loop.
///
/// At most one periodic task exists at a time. [`start`](TickScheduler::start)
/// cancels the running task before installing the new one, so an interval
/// change can never leave two tick streams alive.
#[derive(Debug, Default)]
pub struct TickScheduler {
    active: Option<PeriodicTask>,
    next_id: u64,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any running task with one firing every `interval` from `now`.
    ///
    /// Returns the id of the new task.
    pub fn start(&mut self, interval: Duration, now: Instant) -> u64 {
        debug_assert!(!interval.is_zero());
        self.cancel();

        self.next_id += 1;
        let task = PeriodicTask {
            id: self.next_id,
            interval,
            next_due: now + interval,
        };
        debug!("tick task {} started at {interval:?}", task.id);
        self.active = Some(task);
        task.id
    }

    /// Stops the running task. Returns false when nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(task) => {
                debug!("tick task {} cancelled", task.id);
                true
            }
            None => false,
        }
    }

    /// Consumes one due tick, if any.
    ///
    /// Fires at most once per call. When the caller has fallen more than a
    /// whole interval behind, missed ticks are dropped instead of replayed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        let Some(task) = self.active.as_mut() else {
            return false;
        };

        if now < task.next_due {
            return false;
        }

        task.next_due += task.interval;
        if task.next_due <= now {
            task.next_due = now + task.interval;
        }
        true
    }

    /// Time left until the next tick, zero when one is already due.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.active
            .map(|task| task.next_due.saturating_duration_since(now))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.active.map(|task| task.interval)
    }

    #[must_use]
    pub fn task_id(&self) -> Option<u64> {
        self.active.map(|task| task.id)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickScheduler;

    const INTERVAL: Duration = Duration::from_millis(200);

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.start(INTERVAL, t0);

        assert!(!scheduler.take_due(t0 + Duration::from_millis(199)));
        assert!(scheduler.take_due(t0 + INTERVAL));
        assert!(!scheduler.take_due(t0 + INTERVAL));
        assert!(scheduler.take_due(t0 + INTERVAL * 2));
    }

    #[test]
    fn restart_replaces_the_running_task() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        let first = scheduler.start(INTERVAL, t0);

        let later = t0 + Duration::from_millis(150);
        let second = scheduler.start(Duration::from_millis(100), later);

        assert_ne!(first, second);
        assert_eq!(scheduler.task_id(), Some(second));
        assert_eq!(scheduler.interval(), Some(Duration::from_millis(100)));
        // The old stream would have fired at t0 + 200ms; the new one fires at 250ms.
        assert!(!scheduler.take_due(t0 + INTERVAL));
        assert!(scheduler.take_due(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn cancel_stops_ticking() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.start(INTERVAL, t0);

        assert!(scheduler.cancel());
        assert!(!scheduler.cancel());
        assert!(!scheduler.is_running());
        assert!(!scheduler.take_due(t0 + INTERVAL * 10));
        assert_eq!(scheduler.time_until_next(t0), None);
    }

    #[test]
    fn late_poll_does_not_burst() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.start(INTERVAL, t0);

        let late = t0 + INTERVAL * 5;
        assert!(scheduler.take_due(late));
        assert!(!scheduler.take_due(late));
        assert_eq!(scheduler.time_until_next(late), Some(INTERVAL));
    }
}
