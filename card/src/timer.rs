use std::time::Duration;

/// Handle of a scheduled one-shot task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

/// One-shot tasks on a virtual clock.
///
/// Time only moves through [`Timers::advance`], so the front end feeds it
/// wall-clock frame time while tests can jump straight past a deadline.
/// Scheduled tasks can't be cancelled: every one of them fires exactly once.
#[derive(Debug)]
pub struct Timers<T> {
    now: Duration,
    next_id: u64,
    // sorted by (due, id)
    queue: Vec<Scheduled<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: Vec::new(),
        }
    }
}

impl<T> Timers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = self.now + delay;
        // ids grow monotonically, so equal deadlines keep scheduling order
        let index = self.queue.partition_point(|s| s.due <= due);
        self.queue.insert(index, Scheduled { id, due, task });

        id
    }

    /// Moves the clock forward and returns every task that became due,
    /// earliest first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TimerId, T)> {
        self.now += elapsed;

        let ready = self.queue.partition_point(|s| s.due <= self.now);
        self.queue
            .drain(..ready)
            .map(|scheduled| (scheduled.id, scheduled.task))
            .collect()
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.iter().any(|s| s.id == id)
    }

    /// Time left until the next task fires.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.first().map(|s| s.due.saturating_sub(self.now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tasks(fired: Vec<(TimerId, &'static str)>) -> Vec<&'static str> {
        fired.into_iter().map(|(_, task)| task).collect()
    }

    #[test]
    fn fires_only_when_due() {
        let mut timers = Timers::new();
        let id = timers.schedule(Duration::from_millis(3000), "restore");

        assert!(timers.advance(Duration::from_millis(2999)).is_empty());
        assert!(timers.is_pending(id));

        assert_eq!(timers.advance(Duration::from_millis(1)), vec![(id, "restore")]);
        assert!(!timers.is_pending(id));
        assert_eq!(timers.now(), Duration::from_millis(3000));
    }

    #[test]
    fn fires_once() {
        let mut timers = Timers::new();
        timers.schedule(Duration::from_millis(100), "capture");

        assert_eq!(tasks(timers.advance(Duration::from_secs(10))), vec!["capture"]);
        assert!(timers.advance(Duration::from_secs(10)).is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn earliest_first_then_scheduling_order() {
        let mut timers = Timers::new();
        timers.schedule(Duration::from_millis(3000), "restore");
        timers.schedule(Duration::from_millis(100), "capture");
        timers.schedule(Duration::from_millis(100), "capture again");

        assert_eq!(
            tasks(timers.advance(Duration::from_secs(5))),
            vec!["capture", "capture again", "restore"]
        );
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut timers = Timers::new();
        timers.advance(Duration::from_millis(500));
        timers.schedule(Duration::from_millis(100), "late");

        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(100)));
        assert!(timers.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(tasks(timers.advance(Duration::from_millis(1))), vec!["late"]);
        assert_eq!(timers.next_deadline(), None);
    }
}
