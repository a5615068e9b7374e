use std::time::{Duration, Instant};

/// Identifies a timer of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum TimerId {
    /// Gravity: moves the falling piece down one row.
    Fall,
    /// Automated player: performs one actuation step.
    Actuate,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    id: TimerId,
    interval: Duration,
    next_at: Instant,
}

/// Schedules named periodic timers.
///
/// Time is passed in explicitly, so the scheduler never reads the clock by
/// itself. At most one timer fires per [`poll`](Self::poll); when several are
/// due, the one with the earliest deadline fires first and the others stay
/// due for the next poll.
///
/// # Pausing
///
/// [`pause`](Self::pause) suspends every timer. [`resume`](Self::resume)
/// restarts each timer with its full interval; elapsed time from before the
/// pause is not carried over.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use autotris_runtime::{TickScheduler, TimerId};
///
/// let start = Instant::now();
/// let mut scheduler = TickScheduler::new();
/// scheduler.set_timer(TimerId::Fall, Some(Duration::from_millis(100)), start);
///
/// assert_eq!(scheduler.poll(start), None);
/// assert_eq!(
///     scheduler.poll(start + Duration::from_millis(100)),
///     Some(TimerId::Fall)
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    timers: Vec<Timer>,
    paused: bool,
}

impl TickScheduler {
    /// Shortest accepted timer interval.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets, changes or removes (`None`) the interval of a timer.
    ///
    /// A new timer first fires one interval after `now`. Changing the interval
    /// of an existing timer keeps its pending deadline; the new interval
    /// applies from the following tick. Intervals shorter than
    /// [`Self::MIN_INTERVAL`] are raised to it.
    pub fn set_timer(&mut self, id: TimerId, interval: Option<Duration>, now: Instant) {
        let interval = interval.map(|interval| interval.max(Self::MIN_INTERVAL));
        let existing = self.timers.iter().position(|timer| timer.id == id);
        match (existing, interval) {
            (Some(index), Some(interval)) => self.timers[index].interval = interval,
            (Some(index), None) => {
                self.timers.remove(index);
            }
            (None, Some(interval)) => self.timers.push(Timer {
                id,
                interval,
                next_at: now + interval,
            }),
            (None, None) => {}
        }
    }

    /// Returns the interval of a timer, if it is set.
    #[must_use]
    pub fn interval(&self, id: TimerId) -> Option<Duration> {
        self.timers
            .iter()
            .find(|timer| timer.id == id)
            .map(|timer| timer.interval)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        for timer in &mut self.timers {
            timer.next_at = now + timer.interval;
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the earliest pending deadline, or `None` when paused or idle.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.paused {
            return None;
        }
        self.timers.iter().map(|timer| timer.next_at).min()
    }

    /// Fires the most overdue timer, if any is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TimerId> {
        if self.paused {
            return None;
        }
        let timer = self
            .timers
            .iter_mut()
            .filter(|timer| timer.next_at <= now)
            .min_by_key(|timer| timer.next_at)?;
        timer.next_at = now + timer.interval;
        Some(timer.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_timer_fires_each_interval() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.set_timer(TimerId::Fall, Some(100 * MS), t0);

        assert_eq!(scheduler.next_deadline(), Some(t0 + 100 * MS));
        assert_eq!(scheduler.poll(t0 + 99 * MS), None);
        assert_eq!(scheduler.poll(t0 + 100 * MS), Some(TimerId::Fall));
        assert_eq!(scheduler.poll(t0 + 100 * MS), None);
        assert_eq!(scheduler.poll(t0 + 200 * MS), Some(TimerId::Fall));
    }

    #[test]
    fn test_one_event_per_poll() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.set_timer(TimerId::Fall, Some(100 * MS), t0);
        scheduler.set_timer(TimerId::Actuate, Some(30 * MS), t0);

        let now = t0 + 120 * MS;
        assert_eq!(scheduler.poll(now), Some(TimerId::Actuate));
        assert_eq!(scheduler.poll(now), Some(TimerId::Fall));
        assert_eq!(scheduler.poll(now), None);
    }

    #[test]
    fn test_pause_suspends_all_timers() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.set_timer(TimerId::Fall, Some(100 * MS), t0);
        scheduler.set_timer(TimerId::Actuate, Some(50 * MS), t0);

        scheduler.pause();
        assert!(scheduler.is_paused());
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.poll(t0 + 1000 * MS), None);
    }

    #[test]
    fn test_resume_waits_full_interval() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.set_timer(TimerId::Fall, Some(100 * MS), t0);

        // Time elapsed before and during the pause is not carried over.
        scheduler.pause();
        let resumed = t0 + 500 * MS;
        scheduler.resume(resumed);
        assert_eq!(scheduler.poll(resumed + 10 * MS), None);
        assert_eq!(scheduler.poll(resumed + 99 * MS), None);
        assert_eq!(scheduler.poll(resumed + 100 * MS), Some(TimerId::Fall));
    }

    #[test]
    fn test_interval_change_applies_from_next_tick() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.set_timer(TimerId::Fall, Some(100 * MS), t0);
        scheduler.set_timer(TimerId::Fall, Some(40 * MS), t0 + 10 * MS);

        assert_eq!(scheduler.interval(TimerId::Fall), Some(40 * MS));
        assert_eq!(scheduler.poll(t0 + 50 * MS), None);
        assert_eq!(scheduler.poll(t0 + 100 * MS), Some(TimerId::Fall));
        assert_eq!(scheduler.poll(t0 + 139 * MS), None);
        assert_eq!(scheduler.poll(t0 + 140 * MS), Some(TimerId::Fall));
    }

    #[test]
    fn test_zero_interval_does_not_fire_every_poll() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.set_timer(TimerId::Actuate, Some(Duration::ZERO), t0);
        assert_eq!(
            scheduler.interval(TimerId::Actuate),
            Some(TickScheduler::MIN_INTERVAL)
        );

        let now = t0 + 10 * MS;
        let fired = (0..10_000)
            .filter(|_| scheduler.poll(now).is_some())
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_remove_timer() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.set_timer(TimerId::Actuate, Some(10 * MS), t0);
        scheduler.set_timer(TimerId::Actuate, None, t0);
        assert_eq!(scheduler.interval(TimerId::Actuate), None);
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.poll(t0 + 100 * MS), None);
    }
}
