use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::{TickScheduler, event::TuiEvent};

/// Event loop state management.
///
/// Owns the timer scheduler and returns the next event via `next()`. Timer
/// ticks take precedence over renders, renders over terminal input. The
/// screen is redrawn once after every tick or terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    scheduler: TickScheduler,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with no timers.
    pub fn new() -> Self {
        Self {
            scheduler: TickScheduler::new(),
            dirty: true, // Initial render is required on startup
        }
    }

    pub(super) fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub(super) fn scheduler_mut(&mut self) -> &mut TickScheduler {
        &mut self.scheduler
    }

    /// Returns the next event.
    ///
    /// Blocks until a timer fires, a render is due, or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(timer) = self.scheduler.poll(now) {
                self.dirty = true;
                return Ok(TuiEvent::Tick(timer));
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Time until the next timer deadline, or `None` to wait for input only.
    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.scheduler.next_deadline()?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}
