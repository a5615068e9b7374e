use std::{
    io,
    time::{Duration, Instant},
};

use crate::{App, TimerId, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a new Runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets, changes, or removes (`None`) the interval of a timer.
    ///
    /// A changed interval takes effect after the pending tick.
    pub fn set_timer(&mut self, timer: TimerId, interval: Option<Duration>) {
        self.events
            .scheduler_mut()
            .set_timer(timer, interval, Instant::now());
    }

    /// Returns the interval of a timer, if it is set.
    #[must_use]
    pub fn timer_interval(&self, timer: TimerId) -> Option<Duration> {
        self.events.scheduler().interval(timer)
    }

    /// Suspends every timer.
    pub fn pause_timers(&mut self) {
        self.events.scheduler_mut().pause();
    }

    /// Resumes every timer, each waiting its full interval before the next tick.
    pub fn resume_timers(&mut self) {
        self.events.scheduler_mut().resume(Instant::now());
    }

    #[must_use]
    pub fn timers_paused(&self) -> bool {
        self.events.scheduler().is_paused()
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `TuiEvent::Tick`: calls `app.on_tick()` with the timer that fired
    ///    - `TuiEvent::Render`: calls `app.draw()`
    ///    - `TuiEvent::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick(timer) => {
                        app.on_tick(&mut self, timer);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_configuration() {
        let mut runtime = Runtime::new();
        runtime.set_timer(TimerId::Fall, Some(Duration::from_millis(1000)));
        runtime.set_timer(TimerId::Actuate, Some(Duration::from_millis(50)));
        assert_eq!(
            runtime.timer_interval(TimerId::Fall),
            Some(Duration::from_millis(1000))
        );

        runtime.set_timer(TimerId::Actuate, None);
        assert_eq!(runtime.timer_interval(TimerId::Actuate), None);

        runtime.pause_timers();
        assert!(runtime.timers_paused());
        runtime.resume_timers();
        assert!(!runtime.timers_paused());
    }
}
