//! Minimal TUI runtime: an event loop serializing timer ticks, renders and
//! terminal events into one stream handled by an [`App`].

pub use self::{
    app::App,
    runtime::Runtime,
    scheduler::{TickScheduler, TimerId},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod scheduler;
