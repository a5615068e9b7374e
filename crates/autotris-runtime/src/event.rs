use crossterm::event::Event as CrosstermEvent;

use crate::TimerId;

/// Events processed by TUI applications, one at a time.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// A scheduled timer fired.
    Tick(TimerId),
    /// The screen needs a redraw.
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
