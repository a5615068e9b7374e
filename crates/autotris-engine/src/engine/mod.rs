//! Game session logic built on top of the core board and pieces.
//!
//! - [`GameSession`] - Live game state (board, falling/next/held piece, stats, pause/game over)
//! - [`GameStats`] - Score, level, cleared lines and drop delay
//! - [`PieceBuffer`] - Uniform random piece generation with one preview piece and hold
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (optionally with a fixed [`PieceSeed`])
//! 2. Player or AI manipulates the falling piece (move, rotate, hold)
//! 3. Gravity ([`GameSession::fall_tick`]) or a hard drop locks the piece
//! 4. Full lines are cleared, the score is updated and the next piece spawns
//! 5. Repeat until a newly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use autotris_engine::GameSession;
//!
//! let mut session = GameSession::new();
//!
//! session.try_move_left().ok();
//! session.try_rotate_right().ok();
//!
//! let cleared = session.hard_drop_and_complete();
//! assert_eq!(cleared, 0);
//! assert_eq!(session.turn(), 1);
//! ```

pub use self::{game_session::*, game_stats::*, piece_buffer::*};

mod game_session;
mod game_stats;
mod piece_buffer;
