use std::time::Duration;

use rand::Rng as _;

use crate::{
    HoldError, PieceCollisionError,
    core::{board::Board, piece::Piece, piece::PieceKind},
};

use super::{GameStats, PieceBuffer, PieceSeed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// A running game: the live board, the falling piece, the piece buffer and
/// the statistics.
///
/// The session owns the only mutable board. Searches read it through
/// [`Self::board`] and work on clones.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    falling_piece: Piece,
    buffer: PieceBuffer,
    hold_used: bool,
    stats: GameStats,
    session_state: SessionState,
    seed: PieceSeed,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Starts a session on a default-sized board with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_board_size(Board::DEFAULT_WIDTH, Board::DEFAULT_HEIGHT, seed)
    }

    /// Starts a session on a `width`×`height` board.
    ///
    /// The session is [`SessionState::GameOver`] right away if the first
    /// piece does not fit at the spawn position.
    #[must_use]
    pub fn with_board_size(width: usize, height: usize, seed: PieceSeed) -> Self {
        let mut buffer = PieceBuffer::with_seed(seed);
        let falling_piece = Piece::spawn(buffer.pop_next());
        let mut session = Self {
            board: Board::new(width, height),
            falling_piece,
            buffer,
            hold_used: false,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            seed,
        };
        if !session.board.is_valid_position(&falling_piece, 0, 0, None) {
            session.set_game_over();
        }
        session
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.buffer.next_piece()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.buffer.held_piece()
    }

    /// Whether hold has already been used for the current piece.
    #[must_use]
    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Number of pieces locked so far. Changes exactly when a new piece spawns
    /// after a lock.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.stats.completed_pieces()
    }

    /// Current gravity interval, derived from the level.
    #[must_use]
    pub fn drop_delay(&self) -> Duration {
        self.stats.drop_delay()
    }

    /// Returns where the falling piece would land with a hard drop.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        self.board.drop_position(&self.falling_piece)
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    pub fn set_game_over(&mut self) {
        if !self.session_state.is_game_over() {
            log::debug!(
                "game over after {} pieces, {} lines, score {}",
                self.stats.completed_pieces(),
                self.stats.total_cleared_lines(),
                self.stats.score()
            );
        }
        self.session_state = SessionState::GameOver;
    }

    /// Resets board, pieces and statistics. Keeps the current seed unless a
    /// new one is given.
    pub fn restart(&mut self, seed: Option<PieceSeed>) {
        let seed = seed.unwrap_or(self.seed);
        *self = Self::with_board_size(self.board.width(), self.board.height(), seed);
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(-1, 0)
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(1, 0)
    }

    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(0, 1)
    }

    pub fn try_rotate_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.rotated_right())
    }

    pub fn try_rotate_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.rotated_left())
    }

    /// Swaps the falling piece with the held one, or stores it and takes the
    /// next piece. Allowed once per spawned piece.
    pub fn try_hold(&mut self) -> Result<(), HoldError> {
        if self.hold_used {
            return Err(HoldError::HoldAlreadyUsed);
        }
        let piece = Piece::spawn(self.buffer.peek_hold_result());
        if !self.board.is_valid_position(&piece, 0, 0, None) {
            return Err(HoldError::PieceCollision(PieceCollisionError));
        }
        let kind = self.buffer.hold(self.falling_piece.kind());
        debug_assert_eq!(kind, piece.kind());
        self.falling_piece = piece;
        self.hold_used = true;
        Ok(())
    }

    /// Drops the falling piece to the bottom and locks it. Returns the number
    /// of cleared lines.
    pub fn hard_drop_and_complete(&mut self) -> usize {
        if !self.session_state.is_playing() {
            return 0;
        }
        self.falling_piece = self.simulate_drop_position();
        self.complete_piece_drop()
    }

    /// Gravity step: moves the piece down one row, or locks it when it cannot
    /// move. Returns the number of cleared lines when a lock happened.
    pub fn fall_tick(&mut self) -> Option<usize> {
        if !self.session_state.is_playing() {
            return None;
        }
        if self.try_soft_drop().is_ok() {
            return None;
        }
        Some(self.complete_piece_drop())
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.moved(dx, dy))
    }

    fn try_set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !self.board.is_valid_position(&piece, 0, 0, None) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    fn complete_piece_drop(&mut self) -> usize {
        self.board.lock(&self.falling_piece);
        let cleared_lines = self.board.clear_full_lines();

        let level = self.stats.level();
        self.stats.complete_piece_drop(cleared_lines);
        if self.stats.level() > level {
            log::debug!(
                "level up: {} (drop delay {:?})",
                self.stats.level(),
                self.stats.drop_delay()
            );
        }

        self.hold_used = false;
        self.falling_piece = Piece::spawn(self.buffer.pop_next());
        if !self.board.is_valid_position(&self.falling_piece, 0, 0, None) {
            self.set_game_over();
        }
        cleared_lines
    }
}
