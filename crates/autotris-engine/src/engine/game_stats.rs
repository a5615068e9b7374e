use std::time::Duration;

use serde::Serialize;

/// Base score values for line clears, multiplied by the current level.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Lines needed to advance one level.
const LINES_PER_LEVEL: usize = 10;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: `SCORE_TABLE[lines] × level` per lock, using the level before the clear
/// - **Level**: `total_lines / 10 + 1`
/// - **Drop delay**: `max(100, 1000 − 100 × (level − 1))` milliseconds
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use autotris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.drop_delay(), Duration::from_millis(1000));
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / LINES_PER_LEVEL + 1
    }

    /// Returns the gravity interval for the current level.
    #[must_use]
    pub fn drop_delay(&self) -> Duration {
        let level = u64::try_from(self.level()).unwrap_or(u64::MAX);
        let millis = 1000u64.saturating_sub(100u64.saturating_mul(level - 1));
        Duration::from_millis(millis.max(100))
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared (`[0]` to `[4]`).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece is locked.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        let index = cleared_lines.min(SCORE_TABLE.len() - 1);
        self.score += SCORE_TABLE[index] * self.level();
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[index] += 1;
    }
}
