//! Result of simulating one placement on a copy of the board.
//!
//! [`PlacementAnalysis::from_board`] clones the board, locks the dropped piece
//! into the clone, clears full lines and reads the post-clear metrics. The
//! board passed in is never modified.

use autotris_engine::{Board, BoardMetrics, Piece};

#[derive(Debug, Clone)]
pub struct PlacementAnalysis {
    placement: Piece,
    cleared_lines: usize,
    metrics: BoardMetrics,
    board: Board,
}

impl PlacementAnalysis {
    /// Simulates locking `placement` onto a copy of `before_placement`.
    ///
    /// `placement` must be a valid position on the board (usually a dropped piece).
    #[must_use]
    pub fn from_board(before_placement: &Board, placement: Piece) -> Self {
        let mut board = before_placement.clone();
        board.lock(&placement);
        let cleared_lines = board.clear_full_lines();
        let metrics = board.metrics();

        Self {
            placement,
            cleared_lines,
            metrics,
            board,
        }
    }

    #[must_use]
    pub fn placement(&self) -> &Piece {
        &self.placement
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Metrics of the board after the lines were cleared.
    #[must_use]
    pub fn metrics(&self) -> &BoardMetrics {
        &self.metrics
    }

    /// The simulated board after the placement and line clears.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}
