//! Exhaustive move search over every orientation and column.
//!
//! For each rotation `0..4` and each column offset `-2..width`, the piece is
//! placed at row 0, skipped when the position is invalid, hard-dropped, and
//! scored by simulating the lock on a copy of the board. The first candidate
//! with the strictly highest score wins, so identical inputs always produce
//! the same move.
//!
//! # Example
//!
//! ```
//! use autotris_engine::{Board, Piece, PieceKind, PieceRotation};
//! use autotris_search::{HeuristicWeights, Move, compute_best_move};
//!
//! let board = Board::new(10, 20);
//! let piece = Piece::spawn(PieceKind::O);
//!
//! let best = compute_best_move(&board, &piece, &HeuristicWeights::default());
//! assert_eq!(
//!     best,
//!     Some(Move {
//!         rotation: PieceRotation::ZERO,
//!         column: 0,
//!     })
//! );
//! ```

use autotris_engine::{Board, Piece, PieceKind, PieceRotation};
use serde::Serialize;

use crate::{
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{HeuristicEvaluator, PlacementEvaluator},
    weights::HeuristicWeights,
};

/// Leftmost column offset tried by the search.
///
/// Shapes have empty leading columns in some rotations, so the matrix origin
/// may sit left of the board while the piece itself is inside.
pub const MIN_COLUMN: i32 = -2;

/// A placement target: the rotation and the column of the shape matrix origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub rotation: PieceRotation,
    pub column: i32,
}

impl Move {
    /// Returns the piece of `kind` in this move's rotation and column, at row 0.
    #[must_use]
    pub fn to_piece(self, kind: PieceKind) -> Piece {
        Piece::new(kind, self.rotation, self.column, 0)
    }
}

/// The best candidate found by [`MoveSearchEngine::search`].
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub mv: Move,
    pub score: f32,
    pub analysis: PlacementAnalysis,
}

/// Runs the exhaustive search with a pluggable [`PlacementEvaluator`].
#[derive(Debug, Clone, Default)]
pub struct MoveSearchEngine<E = HeuristicEvaluator> {
    evaluator: E,
}

impl MoveSearchEngine<HeuristicEvaluator> {
    #[must_use]
    pub fn with_weights(weights: HeuristicWeights) -> Self {
        Self::new(HeuristicEvaluator::new(weights))
    }
}

impl<E> MoveSearchEngine<E>
where
    E: PlacementEvaluator,
{
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Evaluates every reachable placement of `piece` and returns the best one.
    ///
    /// Only the kind of `piece` is used; its position and rotation are ignored.
    /// Neither `board` nor `piece` is modified. Returns `None` when no
    /// candidate position is valid.
    #[must_use]
    pub fn search(&self, board: &Board, piece: &Piece) -> Option<SearchResult> {
        let width = i32::try_from(board.width()).ok()?;
        let mut best: Option<SearchResult> = None;

        for rotation in PieceRotation::ALL {
            for column in MIN_COLUMN..width {
                let mv = Move { rotation, column };
                let candidate = mv.to_piece(piece.kind());
                if !board.is_valid_position(&candidate, 0, 0, None) {
                    continue;
                }
                let placement = board.drop_position(&candidate);
                let analysis = PlacementAnalysis::from_board(board, placement);
                let score = self.evaluator.evaluate_placement(&analysis);
                log::trace!("candidate {mv:?} -> {placement}: score {score}");

                if best.as_ref().is_none_or(|best| score > best.score) {
                    best = Some(SearchResult {
                        mv,
                        score,
                        analysis,
                    });
                }
            }
        }

        match &best {
            Some(result) => log::debug!(
                "best move for {:?}: {:?} (score {})",
                piece.kind(),
                result.mv,
                result.score
            ),
            None => log::debug!("no legal move for {:?}", piece.kind()),
        }
        best
    }

    /// Like [`Self::search`], but returns only the move.
    #[must_use]
    pub fn best_move(&self, board: &Board, piece: &Piece) -> Option<Move> {
        self.search(board, piece).map(|result| result.mv)
    }
}

/// Picks the best placement of `piece` on `board` with the linear heuristic.
///
/// Returns `None` when no placement is legal, which callers treat as game over.
#[must_use]
pub fn compute_best_move(
    board: &Board,
    piece: &Piece,
    weights: &HeuristicWeights,
) -> Option<Move> {
    MoveSearchEngine::with_weights(*weights).best_move(board, piece)
}
