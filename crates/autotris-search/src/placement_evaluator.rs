//! Placement evaluation: scoring a single simulated placement.
//!
//! A [`PlacementEvaluator`] turns a [`PlacementAnalysis`] into a score, higher
//! being better. [`HeuristicEvaluator`] is the linear heuristic over cleared
//! lines, holes, height and bumpiness configured by [`HeuristicWeights`].

use std::fmt;

use crate::{placement_analysis::PlacementAnalysis, weights::HeuristicWeights};

/// Evaluates piece placements by assigning scores.
pub trait PlacementEvaluator: fmt::Debug {
    /// Evaluates a placement and returns a score (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32;
}

/// Linear heuristic evaluator.
///
/// # Example
///
/// ```
/// use autotris_engine::{Board, Piece, PieceKind, PieceRotation};
/// use autotris_search::{HeuristicEvaluator, PlacementAnalysis, PlacementEvaluator};
///
/// let board = Board::new(10, 20);
/// let placement = Piece::new(PieceKind::O, PieceRotation::ZERO, 0, 18);
/// let analysis = PlacementAnalysis::from_board(&board, placement);
///
/// let evaluator = HeuristicEvaluator::default();
/// // height 2, bumpiness 2
/// assert_eq!(evaluator.evaluate_placement(&analysis), -180.0 * 2.0 - 180.0 * 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl PlacementEvaluator for HeuristicEvaluator {
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32 {
        self.weights
            .score(analysis.cleared_lines(), analysis.metrics())
    }
}

impl<E> PlacementEvaluator for &E
where
    E: PlacementEvaluator + ?Sized,
{
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32 {
        (**self).evaluate_placement(analysis)
    }
}

impl<E> PlacementEvaluator for Box<E>
where
    E: PlacementEvaluator + ?Sized,
{
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32 {
        (**self).evaluate_placement(analysis)
    }
}

#[cfg(test)]
mod tests {
    use autotris_engine::{Board, Piece, PieceKind, PieceRotation};

    use super::*;

    #[test]
    fn test_line_clear_is_rewarded() {
        let board = Board::from_ascii(
            "
            ....
            ....
            ##..
            ",
        );
        let clearing = PlacementAnalysis::from_board(
            &board,
            Piece::new(PieceKind::O, PieceRotation::ZERO, 2, 1),
        );
        let stacking = PlacementAnalysis::from_board(
            &board,
            Piece::new(PieceKind::O, PieceRotation::ZERO, 0, 0),
        );

        let evaluator = HeuristicEvaluator::default();
        assert!(
            evaluator.evaluate_placement(&clearing) > evaluator.evaluate_placement(&stacking)
        );
    }

    #[test]
    fn test_boxed_evaluator_delegates() {
        let board = Board::new(6, 6);
        let analysis = PlacementAnalysis::from_board(
            &board,
            Piece::new(PieceKind::I, PieceRotation::ZERO, 0, 4),
        );
        let evaluator = HeuristicEvaluator::new(HeuristicWeights {
            lines_cleared: 0.0,
            holes: 0.0,
            height: 1.0,
            bumpiness: 0.0,
        });
        let boxed: Box<dyn PlacementEvaluator> = Box::new(evaluator);
        assert_eq!(boxed.evaluate_placement(&analysis), 1.0);
        assert_eq!((&evaluator).evaluate_placement(&analysis), 1.0);
    }
}
