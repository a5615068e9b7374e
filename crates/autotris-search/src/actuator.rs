//! Executes a chosen [`Move`] on a live session, one discrete step per tick.
//!
//! Step order: rotate right until the rotation matches, then shift one column
//! toward the target, then hard drop. When a rotation or shift is blocked the
//! actuator hard-drops at the current position instead.

use autotris_engine::{GameSession, Piece};

use crate::move_search::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationStep {
    RotateRight,
    ShiftLeft,
    ShiftRight,
    HardDrop,
}

impl ActuationStep {
    /// Returns the step that brings `piece` closer to `target`.
    #[must_use]
    pub fn toward(piece: &Piece, target: Move) -> Self {
        if piece.rotation() != target.rotation {
            Self::RotateRight
        } else if piece.x() < target.column {
            Self::ShiftRight
        } else if piece.x() > target.column {
            Self::ShiftLeft
        } else {
            Self::HardDrop
        }
    }

    #[must_use]
    pub fn is_hard_drop(self) -> bool {
        matches!(self, Self::HardDrop)
    }
}

/// Drives the falling piece of a [`GameSession`] toward a target [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveActuator {
    target: Move,
}

impl MoveActuator {
    #[must_use]
    pub fn new(target: Move) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> Move {
        self.target
    }

    /// Performs one step on `session` and returns the step actually taken.
    ///
    /// A blocked rotation or shift turns into [`ActuationStep::HardDrop`].
    pub fn step(&self, session: &mut GameSession) -> ActuationStep {
        let step = ActuationStep::toward(session.falling_piece(), self.target);
        let result = match step {
            ActuationStep::RotateRight => session.try_rotate_right(),
            ActuationStep::ShiftLeft => session.try_move_left(),
            ActuationStep::ShiftRight => session.try_move_right(),
            ActuationStep::HardDrop => {
                session.hard_drop_and_complete();
                return step;
            }
        };
        if result.is_ok() {
            return step;
        }
        log::debug!("{step:?} blocked, hard dropping at current position");
        session.hard_drop_and_complete();
        ActuationStep::HardDrop
    }
}

#[cfg(test)]
mod tests {
    use autotris_engine::{PieceKind, PieceRotation, PieceSeed};

    use super::*;

    fn seed() -> PieceSeed {
        "ffeeddccbbaa99887766554433221100".parse().unwrap()
    }

    #[test]
    fn test_step_order() {
        let piece = Piece::new(PieceKind::T, PieceRotation::ZERO, 3, 0);
        let rotate = Move {
            rotation: PieceRotation::new(2),
            column: 0,
        };
        assert_eq!(
            ActuationStep::toward(&piece, rotate),
            ActuationStep::RotateRight
        );

        let left = Move {
            rotation: PieceRotation::ZERO,
            column: 1,
        };
        assert_eq!(ActuationStep::toward(&piece, left), ActuationStep::ShiftLeft);

        let right = Move {
            rotation: PieceRotation::ZERO,
            column: 6,
        };
        assert_eq!(
            ActuationStep::toward(&piece, right),
            ActuationStep::ShiftRight
        );

        let here = Move {
            rotation: PieceRotation::ZERO,
            column: 3,
        };
        assert_eq!(ActuationStep::toward(&piece, here), ActuationStep::HardDrop);
    }

    #[test]
    fn test_reaches_every_target_on_empty_board() {
        let template = GameSession::with_seed(seed());
        let kind = template.falling_piece().kind();
        for rotation in PieceRotation::ALL {
            for column in -2..10 {
                let target = Move { rotation, column };
                let start = target.to_piece(kind);
                if !template.board().is_valid_position(&start, 0, 0, None) {
                    continue;
                }

                let mut session = template.clone();
                let actuator = MoveActuator::new(target);
                let mut steps = 0;
                let last = loop {
                    let before = *session.falling_piece();
                    let step = actuator.step(&mut session);
                    steps += 1;
                    assert!(steps < 20, "{target:?} did not converge");
                    if step.is_hard_drop() {
                        break before;
                    }
                };
                assert_eq!(last.rotation(), rotation, "{target:?}");
                assert_eq!(last.x(), column, "{target:?}");
                assert_eq!(session.turn(), 1);
            }
        }
    }

    #[test]
    fn test_blocked_shift_hard_drops() {
        let mut session = GameSession::with_seed(seed());
        let target = Move {
            rotation: session.falling_piece().rotation(),
            column: -10,
        };
        let actuator = MoveActuator::new(target);
        let mut steps = 0;
        while !actuator.step(&mut session).is_hard_drop() {
            steps += 1;
            assert!(steps < 20);
        }
        assert_eq!(session.turn(), 1);
    }
}
