use std::ops::ControlFlow;

use autotris_engine::{GameSession, PieceKind};

use crate::{
    actuator::{ActuationStep, MoveActuator},
    move_search::{Move, MoveSearchEngine},
    placement_evaluator::{HeuristicEvaluator, PlacementEvaluator},
};

#[derive(Debug, Clone, Copy)]
struct Plan {
    turn: usize,
    kind: PieceKind,
    actuator: MoveActuator,
}

/// Plays a [`GameSession`] with a [`MoveSearchEngine`], one actuation step per call.
///
/// A new move is searched whenever a new piece has spawned or the falling
/// piece was swapped by a hold. When no legal move exists the session is put
/// into game over.
#[derive(Debug, Clone)]
pub struct AutoPlayer<E = HeuristicEvaluator> {
    engine: MoveSearchEngine<E>,
    plan: Option<Plan>,
}

impl<E> AutoPlayer<E>
where
    E: PlacementEvaluator,
{
    #[must_use]
    pub fn new(engine: MoveSearchEngine<E>) -> Self {
        Self { engine, plan: None }
    }

    /// The move currently being executed, if any.
    #[must_use]
    pub fn target(&self) -> Option<Move> {
        self.plan.map(|plan| plan.actuator.target())
    }

    /// Forgets the current plan, e.g. after the session was restarted or a
    /// human moved the piece.
    pub fn reset(&mut self) {
        self.plan = None;
    }

    /// Performs one step. Breaks when the session is over.
    pub fn step(&mut self, session: &mut GameSession) -> ControlFlow<(), Option<ActuationStep>> {
        if session.session_state().is_game_over() {
            return ControlFlow::Break(());
        }
        if session.session_state().is_paused() {
            return ControlFlow::Continue(None);
        }

        let kind = session.falling_piece().kind();
        let actuator = match self.plan {
            Some(plan) if plan.turn == session.turn() && plan.kind == kind => plan.actuator,
            _ => {
                let Some(mv) = self
                    .engine
                    .best_move(session.board(), session.falling_piece())
                else {
                    self.plan = None;
                    session.set_game_over();
                    return ControlFlow::Break(());
                };
                let actuator = MoveActuator::new(mv);
                self.plan = Some(Plan {
                    turn: session.turn(),
                    kind,
                    actuator,
                });
                actuator
            }
        };

        let step = actuator.step(session);
        if session.session_state().is_game_over() {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(Some(step))
    }

    /// Plays until the session stops (game over or pause) or until
    /// `max_pieces` pieces have been locked.
    pub fn play_session(&mut self, session: &mut GameSession, max_pieces: Option<usize>) {
        while session.session_state().is_playing()
            && max_pieces.is_none_or(|max| session.turn() < max)
        {
            if self.step(session).is_break() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use autotris_engine::PieceSeed;

    use super::*;
    use crate::weights::HeuristicWeights;

    fn seed() -> PieceSeed {
        "00112233445566778899aabbccddeeff".parse().unwrap()
    }

    fn player() -> AutoPlayer {
        AutoPlayer::new(MoveSearchEngine::with_weights(HeuristicWeights::default()))
    }

    #[test]
    fn test_plans_once_per_piece() {
        let mut session = GameSession::with_seed(seed());
        let mut player = player();

        let step = player.step(&mut session);
        assert!(step.is_continue());
        let target = player.target().unwrap();
        assert_eq!(session.turn(), 0);

        while session.turn() == 0 {
            assert_eq!(player.target(), Some(target));
            assert!(player.step(&mut session).is_continue());
        }
    }

    #[test]
    fn test_replans_after_hold() {
        let mut session = GameSession::with_seed(seed());
        let mut player = player();
        assert!(player.step(&mut session).is_continue());

        session.try_hold().unwrap();
        let swapped = session.falling_piece().kind();
        let engine = MoveSearchEngine::with_weights(HeuristicWeights::default());
        let expected = engine.best_move(session.board(), session.falling_piece());

        assert!(player.step(&mut session).is_continue());
        assert_eq!(player.target(), expected);
        assert_eq!(player.plan.map(|plan| plan.kind), Some(swapped));
    }

    #[test]
    fn test_plays_many_pieces_without_topping_out() {
        let mut session = GameSession::with_seed(seed());
        let mut player = player();
        player.play_session(&mut session, Some(50));
        assert_eq!(session.turn(), 50);
        assert!(session.session_state().is_playing());
        assert!(session.stats().total_cleared_lines() > 0);
    }

    #[test]
    fn test_breaks_on_game_over() {
        // No shape fits on a single-row board.
        let mut session = GameSession::with_board_size(10, 1, seed());
        assert!(session.session_state().is_game_over());
        let mut player = player();
        assert!(player.step(&mut session).is_break());
        player.play_session(&mut session, None);
        assert_eq!(session.turn(), 0);
    }

    #[test]
    fn test_paused_session_is_left_alone() {
        let mut session = GameSession::with_seed(seed());
        session.toggle_pause();
        let mut player = player();
        let piece = *session.falling_piece();
        assert_eq!(player.step(&mut session), ControlFlow::Continue(None));
        assert_eq!(*session.falling_piece(), piece);
        assert_eq!(player.target(), None);
    }
}
