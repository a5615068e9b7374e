//! Move search for the automated player.
//!
//! The search works in three layers:
//!
//! 1. **Placement evaluation** ([`placement_evaluator`]) - Scores one simulated placement
//!    with a linear heuristic over cleared lines, holes, height and bumpiness.
//! 2. **Move search** ([`move_search`]) - Tries every rotation and column, drops the
//!    piece, and keeps the first placement with the highest score.
//! 3. **Actuation** ([`actuator`], [`auto_player`]) - Executes the chosen move on a
//!    live [`GameSession`](autotris_engine::GameSession) one step per tick.
//!
//! ```text
//! AutoPlayer (one step per tick)
//!     ↓ uses
//! MoveSearchEngine (select best move)
//!     ↓ uses
//! PlacementEvaluator (score single placement)
//! ```
//!
//! The live board is only read. Every candidate is simulated on a clone.
//!
//! # Example
//!
//! ```
//! use autotris_engine::{GameSession, PieceSeed};
//! use autotris_search::{AutoPlayer, HeuristicWeights, MoveSearchEngine};
//!
//! let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut session = GameSession::with_seed(seed);
//! let mut player = AutoPlayer::new(MoveSearchEngine::with_weights(HeuristicWeights::default()));
//!
//! player.play_session(&mut session, Some(10));
//! assert_eq!(session.turn(), 10);
//! ```

pub use self::{
    actuator::{ActuationStep, MoveActuator},
    auto_player::AutoPlayer,
    move_search::{Move, MoveSearchEngine, SearchResult, compute_best_move},
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{HeuristicEvaluator, PlacementEvaluator},
    weights::HeuristicWeights,
};

pub mod actuator;
pub mod auto_player;
pub mod move_search;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod weights;
