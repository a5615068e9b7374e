use std::{path::PathBuf, time::Duration};

use autotris_engine::{GameSession, PieceSeed};
use autotris_runtime::Runtime;
use autotris_search::{AutoPlayer, MoveSearchEngine};

use crate::{command::play::app::PlayApp, util};

mod app;

const DEFAULT_STEP_MS: u64 = 50;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Path to the heuristic weights file used when the automated player is switched on (JSON)
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Delay between two automated player steps, in milliseconds
    #[clap(
        long,
        default_value_t = DEFAULT_STEP_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    step_ms: u64,
}

impl Default for ManualPlayArg {
    fn default() -> Self {
        Self {
            weights: None,
            seed: None,
            step_ms: DEFAULT_STEP_MS,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Path to the heuristic weights file (JSON); built-in defaults when omitted
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Delay between two automated player steps, in milliseconds
    #[clap(
        long,
        default_value_t = DEFAULT_STEP_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    step_ms: u64,
}

fn new_session(seed: Option<PieceSeed>) -> GameSession {
    let session = match seed {
        Some(seed) => GameSession::with_seed(seed),
        None => GameSession::new(),
    };
    log::info!("starting session with seed {}", session.seed());
    session
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg {
        weights,
        seed,
        step_ms,
    } = arg;

    let weights = util::read_weights_file(weights.as_ref())?;
    let player = AutoPlayer::new(MoveSearchEngine::with_weights(weights));
    let mut app = PlayApp::manual(
        new_session(*seed),
        player,
        Duration::from_millis(*step_ms),
    );
    Runtime::new().run(&mut app)?;
    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        weights,
        seed,
        step_ms,
    } = arg;

    let weights = util::read_weights_file(weights.as_ref())?;
    let player = AutoPlayer::new(MoveSearchEngine::with_weights(weights));
    let mut app = PlayApp::auto(
        new_session(*seed),
        player,
        Duration::from_millis(*step_ms),
    );
    Runtime::new().run(&mut app)?;
    Ok(())
}
