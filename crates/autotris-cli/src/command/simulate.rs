use std::{path::PathBuf, time::Instant};

use autotris_engine::{GameSession, Piece, PieceSeed};
use autotris_search::{AutoPlayer, HeuristicWeights, MoveSearchEngine};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Path to the heuristic weights file (JSON); built-in defaults when omitted
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many pieces have been locked
    #[clap(long)]
    max_pieces: Option<usize>,
    /// Output file path for the JSON report (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

/// Result of one headless game.
#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    weights: HeuristicWeights,
    max_pieces: Option<usize>,
    pieces: usize,
    lines: usize,
    score: usize,
    level: usize,
    game_over: bool,
    line_clears: [usize; 5],
    /// The piece that was falling when the run stopped.
    falling_piece: Piece,
    started_at: DateTime<Utc>,
    elapsed_secs: f64,
}

fn simulate(
    seed: PieceSeed,
    weights: HeuristicWeights,
    max_pieces: Option<usize>,
) -> SimulationReport {
    let started_at = Utc::now();
    let start = Instant::now();

    let mut session = GameSession::with_seed(seed);
    let mut player = AutoPlayer::new(MoveSearchEngine::with_weights(weights));
    player.play_session(&mut session, max_pieces);

    let stats = session.stats();
    SimulationReport {
        seed,
        weights,
        max_pieces,
        pieces: stats.completed_pieces(),
        lines: stats.total_cleared_lines(),
        score: stats.score(),
        level: stats.level(),
        game_over: session.session_state().is_game_over(),
        line_clears: *stats.line_cleared_counter(),
        falling_piece: *session.falling_piece(),
        started_at,
        elapsed_secs: start.elapsed().as_secs_f64(),
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        weights,
        seed,
        max_pieces,
        output,
    } = arg;

    let weights = util::read_weights_file(weights.as_ref())?;
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("simulating with seed {seed}, max pieces {max_pieces:?}");

    let report = simulate(seed, weights, *max_pieces);
    log::info!(
        "finished: {} pieces, {} lines, score {}, game over: {} ({:.2}s)",
        report.pieces,
        report.lines,
        report.score,
        report.game_over,
        report.elapsed_secs
    );

    util::save_json(&report, output.as_deref())?;
    Ok(())
}
