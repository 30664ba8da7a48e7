//! Simulation runner driving complete game sessions.
//!
//! Every game runs the real session stack (both snakes, the decision
//! engine, the difficulty controller) with the remote tier disabled.
//! The player snake is piloted by a second decision engine fed a
//! role-swapped board view, so the matchup is the local AI chain
//! against itself with the difficulty knobs applied to one side only.
//! Time is synthetic: one clock advances by a tick interval per update
//! and never rewinds, which keeps the decision cache on the same
//! cadence it has under a live frame loop.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::SimConfig;
use super::report::SimReport;
use crate::ai::{AiDecisionEngine, AiGameView, AiParams};
use crate::game::{GameOutcome, GameSession, GameState};

/// Outcome and counters from one simulated game.
#[derive(Debug, Clone)]
pub struct GameRun {
    pub outcome: Option<GameOutcome>,
    pub score: u32,
    pub ai_score: u32,
    pub ticks: u64,
    pub survival_ms: u64,
    pub timed_out: bool,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut setup_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::headless(config.mode, true, &mut setup_rng);
    let mut pilot = AiDecisionEngine::new(None);

    // One monotone clock for the whole batch. A fresh clock per game
    // would rewind between games and leave the decision caches warm.
    let origin = Instant::now();
    let mut clock_ms: u64 = 0;

    let mut all_runs = Vec::with_capacity(config.num_games as usize);
    for game_idx in 0..config.num_games {
        // Create RNG for this game
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed + game_idx as u64),
            None => StdRng::from_entropy(),
        };

        let run =
            simulate_single_game(&mut session, &mut pilot, config, origin, &mut clock_ms, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Game {}/{} - {} after {} ticks (player {}, ai {})",
                game_idx + 1,
                config.num_games,
                outcome_label(&run),
                run.ticks,
                run.score,
                run.ai_score
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(
        all_runs,
        config.mode,
        session.difficulty.ai_params(),
        session.difficulty.estimate_skill(),
    )
}

/// Play one game to its end or the tick cap. The session keeps its
/// difficulty history across calls, so adaptive mode drifts between
/// games exactly as it does for a live player.
fn simulate_single_game(
    session: &mut GameSession,
    pilot: &mut AiDecisionEngine,
    config: &SimConfig,
    origin: Instant,
    clock_ms: &mut u64,
    rng: &mut StdRng,
) -> GameRun {
    session.reset(rng);
    session.start();
    pilot.clear_cache();

    let pilot_params = AiParams {
        mistake_rate: 0.0,
        ..AiParams::default()
    };

    let mut ticks: u64 = 0;
    while session.state == GameState::Playing && ticks < config.max_ticks_per_game {
        let dt = session.speed_ms;
        *clock_ms += dt;
        let now = origin + Duration::from_millis(*clock_ms);

        steer_player(session, pilot, &pilot_params, now, rng);
        let report = session.update(dt, now, rng);
        ticks += u64::from(report.steps);
    }

    GameRun {
        outcome: session.outcome,
        score: session.score,
        ai_score: session.ai_score,
        ticks,
        survival_ms: session.survival_ms(),
        timed_out: session.state == GameState::Playing,
    }
}

/// Point the player snake with the same local chain the AI falls back
/// on, fed a view with the roles swapped. No mistakes are injected, so
/// this stands in for a competent human.
fn steer_player(
    session: &mut GameSession,
    pilot: &mut AiDecisionEngine,
    params: &AiParams,
    now: Instant,
    rng: &mut StdRng,
) {
    let empty = VecDeque::new();
    let opponent = session
        .ai_snake
        .as_ref()
        .filter(|ai| ai.alive)
        .map(|ai| &ai.body)
        .unwrap_or(&empty);
    let view = AiGameView {
        ai_body: &session.player.body,
        ai_direction: session.player.direction,
        player_body: opponent,
        food: session.food,
        grid_size: session.grid_size,
    };
    let decision = pilot.decide(&view, params, now, rng);
    session.set_player_direction(decision.direction);
}

fn outcome_label(run: &GameRun) -> &'static str {
    match run.outcome {
        Some(GameOutcome::PlayerWin) => "PLAYER WIN",
        Some(GameOutcome::AiWin) => "AI WIN",
        Some(GameOutcome::Draw) => "DRAW",
        None => "TIMEOUT",
    }
}
