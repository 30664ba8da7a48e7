//! Integration test: Difficulty through real games
//!
//! Plays short scripted games to completion and checks that results
//! flow into the metrics, that adaptive mode retunes the next game,
//! and that fixed modes hold still.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use snakepit::difficulty::DifficultyMode;
use snakepit::game::{GameOutcome, GameSession, GameState};
use snakepit::grid::{Direction, Position};
use snakepit::snake::Snake;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn place_snake(snake: &mut Snake, cells: &[(i16, i16)], direction: Direction) {
    snake.body = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
    snake.direction = direction;
    snake.next_direction = direction;
    snake.has_moved = true;
}

/// Box the AI into the corner so it dies on the first tick.
fn doom_ai(session: &mut GameSession) {
    let ai = session.ai_snake.as_mut().unwrap();
    place_snake(ai, &[(0, 0), (0, 1), (1, 1), (1, 0)], Direction::Up);
}

/// Step until the game ends, bounded.
fn play_out(session: &mut GameSession, rng: &mut ChaCha8Rng) {
    for _ in 0..40 {
        if session.state != GameState::Playing {
            return;
        }
        session.update(session.speed_ms, Instant::now(), rng);
    }
    panic!("scripted game never ended");
}

/// Scripted player win: the AI runs into the corner on tick one, the
/// player walks off the left edge two ticks later.
fn play_player_win(session: &mut GameSession, rng: &mut ChaCha8Rng) {
    session.food = Position::new(19, 19);
    place_snake(&mut session.player, &[(2, 10), (3, 10), (4, 10)], Direction::Left);
    doom_ai(session);
    session.start();
    play_out(session, rng);
    assert_eq!(session.outcome, Some(GameOutcome::PlayerWin));
}

/// Scripted loss: the player steps off the left edge on tick one while
/// the AI plays on in the far corner.
fn play_ai_win(session: &mut GameSession, rng: &mut ChaCha8Rng) {
    session.food = Position::new(19, 19);
    place_snake(&mut session.player, &[(0, 10), (1, 10), (2, 10)], Direction::Left);
    session.start();
    play_out(session, rng);
    assert_eq!(session.outcome, Some(GameOutcome::AiWin));
}

// =============================================================================
// Metrics Recording
// =============================================================================

#[test]
fn test_versus_results_reach_the_metrics() {
    let mut rng = rng(20);
    let mut session = GameSession::headless(DifficultyMode::Medium, true, &mut rng);

    play_player_win(&mut session, &mut rng);

    let stats = session.stats();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.games_won, 1);
    assert_eq!(stats.win_rate, "100.0%");
    assert_eq!(stats.current_streak, 1);

    session.reset(&mut rng);
    play_ai_win(&mut session, &mut rng);

    let stats = session.stats();
    assert_eq!(stats.games_played, 2);
    assert_eq!(stats.games_won, 1);
    assert_eq!(stats.win_rate, "50.0%");
    assert_eq!(stats.current_streak, 0, "a loss resets the streak");
}

#[test]
fn test_solo_games_never_touch_the_metrics() {
    let mut rng = rng(21);
    let mut session = GameSession::headless(DifficultyMode::Medium, false, &mut rng);
    session.food = Position::new(19, 19);
    place_snake(&mut session.player, &[(0, 10), (1, 10), (2, 10)], Direction::Left);
    session.start();
    play_out(&mut session, &mut rng);

    assert_eq!(session.state, GameState::GameOver);
    assert_eq!(session.stats().games_played, 0);
}

#[test]
fn test_stats_carry_the_session_high_score() {
    let mut rng = rng(22);
    let mut session = GameSession::headless(DifficultyMode::Medium, true, &mut rng);
    session.score = 6;
    play_ai_win(&mut session, &mut rng);

    assert_eq!(session.high_score, 6);
    assert_eq!(session.stats().high_score, 6);
}

// =============================================================================
// Adaptive Retuning Between Games
// =============================================================================

#[test]
fn test_adaptive_speeds_up_after_a_win() {
    let mut rng = rng(23);
    let mut session = GameSession::headless(DifficultyMode::Adaptive, true, &mut rng);
    assert_eq!(session.speed_ms, 150);

    play_player_win(&mut session, &mut rng);
    session.reset(&mut rng);

    // One win: a perfect record pulls the target to 110ms and the
    // tuning takes a 10% step, 150 -> 146.
    assert_eq!(session.speed_ms, 146);
}

#[test]
fn test_adaptive_slows_down_after_a_loss() {
    let mut rng = rng(24);
    let mut session = GameSession::headless(DifficultyMode::Adaptive, true, &mut rng);

    play_ai_win(&mut session, &mut rng);
    session.reset(&mut rng);

    // One loss: the target swings to 190ms, 150 -> 154.
    assert_eq!(session.speed_ms, 154);

    let params = session.difficulty.ai_params();
    assert!(params.mistake_rate > 0.05, "losing buys easier opponents");
    assert!(params.aggression < 0.5);
}

#[test]
fn test_fixed_modes_ignore_results() {
    let mut rng = rng(25);
    let mut session = GameSession::headless(DifficultyMode::Hard, true, &mut rng);
    assert_eq!(session.speed_ms, 100);

    play_ai_win(&mut session, &mut rng);
    session.reset(&mut rng);

    assert_eq!(session.speed_ms, 100);
    let params = session.difficulty.ai_params();
    assert_eq!(params.mistake_rate, 0.0);
    assert_eq!(params.aggression, 0.8);
}

#[test]
fn test_difficulty_switch_applies_on_the_start_screen() {
    let mut rng = rng(26);
    let mut session = GameSession::headless(DifficultyMode::Adaptive, true, &mut rng);

    play_ai_win(&mut session, &mut rng);
    session.reset(&mut rng);
    assert_eq!(session.speed_ms, 154);

    // Dropping to a fixed preset overrides the adaptive tuning.
    session.set_difficulty_mode(DifficultyMode::Easy);
    assert_eq!(session.speed_ms, 200);

    // The metrics survive the detour through a fixed mode.
    assert_eq!(session.stats().games_played, 1);
}
