//! The two-snake game session: state machine, fixed-rate stepping,
//! collision resolution, scoring, and end-of-game bookkeeping.

use std::collections::HashSet;
use std::time::Instant;

use rand::Rng;

use crate::ai::{AiDecisionEngine, AiGameView};
use crate::commentary::{self, CommentContext, CommentEvent, CommentaryEngine};
use crate::constants::{
    AI_SPAWN_X, AI_SPAWN_Y, GRID_SIZE, INITIAL_SNAKE_LENGTH, MAX_TICK_DELTA_MS, MIN_SPEED_MS,
    PLAYER_SPAWN_X, PLAYER_SPAWN_Y, SPEED_INCREMENT_MS,
};
use crate::difficulty::{DifficultyController, DifficultyMode, DifficultyStats, GameRecord};
use crate::food::spawn_food;
use crate::game::types::{CollisionKind, GameOutcome, GameSnapshot, GameState, TickReport};
use crate::grid::{Direction, Position};
use crate::settings::Settings;
use crate::snake::Snake;
use crate::utils::persistence;

/// One game of snake versus an optional AI opponent.
///
/// The session owns every collaborator: both snakes, the food, the AI
/// decision engine, the commentary engine, and the difficulty
/// controller. Callers drive it with `update(dt)` plus the control
/// methods; all of them are idempotent with respect to the state
/// machine.
pub struct GameSession {
    pub player: Snake,
    pub ai_snake: Option<Snake>,
    pub food: Position,
    pub state: GameState,
    pub score: u32,
    pub ai_score: u32,
    pub speed_ms: u64,
    pub high_score: u32,
    pub grid_size: i16,
    pub outcome: Option<GameOutcome>,
    pub difficulty: DifficultyController,
    accumulated_ms: u64,
    survival_ms: u64,
    engine: AiDecisionEngine,
    commentary: CommentaryEngine,
    persist: bool,
}

impl GameSession {
    /// Session wired from user settings, backed by the on-disk high
    /// score and metrics.
    pub fn new<R: Rng>(settings: &Settings, rng: &mut R) -> GameSession {
        let difficulty = DifficultyController::new(settings.ai_difficulty);
        let remote = if settings.ai_enabled {
            settings.remote_client()
        } else {
            None
        };
        let engine = AiDecisionEngine::new(remote);
        let commentary =
            CommentaryEngine::new(settings.commentary_enabled, settings.remote_client());
        let high_score = persistence::load_high_score();
        Self::build(
            settings.ai_enabled,
            difficulty,
            engine,
            commentary,
            high_score,
            true,
            rng,
        )
    }

    /// Session that never touches the disk or the network. Used by the
    /// simulator and by tests.
    pub fn headless<R: Rng>(mode: DifficultyMode, ai_enabled: bool, rng: &mut R) -> GameSession {
        Self::build(
            ai_enabled,
            DifficultyController::in_memory(mode),
            AiDecisionEngine::new(None),
            CommentaryEngine::new(false, None),
            0,
            false,
            rng,
        )
    }

    fn build<R: Rng>(
        ai_enabled: bool,
        difficulty: DifficultyController,
        engine: AiDecisionEngine,
        commentary: CommentaryEngine,
        high_score: u32,
        persist: bool,
        rng: &mut R,
    ) -> GameSession {
        let player = Snake::new(
            Position::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
        );
        let ai_snake = if ai_enabled {
            Some(Snake::new(
                Position::new(AI_SPAWN_X, AI_SPAWN_Y),
                Direction::Left,
                INITIAL_SNAKE_LENGTH,
            ))
        } else {
            None
        };
        let speed_ms = difficulty.game_speed_ms();

        let mut session = GameSession {
            player,
            ai_snake,
            food: Position::new(0, 0),
            state: GameState::Start,
            score: 0,
            ai_score: 0,
            speed_ms,
            high_score,
            grid_size: GRID_SIZE,
            outcome: None,
            difficulty,
            accumulated_ms: 0,
            survival_ms: 0,
            engine,
            commentary,
            persist,
        };
        session.food = spawn_food(&session.occupied_cells(), session.grid_size, rng);
        session
    }

    /// Begin play. No-op unless the session is at the start screen.
    pub fn start(&mut self) {
        if self.state == GameState::Start {
            self.state = GameState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
        }
    }

    /// Return to the start screen from any state: respawn both snakes,
    /// zero the scores, restore the difficulty speed, and place fresh
    /// food. The persisted high score and metrics survive.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.player.reset();
        if let Some(ai) = self.ai_snake.as_mut() {
            ai.reset();
        }
        self.score = 0;
        self.ai_score = 0;
        self.speed_ms = self.difficulty.game_speed_ms();
        self.accumulated_ms = 0;
        self.survival_ms = 0;
        self.outcome = None;
        self.engine.clear_cache();
        self.food = spawn_food(&self.occupied_cells(), self.grid_size, rng);
        self.state = GameState::Start;
    }

    /// Queue a direction change for the player. Ignored outside play;
    /// the snake itself rejects reversals.
    pub fn set_player_direction(&mut self, direction: Direction) {
        if self.state == GameState::Playing {
            self.player.set_direction(direction);
        }
    }

    pub fn set_commentary_enabled(&mut self, enabled: bool) {
        self.commentary.enabled = enabled;
    }

    /// Change difficulty. The tick interval follows immediately only
    /// on the start screen; mid-game it applies on the next reset.
    pub fn set_difficulty_mode(&mut self, mode: DifficultyMode) {
        self.difficulty.set_mode(mode);
        if self.state == GameState::Start {
            self.speed_ms = self.difficulty.game_speed_ms();
        }
    }

    /// Add or remove the AI opponent. Only honored on the start screen.
    pub fn set_ai_enabled(&mut self, enabled: bool) {
        if self.state != GameState::Start {
            return;
        }
        if enabled && self.ai_snake.is_none() {
            self.ai_snake = Some(Snake::new(
                Position::new(AI_SPAWN_X, AI_SPAWN_Y),
                Direction::Left,
                INITIAL_SNAKE_LENGTH,
            ));
        } else if !enabled {
            self.ai_snake = None;
        }
    }

    /// Advance the simulation by `dt_ms` of wall time, running as many
    /// fixed steps as have accrued. Long frame gaps are clamped so a
    /// stalled process does not fast-forward the game.
    pub fn update<R: Rng>(&mut self, dt_ms: u64, now: Instant, rng: &mut R) -> TickReport {
        let mut report = TickReport::default();
        if self.state != GameState::Playing {
            return report;
        }

        let dt = dt_ms.min(MAX_TICK_DELTA_MS);
        self.survival_ms += dt;
        self.accumulated_ms += dt;

        while self.accumulated_ms >= self.speed_ms {
            self.accumulated_ms -= self.speed_ms;
            self.step(now, rng, &mut report);
            if self.state != GameState::Playing {
                break;
            }
        }
        report
    }

    /// Read-only view for a render frame.
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            state: self.state,
            score: self.score,
            ai_score: self.ai_score,
            high_score: self.high_score,
            speed_ms: self.speed_ms,
            food: self.food,
            player_body: &self.player.body,
            ai_body: self.ai_snake.as_ref().map(|ai| &ai.body),
            ai_alive: self.ai_snake.as_ref().map_or(false, |ai| ai.alive),
            outcome: self.outcome,
        }
    }

    /// Display statistics, combining the difficulty metrics with the
    /// session-owned high score.
    pub fn stats(&self) -> DifficultyStats {
        self.difficulty.formatted_stats(self.high_score)
    }

    pub fn survival_ms(&self) -> u64 {
        self.survival_ms
    }

    /// One fixed step: move player, then the AI, then resolve in that
    /// same order. A head-to-head coincidence ends the game as a draw
    /// before individual resolution.
    fn step<R: Rng>(&mut self, now: Instant, rng: &mut R, report: &mut TickReport) {
        report.steps += 1;
        let prev_score = self.score;
        let prev_ai_score = self.ai_score;

        self.player.advance();

        let mut ai_moved = false;
        if let Some(ai) = self.ai_snake.as_mut() {
            if ai.alive {
                let params = self.difficulty.ai_params();
                let view = AiGameView {
                    ai_body: &ai.body,
                    ai_direction: ai.direction,
                    player_body: &self.player.body,
                    food: self.food,
                    grid_size: self.grid_size,
                };
                let decision = self.engine.decide(&view, &params, now, rng);
                ai.set_direction(decision.direction);
                ai.advance();
                ai_moved = true;
            }
        }

        if ai_moved {
            let ai_head = self.ai_snake.as_ref().map(|ai| ai.head());
            if ai_head == Some(self.player.head()) {
                self.finish(Some(GameOutcome::Draw), now, rng, report);
                return;
            }
        }

        let player_collision = classify_collision(
            &self.player,
            self.ai_snake.as_ref(),
            CollisionKind::AiSnake,
            self.food,
            self.grid_size,
        );
        if player_collision != CollisionKind::None {
            report.player_collision = player_collision;
        }
        match player_collision {
            CollisionKind::None => {
                if let Some(obstacle) =
                    commentary::detect_near_miss(&self.player.body, self.grid_size)
                {
                    self.emit(CommentEvent::NearMiss, Some(obstacle), now, rng, report);
                }
            }
            CollisionKind::Food => {
                report.player_ate = true;
                self.player.grow();
                self.score += 1;
                self.food = spawn_food(&self.occupied_cells(), self.grid_size, rng);
                if self.speed_ms > MIN_SPEED_MS {
                    self.speed_ms = (self.speed_ms - SPEED_INCREMENT_MS).max(MIN_SPEED_MS);
                }
                self.emit(CommentEvent::PlayerEat, None, now, rng, report);
                if commentary::is_milestone(self.score) {
                    self.emit(CommentEvent::ScoreMilestone, None, now, rng, report);
                }
            }
            _ => {
                let outcome = self.ai_snake.as_ref().map(|ai| {
                    if ai.alive {
                        GameOutcome::AiWin
                    } else {
                        GameOutcome::PlayerWin
                    }
                });
                self.finish(outcome, now, rng, report);
                return;
            }
        }

        if ai_moved {
            let ai_collision = match self.ai_snake.as_ref() {
                Some(ai) => classify_collision(
                    ai,
                    Some(&self.player),
                    CollisionKind::PlayerSnake,
                    self.food,
                    self.grid_size,
                ),
                None => CollisionKind::None,
            };
            if ai_collision != CollisionKind::None {
                report.ai_collision = ai_collision;
            }
            match ai_collision {
                CollisionKind::None => {}
                CollisionKind::Food => {
                    if let Some(ai) = self.ai_snake.as_mut() {
                        ai.grow();
                    }
                    report.ai_ate = true;
                    self.ai_score += 1;
                    self.food = spawn_food(&self.occupied_cells(), self.grid_size, rng);
                    self.emit(CommentEvent::AiEat, None, now, rng, report);
                }
                _ => {
                    if let Some(ai) = self.ai_snake.as_mut() {
                        ai.kill();
                    }
                    report.ai_died = true;
                }
            }
        }

        if commentary::is_comeback(prev_score, prev_ai_score, self.score, self.ai_score) {
            self.emit(CommentEvent::Comeback, None, now, rng, report);
        }
    }

    /// End the game: flip the state, settle the high score, record the
    /// result for adaptive difficulty, and announce the outcome.
    fn finish<R: Rng>(
        &mut self,
        outcome: Option<GameOutcome>,
        now: Instant,
        rng: &mut R,
        report: &mut TickReport,
    ) {
        self.state = GameState::GameOver;
        self.outcome = outcome;
        report.game_over = true;
        report.outcome = outcome;

        if self.score > self.high_score {
            self.high_score = self.score;
            report.new_high_score = true;
            if self.persist {
                let _ = persistence::save_high_score(self.high_score);
            }
        }

        // Only versus games feed the skill metrics; solo runs would
        // drown the win-rate signal.
        if self.ai_snake.is_some() {
            let record = GameRecord {
                won: outcome == Some(GameOutcome::PlayerWin),
                score: self.score,
                survival_ms: self.survival_ms,
                ai_score: self.ai_score,
            };
            self.difficulty.record_game(&record);
        }

        let event = match outcome {
            Some(GameOutcome::PlayerWin) => Some(CommentEvent::PlayerWin),
            Some(GameOutcome::AiWin) => Some(CommentEvent::AiWin),
            Some(GameOutcome::Draw) => Some(CommentEvent::Draw),
            None => None,
        };
        if let Some(event) = event {
            self.emit(event, None, now, rng, report);
        }
    }

    fn emit<R: Rng>(
        &mut self,
        event: CommentEvent,
        obstacle: Option<&'static str>,
        now: Instant,
        rng: &mut R,
        report: &mut TickReport,
    ) {
        let ctx = CommentContext {
            player_score: self.score,
            ai_score: self.ai_score,
            obstacle,
        };
        if let Some(line) = self.commentary.comment_on(event, &ctx, now, rng) {
            report.commentary.push(line);
        }
    }

    /// Cells food must avoid: every segment of every living snake.
    fn occupied_cells(&self) -> HashSet<Position> {
        let mut occupied: HashSet<Position> = self.player.body.iter().copied().collect();
        if let Some(ai) = &self.ai_snake {
            if ai.alive {
                occupied.extend(ai.body.iter().copied());
            }
        }
        occupied
    }
}

/// First collision for a snake's head, in the fixed order: bounds, own
/// body, opponent body, food. A dead opponent is not an obstacle.
pub fn classify_collision(
    snake: &Snake,
    opponent: Option<&Snake>,
    opponent_kind: CollisionKind,
    food: Position,
    grid_size: i16,
) -> CollisionKind {
    let head = snake.head();
    if !head.in_bounds(grid_size) {
        return CollisionKind::Wall;
    }
    if snake.self_collision() {
        return CollisionKind::SelfHit;
    }
    if let Some(op) = opponent {
        if op.alive && op.occupies(head) {
            return opponent_kind;
        }
    }
    if head == food {
        return CollisionKind::Food;
    }
    CollisionKind::None
}
