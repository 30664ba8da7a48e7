//! Move decision engine: remote source with layered local fallbacks.

use std::collections::VecDeque;
use std::time::Instant;

use rand::Rng;

use crate::ai::remote::RemoteMoveClient;
use crate::ai::{heuristics, pathfinding, AiGameView, AiParams};
use crate::constants::MOVE_CACHE_MS;
use crate::grid::Direction;

const LOG_CAP: usize = 32;

/// Which source produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Remote,
    Heuristic,
    Pathfind,
    Random,
}

/// A direction plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    pub direction: Direction,
    pub source: MoveSource,
}

/// Decides the AI snake's moves. Remote inference is optional; the
/// local fallback chain always produces a direction, so `decide` never
/// fails. Decisions are cached for a short window to keep fast tick
/// rates from hammering the endpoint.
pub struct AiDecisionEngine {
    remote: Option<RemoteMoveClient>,
    last_decision: Option<(MoveDecision, Instant)>,
    /// Recent diagnostics, newest last. Bounded.
    pub log: VecDeque<String>,
}

impl AiDecisionEngine {
    pub fn new(remote: Option<RemoteMoveClient>) -> Self {
        AiDecisionEngine {
            remote,
            last_decision: None,
            log: VecDeque::new(),
        }
    }

    /// Decide the next direction for the AI snake.
    ///
    /// Within the cache window the previous decision is returned
    /// unchanged. Otherwise the remote source is tried first (when
    /// configured), then the local chain: greedy heuristic, A* path
    /// toward the food, flood-ranked safe move, and finally the
    /// current direction so a boxed-in snake resolves its collision on
    /// the next tick. The difficulty mistake roll runs after source
    /// selection and may swap the chosen move for a random legal
    /// alternative.
    pub fn decide<R: Rng>(
        &mut self,
        view: &AiGameView,
        params: &AiParams,
        now: Instant,
        rng: &mut R,
    ) -> MoveDecision {
        if let Some((decision, at)) = self.last_decision {
            if now.duration_since(at).as_millis() < MOVE_CACHE_MS as u128 {
                return decision;
            }
        }

        let chosen = match self.remote_move(view, params) {
            Some(direction) => MoveDecision {
                direction,
                source: MoveSource::Remote,
            },
            None => self.local_move(view),
        };

        let decision = apply_mistake(chosen, view, params.mistake_rate, rng);
        self.last_decision = Some((decision, now));
        decision
    }

    /// Drop the cached decision, e.g. when a new game starts.
    pub fn clear_cache(&mut self) {
        self.last_decision = None;
    }

    fn remote_move(&mut self, view: &AiGameView, params: &AiParams) -> Option<Direction> {
        let client = self.remote.as_ref()?;
        match client.request_move(view, params.temperature) {
            Ok(direction) => Some(direction),
            Err(e) => {
                self.log_event(format!("remote move failed: {}", e));
                None
            }
        }
    }

    fn local_move(&self, view: &AiGameView) -> MoveDecision {
        if let Some(direction) = heuristics::best_move(view) {
            return MoveDecision {
                direction,
                source: MoveSource::Heuristic,
            };
        }
        if let Some(head) = view.ai_head() {
            if let Some(direction) = pathfinding::next_move_to(
                head,
                view.food,
                view.player_body,
                view.ai_body,
                view.grid_size,
            ) {
                return MoveDecision {
                    direction,
                    source: MoveSource::Pathfind,
                };
            }
            if let Some(direction) = pathfinding::find_safe_move(
                head,
                view.ai_direction,
                view.player_body,
                view.ai_body,
                view.grid_size,
            ) {
                return MoveDecision {
                    direction,
                    source: MoveSource::Random,
                };
            }
        }
        MoveDecision {
            direction: view.ai_direction,
            source: MoveSource::Random,
        }
    }

    fn log_event(&mut self, message: String) {
        self.log.push_back(message);
        while self.log.len() > LOG_CAP {
            self.log.pop_front();
        }
    }
}

/// With probability `mistake_rate`, swap the chosen move for a random
/// legal alternative. Applies to every source, remote included.
fn apply_mistake<R: Rng>(
    decision: MoveDecision,
    view: &AiGameView,
    mistake_rate: f64,
    rng: &mut R,
) -> MoveDecision {
    if mistake_rate <= 0.0 {
        return decision;
    }
    if !rng.gen_bool(mistake_rate.clamp(0.0, 1.0)) {
        return decision;
    }
    let alternatives: Vec<Direction> = heuristics::possible_moves(view)
        .into_iter()
        .filter(|&d| d != decision.direction)
        .collect();
    if alternatives.is_empty() {
        return decision;
    }
    MoveDecision {
        direction: alternatives[rng.gen_range(0..alternatives.len())],
        source: MoveSource::Random,
    }
}
