//! Difficulty handling: fixed presets, persisted player metrics, and
//! the adaptive controller that retunes speed, aggression, and mistake
//! rate from recent performance.

use serde::{Deserialize, Serialize};

use crate::ai::AiParams;
use crate::constants::{
    ADAPTIVE_SMOOTHING, MAX_ADAPTIVE_SPEED_MS, MIN_ADAPTIVE_SPEED_MS, RECENT_GAMES_WINDOW,
};
use crate::utils::persistence;

const METRICS_FILE: &str = "metrics.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyMode {
    Easy,
    Medium,
    Hard,
    Adaptive,
}

impl DifficultyMode {
    pub const ALL: [DifficultyMode; 4] = [
        DifficultyMode::Easy,
        DifficultyMode::Medium,
        DifficultyMode::Hard,
        DifficultyMode::Adaptive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyMode::Easy => "Easy",
            DifficultyMode::Medium => "Medium",
            DifficultyMode::Hard => "Hard",
            DifficultyMode::Adaptive => "Adaptive",
        }
    }

    pub fn from_name(name: &str) -> Option<DifficultyMode> {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Some(DifficultyMode::Easy),
            "medium" => Some(DifficultyMode::Medium),
            "hard" => Some(DifficultyMode::Hard),
            "adaptive" => Some(DifficultyMode::Adaptive),
            _ => None,
        }
    }

    /// Fixed tuning for this mode. Adaptive starts from the Medium
    /// values and drifts from there.
    pub fn preset(&self) -> DifficultyTuning {
        match self {
            DifficultyMode::Easy => DifficultyTuning {
                speed_ms: 200.0,
                aggression: 0.3,
                mistake_rate: 0.20,
            },
            DifficultyMode::Medium | DifficultyMode::Adaptive => DifficultyTuning {
                speed_ms: 150.0,
                aggression: 0.5,
                mistake_rate: 0.05,
            },
            DifficultyMode::Hard => DifficultyTuning {
                speed_ms: 100.0,
                aggression: 0.8,
                mistake_rate: 0.0,
            },
        }
    }

    /// Sampling temperature for remote move requests.
    fn temperature(&self, aggression: f64) -> f64 {
        match self {
            DifficultyMode::Easy => 0.7,
            DifficultyMode::Medium => 0.3,
            DifficultyMode::Hard => 0.1,
            DifficultyMode::Adaptive => {
                if aggression >= 0.65 {
                    0.1
                } else if aggression <= 0.4 {
                    0.7
                } else {
                    0.3
                }
            }
        }
    }
}

/// Live tuning values. `speed_ms` stays integral (it is rounded after
/// every adaptive step); the other two drift continuously.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyTuning {
    pub speed_ms: f64,
    pub aggression: f64,
    pub mistake_rate: f64,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        DifficultyMode::Medium.preset()
    }
}

/// One entry in the sliding window of recent games.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecentGame {
    pub won: bool,
    pub score: u32,
    pub survival_ms: u64,
}

/// Lifetime player metrics, persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerMetrics {
    pub games_played: u32,
    pub games_won: u32,
    pub total_score: u64,
    pub total_survival_ms: u64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub recent_games: Vec<RecentGame>,
}

impl PlayerMetrics {
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.games_won as f64 / self.games_played as f64
    }

    pub fn avg_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games_played as f64
    }

    /// Win rate over the sliding window alone.
    pub fn recent_performance(&self) -> f64 {
        if self.recent_games.is_empty() {
            return 0.0;
        }
        let wins = self.recent_games.iter().filter(|g| g.won).count();
        wins as f64 / self.recent_games.len() as f64
    }
}

/// Outcome of one finished game, fed into the metrics history.
#[derive(Debug, Clone, Copy)]
pub struct GameRecord {
    pub won: bool,
    pub score: u32,
    pub survival_ms: u64,
    /// Opponent's final score. Informational; no tuning formula reads
    /// it and the sliding window keeps only the player-side fields.
    pub ai_score: u32,
}

/// Owns the difficulty mode, the live tuning, and the player metrics.
///
/// Non-adaptive modes pin the tuning to their preset. Adaptive mode
/// recomputes target values after every recorded game and eases the
/// live tuning toward them, ten percent per game.
pub struct DifficultyController {
    pub mode: DifficultyMode,
    pub tuning: DifficultyTuning,
    pub metrics: PlayerMetrics,
    persist: bool,
}

impl DifficultyController {
    /// Controller backed by the on-disk metrics file.
    pub fn new(mode: DifficultyMode) -> Self {
        let metrics = persistence::load_json_or_default(METRICS_FILE);
        let mut controller = DifficultyController {
            mode: DifficultyMode::Medium,
            tuning: DifficultyTuning::default(),
            metrics,
            persist: true,
        };
        controller.set_mode(mode);
        controller
    }

    /// Controller that never touches the disk. Used by the simulator
    /// and by tests.
    pub fn in_memory(mode: DifficultyMode) -> Self {
        let mut controller = DifficultyController {
            mode: DifficultyMode::Medium,
            tuning: DifficultyTuning::default(),
            metrics: PlayerMetrics::default(),
            persist: false,
        };
        controller.set_mode(mode);
        controller
    }

    /// Switch modes. Fixed modes apply their preset immediately;
    /// switching to Adaptive keeps the current tuning as the starting
    /// point.
    pub fn set_mode(&mut self, mode: DifficultyMode) {
        self.mode = mode;
        if mode != DifficultyMode::Adaptive {
            self.tuning = mode.preset();
        }
    }

    /// Record a finished game: update counters, streaks, and the
    /// sliding window, persist, then retune if adaptive. Save failures
    /// are non-fatal.
    pub fn record_game(&mut self, record: &GameRecord) {
        self.metrics.games_played += 1;
        if record.won {
            self.metrics.games_won += 1;
            self.metrics.current_streak += 1;
            if self.metrics.current_streak > self.metrics.best_streak {
                self.metrics.best_streak = self.metrics.current_streak;
            }
        } else {
            self.metrics.current_streak = 0;
        }
        self.metrics.total_score += record.score as u64;
        self.metrics.total_survival_ms += record.survival_ms;

        self.metrics.recent_games.push(RecentGame {
            won: record.won,
            score: record.score,
            survival_ms: record.survival_ms,
        });
        if self.metrics.recent_games.len() > RECENT_GAMES_WINDOW {
            self.metrics.recent_games.remove(0);
        }

        if self.persist {
            let _ = persistence::save_json(METRICS_FILE, &self.metrics);
        }

        if self.mode == DifficultyMode::Adaptive {
            self.adjust();
        }
    }

    /// Wipe all statistics.
    pub fn reset_stats(&mut self) {
        self.metrics = PlayerMetrics::default();
        if self.persist {
            let _ = persistence::save_json(METRICS_FILE, &self.metrics);
        }
    }

    /// Tick interval the game should run at.
    pub fn game_speed_ms(&self) -> u64 {
        self.tuning.speed_ms.round() as u64
    }

    /// Parameter bundle handed to the AI decision engine.
    pub fn ai_params(&self) -> AiParams {
        AiParams {
            speed_ms: self.game_speed_ms(),
            aggression: self.tuning.aggression,
            mistake_rate: self.tuning.mistake_rate,
            temperature: self.mode.temperature(self.tuning.aggression),
        }
    }

    fn speed_target(&self) -> f64 {
        let mut speed = DifficultyMode::Medium.preset().speed_ms;
        let win_rate = self.metrics.win_rate();

        // Winning a lot: speed up (lower interval).
        if win_rate > 0.7 {
            speed -= 25.0;
        } else if win_rate > 0.6 {
            speed -= 15.0;
        }
        // Losing a lot: slow down.
        if win_rate < 0.3 {
            speed += 25.0;
        } else if win_rate < 0.4 {
            speed += 15.0;
        }

        let recent = self.metrics.recent_performance();
        if recent > 0.8 {
            speed -= 15.0;
        } else if recent < 0.4 {
            speed += 15.0;
        }

        speed.clamp(MIN_ADAPTIVE_SPEED_MS, MAX_ADAPTIVE_SPEED_MS)
    }

    fn aggression_target(&self) -> f64 {
        let mut aggression: f64 = 0.5;
        let win_rate = self.metrics.win_rate();
        if win_rate > 0.6 {
            aggression += 0.2;
        } else if win_rate < 0.4 {
            aggression -= 0.2;
        }
        aggression.clamp(0.1, 0.9)
    }

    fn mistake_target(&self) -> f64 {
        let win_rate = self.metrics.win_rate();
        if win_rate > 0.7 {
            0.0
        } else if win_rate > 0.5 {
            0.05
        } else if win_rate > 0.3 {
            0.15
        } else {
            0.25
        }
    }

    /// Ease the live tuning toward the current targets. Speed is kept
    /// integral; the rounding makes it settle a few ms short of the
    /// target rather than converge exactly.
    fn adjust(&mut self) {
        let speed_target = self.speed_target();
        let aggression_target = self.aggression_target();
        let mistake_target = self.mistake_target();

        self.tuning.speed_ms = lerp(self.tuning.speed_ms, speed_target, ADAPTIVE_SMOOTHING).round();
        self.tuning.aggression = lerp(self.tuning.aggression, aggression_target, ADAPTIVE_SMOOTHING);
        self.tuning.mistake_rate =
            lerp(self.tuning.mistake_rate, mistake_target, ADAPTIVE_SMOOTHING);
    }

    /// Skill estimate in percent, from win rate, average score, and
    /// best streak.
    pub fn estimate_skill(&self) -> u32 {
        if self.metrics.games_played == 0 {
            return 0;
        }
        let win_component = (self.metrics.win_rate() / 0.7).min(1.0);
        let score_component = (self.metrics.avg_score() / 30.0).min(1.0);
        let streak_component = (self.metrics.best_streak as f64 / 10.0).min(1.0);
        let skill = win_component * 0.4 + score_component * 0.3 + streak_component * 0.3;
        (skill * 100.0).round() as u32
    }

    /// Display-ready statistics snapshot. The high score lives with
    /// the game session, so it is passed in.
    pub fn formatted_stats(&self, high_score: u32) -> DifficultyStats {
        let skill_level = self.estimate_skill();
        DifficultyStats {
            games_played: self.metrics.games_played,
            games_won: self.metrics.games_won,
            win_rate: format!("{:.1}%", self.metrics.win_rate() * 100.0),
            high_score,
            avg_score: format!("{:.1}", self.metrics.avg_score()),
            current_streak: self.metrics.current_streak,
            best_streak: self.metrics.best_streak,
            skill_level,
            skill_label: skill_label(skill_level),
        }
    }
}

/// Formatted statistics for display surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyStats {
    pub games_played: u32,
    pub games_won: u32,
    pub win_rate: String,
    pub high_score: u32,
    pub avg_score: String,
    pub current_streak: u32,
    pub best_streak: u32,
    pub skill_level: u32,
    pub skill_label: &'static str,
}

pub fn skill_label(percent: u32) -> &'static str {
    if percent >= 90 {
        "Expert"
    } else if percent >= 70 {
        "Advanced"
    } else if percent >= 50 {
        "Intermediate"
    } else if percent >= 30 {
        "Beginner"
    } else {
        "Novice"
    }
}

fn lerp(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}
