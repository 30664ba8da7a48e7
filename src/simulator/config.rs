//! Simulation configuration.

use crate::difficulty::DifficultyMode;

/// Configuration for a batch of simulated games.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of games to play back to back
    pub num_games: u32,

    /// Random seed for reproducibility (None = random); game N uses seed + N
    pub seed: Option<u64>,

    /// Maximum ticks per game before it is scored as a timeout
    pub max_ticks_per_game: u64,

    /// Difficulty the AI opponent plays at for every game
    pub mode: DifficultyMode,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-game lines)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_games: 1000,
            seed: None,
            max_ticks_per_game: 10_000,
            mode: DifficultyMode::Medium,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking the matchup at one fixed difficulty
    pub fn matchup_test(mode: DifficultyMode) -> Self {
        Self {
            num_games: 200,
            mode,
            ..Default::default()
        }
    }

    /// Quick config for watching adaptive difficulty drift over a streak
    pub fn adaptive_drift_test(num_games: u32) -> Self {
        Self {
            num_games,
            mode: DifficultyMode::Adaptive,
            ..Default::default()
        }
    }
}
