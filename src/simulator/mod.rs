//! Game balance simulator for Monte Carlo analysis.
//!
//! Run batches of simulated games to analyze:
//! - Player vs AI win rates at each difficulty
//! - Scoring and game-length distributions
//! - Where adaptive difficulty settles over a long streak
//!
//! The simulator drives real GameSession instances (src/game/session.rs)
//! for all game logic, so results match live gameplay behavior.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, GameRun};
