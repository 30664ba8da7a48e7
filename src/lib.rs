//! Snakepit - Two-Snake Arcade Game Core
//!
//! This module exposes the game logic for front-ends, the balance
//! simulator, and tests: the session state machine, the AI opponent
//! pipeline, adaptive difficulty, and the commentary engine.

pub mod ai;
pub mod commentary;
pub mod constants;
pub mod difficulty;
pub mod food;
pub mod game;
pub mod grid;
pub mod settings;
pub mod simulator;
pub mod snake;
pub mod utils;
