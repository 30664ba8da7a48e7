//! The game session: state machine, collision rules, and reporting.

pub mod session;
pub mod types;

pub use session::{classify_collision, GameSession};
pub use types::{CollisionKind, GameOutcome, GameSnapshot, GameState, TickReport};
