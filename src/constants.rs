// Board constants
pub const GRID_SIZE: i16 = 20;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

// Spawn positions (player faces right, AI faces left)
pub const PLAYER_SPAWN_X: i16 = 10;
pub const PLAYER_SPAWN_Y: i16 = 10;
pub const AI_SPAWN_X: i16 = 15;
pub const AI_SPAWN_Y: i16 = 15;

// Game timing constants
pub const INITIAL_SPEED_MS: u64 = 150;
pub const MIN_SPEED_MS: u64 = 80; // fastest the per-food speed-up can reach
pub const SPEED_INCREMENT_MS: u64 = 5; // speed-up per food eaten
pub const MAX_TICK_DELTA_MS: u64 = 500; // clamp for long frame gaps

// AI decision constants
pub const MOVE_CACHE_MS: u64 = 150;
pub const REMOTE_TIMEOUT_MS: u64 = 500;
pub const REMOTE_MAX_TOKENS: u32 = 10;
pub const MAX_SEARCH_ITERATIONS: u32 = 1000; // A* expansion cap
pub const OPEN_SPACE_CAP: usize = 50; // flood-fill cell budget

// Food placement
pub const FOOD_SPAWN_ATTEMPTS: u32 = 100;

// Adaptive difficulty constants
pub const MIN_ADAPTIVE_SPEED_MS: f64 = 75.0; // fastest
pub const MAX_ADAPTIVE_SPEED_MS: f64 = 250.0; // slowest
pub const ADAPTIVE_SMOOTHING: f64 = 0.1; // fraction of gap closed per game
pub const RECENT_GAMES_WINDOW: usize = 10;

// Commentary constants
pub const COMMENT_COOLDOWN_MS: u64 = 5000;
pub const COMMENT_MAX_LEN: usize = 50;
pub const COMMENT_MAX_TOKENS: u32 = 60;
pub const COMMENT_TEMPERATURE: f64 = 0.8;
pub const SCORE_MILESTONE_INTERVAL: u32 = 5;
