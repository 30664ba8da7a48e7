//! Generic JSON persistence helpers for ~/.snakepit/ save files.
//!
//! The high score, player metrics, and settings records all share this
//! load/save path. Corrupt or missing files fall back to defaults instead
//! of failing.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.snakepit/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".snakepit");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a save file in ~/.snakepit/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load a JSON file from ~/.snakepit/, returning `T::default()` if missing
/// or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match save_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.snakepit/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = save_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

pub const HIGH_SCORE_FILE: &str = "highscore.json";

/// Load the stored high score, 0 if absent.
pub fn load_high_score() -> u32 {
    load_json_or_default(HIGH_SCORE_FILE)
}

/// Persist a new high score.
pub fn save_high_score(score: u32) -> io::Result<()> {
    save_json(HIGH_SCORE_FILE, &score)
}
