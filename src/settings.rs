//! Persisted user settings.

use std::io;

use serde::{Deserialize, Serialize};

use crate::ai::remote::RemoteMoveClient;
use crate::difficulty::DifficultyMode;
use crate::utils::persistence;

const SETTINGS_FILE: &str = "settings.json";

/// Credentials for the remote move endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    pub endpoint: String,
    pub api_key: String,
}

/// User-facing options. Unknown or missing fields fall back to their
/// defaults so older settings files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ai_enabled: bool,
    pub ai_difficulty: DifficultyMode,
    pub commentary_enabled: bool,
    pub sound_enabled: bool,
    pub remote: Option<RemoteSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ai_enabled: false,
            ai_difficulty: DifficultyMode::Medium,
            commentary_enabled: true,
            sound_enabled: true,
            remote: None,
        }
    }
}

impl Settings {
    pub fn load() -> Settings {
        persistence::load_json_or_default(SETTINGS_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        persistence::save_json(SETTINGS_FILE, self)
    }

    /// Remote client from the stored credentials, or `None` when they
    /// are absent or blank.
    pub fn remote_client(&self) -> Option<RemoteMoveClient> {
        self.remote
            .as_ref()
            .filter(|r| !r.endpoint.is_empty() && !r.api_key.is_empty())
            .map(|r| RemoteMoveClient::new(&r.endpoint, &r.api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.ai_enabled);
        assert_eq!(settings.ai_difficulty, DifficultyMode::Medium);
        assert!(settings.commentary_enabled);
        assert!(settings.sound_enabled);
        assert!(settings.remote.is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let settings = Settings {
            ai_enabled: true,
            ai_difficulty: DifficultyMode::Adaptive,
            commentary_enabled: false,
            sound_enabled: true,
            remote: Some(RemoteSettings {
                endpoint: "https://moves.example/v1/complete".to_string(),
                api_key: "k-123".to_string(),
            }),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"adaptive\""));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_sparse_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str("{\"ai_enabled\": true, \"ai_difficulty\": \"hard\"}").unwrap();
        assert!(settings.ai_enabled);
        assert_eq!(settings.ai_difficulty, DifficultyMode::Hard);
        assert!(settings.commentary_enabled);
        assert!(settings.remote.is_none());
    }

    #[test]
    fn test_remote_client_requires_credentials() {
        let mut settings = Settings::default();
        assert!(settings.remote_client().is_none());

        settings.remote = Some(RemoteSettings {
            endpoint: String::new(),
            api_key: "k".to_string(),
        });
        assert!(settings.remote_client().is_none());

        settings.remote = Some(RemoteSettings {
            endpoint: "https://moves.example".to_string(),
            api_key: "k".to_string(),
        });
        assert!(settings.remote_client().is_some());
    }
}
