// Bot settings
// Loaded from ~/.config/visibot/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bot API download ceiling.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Assets
    #[serde(rename = "model.path")]
    pub model_path: PathBuf,

    #[serde(rename = "assets.examplePath")]
    pub example_path: PathBuf,

    // Transport
    #[serde(rename = "telegram.apiBase")]
    pub api_base: String,

    #[serde(rename = "telegram.pollTimeoutSecs")]
    pub poll_timeout_secs: u64,

    #[serde(rename = "telegram.maxFileBytes")]
    pub max_file_bytes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            example_path: PathBuf::from("example.csv"),
            api_base: DEFAULT_API_BASE.to_string(),
            poll_timeout_secs: 30,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("visibot");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults.
    /// Writes a commented default file on first run.
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            Self::create_default_file(&path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
        Self::parse(&contents).map_err(|e| format!("Error parsing {}: {}", path.display(), e))
    }

    /// Parse settings JSON, ignoring lines that start with `//`.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Trained model artifact (visibot-model/v1 JSON)
    "model.path": "model.json",

    // Template sent in reply to /start
    "assets.examplePath": "example.csv",

    // Bot API endpoint and long-poll timeout
    "telegram.apiBase": "https://api.telegram.org",
    "telegram.pollTimeoutSecs": 30,

    // Uploads larger than this are refused before download
    "telegram.maxFileBytes": 20971520

    // The bot token is never stored here: use `visibot token set`
    // or the VISIBOT_TOKEN environment variable
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }
}
