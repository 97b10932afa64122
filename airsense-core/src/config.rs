use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

/// Listen address for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}

/// Top-level configuration stored on disk.
///
/// Both API keys are optional: a missing WAQI key switches the gateway to
/// simulated readings, a missing Groq key makes the advisor answer with a
/// fixed "key missing" payload. The environment variables `WAQI_API_KEY`
/// and `GROQ_API_KEY` override the file values when set and non-empty.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// API token for the WAQI air-quality feed.
    pub waqi_api_key: Option<String>,

    /// API key for the Groq chat-completions endpoint.
    pub groq_api_key: Option<String>,

    pub server: ServerConfig,
}

impl Config {
    /// Load config from the platform config directory, or return defaults if
    /// no file exists yet. Environment overrides are applied either way.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            let mut cfg = Self::default();
            cfg.apply_env_overrides();
            return Ok(cfg);
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "airsense", "airsense-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env("WAQI_API_KEY") {
            self.waqi_api_key = Some(key);
        }
        if let Some(key) = non_empty_env("GROQ_API_KEY") {
            self.groq_api_key = Some(key);
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
