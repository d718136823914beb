//! Configuration management for Herald
//!
//! Supports environment variables, config files, and runtime overrides.
//! Models and tool launch commands are interchangeable via settings.
//!
//! Config file location: ~/.config/herald/config.toml

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{HeraldError, Result};

/// Main configuration for Herald
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API configuration
    pub gemini: GeminiConfig,
    /// Model configuration
    pub models: ModelConfig,
    /// Reddit tool configuration
    pub reddit: RedditToolConfig,
    /// Text-to-speech tool configuration
    pub tts: TtsToolConfig,
    /// Agent configuration
    pub agent: AgentConfig,
    /// Credentials, loaded from the environment and never written to disk
    #[serde(skip)]
    pub credentials: Credentials,
}

/// Gemini API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base URL
    pub api_base: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Model configuration - one model reference per agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model used by the coordinator for routing and direct answers
    pub coordinator: String,
    /// Model used by the Reddit scout
    pub scout: String,
    /// Model used by the summarizer
    pub summarizer: String,
    /// Model used by the speaker
    pub speaker: String,
}

/// Launch configuration for the Reddit MCP tool subprocess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditToolConfig {
    /// Whether the Reddit tool is enabled
    pub enabled: bool,
    /// Launcher executable
    pub command: String,
    /// Launcher arguments
    pub args: Vec<String>,
}

/// Launch configuration for the ElevenLabs MCP tool subprocess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsToolConfig {
    /// Whether the TTS tool is enabled
    pub enabled: bool,
    /// Launcher executable
    pub command: String,
    /// Launcher arguments
    pub args: Vec<String>,
    /// Voice used for synthesis
    pub voice: String,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum conversation history length (storage limit)
    /// Default: 1000
    pub max_history: usize,
    /// Number of recent messages to include in context window
    /// Default: 20
    pub context_window: usize,
    /// Maximum tool-calling loop turns before stopping
    /// Default: 5
    pub max_turns: usize,
    /// Whether to show debug output
    pub debug: bool,
}

/// API credentials, read from the environment once at startup.
///
/// Missing keys degrade to empty strings; the downstream endpoint or tool
/// subprocess rejects invalid credentials at call time.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Credential for the Gemini endpoint (GOOGLE_API_KEY)
    pub google_api_key: String,
    /// Credential for the ElevenLabs TTS tool (ELEVENLABS_API_KEY)
    pub elevenlabs_api_key: String,
}

impl Credentials {
    /// Load credentials from the environment
    pub fn from_env() -> Self {
        Self {
            google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY").unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            models: ModelConfig::default(),
            reddit: RedditToolConfig::default(),
            tts: TtsToolConfig::default(),
            agent: AgentConfig::default(),
            credentials: Credentials::from_env(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: env::var("HERALD_GEMINI_API_BASE")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            timeout_secs: 120,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            coordinator: env::var("HERALD_COORDINATOR_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            scout: env::var("HERALD_SCOUT_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            summarizer: env::var("HERALD_SUMMARIZER_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            speaker: env::var("HERALD_SPEAKER_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash-latest".to_string()),
        }
    }
}

impl Default for RedditToolConfig {
    fn default() -> Self {
        Self {
            enabled: env::var("HERALD_REDDIT_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            command: "uvx".to_string(),
            args: vec![
                "--from".to_string(),
                "git+https://github.com/adhikasp/mcp-reddit.git".to_string(),
                "mcp-reddit".to_string(),
            ],
        }
    }
}

impl Default for TtsToolConfig {
    fn default() -> Self {
        Self {
            enabled: env::var("HERALD_TTS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            command: "uvx".to_string(),
            args: vec!["elevenlabs-mcp".to_string()],
            voice: "Will".to_string(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_history: 1000,
            context_window: 20,
            max_turns: 5,
            debug: env::var("HERALD_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("herald")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(mut config) = Self::load_from_file() {
            config.credentials = Credentials::from_env();
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(HeraldError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| HeraldError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| HeraldError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file (credentials are never serialized)
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| HeraldError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| HeraldError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| HeraldError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Environment map handed to the TTS tool subprocess
    pub fn tts_env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert(
            "ELEVENLABS_API_KEY".to_string(),
            self.credentials.elevenlabs_api_key.clone(),
        );
        env
    }

    /// Check whether a Gemini credential is present
    pub fn has_google_api_key(&self) -> bool {
        !self.credentials.google_api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.models.coordinator, "gemini-2.0-flash");
        assert_eq!(config.models.speaker, "gemini-1.5-flash-latest");
        assert_eq!(config.reddit.command, "uvx");
        assert_eq!(config.tts.voice, "Will");
        assert_eq!(config.agent.max_turns, 5);
    }

    #[test]
    fn test_config_serialization_skips_credentials() {
        let mut config = Config::default();
        config.credentials.google_api_key = "secret".to_string();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("coordinator"));
        assert!(!toml_str.contains("secret"));
    }

    #[test]
    fn test_tts_env_contains_key() {
        let mut config = Config::default();
        config.credentials.elevenlabs_api_key = "el-key".to_string();
        let env = config.tts_env();
        assert_eq!(env.get("ELEVENLABS_API_KEY").map(String::as_str), Some("el-key"));
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("herald"));
    }
}
