use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            timeout_seconds: 20,
        }
    }
}

impl AssistantConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub colleges_path: PathBuf,
    pub faq_path: PathBuf,
    pub top_limit: usize,
    pub assistant: AssistantConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            colleges_path: PathBuf::from("data/colleges.json"),
            faq_path: PathBuf::from("data/faq.json"),
            top_limit: 20,
            assistant: AssistantConfig::default(),
        }
    }
}

impl AppConfig {
    /// A non-blank key replaces whatever the file configured.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.assistant.api_key = Some(key.trim().to_string());
        }
        self
    }
}

/// Loads the JSON config at `path`. A missing file yields the defaults;
/// `GEMINI_API_KEY` from the environment overrides the file's key.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let config = if Path::new(path).exists() {
        let content = fs::read_to_string(path)?;
        parse_config(&content)?
    } else {
        warn!("Config file {} not found, using defaults", path);
        AppConfig::default()
    };
    Ok(config.with_api_key(std::env::var(API_KEY_ENV).ok()))
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}
