use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::errors::MathError;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const TELEMETRY_TOKEN_ENV: &str = "TELEMETRY_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),
}

impl From<ConfigError> for MathError {
    fn from(err: ConfigError) -> Self {
        MathError::Config(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// API key for the model service; falls back to OPENAI_API_KEY
    pub api_key: Option<String>,

    /// Chat completions endpoint
    pub api_endpoint: String,

    /// Model used for text stages
    pub model: String,

    /// Model used for image transcription, if different
    pub vision_model: Option<String>,

    /// Temperature for generation (0.0-1.0)
    pub temperature: f32,

    /// Maximum tokens per completion
    pub max_tokens: usize,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Upper bound on tool-call round trips within one structured call
    pub max_tool_rounds: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            api_key: None,
            api_endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            vision_model: None,
            temperature: 0.2,
            max_tokens: 4096,
            timeout_secs: 120,
            max_tool_rounds: 4,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub model: ModelConfig,

    /// Telemetry credential; telemetry stays off without it
    pub telemetry_token: Option<String>,

    /// Run the math-only guardrail before the main stages
    pub guardrail: bool,

    /// Run classification and solution concurrently
    pub parallel_analysis: bool,
}

impl PipelineConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    /// Get the API key, checking the environment if not in config
    pub fn api_key(&self) -> Result<String, ConfigError> {
        use log::debug;

        if let Some(api_key) = &self.model.api_key {
            debug!("Using API key from config");
            return Ok(api_key.clone());
        }

        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => {
                debug!("Using API key from {}", API_KEY_ENV);
                Ok(key)
            }
            _ => Err(ConfigError::MissingApiKey(format!("set {} or model.api_key", API_KEY_ENV))),
        }
    }

    /// Telemetry token from config or environment; `None` disables telemetry
    pub fn telemetry_token(&self) -> Option<String> {
        self.telemetry_token
            .clone()
            .or_else(|| std::env::var(TELEMETRY_TOKEN_ENV).ok())
            .filter(|token| !token.trim().is_empty())
    }

    /// Model to use for transcription
    pub fn vision_model(&self) -> &str {
        self.model.vision_model.as_deref().unwrap_or(&self.model.model)
    }
}
