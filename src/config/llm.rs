use std::time::Duration;

use secrecy::SecretString;

use crate::config::{optional_env, parse_optional_env};
use crate::error::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Generation backend configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for the generative-language endpoint. Without one every
    /// exchange falls back to its canned reply.
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    /// Transport timeout for a single request.
    pub timeout: Duration,
}

impl LlmConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        let api_key = optional_env("GEMINI_API_KEY")?.map(SecretString::from);
        let model =
            optional_env("GEMINI_MODEL")?.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let base_url = optional_env("GEMINI_BASE_URL")?
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());
        let timeout_secs: u64 = parse_optional_env("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "GEMINI_BASE_URL".to_string(),
                message: format!("must be an http(s) URL, got '{base_url}'"),
            });
        }
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "LLM_TIMEOUT_SECS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
