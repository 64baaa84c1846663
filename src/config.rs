//! Configuration for MindBloom.
//!
//! Values come from the process environment, after loading a `.env` file
//! from the working directory when one exists.

mod llm;

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub use self::llm::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, LlmConfig};

/// Main configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub session: SessionConfig,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            llm: LlmConfig::resolve()?,
            session: SessionConfig::resolve()?,
        })
    }
}

const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 60 * 60;

/// Where the per-session results snapshot is kept.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub dir: PathBuf,
    /// Stored entries older than this are dropped at startup, which ends a
    /// session nobody closed with `end-session`.
    pub ttl: Duration,
}

impl SessionConfig {
    fn resolve() -> Result<Self, ConfigError> {
        let dir = optional_env("MINDBLOOM_SESSION_DIR")?
            .map(PathBuf::from)
            .unwrap_or_else(default_session_dir);
        let ttl_secs: u64 =
            parse_optional_env("MINDBLOOM_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
        if ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MINDBLOOM_SESSION_TTL_SECS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            dir,
            ttl: Duration::from_secs(ttl_secs),
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
            ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

/// Session data lives in the temp dir and expires after `ttl`.
fn default_session_dir() -> PathBuf {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "default".to_string());
    std::env::temp_dir().join(format!("mindbloom-{user}"))
}

pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::ParseError(format!(
            "failed to read {key}: {e}"
        ))),
    }
}

pub(crate) fn parse_optional_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)?
        .map(|s| {
            s.parse().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{e}"),
            })
        })
        .transpose()
        .map(|opt| opt.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use secrecy::ExposeSecret;

    // Env vars are process-global, so serialize tests that mutate them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const LLM_VARS: [&str; 4] = [
        "GEMINI_API_KEY",
        "GEMINI_MODEL",
        "GEMINI_BASE_URL",
        "LLM_TIMEOUT_SECS",
    ];

    fn clear_llm_vars() {
        for key in LLM_VARS {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn optional_env_treats_empty_as_missing() {
        let _lock = ENV_LOCK.lock();
        unsafe { std::env::set_var("_MB_TEST_EMPTY", "") };
        assert_eq!(optional_env("_MB_TEST_EMPTY").unwrap(), None);
        unsafe { std::env::remove_var("_MB_TEST_EMPTY") };
        assert_eq!(optional_env("_MB_TEST_EMPTY").unwrap(), None);
    }

    #[test]
    fn parse_optional_env_reports_bad_values() {
        let _lock = ENV_LOCK.lock();
        unsafe { std::env::set_var("_MB_TEST_NUM", "seven") };
        let err = parse_optional_env::<u64>("_MB_TEST_NUM", 1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "_MB_TEST_NUM"));
        unsafe { std::env::set_var("_MB_TEST_NUM", "7") };
        assert_eq!(parse_optional_env::<u64>("_MB_TEST_NUM", 1).unwrap(), 7);
        unsafe { std::env::remove_var("_MB_TEST_NUM") };
    }

    #[test]
    fn llm_defaults_without_env() {
        let _lock = ENV_LOCK.lock();
        clear_llm_vars();
        let config = LlmConfig::resolve().unwrap();
        assert!(!config.has_api_key());
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn llm_reads_overrides() {
        let _lock = ENV_LOCK.lock();
        clear_llm_vars();
        unsafe {
            std::env::set_var("GEMINI_API_KEY", "test-key");
            std::env::set_var("GEMINI_MODEL", "gemini-2.0-flash");
            std::env::set_var("GEMINI_BASE_URL", "http://localhost:8080/v1beta/");
            std::env::set_var("LLM_TIMEOUT_SECS", "5");
        }
        let config = LlmConfig::resolve().unwrap();
        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("test-key".to_string())
        );
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.timeout, Duration::from_secs(5));
        clear_llm_vars();
    }

    #[test]
    fn llm_rejects_bad_base_url_and_zero_timeout() {
        let _lock = ENV_LOCK.lock();
        clear_llm_vars();
        unsafe { std::env::set_var("GEMINI_BASE_URL", "ftp://example.com") };
        assert!(LlmConfig::resolve().is_err());
        unsafe { std::env::remove_var("GEMINI_BASE_URL") };

        unsafe { std::env::set_var("LLM_TIMEOUT_SECS", "0") };
        assert!(LlmConfig::resolve().is_err());
        clear_llm_vars();
    }

    #[test]
    fn session_dir_override() {
        let _lock = ENV_LOCK.lock();
        unsafe { std::env::set_var("MINDBLOOM_SESSION_DIR", "/tmp/mb-test-session") };
        let session = SessionConfig::resolve().unwrap();
        assert_eq!(session.dir, PathBuf::from("/tmp/mb-test-session"));
        unsafe { std::env::remove_var("MINDBLOOM_SESSION_DIR") };
        let session = SessionConfig::resolve().unwrap();
        assert!(session.dir.starts_with(std::env::temp_dir()));
    }

    #[test]
    fn session_ttl_default_and_override() {
        let _lock = ENV_LOCK.lock();
        unsafe { std::env::remove_var("MINDBLOOM_SESSION_TTL_SECS") };
        assert_eq!(
            SessionConfig::resolve().unwrap().ttl,
            Duration::from_secs(12 * 60 * 60)
        );

        unsafe { std::env::set_var("MINDBLOOM_SESSION_TTL_SECS", "90") };
        assert_eq!(SessionConfig::resolve().unwrap().ttl, Duration::from_secs(90));

        unsafe { std::env::set_var("MINDBLOOM_SESSION_TTL_SECS", "0") };
        assert!(SessionConfig::resolve().is_err());
        unsafe { std::env::remove_var("MINDBLOOM_SESSION_TTL_SECS") };
    }
}
