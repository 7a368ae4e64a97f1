//! Runtime configuration assembled from the command line and environment.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;

use crate::data::DEFAULT_BANK_PATH;
use crate::llm::{GeminiClient, GeminiConfig, LlmError};
use crate::protocol::DEFAULT_PORT;

/// Settings for `quiz-ia serve`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bank_path: PathBuf,
    /// `None` runs the server without an LLM.
    pub gemini: Option<GeminiConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bank_path: PathBuf::from(DEFAULT_BANK_PATH),
            gemini: None,
        }
    }
}

/// Milliseconds since the epoch, the seed used when none is given.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Build a Gemini configuration, or `None` when no usable key was given.
pub fn gemini_config(
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
) -> Option<GeminiConfig> {
    let api_key = api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());

    let Some(api_key) = api_key else {
        if model.is_some() || base_url.is_some() {
            warn!("Gemini options given without an API key, ignoring them");
        }
        return None;
    };

    let mut config = GeminiConfig::new(api_key);
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    Some(config)
}

/// Create the client for an optional configuration.
pub fn gemini_client(config: Option<GeminiConfig>) -> Result<Option<GeminiClient>, LlmError> {
    config.map(GeminiClient::new).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::DEFAULT_MODEL;

    #[test]
    fn test_blank_key_disables_gemini() {
        assert!(gemini_config(None, None, None).is_none());
        assert!(gemini_config(Some("  ".to_string()), Some("m".to_string()), None).is_none());
    }

    #[test]
    fn test_overrides() {
        let config = gemini_config(Some(" key ".to_string()), None, None).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, DEFAULT_MODEL);

        let config = gemini_config(
            Some("key".to_string()),
            Some("gemini-1.5-pro".to_string()),
            Some("http://localhost:9000".to_string()),
        )
        .unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8712);
        assert_eq!(config.bank_path, PathBuf::from("preguntas.txt"));
        assert!(gemini_client(config.gemini).unwrap().is_none());
    }

    #[test]
    fn test_clock_seed_is_current() {
        // 2020-01-01 in milliseconds.
        assert!(clock_seed() > 1_577_836_800_000);
    }
}
