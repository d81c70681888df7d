use dotenvy::dotenv;
use std::env;

use crate::error::{Result, VisibilityError};
use crate::security::ApiKey;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 250;

/// Analysis configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// A missing or blank `OPENAI_API_KEY` is a startup failure so that no
    /// completion call is ever attempted without a credential.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .map(ApiKey::new)
            .filter(|key| !key.is_blank())
            .ok_or_else(|| VisibilityError::Config("OPENAI_API_KEY must be set".into()))?;

        let max_tokens = match lookup("VISIBILITY_MAX_TOKENS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| {
                    VisibilityError::Config(format!(
                        "VISIBILITY_MAX_TOKENS must be a positive number, got {raw:?}"
                    ))
                })?,
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            api_key,
            base_url: lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("VISIBILITY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_lookup(vars(&[])).unwrap_err();
        assert!(matches!(err, VisibilityError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_fails() {
        let result = Config::from_lookup(vars(&[("OPENAI_API_KEY", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(vars(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.api_key.expose(), "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 250);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "https://proxy.local/v1"),
            ("VISIBILITY_MODEL", "gpt-4o"),
            ("VISIBILITY_MAX_TOKENS", "120"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://proxy.local/v1");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 120);

        let config = config.with_model("gpt-4.1-mini").with_max_tokens(64);
        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.max_tokens, 64);
    }

    #[test]
    fn test_invalid_max_tokens() {
        let result = Config::from_lookup(vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("VISIBILITY_MAX_TOKENS", "lots"),
        ]));
        assert!(matches!(result, Err(VisibilityError::Config(_))));
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let err = Config::from_lookup(vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("VISIBILITY_MAX_TOKENS", "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("positive number"));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = Config::from_lookup(vars(&[("OPENAI_API_KEY", "sk-very-secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
