use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::{
    DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL, DEFAULT_EXTRACTION_TIMEOUT_MS, DEFAULT_GEMINI_MODEL,
    DEFAULT_GENERATION_TIMEOUT_SECS,
};

const CONFIG_FILE: &str = "jaremis";
const ENV_PREFIX: &str = "JAREMIS";


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JaremisConfig {
    pub llm_provider: String,
    pub llm_model: String,
    #[serde(skip_serializing)]
    pub llm_api_key: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_temperature: f64,

    /// Budget for the keyword-extraction call before the regex fallback kicks in.
    pub extraction_timeout_ms: u64,
    pub generation_timeout_secs: u64,

    pub cache_size: usize,
    pub cache_ttl_secs: u64,
}

impl JaremisConfig {
    /// Defaults, then an optional `jaremis.{toml,json,yaml}` in the working
    /// directory, then `JAREMIS_*` environment variables.
    pub fn load() -> Result<Self> {
        let mut config: Self = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        if config.llm_api_key.is_none() && config.llm_provider == "gemini" {
            config.llm_api_key = std::env::var("GOOGLE_API_KEY").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_size == 0 {
            return Err(super::JaremisError::Config(
                "cache_size must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(super::JaremisError::Config(format!(
                "llm_temperature out of range: {}",
                self.llm_temperature
            )));
        }
        Ok(())
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_millis(self.extraction_timeout_ms)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}

impl Default for JaremisConfig {
    fn default() -> Self {
        Self {
            llm_provider: "gemini".to_string(),
            llm_model: DEFAULT_GEMINI_MODEL.to_string(),
            llm_api_key: None,
            llm_base_url: None,
            llm_temperature: 0.3,

            extraction_timeout_ms: DEFAULT_EXTRACTION_TIMEOUT_MS,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,

            cache_size: DEFAULT_CACHE_SIZE,
            cache_ttl_secs: DEFAULT_CACHE_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JaremisConfig::default();
        assert_eq!(config.llm_provider, "gemini");
        assert_eq!(config.extraction_timeout(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_cache() {
        let config = JaremisConfig {
            cache_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = JaremisConfig {
            llm_api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
