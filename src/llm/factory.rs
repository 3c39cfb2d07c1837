use std::sync::Arc;

use super::providers::base::LlmProvider;
use super::providers::gemini::{GEMINI_BASE_URL, GeminiProvider};
use super::providers::ollama::OllamaProvider;
use crate::DEFAULT_OLLAMA_URL;
use crate::core::config::JaremisConfig;
use crate::core::error::{JaremisError, Result};


pub struct LlmProviderFactory;

impl LlmProviderFactory {

    pub fn create(
        provider: &str,
        model: &str,
        api_key: Option<&str>,
        base_url: Option<&str>,
        temperature: f64,
    ) -> Result<Arc<dyn LlmProvider>> {
        match provider {
            "gemini" => Ok(Arc::new(GeminiProvider::with_base_url(
                api_key.unwrap_or_default(),
                model,
                base_url.unwrap_or(GEMINI_BASE_URL),
                temperature,
            ))),
            "ollama" => Ok(Arc::new(OllamaProvider::new(
                base_url.unwrap_or(DEFAULT_OLLAMA_URL),
                model,
                temperature,
            ))),
            other => Err(JaremisError::Config(format!(
                "Unknown provider: {other}. Supported: gemini, ollama"
            ))),
        }
    }


    pub fn from_config(config: &JaremisConfig) -> Result<Arc<dyn LlmProvider>> {
        Self::create(
            &config.llm_provider,
            &config.llm_model,
            config.llm_api_key.as_deref(),
            config.llm_base_url.as_deref(),
            config.llm_temperature,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gemini_provider() {
        let provider =
            LlmProviderFactory::create("gemini", "gemini-1.5-flash-latest", Some("key"), None, 0.3)
                .unwrap();
        assert_eq!(provider.provider_name(), "gemini");
        assert_eq!(provider.model_name(), "gemini-1.5-flash-latest");
    }

    #[test]
    fn test_create_ollama_provider() {
        let provider = LlmProviderFactory::create("ollama", "llama3.2", None, None, 0.7).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let Err(err) = LlmProviderFactory::create("unknown", "model", None, None, 0.5) else {
            panic!("unknown provider must be rejected");
        };
        assert!(matches!(err, JaremisError::Config(_)));
    }

    #[test]
    fn test_from_default_config() {
        let provider = LlmProviderFactory::from_config(&JaremisConfig::default()).unwrap();
        assert_eq!(provider.provider_name(), "gemini");
    }
}
