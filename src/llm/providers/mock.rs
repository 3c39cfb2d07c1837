use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::base::{LlmMetadata, LlmProvider, LlmProviderError};

/// Canned provider for unit tests.
pub struct MockProvider {
    pub reply: Result<String, String>,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl MockProvider {
    pub fn ok(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn slow(reply: &str, delay: Duration) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _response_format: Option<&str>,
    ) -> Result<(String, LlmMetadata), LlmProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Ok(text) => Ok((
                text.clone(),
                LlmMetadata {
                    provider: "mock".to_string(),
                    model: "mock-1".to_string(),
                    ..Default::default()
                },
            )),
            Err(msg) => Err(LlmProviderError::Provider(msg.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-1"
    }
}
