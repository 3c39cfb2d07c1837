use std::time::Duration;
use tracing::warn;

use super::base::{LlmMetadata, LlmProvider, LlmProviderError};

/// Races a provider call against `limit`. The first to settle wins; on
/// timeout the in-flight request future is dropped and its result discarded.
pub async fn generate_with_timeout<P>(
    provider: &P,
    system_prompt: &str,
    user_prompt: &str,
    response_format: Option<&str>,
    limit: Duration,
) -> Result<(String, LlmMetadata), LlmProviderError>
where
    P: LlmProvider + ?Sized,
{
    match tokio::time::timeout(
        limit,
        provider.generate(system_prompt, user_prompt, response_format),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => {
            warn!(
                "{}/{} did not answer within {}ms",
                provider.provider_name(),
                provider.model_name(),
                limit.as_millis()
            );
            Err(LlmProviderError::Timeout(limit))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::super::mock::MockProvider;
    use super::*;

    #[tokio::test]
    async fn test_fast_provider_wins() {
        let provider = MockProvider::ok("đau đầu");
        let (text, meta) =
            generate_with_timeout(&provider, "", "q", None, Duration::from_millis(200))
                .await
                .unwrap();
        assert_eq!(text, "đau đầu");
        assert_eq!(meta.provider, "mock");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let provider = MockProvider::slow("late", Duration::from_secs(10));
        let err = generate_with_timeout(&provider, "", "q", None, Duration::from_secs(3))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_passes_through() {
        let provider = MockProvider::failing("quota exceeded");
        let err = generate_with_timeout(&provider, "", "q", None, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
