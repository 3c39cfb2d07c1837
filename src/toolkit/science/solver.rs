use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::detector::is_scientific_query;
use super::latex::post_process_latex;
use super::prompt::{TUTOR_SYSTEM_PROMPT, build_sci_latex_guideline};
use crate::core::error::{JaremisError, Result};
use crate::llm::providers::{LlmMetadata, LlmProvider, generate_with_timeout};
use crate::utils::safe_truncate;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScienceAnswer {
    pub answer: String,
    /// Whether the LaTeX pipeline was applied.
    pub scientific: bool,
    pub metadata: LlmMetadata,
}

/// Answers questions, forcing structured LaTeX for scientific ones.
pub struct ScienceSolver {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl ScienceSolver {
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn solve(&self, question: &str) -> Result<ScienceAnswer> {
        if question.trim().is_empty() {
            return Err(JaremisError::Validation("question is empty".to_string()));
        }

        let scientific = is_scientific_query(question);
        let system_prompt = if scientific {
            build_sci_latex_guideline()
        } else {
            TUTOR_SYSTEM_PROMPT
        };
        info!(
            "🧮 Solving \"{}\" (scientific={})",
            safe_truncate(question, 60),
            scientific
        );

        let (reply, metadata) = generate_with_timeout(
            self.provider.as_ref(),
            system_prompt,
            question,
            None,
            self.timeout,
        )
        .await?;

        let answer = if scientific {
            post_process_latex(&reply)
        } else {
            reply
        };

        Ok(ScienceAnswer {
            answer,
            scientific,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::mock::MockProvider;
    use crate::toolkit::science::latex::FALLBACK_MARKER;

    fn solver(provider: MockProvider) -> ScienceSolver {
        ScienceSolver::new(Arc::new(provider), Duration::from_secs(35))
    }

    #[tokio::test]
    async fn test_scientific_reply_is_post_processed() {
        let solver = solver(MockProvider::ok("x = 1\ny = 2"));
        let answer = solver.solve("Giải hệ phương trình x+y=3, x-y=-1").await.unwrap();
        assert!(answer.scientific);
        assert!(answer.answer.contains(r"\begin{aligned}"));
        assert!(answer.answer.contains(r"\textbf{Kết luận. } x=1, y=2."));
        assert_eq!(answer.metadata.provider, "mock");
    }

    #[tokio::test]
    async fn test_plain_reply_untouched() {
        let solver = solver(MockProvider::ok("Chào bạn!"));
        let answer = solver.solve("Hôm nay trời đẹp quá").await.unwrap();
        assert!(!answer.scientific);
        assert_eq!(answer.answer, "Chào bạn!");
        assert!(!answer.answer.contains(FALLBACK_MARKER));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let solver = solver(MockProvider::failing("quota"));
        let err = solver.solve("Tính đạo hàm của x^2").await.unwrap_err();
        assert!(matches!(err, JaremisError::LlmProvider(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_timeout() {
        let solver = ScienceSolver::new(
            Arc::new(MockProvider::slow("late", Duration::from_secs(120))),
            Duration::from_secs(35),
        );
        let err = solver.solve("Tính 2+2").await.unwrap_err();
        match err {
            JaremisError::LlmProvider(inner) => assert!(inner.is_timeout()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let solver = solver(MockProvider::ok("unused"));
        assert!(matches!(
            solver.solve("  ").await,
            Err(JaremisError::Validation(_))
        ));
    }
}
