use std::sync::Arc;
use tracing::{info, warn};

use super::extractor::SymptomExtractor;
use super::models::{ExtractionMethod, SourceCategory, SymptomSearchResult};
use super::sources::{categorize_symptom, degraded_source};
use crate::core::error::{JaremisError, Result};
use crate::utils::safe_truncate;

/// Extract a symptom keyword, classify it and attach reference links.
pub struct SmartSymptomSearch {
    extractor: Arc<SymptomExtractor>,
}

impl SmartSymptomSearch {
    #[must_use]
    pub fn new(extractor: Arc<SymptomExtractor>) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &SymptomExtractor {
        &self.extractor
    }

    /// Never fails. Any stage error yields a single general link built from
    /// the raw input with `search_performed = false`.
    pub async fn search(&self, input: &str) -> SymptomSearchResult {
        match self.try_search(input).await {
            Ok(result) => result,
            Err(e) => {
                warn!("❌ Smart symptom search failed: {}", e);
                degraded_result(input, e.to_string())
            }
        }
    }

    async fn try_search(&self, input: &str) -> Result<SymptomSearchResult> {
        if input.trim().is_empty() {
            return Err(JaremisError::Validation(
                "symptom description is empty".to_string(),
            ));
        }

        let extraction = self.extractor.extract(input).await;
        let categorized = categorize_symptom(&extraction.keyword);

        info!(
            "📚 Symptom \"{}\" → {} ({} sources)",
            safe_truncate(&extraction.keyword, 40),
            categorized.category,
            categorized.sources.len()
        );

        Ok(SymptomSearchResult {
            original_input: input.to_string(),
            extracted_keyword: extraction.keyword,
            category: categorized.category,
            sources: categorized.sources,
            search_performed: true,
            extraction_method: extraction.method,
            error: None,
        })
    }
}

fn degraded_result(input: &str, error: String) -> SymptomSearchResult {
    SymptomSearchResult {
        original_input: input.to_string(),
        extracted_keyword: input.to_string(),
        category: SourceCategory::General,
        sources: vec![degraded_source(input)],
        search_performed: false,
        extraction_method: ExtractionMethod::None,
        error: Some(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::mock::MockProvider;
    use std::time::Duration;

    fn search_with(provider: MockProvider) -> SmartSymptomSearch {
        let extractor = SymptomExtractor::new(Arc::new(provider), Duration::from_secs(3));
        SmartSymptomSearch::new(Arc::new(extractor))
    }

    #[tokio::test]
    async fn test_emergency_keyword_gets_three_sources() {
        let search = search_with(MockProvider::ok("đau ngực"));
        let result = search.search("Tôi bị đau ngực dữ dội").await;
        assert_eq!(result.category, SourceCategory::Emergency);
        assert_eq!(result.sources.len(), 3);
        assert!(result.search_performed);
        assert_eq!(result.extraction_method, ExtractionMethod::Ai);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_extractor_failure_still_well_formed() {
        let search = search_with(MockProvider::failing("boom"));
        let result = search.search("Con tôi sốt cao 39 độ, ho khan").await;
        assert_eq!(result.extraction_method, ExtractionMethod::FallbackRegex);
        assert_eq!(result.extracted_keyword, "sốt cao ho khan");
        assert_eq!(result.category, SourceCategory::Infectious);
        assert_eq!(result.sources.len(), 3);
        assert!(result.search_performed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_fallback() {
        let search = search_with(MockProvider::slow("x", Duration::from_secs(60)));
        let result = search.search("đau bụng dưới bên phải").await;
        assert_eq!(result.extraction_method, ExtractionMethod::FallbackRegex);
        assert_eq!(result.category, SourceCategory::Gastro);
    }

    #[tokio::test]
    async fn test_empty_input_degrades() {
        let search = search_with(MockProvider::ok("unused"));
        let result = search.search("   ").await;
        assert!(!result.search_performed);
        assert_eq!(result.extraction_method, ExtractionMethod::None);
        assert_eq!(result.category, SourceCategory::General);
        assert_eq!(result.sources.len(), 1);
        assert!(result.error.is_some());
    }
}
