use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::cache::ExtractionCache;
use super::models::SymptomExtractionResult;
use super::patterns::{clean_ai_keyword, strip_noise};
use crate::llm::providers::{LlmProvider, LlmProviderError, generate_with_timeout};
use crate::utils::safe_truncate;

/// Shorter fallback results are discarded in favour of the raw input.
const MIN_KEYWORD_CHARS: usize = 3;

const EXTRACTION_SYSTEM_PROMPT: &str = r#"Bạn là chuyên gia phân tích y tế. Nhiệm vụ: Tách KEYWORD TRIỆU CHỨNG CHÍNH từ câu người dùng.

**NGUYÊN TẮC:**
1. Chỉ giữ lại TRIỆU CHỨNG CHÍNH (danh từ y tế)
2. Loại bỏ: trạng ngữ thời gian, mức độ, tính từ phụ
3. Giữ: bộ phận cơ thể nếu cần thiết
4. Kết quả ngắn gọn 2-5 từ, dễ search web

**VÍ DỤ:**
- Input: "Tôi bị đau đầu dữ dội từ sáng nay"
  Output: "đau đầu"

- Input: "Con tôi sốt cao 39 độ mấy ngày nay"
  Output: "sốt cao"

- Input: "Bị ngứa mắt và chảy nước mũi liên tục"
  Output: "ngứa mắt chảy nước mũi"

- Input: "Đau bụng dưới bên phải kéo dài 2 ngày"
  Output: "đau bụng dưới bên phải"

- Input: "Ho khan kéo dài 3 tuần không khỏi"
  Output: "ho khan kéo dài"

- Input: "My child has a high fever and cough"
  Output: "high fever cough"

- Input: "胸痛已经持续了两天"
  Output: "胸痛"

**QUAN TRỌNG:**
- Trả về ĐÚNG NGÔN NGỮ của input
- Chỉ trả keyword, KHÔNG giải thích thêm
- Nếu có nhiều triệu chứng → giữ hết
- KHÔNG thêm "bệnh", "chẩn đoán", "điều trị""#;


pub struct SymptomExtractor {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
    cache: Option<Arc<ExtractionCache>>,
}

impl SymptomExtractor {
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            cache: None,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ExtractionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&ExtractionCache> {
        self.cache.as_deref()
    }

    /// Short symptom phrase for `input`. Never fails: provider trouble drops
    /// to the regex cleanup.
    pub async fn extract(&self, input: &str) -> SymptomExtractionResult {
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(input)) {
            debug!("Extraction cache hit for \"{}\"", safe_truncate(input, 50));
            return cached;
        }

        match self.extract_with_ai(input).await {
            Ok(keyword) => {
                info!(
                    "🔍 Symptom extraction (AI): \"{}\" → \"{}\"",
                    safe_truncate(input, 50),
                    keyword
                );
                let result = SymptomExtractionResult::ai(keyword);
                if let Some(cache) = &self.cache {
                    cache.set(input, result.clone());
                }
                result
            }
            Err(e) => {
                warn!("⚠️ Symptom extraction failed: {}", e);
                let result = fallback_extract(input);
                info!(
                    "🔄 Fallback cleanup: \"{}\" → \"{}\"",
                    safe_truncate(input, 50),
                    result.keyword
                );
                result
            }
        }
    }

    async fn extract_with_ai(&self, input: &str) -> Result<String, LlmProviderError> {
        let user_prompt = format!("User input: \"{input}\"\n\nKeyword triệu chứng:");
        let (reply, _metadata) = generate_with_timeout(
            self.provider.as_ref(),
            EXTRACTION_SYSTEM_PROMPT,
            &user_prompt,
            None,
            self.timeout,
        )
        .await?;

        let keyword = clean_ai_keyword(&reply);
        if keyword.is_empty() {
            return Err(LlmProviderError::Provider(
                "empty keyword in model reply".to_string(),
            ));
        }
        Ok(keyword)
    }
}

/// Regex-only extraction used when the model is unavailable.
pub fn fallback_extract(input: &str) -> SymptomExtractionResult {
    let cleaned = strip_noise(input);
    let keyword = if cleaned.chars().count() >= MIN_KEYWORD_CHARS {
        cleaned
    } else {
        input.to_string()
    };
    SymptomExtractionResult::fallback(keyword)
}
