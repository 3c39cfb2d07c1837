use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ExtractionMethod {
    Ai,
    FallbackRegex,
    /// Only produced when the whole search degraded.
    None,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomExtractionResult {
    pub keyword: String,
    pub method: ExtractionMethod,
}

impl SymptomExtractionResult {
    pub fn ai(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            method: ExtractionMethod::Ai,
        }
    }

    pub fn fallback(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            method: ExtractionMethod::FallbackRegex,
        }
    }
}


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr, Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SourceCategory {
    Emergency,
    Infectious,
    Dermatology,
    MentalHealth,
    Gastro,
    Respiratory,
    Neuro,
    General,
}

impl Default for SourceCategory {
    fn default() -> Self {
        Self::General
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSource {
    pub title: String,
    pub url: String,
    pub source: String,
    pub snippet: String,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomSearchResult {
    pub original_input: String,
    pub extracted_keyword: String,
    pub category: SourceCategory,
    pub sources: Vec<ReferenceSource>,
    pub search_performed: bool,
    pub extraction_method: ExtractionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
