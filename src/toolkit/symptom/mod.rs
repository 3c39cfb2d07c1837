pub mod cache;
pub mod extractor;
pub mod models;
pub mod patterns;
pub mod search;
pub mod sources;

pub use cache::{CacheStats, ExtractionCache};
pub use extractor::{SymptomExtractor, fallback_extract};
pub use models::{
    ExtractionMethod, ReferenceSource, SourceCategory, SymptomExtractionResult,
    SymptomSearchResult,
};
pub use search::SmartSymptomSearch;
pub use sources::{CategorizedSources, categorize_symptom};
