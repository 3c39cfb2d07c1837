pub mod core;
pub mod llm;
pub mod mcp;
pub mod toolkit;
pub mod utils;

pub use utils::{safe_truncate, safe_truncate_ellipsis};


pub use core::config::JaremisConfig;
pub use core::error::{JaremisError, Result};
pub use toolkit::{
    ClinicalScore, ClinicalScoreRequest, DiagnosisReport, ScienceSolver, SeverityReport,
    SmartSymptomSearch, SymptomExtractor, SymptomSearchResult, assess_severity, calculate_score,
    is_scientific_query, parse_diagnosis_response, parse_lab_results, post_process_latex, triage,
};


pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";


pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";


pub const DEFAULT_CACHE_SIZE: usize = 1000;


pub const DEFAULT_CACHE_TTL: u64 = 300;

/// Keyword extraction budget before the regex fallback kicks in.
pub const DEFAULT_EXTRACTION_TIMEOUT_MS: u64 = 3000;


pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 35;
