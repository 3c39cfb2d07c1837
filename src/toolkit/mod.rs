pub mod diagnosis;
pub mod science;
pub mod scoring;
pub mod severity;
pub mod symptom;

pub use diagnosis::{DiagnosisReport, parse_diagnosis_response};
pub use science::{ScienceSolver, is_scientific_query, post_process_latex};
pub use scoring::{ClinicalScore, ClinicalScoreRequest, calculate_score, parse_lab_results};
pub use severity::{SeverityReport, assess_severity, triage};
pub use symptom::{SmartSymptomSearch, SymptomExtractor, SymptomSearchResult};
