pub mod parser;

pub use parser::{DiagnosisReport, DiseaseProbability, parse_diagnosis_response};
