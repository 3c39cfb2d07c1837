use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref DIFFERENTIAL_SECTION: Regex =
        Regex::new(r"(?s)## Chẩn đoán phân biệt \(WHO\)\n(.*?)(?:\n##|\z)").expect("valid regex");
    static ref DISEASE_LINE: Regex =
        Regex::new(r"•\s*(.+?)\s*\(Xác suất:\s*(\d+)%\)").expect("valid regex");
    static ref CONFIDENCE: Regex = Regex::new(r"Độ tin cậy:\s*(\d+)%").expect("valid regex");
    static ref WHO_LABEL: Regex = Regex::new(r"WHO \(([^)]+)\)").expect("valid regex");
    static ref TRAILING_CODE: Regex = Regex::new(r"\(([^()]*)\)$").expect("valid regex");
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseProbability {
    pub name: String,
    /// Percent.
    pub probability: u32,
}

/// Structured view of a free-text diagnosis reply. Missing parts stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisReport {
    pub differential_diagnosis: Vec<String>,
    pub diseases: Vec<DiseaseProbability>,
    pub confidence: u32,
    pub who_guideline: String,
    /// Codes in trailing parentheses of the differential entries, e.g. `J11`.
    pub icd_codes: Vec<String>,
}

pub fn parse_diagnosis_response(text: &str) -> DiagnosisReport {
    let differential_diagnosis: Vec<String> = DIFFERENTIAL_SECTION
        .captures(text)
        .map(|caps| {
            caps[1]
                .lines()
                .map(str::trim)
                .filter_map(|line| line.strip_prefix('-'))
                .map(|entry| entry.trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let icd_codes = differential_diagnosis
        .iter()
        .filter_map(|entry| TRAILING_CODE.captures(entry))
        .map(|caps| caps[1].trim().to_string())
        .filter(|code| !code.is_empty())
        .collect();

    let diseases = DISEASE_LINE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(DiseaseProbability {
                name: caps[1].trim().to_string(),
                probability: caps[2].parse().ok()?,
            })
        })
        .collect();

    let confidence = CONFIDENCE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0);

    let who_guideline = WHO_LABEL
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    DiagnosisReport {
        differential_diagnosis,
        diseases,
        confidence,
        who_guideline,
        icd_codes,
    }
}
