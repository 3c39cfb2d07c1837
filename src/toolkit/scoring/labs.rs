use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::models::{DeviationSeverity, LabFinding, LabReference, LabReport, LabStatus};

const fn lab(key: &'static str, name: &'static str, min: f64, max: f64, unit: &'static str) -> LabReference {
    LabReference { key, name, min, max, unit }
}

/// Adult reference ranges.
pub const LAB_REFERENCES: &[LabReference] = &[
    lab("WBC", "White Blood Cells", 4000.0, 11000.0, "cells/μL"),
    lab("RBC", "Red Blood Cells", 4.5, 5.9, "million cells/μL"),
    lab("Hemoglobin", "Hemoglobin", 13.5, 17.5, "g/dL"),
    lab("Hematocrit", "Hematocrit", 38.3, 48.6, "%"),
    lab("Platelet", "Platelets", 150000.0, 450000.0, "cells/μL"),
    lab("Glucose", "Fasting Glucose", 70.0, 100.0, "mg/dL"),
    lab("HbA1c", "Hemoglobin A1c", 4.0, 5.6, "%"),
    lab("Creatinine", "Creatinine", 0.7, 1.3, "mg/dL"),
    lab("BUN", "Blood Urea Nitrogen", 7.0, 20.0, "mg/dL"),
    lab("ALT", "Alanine Aminotransferase", 7.0, 56.0, "U/L"),
    lab("AST", "Aspartate Aminotransferase", 10.0, 40.0, "U/L"),
    lab("Bilirubin", "Total Bilirubin", 0.1, 1.2, "mg/dL"),
    lab("CRP", "C-Reactive Protein", 0.0, 3.0, "mg/L"),
];

const SEVERE_DEVIATION: f64 = 0.5;
const MODERATE_DEVIATION: f64 = 0.2;

lazy_static! {
    static ref LAB_PATTERNS: Vec<(LabReference, Regex)> = LAB_REFERENCES
        .iter()
        .filter_map(|reference| {
            let pattern = format!(r"(?i)\b{}[:\s]*([0-9.]+)", regex::escape(reference.key));
            Regex::new(&pattern).ok().map(|re| (*reference, re))
        })
        .collect();
}

pub fn deviation_severity(value: f64, reference: &LabReference) -> DeviationSeverity {
    let deviation = if value < reference.min {
        (reference.min - value) / reference.min
    } else {
        (value - reference.max) / reference.max
    };

    if deviation > SEVERE_DEVIATION {
        DeviationSeverity::Severe
    } else if deviation > MODERATE_DEVIATION {
        DeviationSeverity::Moderate
    } else {
        DeviationSeverity::Mild
    }
}

/// Pull known lab values out of free text (report or OCR output) and flag
/// those outside their reference range. The first value per test wins.
pub fn parse_lab_results(text: &str) -> LabReport {
    let mut report = LabReport::default();

    for (reference, re) in LAB_PATTERNS.iter() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        // sentence-final dot
        let Ok(value) = caps[1].trim_end_matches('.').parse::<f64>() else {
            debug!("Unreadable {} value {:?}", reference.key, &caps[1]);
            continue;
        };

        report.values.insert(reference.key.to_string(), value);

        if value < reference.min || value > reference.max {
            report.abnormal.push(LabFinding {
                test: reference.key,
                name: reference.name,
                value,
                normal: format!("{}-{} {}", reference.min, reference.max, reference.unit),
                status: if value < reference.min { LabStatus::Low } else { LabStatus::High },
                severity: deviation_severity(value, reference),
            });
        }
    }

    report
}
