use tracing::{debug, info};

use super::guidance::{emergency_guidance, home_care_guidance};
use super::models::{Condition, Flag, SeverityAssessment, SeverityLevel, SeverityReport};
use super::tables::{CRITICAL_CONDITIONS, MILD_CONDITIONS, MODERATE_CONDITIONS, RED_FLAGS, YELLOW_FLAGS};

const CRITICAL_MORTALITY: f64 = 10.0;
const MODERATE_MORTALITY: f64 = 5.0;

fn lookup(table: &'static [Condition], code: &str) -> Option<Condition> {
    table.iter().find(|c| c.code == code).copied()
}

/// Grade a set of ICD-10 codes. Unknown codes are ignored.
pub fn assess_severity<S: AsRef<str>>(icd_codes: &[S]) -> SeverityAssessment {
    let mut assessment = SeverityAssessment {
        level: SeverityLevel::Mild,
        mortality: 0.0,
        is_emergency: false,
        critical_conditions: Vec::new(),
        moderate_conditions: Vec::new(),
        mild_conditions: Vec::new(),
    };

    for code in icd_codes {
        let code = code.as_ref().trim().to_uppercase();
        if let Some(condition) = lookup(CRITICAL_CONDITIONS, &code) {
            assessment.is_emergency |= condition.emergency;
            assessment.mortality = assessment.mortality.max(condition.mortality);
            assessment.critical_conditions.push(condition);
        } else if let Some(condition) = lookup(MODERATE_CONDITIONS, &code) {
            assessment.mortality = assessment.mortality.max(condition.mortality);
            assessment.moderate_conditions.push(condition);
        } else if let Some(condition) = lookup(MILD_CONDITIONS, &code) {
            assessment.mortality = assessment.mortality.max(condition.mortality);
            assessment.mild_conditions.push(condition);
        } else {
            debug!("Ignoring unknown ICD-10 code {}", code);
        }
    }

    assessment.level = if assessment.mortality >= CRITICAL_MORTALITY || assessment.is_emergency {
        SeverityLevel::Critical
    } else if assessment.mortality >= MODERATE_MORTALITY || !assessment.moderate_conditions.is_empty() {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Mild
    };

    assessment
}

fn match_flags(table: &'static [Flag], symptoms: &str) -> Vec<Flag> {
    let lowered = symptoms.to_lowercase();
    table
        .iter()
        .filter(|flag| lowered.contains(&flag.symptom.to_lowercase()))
        .copied()
        .collect()
}

pub fn check_red_flags(symptoms: &str) -> Vec<Flag> {
    match_flags(RED_FLAGS, symptoms)
}

pub fn check_yellow_flags(symptoms: &str) -> Vec<Flag> {
    match_flags(YELLOW_FLAGS, symptoms)
}

/// Assessment plus flags and the guidance matching the worst condition.
pub fn triage<S: AsRef<str>>(icd_codes: &[S], symptoms: Option<&str>) -> SeverityReport {
    let assessment = assess_severity(icd_codes);
    let symptoms = symptoms.unwrap_or_default();
    let red_flags = check_red_flags(symptoms);
    let yellow_flags = check_yellow_flags(symptoms);

    let (emergency, home_care) = match assessment.worst_condition() {
        Some(worst) if assessment.level == SeverityLevel::Critical => {
            (Some(emergency_guidance(worst)), None)
        }
        Some(worst) => (None, Some(home_care_guidance(worst))),
        None => (None, None),
    };

    info!(
        "🩺 Triage: level={} conditions={} red_flags={} yellow_flags={}",
        assessment.level,
        assessment.matched_count(),
        red_flags.len(),
        yellow_flags.len()
    );

    SeverityReport {
        assessment,
        red_flags,
        yellow_flags,
        emergency_guidance: emergency,
        home_care_guidance: home_care,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::severity::models::ConditionCategory;

    #[test]
    fn test_critical_by_emergency_code() {
        let result = assess_severity(&["I21"]);
        assert_eq!(result.level, SeverityLevel::Critical);
        assert!(result.is_emergency);
        assert_eq!(result.mortality, 15.0);
        assert_eq!(result.critical_conditions[0].category, ConditionCategory::Cardiac);
    }

    #[test]
    fn test_critical_by_mortality_without_emergency() {
        let result = assess_severity(&["C78"]);
        assert_eq!(result.level, SeverityLevel::Critical);
        assert!(!result.is_emergency);
    }

    #[test]
    fn test_moderate_by_table_membership() {
        let result = assess_severity(&["K29"]);
        assert_eq!(result.level, SeverityLevel::Moderate);
        assert_eq!(result.mortality, 1.0);
    }

    #[test]
    fn test_mild_and_unknown_codes() {
        let result = assess_severity(&["J00", "R51", "Z99.9"]);
        assert_eq!(result.level, SeverityLevel::Mild);
        assert_eq!(result.matched_count(), 2);
        assert_eq!(result.mortality, 0.01);
    }

    #[test]
    fn test_no_codes_is_mild() {
        let result = assess_severity::<&str>(&[]);
        assert_eq!(result.level, SeverityLevel::Mild);
        assert_eq!(result.mortality, 0.0);
    }

    #[test]
    fn test_codes_are_normalised() {
        let result = assess_severity(&[" i50 ".to_string()]);
        assert_eq!(result.level, SeverityLevel::Moderate);
        assert_eq!(result.moderate_conditions[0].code, "I50");
    }

    #[test]
    fn test_red_flags_in_table_order() {
        let flags = check_red_flags("Bệnh nhân CO GIẬT và Đau ngực dữ dội, SpO2 < 90%");
        let symptoms: Vec<&str> = flags.iter().map(|f| f.symptom).collect();
        assert_eq!(symptoms, vec!["đau ngực dữ dội", "co giật", "SpO2 < 90%"]);
    }

    #[test]
    fn test_yellow_flags() {
        let flags = check_yellow_flags("ho ra máu từ hôm qua, sốt kéo dài > 3 ngày");
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].symptom, "sốt kéo dài > 3 ngày");
        assert!(check_yellow_flags("mệt mỏi").is_empty());
    }

    #[test]
    fn test_triage_picks_guidance() {
        let report = triage(&["J00", "I63"], Some("liệt nửa người"));
        assert_eq!(report.assessment.level, SeverityLevel::Critical);
        assert!(report.emergency_guidance.is_some());
        assert!(report.home_care_guidance.is_none());
        assert_eq!(report.red_flags.len(), 1);

        let report = triage(&["J06"], None);
        assert!(report.emergency_guidance.is_none());
        assert!(report.home_care_guidance.is_some());
        assert!(report.red_flags.is_empty());

        let report = triage::<&str>(&[], Some("mệt"));
        assert!(report.emergency_guidance.is_none());
        assert!(report.home_care_guidance.is_none());
    }
}
