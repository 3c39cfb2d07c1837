use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString,
    IntoStaticStr, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityLevel {
    Mild,
    Moderate,
    Critical,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConditionCategory {
    Cardiac,
    Pulmonary,
    Neurological,
    Infectious,
    Abdominal,
    Renal,
    Trauma,
    Metabolic,
    Oncology,
    Gastrointestinal,
    Respiratory,
    Musculoskeletal,
    Ophthalmology,
    Mental,
    General,
}

/// One ICD-10 entry of the severity tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Condition {
    pub code: &'static str,
    pub name: &'static str,
    /// Percent.
    pub mortality: f64,
    pub emergency: bool,
    pub category: ConditionCategory,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityAssessment {
    pub level: SeverityLevel,
    pub mortality: f64,
    pub is_emergency: bool,
    pub critical_conditions: Vec<Condition>,
    pub moderate_conditions: Vec<Condition>,
    pub mild_conditions: Vec<Condition>,
}

impl SeverityAssessment {
    /// Matched condition with the highest mortality.
    pub fn worst_condition(&self) -> Option<&Condition> {
        self.critical_conditions
            .iter()
            .chain(&self.moderate_conditions)
            .chain(&self.mild_conditions)
            .max_by(|a, b| a.mortality.total_cmp(&b.mortality))
    }

    pub fn matched_count(&self) -> usize {
        self.critical_conditions.len() + self.moderate_conditions.len() + self.mild_conditions.len()
    }
}

/// Warning sign looked up in free-text symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub symptom: &'static str,
    pub risk: &'static str,
    pub action: &'static str,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyGuidance {
    pub alert: &'static str,
    pub mortality: String,
    pub immediate_actions: Vec<&'static str>,
    pub home_care_survival: Vec<&'static str>,
    #[serde(rename = "whenToER")]
    pub when_to_er: Vec<&'static str>,
    pub emergency_number: &'static str,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeCareGuidance {
    pub alert: &'static str,
    pub home_care: Vec<&'static str>,
    pub medications: Vec<&'static str>,
    pub follow_up: Vec<&'static str>,
    pub when_to_see_doctor: Vec<&'static str>,
}

/// Everything the triage tool reports for one patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityReport {
    pub assessment: SeverityAssessment,
    pub red_flags: Vec<Flag>,
    pub yellow_flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_guidance: Option<EmergencyGuidance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_care_guidance: Option<HomeCareGuidance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering_and_names() {
        assert!(SeverityLevel::Critical > SeverityLevel::Moderate);
        assert!(SeverityLevel::Moderate > SeverityLevel::Mild);
        assert_eq!(SeverityLevel::Critical.to_string(), "CRITICAL");
        assert_eq!(serde_json::to_string(&SeverityLevel::Mild).unwrap(), "\"MILD\"");
    }

    #[test]
    fn test_guidance_wire_names() {
        let guidance = EmergencyGuidance {
            alert: "a",
            mortality: "m".to_string(),
            immediate_actions: vec![],
            home_care_survival: vec![],
            when_to_er: vec!["x"],
            emergency_number: "115",
        };
        let json = serde_json::to_value(&guidance).unwrap();
        assert_eq!(json["whenToER"][0], "x");
        assert_eq!(json["emergencyNumber"], "115");
    }
}
