use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString, IntoStaticStr};


/// Reference range of one laboratory test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabReference {
    pub key: &'static str,
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LabStatus {
    Low,
    High,
}

/// How far an abnormal value sits outside its range, relative to the bound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumString,
    IntoStaticStr, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviationSeverity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabFinding {
    pub test: &'static str,
    pub name: &'static str,
    pub value: f64,
    /// e.g. `4000-11000 cells/μL`
    pub normal: String,
    pub status: LabStatus,
    pub severity: DeviationSeverity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabReport {
    /// Every recognised value, keyed by test.
    pub values: BTreeMap<String, f64>,
    pub abnormal: Vec<LabFinding>,
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Consciousness {
    #[default]
    #[serde(alias = "Alert", alias = "alert")]
    Alert,
    /// New confusion, or responds only to voice or pain, or unresponsive.
    #[serde(alias = "cvpu")]
    Cvpu,
}

/// Observations for NEWS2. Absent values do not score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct VitalSigns {
    #[schemars(description = "Breaths per minute")]
    pub respiratory_rate: Option<f64>,
    #[schemars(description = "SpO2 in percent")]
    pub oxygen_saturation: Option<f64>,
    #[schemars(description = "Systolic blood pressure in mmHg")]
    pub systolic_bp: Option<f64>,
    #[schemars(description = "Beats per minute")]
    pub heart_rate: Option<f64>,
    #[schemars(description = "Body temperature in °C")]
    pub temperature: Option<f64>,
    pub consciousness: Consciousness,
    pub supplemental_oxygen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumString, IntoStaticStr, Display)]
pub enum News2Risk {
    #[serde(rename = "LOW")]
    #[strum(serialize = "LOW")]
    Low,
    #[serde(rename = "LOW-MEDIUM")]
    #[strum(serialize = "LOW-MEDIUM")]
    LowMedium,
    #[serde(rename = "MEDIUM-HIGH")]
    #[strum(serialize = "MEDIUM-HIGH")]
    MediumHigh,
    #[serde(rename = "HIGH")]
    #[strum(serialize = "HIGH")]
    High,
}

impl News2Risk {
    pub fn action(self) -> &'static str {
        match self {
            Self::Low => "Continue routine monitoring",
            Self::LowMedium => "⚠️ Increase frequency of monitoring",
            Self::MediumHigh => "⚠️ Urgent review by clinical team",
            Self::High => "🚨 EMERGENCY: Immediate clinical response required",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::LowMedium => "yellow",
            Self::MediumHigh => "orange",
            Self::High => "red",
        }
    }
}

/// Points per parameter; `None` when the observation was missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct News2Breakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplemental_oxygen: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic_bp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    pub consciousness: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct News2Result {
    pub score: u32,
    pub risk: News2Risk,
    pub action: &'static str,
    pub color: &'static str,
    pub breakdown: News2Breakdown,
    pub interpretation: String,
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WellsCriteria {
    pub active_cancer: bool,
    pub paralysis: bool,
    pub recent_immobilization: bool,
    pub tenderness: bool,
    pub swelling: bool,
    pub pit_edema: bool,
    pub collateral_veins: bool,
    #[serde(alias = "previousDVT")]
    pub previous_dvt: bool,
    #[schemars(description = "Alternative diagnosis at least as likely as DVT (-2 points)")]
    pub alternative_diagnosis: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DvtProbability {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellsResult {
    pub score: i32,
    pub probability: DvtProbability,
    pub recommendation: &'static str,
}


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Curb65Criteria {
    pub confusion: bool,
    #[schemars(description = "Blood urea in mmol/L")]
    pub urea: f64,
    #[schemars(description = "Breaths per minute")]
    pub respiratory_rate: f64,
    #[serde(alias = "bloodPressure")]
    #[schemars(description = "Systolic < 90 or diastolic <= 60 mmHg")]
    pub low_blood_pressure: bool,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curb65Result {
    pub score: u32,
    /// 30-day mortality.
    pub mortality: &'static str,
    pub recommendation: &'static str,
    pub interpretation: String,
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Cha2ds2VascCriteria {
    #[schemars(description = "Congestive heart failure")]
    pub chf: bool,
    pub hypertension: bool,
    pub age: u32,
    pub diabetes: bool,
    #[schemars(description = "Prior stroke, TIA or thromboembolism")]
    pub stroke: bool,
    pub vascular: bool,
    pub sex: Sex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cha2ds2VascResult {
    pub score: u32,
    /// Annual stroke risk.
    pub stroke_risk: &'static str,
    pub anticoagulation: bool,
    pub recommendation: &'static str,
    pub interpretation: String,
}


/// Simplified APACHE II: temperature, age and chronic health only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ApacheInput {
    #[schemars(description = "Core temperature in °C")]
    pub temperature: Option<f64>,
    pub age: u32,
    #[schemars(description = "Severe organ insufficiency or immunocompromise")]
    pub chronic_health: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApacheResult {
    pub score: u32,
    pub mortality: &'static str,
    pub interpretation: String,
}


/// Scoring system plus its inputs, tagged by `system`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "system")]
pub enum ClinicalScoreRequest {
    #[serde(rename = "news2")]
    News2(VitalSigns),
    #[serde(rename = "wells_dvt")]
    WellsDvt(WellsCriteria),
    #[serde(rename = "curb65")]
    Curb65(Curb65Criteria),
    #[serde(rename = "cha2ds2_vasc")]
    Cha2ds2Vasc(Cha2ds2VascCriteria),
    #[serde(rename = "apache_ii")]
    ApacheII(ApacheInput),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "system")]
pub enum ClinicalScore {
    #[serde(rename = "news2")]
    News2(News2Result),
    #[serde(rename = "wells_dvt")]
    WellsDvt(WellsResult),
    #[serde(rename = "curb65")]
    Curb65(Curb65Result),
    #[serde(rename = "cha2ds2_vasc")]
    Cha2ds2Vasc(Cha2ds2VascResult),
    #[serde(rename = "apache_ii")]
    ApacheII(ApacheResult),
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TreatmentPriority {
    Urgent,
    High,
    Routine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Treatment {
    pub priority: TreatmentPriority,
    pub action: &'static str,
    pub rationale: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreatmentWarning {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreatmentPlan {
    pub diagnosis: String,
    pub severity: String,
    pub treatments: Vec<Treatment>,
    pub warnings: Vec<TreatmentWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tagged_by_system() {
        let request: ClinicalScoreRequest = serde_json::from_str(
            r#"{"system": "curb65", "confusion": true, "urea": 8.2, "bloodPressure": true, "age": 70}"#,
        )
        .unwrap();
        let ClinicalScoreRequest::Curb65(criteria) = request else {
            panic!("wrong system");
        };
        assert!(criteria.low_blood_pressure);
        assert_eq!(criteria.respiratory_rate, 0.0);
    }

    #[test]
    fn test_vital_signs_accept_mixed_case_consciousness() {
        let vitals: VitalSigns =
            serde_json::from_str(r#"{"heartRate": 80, "consciousness": "Alert"}"#).unwrap();
        assert_eq!(vitals.consciousness, Consciousness::Alert);
        assert_eq!(vitals.heart_rate, Some(80.0));
        assert!(vitals.temperature.is_none());
    }

    #[test]
    fn test_risk_labels() {
        assert_eq!(News2Risk::MediumHigh.to_string(), "MEDIUM-HIGH");
        assert_eq!(serde_json::to_value(News2Risk::LowMedium).unwrap(), "LOW-MEDIUM");
        assert_eq!(News2Risk::High.color(), "red");
    }
}
