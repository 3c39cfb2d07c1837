pub mod labs;
pub mod models;
pub mod news2;
pub mod scores;
pub mod treatment;

pub use labs::{LAB_REFERENCES, deviation_severity, parse_lab_results};
pub use models::{
    ClinicalScore, ClinicalScoreRequest, LabFinding, LabReport, News2Result, TreatmentPlan,
    VitalSigns,
};
pub use news2::calculate_news2;
pub use scores::{
    calculate_apache_ii, calculate_cha2ds2_vasc, calculate_curb65, calculate_score,
    calculate_wells_dvt,
};
pub use treatment::treatment_recommendations;
