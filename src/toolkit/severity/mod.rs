pub mod assess;
pub mod guidance;
pub mod models;
pub mod tables;

pub use assess::{assess_severity, check_red_flags, check_yellow_flags, triage};
pub use guidance::{emergency_guidance, home_care_guidance};
pub use models::{
    Condition, ConditionCategory, EmergencyGuidance, Flag, HomeCareGuidance, SeverityAssessment,
    SeverityLevel, SeverityReport,
};
