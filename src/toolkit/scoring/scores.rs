use tracing::debug;

use super::models::{
    ApacheInput, ApacheResult, Cha2ds2VascCriteria, Cha2ds2VascResult, ClinicalScore,
    ClinicalScoreRequest, Curb65Criteria, Curb65Result, DvtProbability, Sex, WellsCriteria,
    WellsResult,
};
use super::news2::calculate_news2;

/// 30-day mortality by CURB-65 score.
const CURB65_MORTALITY: [&str; 6] = ["0.7%", "2.1%", "9.2%", "14.5%", "40%", "40%+"];

/// Annual stroke risk by CHA2DS2-VASc score.
const CHA2DS2_VASC_STROKE_RISK: [&str; 10] = [
    "0.2%", "0.6%", "2.2%", "3.2%", "4.8%", "7.2%", "9.7%", "11.2%", "10.8%", "12.2%",
];

const CURB65_UREA_MMOL: f64 = 7.0;
const CURB65_RESPIRATORY_RATE: f64 = 30.0;

pub fn calculate_wells_dvt(criteria: &WellsCriteria) -> WellsResult {
    let score: i32 = [
        (criteria.active_cancer, 1),
        (criteria.paralysis, 1),
        (criteria.recent_immobilization, 1),
        (criteria.tenderness, 1),
        (criteria.swelling, 1),
        (criteria.pit_edema, 1),
        (criteria.collateral_veins, 1),
        (criteria.previous_dvt, 1),
        (criteria.alternative_diagnosis, -2),
    ]
    .into_iter()
    .filter_map(|(present, points)| present.then_some(points))
    .sum();

    let probability = match score {
        3.. => DvtProbability::High,
        1..=2 => DvtProbability::Moderate,
        _ => DvtProbability::Low,
    };

    WellsResult {
        score,
        probability,
        recommendation: if score >= 2 {
            "Perform ultrasound imaging"
        } else {
            "Consider D-dimer test first"
        },
    }
}

pub fn calculate_curb65(criteria: &Curb65Criteria) -> Curb65Result {
    let score = [
        criteria.confusion,
        criteria.urea > CURB65_UREA_MMOL,
        criteria.respiratory_rate >= CURB65_RESPIRATORY_RATE,
        criteria.low_blood_pressure,
        criteria.age >= 65,
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count() as u32;

    let mortality = CURB65_MORTALITY[score as usize];
    let recommendation = match score {
        0..=1 => "Outpatient",
        2 => "Inpatient ward",
        _ => "ICU consideration",
    };

    Curb65Result {
        score,
        mortality,
        recommendation,
        interpretation: format!("CURB-65: {score}/5 - {mortality} 30-day mortality"),
    }
}

pub fn calculate_cha2ds2_vasc(criteria: &Cha2ds2VascCriteria) -> Cha2ds2VascResult {
    let age_points = match criteria.age {
        75.. => 2,
        65..=74 => 1,
        _ => 0,
    };
    let score = u32::from(criteria.chf)
        + u32::from(criteria.hypertension)
        + age_points
        + u32::from(criteria.diabetes)
        + 2 * u32::from(criteria.stroke)
        + u32::from(criteria.vascular)
        + u32::from(criteria.sex == Sex::Female);

    let stroke_risk = CHA2DS2_VASC_STROKE_RISK
        .get(score as usize)
        .copied()
        .unwrap_or(">12%");
    // female sex alone does not warrant anticoagulation
    let anticoagulation = score >= 2 || (score == 1 && criteria.sex == Sex::Male);

    Cha2ds2VascResult {
        score,
        stroke_risk,
        anticoagulation,
        recommendation: if anticoagulation {
            "Oral anticoagulation recommended"
        } else {
            "Consider aspirin or no therapy"
        },
        interpretation: format!("CHA2DS2-VASc: {score}/9 - Annual stroke risk: {stroke_risk}"),
    }
}

pub fn calculate_apache_ii(input: &ApacheInput) -> ApacheResult {
    let temperature_points = match input.temperature {
        Some(t) if t >= 41.0 => 4,
        Some(t) if t >= 39.0 => 3,
        Some(t) if t <= 29.9 => 4,
        Some(t) if t <= 33.9 => 3,
        _ => 0,
    };
    let age_points = match input.age {
        75.. => 6,
        65..=74 => 5,
        55..=64 => 3,
        45..=54 => 2,
        _ => 0,
    };
    let chronic_points = if input.chronic_health { 5 } else { 0 };
    let score = temperature_points + age_points + chronic_points;

    let mortality = match score {
        0..=9 => "< 10%",
        10..=14 => "15-25%",
        15..=19 => "25-50%",
        _ => "> 50%",
    };

    ApacheResult {
        score,
        mortality,
        interpretation: format!("APACHE II: {score} - Estimated mortality: {mortality}"),
    }
}

/// Dispatch to the requested scoring system.
pub fn calculate_score(request: &ClinicalScoreRequest) -> ClinicalScore {
    let score = match request {
        ClinicalScoreRequest::News2(vitals) => ClinicalScore::News2(calculate_news2(vitals)),
        ClinicalScoreRequest::WellsDvt(criteria) => {
            ClinicalScore::WellsDvt(calculate_wells_dvt(criteria))
        }
        ClinicalScoreRequest::Curb65(criteria) => ClinicalScore::Curb65(calculate_curb65(criteria)),
        ClinicalScoreRequest::Cha2ds2Vasc(criteria) => {
            ClinicalScore::Cha2ds2Vasc(calculate_cha2ds2_vasc(criteria))
        }
        ClinicalScoreRequest::ApacheII(input) => ClinicalScore::ApacheII(calculate_apache_ii(input)),
    };
    debug!("Clinical score computed: {:?}", score);
    score
}
