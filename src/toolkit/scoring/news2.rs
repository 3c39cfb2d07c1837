use super::models::{Consciousness, News2Breakdown, News2Result, News2Risk, VitalSigns};

/// Ascending inclusive upper bounds with their points. Values above the last
/// bound score `above`.
struct Bands {
    steps: &'static [(f64, u32)],
    above: u32,
}

impl Bands {
    fn points(&self, value: f64) -> u32 {
        self.steps
            .iter()
            .find(|(upper, _)| value <= *upper)
            .map_or(self.above, |(_, points)| *points)
    }
}

const RESPIRATORY_RATE: Bands = Bands {
    steps: &[(8.0, 3), (11.0, 1), (20.0, 0), (24.0, 2)],
    above: 3,
};
const OXYGEN_SATURATION: Bands = Bands {
    steps: &[(91.0, 3), (93.0, 2), (95.0, 1)],
    above: 0,
};
const SYSTOLIC_BP: Bands = Bands {
    steps: &[(90.0, 3), (100.0, 2), (110.0, 1), (219.0, 0)],
    above: 3,
};
const HEART_RATE: Bands = Bands {
    steps: &[(40.0, 3), (50.0, 1), (90.0, 0), (110.0, 1), (130.0, 2)],
    above: 3,
};
const TEMPERATURE: Bands = Bands {
    steps: &[(35.0, 3), (36.0, 1), (38.0, 0), (39.0, 1)],
    above: 2,
};

const SUPPLEMENTAL_OXYGEN_POINTS: u32 = 2;
const CVPU_POINTS: u32 = 3;

// zero, negative and NaN readings count as not measured
fn observed(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn risk_for(score: u32) -> News2Risk {
    match score {
        7.. => News2Risk::High,
        5..=6 => News2Risk::MediumHigh,
        3..=4 => News2Risk::LowMedium,
        _ => News2Risk::Low,
    }
}

/// National Early Warning Score 2 for a set of bedside observations.
pub fn calculate_news2(vitals: &VitalSigns) -> News2Result {
    let breakdown = News2Breakdown {
        respiratory_rate: observed(vitals.respiratory_rate).map(|v| RESPIRATORY_RATE.points(v)),
        oxygen_saturation: observed(vitals.oxygen_saturation).map(|v| OXYGEN_SATURATION.points(v)),
        supplemental_oxygen: vitals.supplemental_oxygen.then_some(SUPPLEMENTAL_OXYGEN_POINTS),
        systolic_bp: observed(vitals.systolic_bp).map(|v| SYSTOLIC_BP.points(v)),
        heart_rate: observed(vitals.heart_rate).map(|v| HEART_RATE.points(v)),
        consciousness: match vitals.consciousness {
            Consciousness::Cvpu => CVPU_POINTS,
            Consciousness::Alert => 0,
        },
        temperature: observed(vitals.temperature).map(|v| TEMPERATURE.points(v)),
    };

    let score = [
        breakdown.respiratory_rate,
        breakdown.oxygen_saturation,
        breakdown.supplemental_oxygen,
        breakdown.systolic_bp,
        breakdown.heart_rate,
        breakdown.temperature,
    ]
    .into_iter()
    .flatten()
    .sum::<u32>()
        + breakdown.consciousness;

    let risk = risk_for(score);

    News2Result {
        score,
        risk,
        action: risk.action(),
        color: risk.color(),
        breakdown,
        interpretation: format!("NEWS2 Score: {score}/20 - {risk} RISK"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_vitals() -> VitalSigns {
        VitalSigns {
            respiratory_rate: Some(16.0),
            oxygen_saturation: Some(97.0),
            systolic_bp: Some(120.0),
            heart_rate: Some(80.0),
            temperature: Some(37.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_normal_observations_score_zero() {
        let result = calculate_news2(&normal_vitals());
        assert_eq!(result.score, 0);
        assert_eq!(result.risk, News2Risk::Low);
        assert_eq!(result.color, "green");
        assert_eq!(result.breakdown.heart_rate, Some(0));
    }

    #[test]
    fn test_deteriorating_patient() {
        let vitals = VitalSigns {
            respiratory_rate: Some(26.0),
            oxygen_saturation: Some(90.0),
            systolic_bp: Some(95.0),
            heart_rate: Some(120.0),
            temperature: Some(39.5),
            consciousness: Consciousness::Cvpu,
            supplemental_oxygen: true,
        };
        let result = calculate_news2(&vitals);
        assert_eq!(result.score, 17);
        assert_eq!(result.risk, News2Risk::High);
        assert_eq!(result.interpretation, "NEWS2 Score: 17/20 - HIGH RISK");
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(RESPIRATORY_RATE.points(8.0), 3);
        assert_eq!(RESPIRATORY_RATE.points(11.0), 1);
        assert_eq!(RESPIRATORY_RATE.points(21.0), 2);
        assert_eq!(SYSTOLIC_BP.points(220.0), 3);
        assert_eq!(TEMPERATURE.points(38.5), 1);
        assert_eq!(OXYGEN_SATURATION.points(96.0), 0);
    }

    #[test]
    fn test_missing_values_do_not_score() {
        let vitals = VitalSigns {
            heart_rate: Some(0.0),
            temperature: None,
            ..Default::default()
        };
        let result = calculate_news2(&vitals);
        assert_eq!(result.score, 0);
        assert!(result.breakdown.heart_rate.is_none());
        let json = serde_json::to_value(&result.breakdown).unwrap();
        assert!(json.get("temperature").is_none());
        assert_eq!(json["consciousness"], 0);
    }

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(risk_for(2), News2Risk::Low);
        assert_eq!(risk_for(3), News2Risk::LowMedium);
        assert_eq!(risk_for(5), News2Risk::MediumHigh);
        assert_eq!(risk_for(7), News2Risk::High);
    }
}
