use super::models::{Treatment, TreatmentPlan, TreatmentPriority, TreatmentWarning};

const URGENT: Treatment = Treatment {
    priority: TreatmentPriority::Urgent,
    action: "Nhập viện ngay",
    rationale: "Bệnh nhân có nguy cơ cao, cần theo dõi tại bệnh viện",
};

const SPECIALIST: Treatment = Treatment {
    priority: TreatmentPriority::High,
    action: "Khám chuyên khoa trong 24-48h",
    rationale: "Cần đánh giá chuyên sâu",
};

const ROUTINE: Treatment = Treatment {
    priority: TreatmentPriority::Routine,
    action: "Theo dõi triệu chứng, tái khám nếu xấu đi",
    rationale: "Tình trạng ổn định",
};

/// Care setting by severity label (`HIGH`/`CRITICAL`, `MODERATE`, anything
/// else) plus an allergy warning when allergies are known.
pub fn treatment_recommendations<S: AsRef<str>>(
    diagnosis: &str,
    severity: &str,
    allergies: &[S],
) -> TreatmentPlan {
    let severity = severity.trim().to_uppercase();
    let treatment = match severity.as_str() {
        "HIGH" | "CRITICAL" => URGENT,
        "MODERATE" => SPECIALIST,
        _ => ROUTINE,
    };

    let allergies: Vec<&str> = allergies
        .iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .collect();
    let warnings = if allergies.is_empty() {
        Vec::new()
    } else {
        vec![TreatmentWarning {
            kind: "ALLERGY",
            message: format!(
                "Bệnh nhân dị ứng: {}. Tránh các thuốc liên quan.",
                allergies.join(", ")
            ),
        }]
    };

    TreatmentPlan {
        diagnosis: diagnosis.trim().to_string(),
        severity,
        treatments: vec![treatment],
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_goes_to_hospital() {
        let plan = treatment_recommendations::<&str>("Viêm phổi nặng", "critical", &[]);
        assert_eq!(plan.severity, "CRITICAL");
        assert_eq!(plan.treatments[0].priority, TreatmentPriority::Urgent);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_moderate_and_default() {
        let plan = treatment_recommendations::<&str>("Viêm dạ dày", "MODERATE", &[]);
        assert_eq!(plan.treatments[0].priority, TreatmentPriority::High);
        let plan = treatment_recommendations::<&str>("Cảm lạnh", "MILD", &[]);
        assert_eq!(plan.treatments[0].action, "Theo dõi triệu chứng, tái khám nếu xấu đi");
    }

    #[test]
    fn test_allergy_warning() {
        let plan = treatment_recommendations("Viêm họng", "MILD", &["Penicillin", " ", "Aspirin"]);
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(
            plan.warnings[0].message,
            "Bệnh nhân dị ứng: Penicillin, Aspirin. Tránh các thuốc liên quan."
        );
        let json = serde_json::to_value(&plan.warnings[0]).unwrap();
        assert_eq!(json["type"], "ALLERGY");
    }
}
