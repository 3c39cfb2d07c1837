use super::models::{Condition, ConditionCategory as C, Flag};

const fn condition(
    code: &'static str,
    name: &'static str,
    mortality: f64,
    emergency: bool,
    category: C,
) -> Condition {
    Condition {
        code,
        name,
        mortality,
        emergency,
        category,
    }
}

pub const CRITICAL_CONDITIONS: &[Condition] = &[
    // acute cardiovascular
    condition("I21", "Nhồi máu cơ tim cấp", 15.0, true, C::Cardiac),
    condition("I20.0", "Đau thắt ngực không ổn định", 12.0, true, C::Cardiac),
    condition("I26", "Thuyên tắc phổi", 30.0, true, C::Pulmonary),
    condition("I60", "Xuất huyết dưới nhện", 45.0, true, C::Neurological),
    condition("I61", "Xuất huyết não", 40.0, true, C::Neurological),
    condition("I63", "Nhồi máu não", 20.0, true, C::Neurological),
    // severe infection
    condition("A41", "Nhiễm khuẩn huyết", 25.0, true, C::Infectious),
    condition("J18", "Viêm phổi nặng", 15.0, true, C::Pulmonary),
    condition("K65", "Viêm phúc mạc", 20.0, true, C::Abdominal),
    condition("N17", "Suy thận cấp", 18.0, true, C::Renal),
    // trauma
    condition("S06", "Chấn thương sọ não", 30.0, true, C::Trauma),
    condition("S27", "Chấn thương ngực", 25.0, true, C::Trauma),
    condition("T79.4", "Sốc chấn thương", 35.0, true, C::Trauma),
    // acute metabolic
    condition("E10.1", "Nhiễm toan ceton đái tháo đường", 12.0, true, C::Metabolic),
    condition("E87.2", "Nhiễm toan chuyển hóa", 15.0, true, C::Metabolic),
    // late-stage cancer
    condition("C78", "Ung thư di căn", 60.0, false, C::Oncology),
    condition("C80", "Ung thư giai đoạn cuối", 70.0, false, C::Oncology),
];

pub const MODERATE_CONDITIONS: &[Condition] = &[
    condition("J44", "Bệnh phổi tắc nghẽn mạn tính (COPD)", 8.0, false, C::Pulmonary),
    condition("I25", "Bệnh tim mạch vành mạn tính", 6.0, false, C::Cardiac),
    condition("I50", "Suy tim", 9.0, false, C::Cardiac),
    condition("E11", "Đái tháo đường type 2", 5.0, false, C::Metabolic),
    condition("N18", "Bệnh thận mạn tính", 7.0, false, C::Renal),
    condition("K29", "Viêm dạ dày", 1.0, false, C::Gastrointestinal),
    condition("A09", "Nhiễm trùng tiêu hóa", 2.0, false, C::Infectious),
];

pub const MILD_CONDITIONS: &[Condition] = &[
    condition("J00", "Cảm lạnh thông thường", 0.01, false, C::Respiratory),
    condition("J06", "Nhiễm trùng đường hô hấp trên cấp", 0.1, false, C::Respiratory),
    condition("J11", "Cúm mùa", 0.5, false, C::Respiratory),
    condition("R51", "Đau đầu", 0.01, false, C::Neurological),
    condition("R50", "Sốt nhẹ", 0.1, false, C::General),
    condition("M79", "Đau cơ", 0.01, false, C::Musculoskeletal),
    condition("K30", "Khó tiêu", 0.01, false, C::Gastrointestinal),
    condition("R10", "Đau bụng nhẹ", 0.1, false, C::Gastrointestinal),
    condition("H10", "Viêm kết mạc", 0.01, false, C::Ophthalmology),
    condition("J02", "Viêm họng cấp", 0.05, false, C::Respiratory),
    condition("G43", "Đau nửa đầu (migraine)", 0.01, false, C::Neurological),
    condition("R53", "Mệt mỏi", 0.01, false, C::General),
    condition("F43", "Stress, lo âu", 0.5, false, C::Mental),
];

const CALL_115: &str = "🚨 Gọi 115 NGAY";
const SEE_DOCTOR_24H: &str = "⚠️ Khám bác sĩ trong 24h";

/// Signs that need an ambulance now.
pub const RED_FLAGS: &[Flag] = &[
    Flag { symptom: "đau ngực dữ dội", risk: "Nhồi máu cơ tim, Thuyên tắc phổi", action: CALL_115 },
    Flag { symptom: "khó thở nặng", risk: "Suy hô hấp, Hen nặng, COVID-19 nặng", action: CALL_115 },
    Flag { symptom: "liệt nửa người", risk: "Đột quỵ não", action: CALL_115 },
    Flag { symptom: "nói ngọng đột ngột", risk: "Đột quỵ não", action: CALL_115 },
    Flag { symptom: "mất ý thức", risk: "Nguy cơ tử vong cao", action: CALL_115 },
    Flag { symptom: "co giật", risk: "Động kinh, Nhiễm trùng não", action: CALL_115 },
    Flag {
        symptom: "xuất huyết nặng",
        risk: "Sốc mất máu",
        action: "🚨 Gọi 115 + Ép vết thương NGAY",
    },
    Flag { symptom: "đau bụng dữ dội", risk: "Viêm ruột thừa, Thủng tạng", action: "🚨 Đến ER ngay" },
    Flag { symptom: "sốt trên 40°C", risk: "Nhiễm trùng nặng", action: "🚨 Đến ER ngay" },
    Flag { symptom: "SpO2 < 90%", risk: "Suy hô hấp", action: "🚨 Gọi 115 + Thở oxy NGAY" },
    Flag {
        symptom: "nhịp tim > 140 hoặc < 40",
        risk: "Rối loạn nhịp tim nguy hiểm",
        action: CALL_115,
    },
];

/// Signs that need a doctor within a day.
pub const YELLOW_FLAGS: &[Flag] = &[
    Flag { symptom: "sốt kéo dài > 3 ngày", risk: "Nhiễm trùng vi khuẩn", action: SEE_DOCTOR_24H },
    Flag { symptom: "đau đầu dữ dội dai dẳng", risk: "Áp lực nội sọ tăng", action: SEE_DOCTOR_24H },
    Flag { symptom: "ho ra máu", risk: "Lao phổi, Ung thư phổi", action: SEE_DOCTOR_24H },
    Flag { symptom: "nôn ra máu", risk: "Xuất huyết tiêu hóa", action: SEE_DOCTOR_24H },
    Flag { symptom: "tiểu ra máu", risk: "Nhiễm trùng tiết niệu, Sỏi thận", action: SEE_DOCTOR_24H },
    Flag {
        symptom: "đái tháo đường mất kiểm soát",
        risk: "Biến chứng cấp tính",
        action: SEE_DOCTOR_24H,
    },
    Flag { symptom: "khó thở nhẹ kéo dài", risk: "Hen, COPD cấp", action: SEE_DOCTOR_24H },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_sizes() {
        assert_eq!(CRITICAL_CONDITIONS.len(), 17);
        assert_eq!(MODERATE_CONDITIONS.len(), 7);
        assert_eq!(MILD_CONDITIONS.len(), 13);
        assert_eq!(RED_FLAGS.len(), 11);
        assert_eq!(YELLOW_FLAGS.len(), 7);
    }

    #[test]
    fn test_codes_are_unique() {
        let all: Vec<&str> = CRITICAL_CONDITIONS
            .iter()
            .chain(MODERATE_CONDITIONS)
            .chain(MILD_CONDITIONS)
            .map(|c| c.code)
            .collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }
}
