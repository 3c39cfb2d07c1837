use super::models::{Condition, ConditionCategory, EmergencyGuidance, HomeCareGuidance};

pub const EMERGENCY_NUMBER: &str = "☎️ Gọi cấp cứu: 115 (Việt Nam)";

/// First-response steps for a dangerous condition, chosen by category.
pub fn emergency_guidance(condition: &Condition) -> EmergencyGuidance {
    let (immediate_actions, home_care_survival, when_to_er): (&[&str], &[&str], &[&str]) =
        match condition.category {
            ConditionCategory::Cardiac => (
                &[
                    "✅ Gọi 115 NGAY LẬP TỨC",
                    "✅ Cho bệnh nhân nằm nghỉ, đầu cao 30°",
                    "✅ Nếu có thuốc chống đau ngực (Nitroglycerin): đặt dưới lưỡi",
                    "✅ Nếu có Aspirin: nhai 300mg (không nuốt nguyên viên)",
                    "✅ Theo dõi nhịp thở, mạch",
                    "❌ KHÔNG tự lái xe đến bệnh viện",
                ],
                &[
                    "⏰ 12-48 giờ đầu là QUAN TRỌNG NHẤT",
                    "🏥 Phải đến bệnh viện có khoa Cấp cứu Tim mạch",
                    "💊 Không tự ý dùng thuốc giảm đau thông thường",
                    "🚭 Tuyệt đối không hút thuốc, tránh stress",
                    "📊 Theo dõi: Đau ngực tăng? Khó thở? Vã mồ hôi?",
                ],
                &[
                    "🚨 Đau ngực lan ra tay, hàm, lưng",
                    "🚨 Khó thở, thở nhanh",
                    "🚨 Buồn nôn, nôn mửa",
                    "🚨 Choáng váng, mất ý thức",
                    "🚨 Nhịp tim không đều",
                ],
            ),
            ConditionCategory::Neurological => (
                &[
                    "✅ Gọi 115 NGAY LẬP TỨC",
                    "✅ Nhận diện đột quỵ: F.A.S.T (Face-Arms-Speech-Time)",
                    "✅ Cho bệnh nhân nằm nghiêng (tránh sặc)",
                    "✅ KHÔNG cho ăn uống gì",
                    "✅ Ghi nhớ thời điểm bắt đầu triệu chứng (quan trọng!)",
                    "❌ KHÔNG tự lái xe",
                ],
                &[
                    "⏰ 4.5 giờ đầu là \"GOLDEN HOUR\" - quyết định sống còn",
                    "🏥 Phải đến bệnh viện có khoa Đột quỵ (Stroke Unit)",
                    "💊 KHÔNG tự ý dùng thuốc",
                    "📊 Theo dõi: Liệt tăng? Nói khó hơn? Ý thức giảm?",
                ],
                &[
                    "🚨 Liệt nửa người (tay, chân, mặt)",
                    "🚨 Nói khó, nói lắp",
                    "🚨 Mắt nhìn mờ đột ngột",
                    "🚨 Đau đầu dữ dội chưa từng có",
                    "🚨 Mất thăng bằng, chóng mặt nặng",
                ],
            ),
            ConditionCategory::Pulmonary => (
                &[
                    "✅ Gọi 115 NGAY",
                    "✅ Cho bệnh nhân ngồi dậy (dễ thở hơn)",
                    "✅ Nếu có oxy: 4-6L/phút qua mask",
                    "✅ Nếu có thuốc hen (Ventolin): 2-4 nhát",
                    "✅ Mở cửa sổ, thông gió",
                    "❌ KHÔNG cho nằm ngửa hoàn toàn",
                ],
                &[
                    "⏰ 6-24 giờ đầu theo dõi sát",
                    "🏥 Phải có máy đo SpO2 tại nhà (nếu < 90% → đi ER ngay)",
                    "💊 Dùng thuốc giãn phế quản theo chỉ định",
                    "📊 Theo dõi: Tần số thở, màu da, môi tím?",
                ],
                &[
                    "🚨 SpO2 < 90%",
                    "🚨 Thở nhanh > 30 lần/phút",
                    "🚨 Môi, móng tay tím",
                    "🚨 Nói không thành câu",
                    "🚨 Choáng váng, lơ mơ",
                ],
            ),
            ConditionCategory::Infectious => (
                &[
                    "✅ Gọi 115 hoặc đến ER ngay",
                    "✅ Hạ sốt: chườm nước ấm, uống Paracetamol",
                    "✅ Uống nhiều nước (2-3L/ngày)",
                    "✅ Cách ly nếu nghi nhiễm trùng lây",
                    "✅ Theo dõi nhiệt độ mỗi 2-4 giờ",
                ],
                &[
                    "⏰ 12-24 giờ đầu cực kỳ quan trọng",
                    "🏥 Cần kháng sinh tĩnh mạch sớm (không tự mua)",
                    "💊 Hạ sốt < 38.5°C để tránh co giật",
                    "📊 Theo dõi: Sốt giảm chưa? Tỉnh táo? Nước tiểu đủ?",
                ],
                &[
                    "🚨 Sốt > 39.5°C không hạ",
                    "🚨 Xuất huyết dưới da (chấm tím)",
                    "🚨 Lơ mơ, mê sảng",
                    "🚨 Nôn mửa liên tục",
                    "🚨 Tiểu ít hoặc không tiểu",
                ],
            ),
            _ => (
                &[
                    "✅ Gọi 115 để được tư vấn",
                    "✅ Theo dõi triệu chứng chặt chẽ",
                    "✅ Chuẩn bị đến bệnh viện nếu xấu đi",
                    "✅ Ghi chép triệu chứng, thời gian",
                ],
                &[],
                &[
                    "🚨 Triệu chứng xấu đi nhanh",
                    "🚨 Đau tăng không kiểm soát",
                    "🚨 Xuất huyết bất thường",
                    "🚨 Ý thức giảm",
                ],
            ),
        };

    EmergencyGuidance {
        alert: "🚨 CẢNH BÁO: BỆNH NGUY HIỂM",
        mortality: format!("Tỷ lệ tử vong: {}%", condition.mortality),
        immediate_actions: immediate_actions.to_vec(),
        home_care_survival: home_care_survival.to_vec(),
        when_to_er: when_to_er.to_vec(),
        emergency_number: EMERGENCY_NUMBER,
    }
}

fn is_headache(condition: &Condition) -> bool {
    let name = condition.name.to_lowercase();
    name.contains("đau đầu") || name.contains("migraine")
}

/// Self-care advice for mild or moderate conditions, chosen by category.
pub fn home_care_guidance(condition: &Condition) -> HomeCareGuidance {
    let alert = if condition.mortality >= 5.0 {
        "⚠️ BỆNH TRUNG BÌNH - Cần theo dõi"
    } else {
        "✅ BỆNH NHẸ - Có thể điều trị tại nhà"
    };

    let (home_care, medications, follow_up, when_to_see_doctor): (&[&str], &[&str], &[&str], &[&str]) =
        match condition.category {
            ConditionCategory::Respiratory => (
                &[
                    "🏠 Nghỉ ngơi đầy đủ, tránh mệt mỏi",
                    "💧 Uống nhiều nước ấm (2-3L/ngày)",
                    "🌡️ Hạ sốt nếu > 38.5°C",
                    "😷 Đeo khẩu trang khi tiếp xúc người khác",
                    "🪟 Giữ phòng thông thoáng",
                ],
                &[
                    "💊 Paracetamol 500mg: Uống khi sốt > 38.5°C (3-4 lần/ngày)",
                    "💊 Vitamin C 1000mg: 1 viên/ngày",
                    "🍯 Mật ong + chanh ấm: Giảm ho",
                    "💊 Xịt mũi nước muối sinh lý: 3-4 lần/ngày",
                ],
                &[
                    "📅 Theo dõi: 3-5 ngày thường khỏi",
                    "📊 Nếu sau 5 ngày không khỏi → Khám bác sĩ",
                    "🌡️ Đo nhiệt độ 2 lần/ngày (sáng, tối)",
                ],
                &[
                    "⚠️ Sốt > 3 ngày",
                    "⚠️ Khó thở, thở nhanh",
                    "⚠️ Đau ngực khi thở",
                    "⚠️ Ho ra đờm mủ, máu",
                    "⚠️ Triệu chứng không giảm sau 5 ngày",
                ],
            ),
            ConditionCategory::Gastrointestinal => (
                &[
                    "🍚 Ăn nhạt, dễ tiêu (cháo, súp)",
                    "💧 Bù nước điện giải (Oresol)",
                    "🚫 Tránh: Cay, dầu mỡ, cà phê, rượu",
                    "🍵 Uống trà gừng, trà bạc hà",
                    "😴 Ngủ đủ giấc",
                ],
                &[
                    "💊 Smecta: 1 gói x 3 lần/ngày (tiêu chảy)",
                    "💊 Omeprazole 20mg: 1 viên buổi sáng đói (viêm dạ dày)",
                    "💊 Men tiêu hóa: Theo hướng dẫn",
                    "⚠️ Không dùng kháng sinh tự ý",
                ],
                &[
                    "📅 Thường khỏi trong 2-3 ngày",
                    "📊 Nếu sau 3 ngày không khỏi → Khám bác sĩ",
                ],
                &[
                    "⚠️ Tiêu chảy > 3 ngày",
                    "⚠️ Nôn ra máu, đi cầu phân đen",
                    "⚠️ Đau bụng dữ dội",
                    "⚠️ Sốt cao kèm tiêu chảy",
                    "⚠️ Dấu hiệu mất nước: Khát nước, tiểu ít, mệt lả",
                ],
            ),
            ConditionCategory::Neurological if is_headache(condition) => (
                &[
                    "😴 Nghỉ ngơi trong phòng tối, yên tĩnh",
                    "❄️ Chườm lạnh trán, gáy",
                    "☕ Uống cà phê (migraine)",
                    "🧘 Thư giãn, tránh stress",
                    "💤 Ngủ đủ 7-8 giờ/đêm",
                ],
                &[
                    "💊 Paracetamol 500mg: 1-2 viên khi đau",
                    "💊 Ibuprofen 400mg: 1 viên khi đau (nếu Paracetamol không đủ)",
                    "⚠️ Không dùng > 3 ngày liên tục",
                ],
                &[],
                &[
                    "⚠️ Đau đầu dữ dội nhất đời (thunderclap headache)",
                    "⚠️ Đau đầu kèm sốt, cứng gáy",
                    "⚠️ Đau đầu kèm nôn ói phun",
                    "⚠️ Đau đầu kèm nhìn mờ, liệt",
                    "⚠️ Đau đầu mới xuất hiện sau 50 tuổi",
                ],
            ),
            _ => (
                &[
                    "🏠 Nghỉ ngơi đầy đủ",
                    "💧 Uống nhiều nước",
                    "🍎 Ăn uống dinh dưỡng",
                    "😴 Ngủ đủ giấc",
                    "📊 Theo dõi triệu chứng",
                ],
                &[],
                &[],
                &[
                    "⚠️ Triệu chứng không giảm sau 3-5 ngày",
                    "⚠️ Xuất hiện triệu chứng mới",
                    "⚠️ Triệu chứng xấu đi",
                ],
            ),
        };

    HomeCareGuidance {
        alert,
        home_care: home_care.to_vec(),
        medications: medications.to_vec(),
        follow_up: follow_up.to_vec(),
        when_to_see_doctor: when_to_see_doctor.to_vec(),
    }
}
