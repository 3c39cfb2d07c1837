use lazy_static::lazy_static;
use regex::Regex;

use super::models::SourceCategory;

/// Category groups in priority order. `General` has no patterns and is the
/// fallthrough.
const CATEGORY_PATTERNS: &[(SourceCategory, &[&str])] = &[
    (
        SourceCategory::Emergency,
        &[
            r"(đau\s?ngực|chest\s?pain|胸痛)",
            r"(khó\s?thở|difficulty\s?breathing|呼吸困难)",
            r"(xuất\s?huyết|bleeding|出血)",
            r"(co\s?giật|seizure|癫痫)",
            r"(mất\s?ý\s?thức|unconscious|昏迷)",
            r"(đột\s?quỵ|stroke|中风)",
            r"(tai\s?biến|sốc|shock)",
        ],
    ),
    (
        SourceCategory::Infectious,
        &[
            r"(sốt|fever|发烧)",
            r"(\bho\b|cough|咳嗽)",
            r"(cúm|flu|流感)",
            r"(viêm\s?phổi|pneumonia|肺炎)",
            r"(tiêu\s?chảy|diarrhea|腹泻)",
            r"(nôn|vomit|呕吐)",
            r"(nhiễm\s?trùng|infection)",
        ],
    ),
    (
        SourceCategory::Dermatology,
        &[
            r"(ngứa|itch|痒)",
            r"(phát\s?ban|rash|皮疹)",
            r"(mụn|acne|痤疮)",
            r"(viêm\s?da|dermatitis|皮炎)",
            r"(nấm|fungal|真菌)",
            r"(chàm|eczema|湿疹)",
        ],
    ),
    (
        SourceCategory::MentalHealth,
        &[
            r"(trầm\s?cảm|depression|抑郁)",
            r"(lo\s?âu|anxiety|焦虑)",
            r"(stress|căng\s?thẳng|压力)",
            r"(mất\s?ngủ|insomnia|失眠)",
            r"(tâm\s?lý|mental\s?health)",
        ],
    ),
    (
        SourceCategory::Gastro,
        &[
            r"(đau\s?bụng|abdominal\s?pain|腹痛)",
            r"(táo\s?bón|constipation|便秘)",
            r"(trào\s?ngược|reflux|反流)",
            r"(đầy\s?hơi|bloating|腹胀)",
            r"(viêm\s?dạ\s?dày|gastritis|胃炎)",
        ],
    ),
    (
        SourceCategory::Respiratory,
        &[
            r"(\bhen\b|asthma|哮喘)",
            r"(khó\s?thở|shortness\s?of\s?breath|呼吸困难)",
            r"(viêm\s?họng|sore\s?throat|喉咙痛)",
            r"(viêm\s?xoang|sinusitis|鼻窦炎)",
        ],
    ),
    (
        SourceCategory::Neuro,
        &[
            r"(đau\s?đầu|headache|头痛|頭痛)",
            r"(chóng\s?mặt|dizziness|头晕|眩晕)",
            r"(tê\s?liệt|paralysis|麻痹)",
            r"(run\s?tay|tremor|震颤)",
            r"(đau\s?dây\s?thần\s?kinh|neuralgia)",
        ],
    ),
];

/// Ordered noise-removal rules for the regex fallback extractor. Each rule
/// replaces its matches with the given text; order matters.
const CLEANUP_RULES: &[(&str, &str)] = &[
    // quantities with units go first, before the unit words are stripped
    (r"\d+\s*(độ|lần|giờ)", ""),
    (r"\d+\s*(ngày|tuần|tháng|năm)", ""),
    (r"\d+\s*(days?|weeks?|months?|years?|hours?|minutes?)", ""),
    (r"(^|\s)(tôi|con tôi|gia đình|chồng|vợ|bố|mẹ|con|em|anh|chị)(\s|$)", " "),
    (r"(^|\s)(bị|đang|có|cảm thấy|thấy)(\s|$)", " "),
    (r"(^|\s)(từ|nay)\s+(sáng|chiều|tối|đêm|hôm|ngày)", " "),
    (r"(^|\s)(hôm nay|hôm qua|sáng nay|chiều nay|tối nay|tối qua|sáng sớm)(\s|$)", " "),
    (r"(^|\s)(sáng|chiều|tối|đêm|nay|qua|rồi)(\s|$)", " "),
    (r"(^|\s)(mấy|nhiều|vài|ít|khoảng)(\s|$)", " "),
    (r"(^|\s)(kéo dài|liên tục|thường xuyên|đôi khi|luôn)(\s|$)", " "),
    // severity words (dữ dội, nặng, nhẹ, cấp tính, mạn tính) stay
    (r"(^|\s)(rất|quá|hơi|khá)(\s|$)", " "),
    (r"(^|\s)(i|my|me|his|her|their|our|son|daughter|parent|family|friend)(\s|$)", " "),
    (r"(^|\s)(has|have|had|been|am|is|are|was|were|being)(\s|$)", " "),
    (r"(^|\s)(a|an|the)(\s|$)", " "),
    (r"(^|\s)(for|since|from|to|at|in|on|about|around|with|by)(\s|$)", " "),
    // severe, mild, chronic, acute stay
    (r"(^|\s)(very|extremely)(\s|$)", " "),
    (r"\s*,\s*", " "),
    (r"\s+", " "),
];

lazy_static! {
    pub static ref CATEGORY_REGEXES: Vec<(SourceCategory, Vec<Regex>)> = CATEGORY_PATTERNS
        .iter()
        .map(|(category, patterns)| {
            let compiled = patterns
                .iter()
                .filter_map(|p| Regex::new(&format!("(?i){p}")).ok())
                .collect();
            (*category, compiled)
        })
        .collect();

    pub static ref CLEANUP_REGEXES: Vec<(Regex, &'static str)> = CLEANUP_RULES
        .iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(&format!("(?i){pattern}"))
                .ok()
                .map(|re| (re, *replacement))
        })
        .collect();

    static ref AI_DECORATION: Regex = Regex::new(r#"^["'`*]+|["'`*]+$"#).expect("static pattern");
}

/// First matching category in priority order, `General` otherwise.
pub fn detect_category(keyword: &str) -> SourceCategory {
    let keyword = keyword.to_lowercase();
    CATEGORY_REGEXES
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(&keyword)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

/// Apply the fallback cleanup rules. Returns the trimmed, cleaned text,
/// which may be empty.
pub fn strip_noise(input: &str) -> String {
    CLEANUP_REGEXES
        .iter()
        .fold(input.to_string(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
        .trim()
        .to_string()
}

/// Strip quotes, backticks and markdown emphasis the model wraps around its answer.
pub fn clean_ai_keyword(raw: &str) -> String {
    AI_DECORATION.replace_all(raw.trim(), "").trim().to_string()
}
