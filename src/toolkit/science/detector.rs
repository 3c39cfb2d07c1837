use lazy_static::lazy_static;
use regex::Regex;

const SCIENCE_KEYWORDS: &[&str] = &[
    // actions
    "giải", "tính", "chứng minh", "chứng tỏ", "phân tích", "rút gọn", "chuyển đổi", "xác định",
    // algebra and calculus
    "phương trình", "hệ", "nghiệm", "bậc hai", "đạo hàm", "tích phân", "giới hạn", "lim", "chuỗi",
    "biểu thức", "bất đẳng thức", "khảo sát", "cực trị", "vi phân", "gradient", "ma trận",
    "định thức", "vector", "eigen", "trị riêng",
    // physics
    "vận tốc", "gia tốc", "lực", "công", "năng lượng", "công suất", "điện trở", "dòng điện",
    "điện áp", "mạch điện", "cảm ứng", "từ trường", "điện trường",
    // chemistry and biochemistry
    "phản ứng", "hóa học", "oxi hóa", "khử", "mol", "nguyên tử", "phân tử", "cân bằng", "nồng độ",
    "ph", "este", "hidrocacbon", "amin", "peptit", "enzyme", "protein", "glucid", "lipid",
    // statistics
    "xác suất", "thống kê", "kỳ vọng", "phương sai", "phân phối", "chuẩn hóa", "t-test", "anova",
];

lazy_static! {
    static ref KEYWORD_RE: Option<Regex> = {
        let alternation = SCIENCE_KEYWORDS
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b({alternation})\b")).ok()
    };
}

const MATH_SYMBOLS: &[char] = &['=', '+', '-', '*', '/', '^', '→', '\\', '√'];

/// True for maths, physics, chemistry or statistics questions.
pub fn is_scientific_query(text: &str) -> bool {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return false;
    }

    if KEYWORD_RE.as_ref().is_some_and(|re| re.is_match(&lowered)) {
        return true;
    }

    lowered.contains(MATH_SYMBOLS) && lowered.chars().any(|c| c.is_ascii_alphanumeric())
}
