use url::form_urlencoded;

use super::models::{ReferenceSource, SourceCategory};
use super::patterns::detect_category;

struct SourceTemplate {
    title: &'static str,
    /// When set the title becomes "`title` - keyword".
    keyed_title: bool,
    endpoint: &'static str,
    param: &'static str,
    label: &'static str,
    snippet: &'static str,
}

const MAYO_ENDPOINT: &str = "https://www.mayoclinic.org/search/search-results";
const WHO_TOPICS_ENDPOINT: &str = "https://www.who.int/health-topics/search";
const CDC_ENDPOINT: &str = "https://www.cdc.gov/search/";
const HOPKINS_ENDPOINT: &str = "https://www.hopkinsmedicine.org/search";

const EMERGENCY: [SourceTemplate; 3] = [
    SourceTemplate {
        title: "WHO Emergency Guidelines",
        keyed_title: false,
        endpoint: "https://www.who.int/emergencies/search",
        param: "query",
        label: "🚨 WHO Emergency",
        snippet: "Hướng dẫn xử lý cấp cứu từ WHO",
    },
    SourceTemplate {
        title: "Mayo Clinic",
        keyed_title: true,
        endpoint: MAYO_ENDPOINT,
        param: "q",
        label: "🏥 Mayo Clinic",
        snippet: "Thông tin y tế từ bệnh viện hàng đầu thế giới",
    },
    SourceTemplate {
        title: "CDC Emergency",
        keyed_title: false,
        endpoint: CDC_ENDPOINT,
        param: "query",
        label: "🏛️ CDC",
        snippet: "Hướng dẫn cấp cứu từ CDC (US)",
    },
];

const INFECTIOUS: [SourceTemplate; 3] = [
    SourceTemplate {
        title: "WHO",
        keyed_title: true,
        endpoint: WHO_TOPICS_ENDPOINT,
        param: "query",
        label: "🏥 WHO",
        snippet: "Hướng dẫn về bệnh truyền nhiễm từ WHO",
    },
    SourceTemplate {
        title: "Bộ Y tế VN",
        keyed_title: true,
        endpoint: "https://moh.gov.vn/web/guest/tim-kiem",
        param: "_search_WAR_mohmvcportlet_keywords",
        label: "🏛️ Bộ Y tế VN",
        snippet: "Hướng dẫn phòng chống dịch bệnh",
    },
    SourceTemplate {
        title: "CDC",
        keyed_title: true,
        endpoint: CDC_ENDPOINT,
        param: "query",
        label: "🔬 CDC",
        snippet: "Thông tin từ Trung tâm Kiểm soát Dịch bệnh Mỹ",
    },
];

const DERMATOLOGY: [SourceTemplate; 3] = [
    SourceTemplate {
        title: "DermNet",
        keyed_title: true,
        endpoint: "https://dermnetnz.org/search/",
        param: "q",
        label: "🔬 DermNet NZ",
        snippet: "Cơ sở dữ liệu da liễu chuyên sâu",
    },
    SourceTemplate {
        title: "AAD",
        keyed_title: true,
        endpoint: "https://www.aad.org/search",
        param: "keys",
        label: "🏥 AAD",
        snippet: "Hiệp hội Da liễu Mỹ",
    },
    SourceTemplate {
        title: "Mayo Clinic",
        keyed_title: true,
        endpoint: MAYO_ENDPOINT,
        param: "q",
        label: "🏥 Mayo Clinic",
        snippet: "Thông tin da liễu từ Mayo Clinic",
    },
];

const MENTAL_HEALTH: [SourceTemplate; 3] = [
    SourceTemplate {
        title: "NIMH",
        keyed_title: true,
        endpoint: "https://www.nimh.nih.gov/search",
        param: "query",
        label: "🧠 NIMH",
        snippet: "Viện Sức khỏe Tâm thần Quốc gia Mỹ",
    },
    SourceTemplate {
        title: "Mental Health Foundation",
        keyed_title: false,
        endpoint: "https://www.mentalhealth.org.uk/search",
        param: "keys",
        label: "💚 Mental Health UK",
        snippet: "Tổ chức Sức khỏe Tâm thần Anh",
    },
    SourceTemplate {
        title: "Mayo Clinic",
        keyed_title: true,
        endpoint: MAYO_ENDPOINT,
        param: "q",
        label: "🏥 Mayo Clinic",
        snippet: "Thông tin sức khỏe tâm thần",
    },
];

const GASTRO: [SourceTemplate; 3] = [
    SourceTemplate {
        title: "Mayo Clinic",
        keyed_title: true,
        endpoint: MAYO_ENDPOINT,
        param: "q",
        label: "🏥 Mayo Clinic",
        snippet: "Thông tin về tiêu hóa",
    },
    SourceTemplate {
        title: "Johns Hopkins",
        keyed_title: true,
        endpoint: HOPKINS_ENDPOINT,
        param: "query",
        label: "🏥 Johns Hopkins",
        snippet: "Bệnh viện Johns Hopkins",
    },
    SourceTemplate {
        title: "WHO",
        keyed_title: true,
        endpoint: WHO_TOPICS_ENDPOINT,
        param: "query",
        label: "🏥 WHO",
        snippet: "Thông tin từ WHO",
    },
];

const RESPIRATORY: [SourceTemplate; 3] = [
    SourceTemplate {
        title: "WHO",
        keyed_title: true,
        endpoint: WHO_TOPICS_ENDPOINT,
        param: "query",
        label: "🏥 WHO",
        snippet: "Hướng dẫn về bệnh hô hấp",
    },
    SourceTemplate {
        title: "Mayo Clinic",
        keyed_title: true,
        endpoint: MAYO_ENDPOINT,
        param: "q",
        label: "🏥 Mayo Clinic",
        snippet: "Thông tin về hệ hô hấp",
    },
    SourceTemplate {
        title: "CDC",
        keyed_title: true,
        endpoint: CDC_ENDPOINT,
        param: "query",
        label: "🔬 CDC",
        snippet: "Thông tin từ CDC",
    },
];

const NEURO: [SourceTemplate; 3] = [
    SourceTemplate {
        title: "Mayo Clinic",
        keyed_title: true,
        endpoint: MAYO_ENDPOINT,
        param: "q",
        label: "🏥 Mayo Clinic",
        snippet: "Thông tin về thần kinh",
    },
    SourceTemplate {
        title: "Johns Hopkins",
        keyed_title: true,
        endpoint: HOPKINS_ENDPOINT,
        param: "query",
        label: "🏥 Johns Hopkins",
        snippet: "Bệnh viện Johns Hopkins",
    },
    SourceTemplate {
        title: "NINDS",
        keyed_title: true,
        endpoint: "https://www.ninds.nih.gov/search",
        param: "query",
        label: "🧠 NINDS",
        snippet: "Viện Thần kinh Quốc gia Mỹ",
    },
];

const GENERAL: [SourceTemplate; 3] = [
    SourceTemplate {
        title: "Mayo Clinic",
        keyed_title: true,
        endpoint: MAYO_ENDPOINT,
        param: "q",
        label: "🏥 Mayo Clinic",
        snippet: "Thông tin y tế tổng quát",
    },
    SourceTemplate {
        title: "WHO",
        keyed_title: true,
        endpoint: WHO_TOPICS_ENDPOINT,
        param: "query",
        label: "🏥 WHO",
        snippet: "Tổ chức Y tế Thế giới",
    },
    SourceTemplate {
        title: "MedlinePlus",
        keyed_title: true,
        endpoint: "https://medlineplus.gov/search/",
        param: "query",
        label: "📚 MedlinePlus",
        snippet: "Thư viện Y tế Quốc gia Mỹ",
    },
];

fn templates(category: SourceCategory) -> &'static [SourceTemplate; 3] {
    match category {
        SourceCategory::Emergency => &EMERGENCY,
        SourceCategory::Infectious => &INFECTIOUS,
        SourceCategory::Dermatology => &DERMATOLOGY,
        SourceCategory::MentalHealth => &MENTAL_HEALTH,
        SourceCategory::Gastro => &GASTRO,
        SourceCategory::Respiratory => &RESPIRATORY,
        SourceCategory::Neuro => &NEURO,
        SourceCategory::General => &GENERAL,
    }
}

fn search_url(endpoint: &str, param: &str, keyword: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
    format!("{endpoint}?{param}={encoded}")
}

impl SourceTemplate {
    fn render(&self, keyword: &str) -> ReferenceSource {
        let title = if self.keyed_title {
            format!("{} - {}", self.title, keyword)
        } else {
            self.title.to_string()
        };
        ReferenceSource {
            title,
            url: search_url(self.endpoint, self.param, keyword),
            source: self.label.to_string(),
            snippet: self.snippet.to_string(),
        }
    }
}


#[derive(Debug, Clone)]
pub struct CategorizedSources {
    pub category: SourceCategory,
    pub sources: Vec<ReferenceSource>,
}

/// Reference links for a category. Links are built, never fetched.
pub fn sources_for(category: SourceCategory, keyword: &str) -> Vec<ReferenceSource> {
    templates(category)
        .iter()
        .map(|template| template.render(keyword))
        .collect()
}


pub fn categorize_symptom(keyword: &str) -> CategorizedSources {
    let category = detect_category(keyword);
    CategorizedSources {
        category,
        sources: sources_for(category, keyword),
    }
}

/// Single Mayo Clinic link used when the whole search degraded.
pub fn degraded_source(raw_input: &str) -> ReferenceSource {
    GENERAL[0].render(raw_input)
}
