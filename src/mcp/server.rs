use rmcp::{
    handler::server::{
        router::tool::ToolRouter,
        router::prompt::PromptRouter,
        wrapper::Parameters,
    },
    model::*,
    tool, tool_handler, tool_router,
    prompt, prompt_handler, prompt_router,
    transport::stdio,
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::JaremisConfig;
use crate::core::error::{JaremisError, Result as JaremisResult};
use crate::llm::factory::LlmProviderFactory;
use crate::llm::providers::LlmProvider;
use crate::toolkit::diagnosis::parse_diagnosis_response;
use crate::toolkit::science::{ScienceSolver, build_sci_latex_guideline, is_scientific_query, post_process_latex};
use crate::toolkit::scoring::{
    ClinicalScoreRequest, calculate_score, parse_lab_results, treatment_recommendations,
};
use crate::toolkit::severity::triage;
use crate::toolkit::symptom::{ExtractionCache, SmartSymptomSearch, SymptomExtractor};
use crate::utils::safe_truncate_ellipsis;

const TOOL_NAMES: [&str; 9] = [
    "smart_symptom_search",
    "is_scientific_query",
    "format_latex",
    "solve_science",
    "assess_severity",
    "parse_diagnosis",
    "analyze_lab_results",
    "clinical_score",
    "treatment_plan",
];


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct SymptomSearchParams {
    #[schemars(description = "Free-text symptom description in any language (e.g. 'Tôi bị đau đầu dữ dội từ sáng nay')")]
    pub input: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct TextParams {
    #[schemars(description = "Text to inspect or rewrite")]
    pub text: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct SolveScienceParams {
    #[schemars(description = "Question to answer; scientific questions get structured LaTeX")]
    pub question: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct AssessSeverityParams {
    #[schemars(description = "ICD-10 codes, e.g. ['I21', 'J06']")]
    pub icd_codes: Vec<String>,
    #[schemars(description = "Optional free-text symptoms checked for red and yellow flags")]
    pub symptoms: Option<String>,
}


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct ClinicalScoreParams {
    #[schemars(description = "Scoring system and its inputs, e.g. {\"system\": \"curb65\", \"confusion\": true, \"urea\": 8.1, \"age\": 70}. Systems: news2, wells_dvt, curb65, cha2ds2_vasc, apache_ii")]
    pub request: ClinicalScoreRequest,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct TreatmentPlanParams {
    #[schemars(description = "Working diagnosis")]
    pub diagnosis: String,
    #[schemars(description = "Severity label: CRITICAL, HIGH, MODERATE or MILD")]
    pub severity: String,
    #[schemars(description = "Known drug allergies")]
    pub allergies: Option<Vec<String>>,
}


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct LatexGuidelineArgs {
    #[schemars(description = "Optional question to append after the rules")]
    pub question: Option<String>,
}


#[derive(Debug, Serialize)]
struct ScientificQueryResult {
    scientific: bool,
}


#[derive(Clone)]
pub struct JaremisMcpServer {
    config: Arc<JaremisConfig>,
    search: Arc<SmartSymptomSearch>,
    solver: Arc<ScienceSolver>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl JaremisMcpServer {
    pub fn new(config: JaremisConfig, provider: Arc<dyn LlmProvider>) -> JaremisResult<Self> {
        let capacity = NonZeroUsize::new(config.cache_size).ok_or_else(|| {
            JaremisError::Config("cache_size must be greater than zero".to_string())
        })?;
        let cache = Arc::new(ExtractionCache::new(
            capacity,
            std::time::Duration::from_secs(config.cache_ttl_secs),
        ));
        let extractor = SymptomExtractor::new(provider.clone(), config.extraction_timeout())
            .with_cache(cache);
        let solver = ScienceSolver::new(provider, config.generation_timeout());

        Ok(Self {
            config: Arc::new(config),
            search: Arc::new(SmartSymptomSearch::new(Arc::new(extractor))),
            solver: Arc::new(solver),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        })
    }

    fn convert_error(err: JaremisError) -> McpError {
        match err {
            JaremisError::Config(msg) | JaremisError::Validation(msg) => {
                McpError::invalid_params(msg, None)
            }
            other => McpError::internal_error(other.to_string(), None),
        }
    }

    fn result_to_json<T: Serialize>(result: T) -> Result<String, McpError> {
        serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    fn json_content<T: Serialize>(result: T) -> Result<CallToolResult, McpError> {
        let json = Self::result_to_json(result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_router]
impl JaremisMcpServer {
    #[tool(description = "Extract the main symptom from a free-text description, classify it (emergency, infectious, dermatology, mental-health, gastro, respiratory, neuro, general) and return 3 trusted reference links. Never fails; degrades to one general link. Returns: {originalInput, extractedKeyword, category, sources, searchPerformed, extractionMethod, error?}")]
    async fn smart_symptom_search(
        &self,
        Parameters(params): Parameters<SymptomSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("🔍 Symptom search: '{}'", safe_truncate_ellipsis(&params.input, 50));

        let result = self.search.search(&params.input).await;
        if let Some(error) = &result.error {
            warn!("⚠️ Symptom search degraded: {}", error);
        }

        Self::json_content(&result)
    }

    #[tool(description = "Check whether a question is maths, physics, chemistry or statistics. Returns: {scientific}")]
    async fn is_scientific_query(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        let scientific = is_scientific_query(&params.text);
        Self::json_content(ScientificQueryResult { scientific })
    }

    #[tool(description = "Normalise a model answer into Vietnamese academic LaTeX: \\sqrt, \\dfrac, aligned equation chains, $$ displays and a conclusion line. Returns the formatted text.")]
    async fn format_latex(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        let formatted = post_process_latex(&params.text);
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    #[tool(description = "Answer a question with the configured LLM. Scientific questions are answered in structured LaTeX. Returns: {answer, scientific, metadata}")]
    async fn solve_science(
        &self,
        Parameters(params): Parameters<SolveScienceParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("🧮 Solve: '{}'", safe_truncate_ellipsis(&params.question, 50));

        let answer = self
            .solver
            .solve(&params.question)
            .await
            .map_err(Self::convert_error)?;

        info!("✅ Answered (scientific={})", answer.scientific);
        Self::json_content(&answer)
    }

    #[tool(description = "Grade ICD-10 codes as MILD, MODERATE or CRITICAL, detect red/yellow warning signs in symptoms and attach emergency or home-care guidance. Returns: {assessment, redFlags, yellowFlags, emergencyGuidance?, homeCareGuidance?}")]
    async fn assess_severity(
        &self,
        Parameters(params): Parameters<AssessSeverityParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = triage(&params.icd_codes, params.symptoms.as_deref());
        if !report.red_flags.is_empty() {
            warn!("🚨 {} red flag(s) detected", report.red_flags.len());
        }
        Self::json_content(&report)
    }

    #[tool(description = "Parse a free-text diagnosis reply into differential diagnoses, disease probabilities, confidence and the WHO guideline label. Returns: {differentialDiagnosis, diseases, confidence, whoGuideline, icdCodes}")]
    async fn parse_diagnosis(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = parse_diagnosis_response(&params.text);
        Self::json_content(&report)
    }

    #[tool(description = "Read lab values (WBC, RBC, Hemoglobin, Hematocrit, Platelet, Glucose, HbA1c, Creatinine, BUN, ALT, AST, Bilirubin, CRP) from a report or OCR text and flag values outside the reference range as MILD, MODERATE or SEVERE. Returns: {values, abnormal}")]
    async fn analyze_lab_results(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = parse_lab_results(&params.text);
        if !report.abnormal.is_empty() {
            info!("🧪 {} abnormal lab value(s)", report.abnormal.len());
        }
        Self::json_content(&report)
    }

    #[tool(description = "Compute a bedside clinical score: NEWS2, Wells DVT, CURB-65, CHA2DS2-VASc or simplified APACHE II. Returns the score with its risk band and recommendation, tagged by system.")]
    async fn clinical_score(
        &self,
        Parameters(params): Parameters<ClinicalScoreParams>,
    ) -> Result<CallToolResult, McpError> {
        let score = calculate_score(&params.request);
        Self::json_content(&score)
    }

    #[tool(description = "Suggest the care setting for a diagnosis by severity and warn about known allergies. Returns: {diagnosis, severity, treatments, warnings}")]
    async fn treatment_plan(
        &self,
        Parameters(params): Parameters<TreatmentPlanParams>,
    ) -> Result<CallToolResult, McpError> {
        let allergies = params.allergies.unwrap_or_default();
        let plan = treatment_recommendations(&params.diagnosis, &params.severity, &allergies);
        Self::json_content(&plan)
    }
}


#[prompt_router]
impl JaremisMcpServer {
    #[prompt(
        name = "latex_guideline",
        description = "Formatting rules for answering scientific questions in Vietnamese academic LaTeX"
    )]
    async fn latex_guideline(
        &self,
        Parameters(args): Parameters<LatexGuidelineArgs>,
    ) -> Result<GetPromptResult, McpError> {
        let text = match args.question {
            Some(question) => format!("{}\n\nCâu hỏi: {}", build_sci_latex_guideline(), question),
            None => build_sci_latex_guideline().to_string(),
        };
        let messages = vec![PromptMessage::new_text(PromptMessageRole::User, text)];

        Ok(GetPromptResult {
            description: Some("SCI_LATEX rules".to_string()),
            messages,
        })
    }
}


#[tool_handler]
#[prompt_handler]
impl ServerHandler for JaremisMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "jaremis".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "JAREMIS medical text toolkit. Use smart_symptom_search to route a symptom \
                 description to trusted references, assess_severity for ICD-10 triage, and \
                 solve_science or format_latex for structured maths answers. Results are for \
                 reference only and never replace a doctor."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                RawResource::new("config://jaremis", "jaremis-config".to_string()).no_annotation(),
                RawResource::new("status://cache", "extraction-cache".to_string()).no_annotation(),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match uri.as_str() {
            "config://jaremis" => {
                let content = Self::result_to_json(self.config_summary())?;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(content, uri)],
                })
            }
            "status://cache" => {
                let stats = self
                    .search
                    .extractor()
                    .cache()
                    .map(|cache| cache.stats())
                    .unwrap_or_default();
                let content = Self::result_to_json(&stats)?;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(content, uri)],
                })
            }
            _ => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", uri),
                Some(json!({ "uri": uri })),
            )),
        }
    }
}

impl JaremisMcpServer {
    fn config_summary(&self) -> serde_json::Value {
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "llm": {
                "provider": self.config.llm_provider,
                "model": self.config.llm_model,
                "temperature": self.config.llm_temperature,
            },
            "timeouts": {
                "extraction_ms": self.config.extraction_timeout_ms,
                "generation_secs": self.config.generation_timeout_secs,
            },
            "cache": {
                "size": self.config.cache_size,
                "ttl_secs": self.config.cache_ttl_secs,
            },
            "tools": TOOL_NAMES,
        })
    }
}


pub async fn run_server() -> anyhow::Result<()> {
    info!("🚀 Initializing JAREMIS MCP Server...");

    let config = JaremisConfig::load()?;
    let provider = LlmProviderFactory::from_config(&config)?;

    info!("✅ JAREMIS MCP Server ready");
    info!("   🤖 LLM: {}/{}", config.llm_provider, config.llm_model);
    info!(
        "   ⏱️ Extraction timeout: {}ms, generation timeout: {}s",
        config.extraction_timeout_ms, config.generation_timeout_secs
    );

    let server = JaremisMcpServer::new(config, provider)?;
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::mock::MockProvider;
    use serde_json::Value;

    fn server(provider: MockProvider) -> JaremisMcpServer {
        JaremisMcpServer::new(JaremisConfig::default(), Arc::new(provider)).unwrap()
    }

    fn first_text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_zero_cache_rejected() {
        let config = JaremisConfig {
            cache_size: 0,
            ..JaremisConfig::default()
        };
        let result = JaremisMcpServer::new(config, Arc::new(MockProvider::ok("x")));
        assert!(matches!(result, Err(JaremisError::Config(_))));
    }

    #[test]
    fn test_server_info() {
        let info = server(MockProvider::ok("x")).get_info();
        assert_eq!(info.server_info.name, "jaremis");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_symptom_search_tool() {
        let server = server(MockProvider::ok("đau ngực"));
        let result = server
            .smart_symptom_search(Parameters(SymptomSearchParams {
                input: "Tôi bị đau ngực".to_string(),
            }))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&first_text(&result)).unwrap();
        assert_eq!(json["category"], "emergency");
        assert_eq!(json["sources"].as_array().unwrap().len(), 3);
        assert_eq!(json["extractionMethod"], "ai");
    }

    #[tokio::test]
    async fn test_format_latex_tool() {
        let server = server(MockProvider::ok("unused"));
        let result = server
            .format_latex(Parameters(TextParams {
                text: "√(x+1)=2".to_string(),
            }))
            .await
            .unwrap();
        assert!(first_text(&result).contains(r"\sqrt{x+1}=2"));
    }

    #[tokio::test]
    async fn test_solve_science_error_maps_to_mcp_error() {
        let server = server(MockProvider::failing("quota"));
        let result = server
            .solve_science(Parameters(SolveScienceParams {
                question: "Tính 2+2".to_string(),
            }))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_assess_severity_tool() {
        let server = server(MockProvider::ok("unused"));
        let result = server
            .assess_severity(Parameters(AssessSeverityParams {
                icd_codes: vec!["I21".to_string()],
                symptoms: Some("đau ngực dữ dội".to_string()),
            }))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&first_text(&result)).unwrap();
        assert_eq!(json["assessment"]["level"], "CRITICAL");
        assert_eq!(json["redFlags"].as_array().unwrap().len(), 1);
        assert!(json.get("emergencyGuidance").is_some());
    }

    #[test]
    fn test_latex_guideline_prompt() {
        let server = server(MockProvider::ok("x"));
        let prompt = tokio_test::block_on(server.latex_guideline(Parameters(LatexGuidelineArgs {
            question: Some("Giải x^2 = 4".to_string()),
        })))
        .unwrap();
        assert_eq!(prompt.messages.len(), 1);
        let json = serde_json::to_value(&prompt.messages[0]).unwrap();
        assert!(json["content"]["text"].as_str().unwrap().ends_with("Câu hỏi: Giải x^2 = 4"));
    }

    #[tokio::test]
    async fn test_lab_results_tool() {
        let server = server(MockProvider::ok("unused"));
        let result = server
            .analyze_lab_results(Parameters(TextParams {
                text: "WBC: 15000, Glucose: 95".to_string(),
            }))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&first_text(&result)).unwrap();
        assert_eq!(json["abnormal"][0]["test"], "WBC");
        assert_eq!(json["abnormal"][0]["status"], "HIGH");
        assert_eq!(json["values"]["Glucose"], 95.0);
    }

    #[tokio::test]
    async fn test_clinical_score_tool() {
        let server = server(MockProvider::ok("unused"));
        let params: ClinicalScoreParams = serde_json::from_value(serde_json::json!({
            "request": {"system": "news2", "respiratoryRate": 26, "consciousness": "CVPU"}
        }))
        .unwrap();
        let result = server.clinical_score(Parameters(params)).await.unwrap();
        let json: Value = serde_json::from_str(&first_text(&result)).unwrap();
        assert_eq!(json["system"], "news2");
        assert_eq!(json["score"], 6);
        assert_eq!(json["risk"], "MEDIUM-HIGH");
    }

    #[tokio::test]
    async fn test_treatment_plan_tool() {
        let server = server(MockProvider::ok("unused"));
        let result = server
            .treatment_plan(Parameters(TreatmentPlanParams {
                diagnosis: "Viêm phổi".to_string(),
                severity: "high".to_string(),
                allergies: Some(vec!["Penicillin".to_string()]),
            }))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&first_text(&result)).unwrap();
        assert_eq!(json["treatments"][0]["priority"], "URGENT");
        assert_eq!(json["warnings"][0]["type"], "ALLERGY");
    }

    #[test]
    fn test_config_summary_hides_api_key() {
        let config = JaremisConfig {
            llm_api_key: Some("secret".to_string()),
            ..JaremisConfig::default()
        };
        let server = JaremisMcpServer::new(config, Arc::new(MockProvider::ok("x"))).unwrap();
        let summary = server.config_summary().to_string();
        assert!(!summary.contains("secret"));
        assert_eq!(server.config_summary()["tools"].as_array().unwrap().len(), 9);
    }
}
