//! Gemini-backed text analyzer.
//!
//! Sends the raw text with an academic formatting instruction and a JSON
//! response schema, then runs the returned JSON through the strict
//! document parser.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use super::Analyzer;
use crate::error::AnalysisError;
use crate::schema::{ElementKind, StructuredDocument};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Instruction sent with every request. Places markers next to the word
/// they annotate and forbids any change to the wording.
pub const SYSTEM_INSTRUCTION: &str = r#"أنت خبير أكاديمي سعودي متخصص في تنسيق البحوث.
مهمتك: توزيع الحواشي بدقة متناهية داخل النص.

قواعد صارمة:
1. ضع الواسمة [[FN:id]] مباشرة بعد الكلمة أو علامة الترقيم التي تتعلق بها الحاشية.
2. لا تقم أبداً بتجميع الحواشي في نهاية الفقرة إذا كانت تتعلق بكلمات مختلفة داخلها.
3. إذا وجدت أرقاماً يدوية للحواشي في النص الأصلي (مثل 1 أو (1) أو [1])، فقم باستبدالها بالواسمة [[FN:id]] واحذف الرقم الأصلي تماماً.
4. حافظ على الأسلوب الأكاديمي: المباحث والمطالب يجب أن تأخذ النوع 'heading1' و 'heading2'.
5. لا تعدل أي كلمة في النص، التزم بالأمانة العلمية.
"#;

/// Configuration for the Gemini analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base URL (default: the public v1beta endpoint)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Never serialized; supply through the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Request timeout in seconds. Analysis of a full chapter is slow.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_timeout_secs() -> u64 {
    300
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Defaults overridden by `GEMINI_API_KEY` (or `API_KEY`),
    /// `GEMINI_MODEL`, and `GEMINI_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty("GEMINI_MODEL") {
            self.model = model;
        }
        if let Some(endpoint) = non_empty("GEMINI_ENDPOINT") {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Analyzer backed by the Gemini `generateContent` API.
pub struct GeminiAnalyzer {
    config: GeminiConfig,
    client: Client,
}

impl GeminiAnalyzer {
    pub fn new(config: GeminiConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, raw: &str) -> Result<StructuredDocument, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalysisError::MissingCredentials)?;

        info!(model = %self.config.model, chars = raw.chars().count(), "analyzing text");
        let resp = self
            .client
            .post(self.config.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(raw))
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let text = response_text(&body)?;
        debug!(bytes = text.len(), "analyzer response received");
        StructuredDocument::from_json(&text)
    }
}

/// The `generateContent` request for `raw`.
fn request_body(raw: &str) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "role": "user", "parts": [{ "text": raw }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        },
    })
}

/// Response schema mirroring [`StructuredDocument`].
fn response_schema() -> Value {
    let kinds: Vec<&str> = ElementKind::ALL.iter().map(|k| k.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "elements": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "enum": kinds },
                        "text": { "type": "STRING" },
                    },
                    "required": ["type", "text"],
                },
            },
            "footnotes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "text": { "type": "STRING" },
                    },
                    "required": ["id", "text"],
                },
            },
        },
        "required": ["title", "elements", "footnotes"],
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Text of the first part of the first candidate.
fn response_text(body: &str) -> Result<String, AnalysisError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(AnalysisError::EmptyResponse)
}

/// Provider message from an error body, or the body itself.
fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
