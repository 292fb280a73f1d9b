use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseQuestion {
    pub id: u32,
    pub topic: &'static str,
    pub question: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub id: u32,
    pub topic: String,
    pub base_question: String,
    pub human_style_prompt: String,
    pub llm_style_prompt: String,
}

/// The two registers a base question is phrased in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStyle {
    Human,
    Llm,
}

impl PromptStyle {
    pub fn label(self) -> &'static str {
        match self {
            PromptStyle::Human => "Human Style",
            PromptStyle::Llm => "LLM Style",
        }
    }
}

impl PromptPair {
    pub fn prompt(&self, style: PromptStyle) -> &str {
        match style {
            PromptStyle::Human => &self.human_style_prompt,
            PromptStyle::Llm => &self.llm_style_prompt,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    /// Provider-specific accounting (cost, cached tokens, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Providers may legitimately return no text (e.g. a filtered completion).
    pub content: Option<String>,
    pub model: String,
    pub usage: Usage,
    pub finish_reason: String,
}

/// Outcome of querying one model with one prompt.
///
/// Persisted in the flat shape `{"success": bool, "content": ..., ...}` so
/// records stay readable by other tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResponseRecord", into = "ResponseRecord")]
pub enum ModelResponse {
    Success(Completion),
    Failure { error: String },
}

impl ModelResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        ModelResponse::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ModelResponse::Success(_))
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            ModelResponse::Success(c) => c.content.as_deref(),
            ModelResponse::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModelResponse::Success(_) => None,
            ModelResponse::Failure { error } => Some(error),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ResponseRecord {
    success: bool,
    #[serde(default, deserialize_with = "text_or_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finish_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Structured or numeric content (some providers send content parts) reads
/// as absent text instead of rejecting the whole record.
fn text_or_none<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

impl From<ResponseRecord> for ModelResponse {
    fn from(r: ResponseRecord) -> Self {
        if r.success {
            ModelResponse::Success(Completion {
                content: r.content,
                model: r.model.unwrap_or_default(),
                usage: r.usage.unwrap_or_default(),
                finish_reason: r.finish_reason.unwrap_or_else(|| "unknown".into()),
            })
        } else {
            ModelResponse::Failure {
                error: r.error.unwrap_or_else(|| "unknown error".into()),
            }
        }
    }
}

impl From<ModelResponse> for ResponseRecord {
    fn from(r: ModelResponse) -> Self {
        match r {
            ModelResponse::Success(c) => ResponseRecord {
                success: true,
                content: c.content,
                model: Some(c.model),
                usage: Some(c.usage),
                finish_reason: Some(c.finish_reason),
                error: None,
            },
            ModelResponse::Failure { error } => ResponseRecord {
                success: false,
                content: None,
                model: None,
                usage: None,
                finish_reason: None,
                error: Some(error),
            },
        }
    }
}

/// One (question, model) cell of the experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub id: u32,
    pub topic: String,
    pub base_question: String,
    pub model: String,
    pub human_style_prompt: String,
    pub llm_style_prompt: String,
    pub human_style_response: ModelResponse,
    pub llm_style_response: ModelResponse,
    pub timestamp: String,
}

impl ExperimentResult {
    /// Both sides answered; only complete results enter the paired analysis.
    pub fn is_complete(&self) -> bool {
        self.human_style_response.is_success() && self.llm_style_response.is_success()
    }

    pub fn response(&self, style: PromptStyle) -> &ModelResponse {
        match style {
            PromptStyle::Human => &self.human_style_response,
            PromptStyle::Llm => &self.llm_style_response,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub timestamp: String,
    pub models: Vec<String>,
    pub num_questions: usize,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub seed: u64,
}

/// Durable record of one experiment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub experiment_config: ExperimentConfig,
    pub results: Vec<ExperimentResult>,
}

impl ExperimentRecord {
    pub fn successful_pairs(&self) -> usize {
        self.results.iter().filter(|r| r.is_complete()).count()
    }
}
