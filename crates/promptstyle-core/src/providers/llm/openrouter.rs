use super::LlmClient;
use crate::config::SamplingSettings;
use crate::errors::QueryError;
use crate::model::{Completion, Usage};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const REFERER: &str = "https://research.experiment.local";
const TITLE: &str = "LLM Human vs LLM Style Research";

/// OpenAI-compatible chat completions endpoint (OpenRouter by default).
pub struct OpenRouterClient {
    pub endpoint: String,
    pub api_key: String,
    pub sampling: SamplingSettings,
    pub client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        sampling: SamplingSettings,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            api_key,
            sampling,
            client,
        })
    }
}

pub(crate) fn request_body(model: &str, prompt: &str, sampling: &SamplingSettings) -> serde_json::Value {
    json!({
        "model": model,
        "messages": [
            { "role": "user", "content": prompt }
        ],
        "temperature": sampling.temperature,
        "max_tokens": sampling.max_tokens,
        "top_p": sampling.top_p,
    })
}

pub(crate) fn parse_completion(
    requested_model: &str,
    json: &serde_json::Value,
) -> Result<Completion, QueryError> {
    let choice = json
        .pointer("/choices/0")
        .ok_or_else(|| QueryError::Malformed("response has no choices".into()))?;
    let message = choice
        .get("message")
        .ok_or_else(|| QueryError::Malformed("choice has no message".into()))?;

    let content = message
        .get("content")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let model = json
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or(requested_model)
        .to_string();
    let usage = json
        .get("usage")
        .and_then(|u| serde_json::from_value::<Usage>(u.clone()).ok())
        .unwrap_or_default();
    let finish_reason = choice
        .get("finish_reason")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(Completion {
        content,
        model,
        usage,
        finish_reason,
    })
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, QueryError> {
        let body = request_body(model, prompt, &self.sampling);

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&body)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QueryError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| QueryError::Malformed(e.to_string()))?;

        parse_completion(model, &json)
    }

    fn provider_name(&self) -> &'static str {
        "openrouter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = request_body("anthropic/claude-sonnet-4", "Why?", &SamplingSettings::default());
        assert_eq!(body["model"], "anthropic/claude-sonnet-4");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Why?");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["top_p"], 0.95);
    }

    #[test]
    fn test_parse_full_completion() {
        let json = json!({
            "model": "openai/gpt-4.1-mini-2025-04-14",
            "choices": [{"message": {"role": "assistant", "content": "Blue light scatters."}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        });
        let c = parse_completion("openai/gpt-4.1-mini", &json).unwrap();
        assert_eq!(c.content.as_deref(), Some("Blue light scatters."));
        assert_eq!(c.model, "openai/gpt-4.1-mini-2025-04-14");
        assert_eq!(c.usage.completion_tokens, Some(4));
        assert_eq!(c.finish_reason, "stop");
    }

    #[test]
    fn test_parse_applies_fallbacks() {
        let json = json!({"choices": [{"message": {"content": null}}]});
        let c = parse_completion("m", &json).unwrap();
        assert_eq!(c.content, None);
        assert_eq!(c.model, "m");
        assert_eq!(c.usage, Usage::default());
        assert_eq!(c.finish_reason, "unknown");
    }

    #[test]
    fn test_parse_rejects_missing_choices() {
        let err = parse_completion("m", &json!({"error": {"message": "nope"}})).unwrap_err();
        assert!(matches!(err, QueryError::Malformed(_)));
    }
}
