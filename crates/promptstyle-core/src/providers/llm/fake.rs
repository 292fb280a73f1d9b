use super::LlmClient;
use crate::errors::QueryError;
use crate::model::{Completion, Usage};
use async_trait::async_trait;

/// Offline client with canned, register-sensitive answers.
///
/// Formal prompts get a long structured answer with connectors and a numbered
/// list; casual prompts get a short conversational one. Output depends only on
/// the prompt, so runs against it are reproducible.
#[derive(Debug, Clone, Default)]
pub struct FakeClient;

const FORMAL_CUES: [&str; 6] = [
    "comprehensive",
    "detailed",
    "thorough",
    "systematic",
    "please",
    "i am seeking",
];

fn looks_formal(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    FORMAL_CUES.iter().any(|c| lower.contains(c))
}

fn casual_answer(question: &str) -> String {
    format!(
        "Oh, good one! Short version: it depends, but mostly it comes down to the basics. \
         Think about \"{}\" like this - start simple and it clicks pretty fast!",
        question.trim()
    )
}

fn formal_answer(question: &str) -> String {
    format!(
        "This question warrants a structured explanation. Regarding \"{}\", several \
         considerations are relevant.\n\
         1. Fundamentally, the underlying principles must be established first.\n\
         2. Furthermore, the mechanisms involved interact in significant ways.\n\
         3. Consequently, the observed outcome follows from these interactions.\n\
         However, certain nuances remain. Therefore, a comprehensive understanding \
         requires considering the broader context. In conclusion, the phenomenon is \
         best understood as the combined result of these factors.",
        question.trim()
    )
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, QueryError> {
        let content = if looks_formal(prompt) {
            formal_answer(prompt)
        } else {
            casual_answer(prompt)
        };
        let prompt_tokens = prompt.split_whitespace().count() as u64;
        let completion_tokens = content.split_whitespace().count() as u64;
        Ok(Completion {
            content: Some(content),
            model: model.to_string(),
            usage: Usage {
                prompt_tokens: Some(prompt_tokens),
                completion_tokens: Some(completion_tokens),
                total_tokens: Some(prompt_tokens + completion_tokens),
                extra: Default::default(),
            },
            finish_reason: "stop".into(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_changes_answer_shape() {
        let c = FakeClient;
        let casual = c
            .complete("m", "hey, quick q - why is the sky blue?")
            .await
            .unwrap();
        let formal = c
            .complete(
                "m",
                "I would like to request a comprehensive explanation: why is the sky blue?",
            )
            .await
            .unwrap();
        let casual_len = casual.content.as_deref().unwrap().len();
        let formal_text = formal.content.unwrap();
        assert!(formal_text.len() > casual_len);
        assert!(formal_text.contains("\n1."));
        assert_eq!(formal.model, "m");
    }

    #[test]
    fn test_template_registers_are_recognised() {
        use crate::prompts::{HUMAN_STYLE_TEMPLATES, LLM_STYLE_TEMPLATES};
        assert!(LLM_STYLE_TEMPLATES.iter().all(|t| looks_formal(t)));
        assert!(HUMAN_STYLE_TEMPLATES.iter().all(|t| !looks_formal(t)));
    }

    #[tokio::test]
    async fn test_deterministic() {
        let a = FakeClient.complete("m", "what's up?").await.unwrap();
        let b = FakeClient.complete("m", "what's up?").await.unwrap();
        assert_eq!(a, b);
    }
}
