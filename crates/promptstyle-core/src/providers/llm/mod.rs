use crate::errors::QueryError;
use crate::model::Completion;
use async_trait::async_trait;

/// One chat-completion round trip: a single user message in, one completion out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, QueryError>;
    fn provider_name(&self) -> &'static str;
}

pub mod fake;
pub mod openrouter;
