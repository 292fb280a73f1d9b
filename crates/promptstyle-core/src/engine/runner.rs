use crate::config::SamplingSettings;
use crate::engine::retry::{query_with_retry, RetryPolicy};
use crate::model::{ExperimentConfig, ExperimentRecord, ExperimentResult, PromptPair, PromptStyle};
use crate::providers::llm::LlmClient;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunPolicy {
    pub retry: RetryPolicy,
    /// Pause after every query, successful or not.
    pub inter_call_delay: Duration,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            inter_call_delay: Duration::from_millis(500),
        }
    }
}

/// Progress hooks for the sequential run. All methods default to no-ops.
pub trait RunObserver: Send + Sync {
    fn on_model_start(&self, _model: &str, _pairs: usize) {}
    fn on_pair_done(&self, _result: &ExperimentResult) {}
    fn on_model_done(&self, _model: &str) {}
}

pub struct NoopObserver;

impl RunObserver for NoopObserver {}

pub struct Runner {
    pub client: Arc<dyn LlmClient>,
    pub policy: RunPolicy,
    pub sampling: SamplingSettings,
    pub seed: u64,
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl Runner {
    /// Queries every model with both prompts of every pair, model-major.
    ///
    /// Query failures end up inside the record; this never fails.
    pub async fn run_experiment(
        &self,
        pairs: &[PromptPair],
        models: &[String],
        observer: &dyn RunObserver,
    ) -> ExperimentRecord {
        let timestamp = now_rfc3339();
        tracing::info!(
            event = "run.start",
            provider = self.client.provider_name(),
            models = ?models,
            questions = pairs.len(),
            total_calls = pairs.len() * models.len() * 2,
            "starting experiment"
        );

        let mut results = Vec::with_capacity(pairs.len() * models.len());
        for model in models {
            observer.on_model_start(model, pairs.len());
            for pair in pairs {
                let result = self.run_pair(model, pair).await;
                observer.on_pair_done(&result);
                results.push(result);
            }
            observer.on_model_done(model);
        }

        ExperimentRecord {
            experiment_config: ExperimentConfig {
                timestamp,
                models: models.to_vec(),
                num_questions: pairs.len(),
                temperature: self.sampling.temperature,
                max_tokens: self.sampling.max_tokens,
                top_p: self.sampling.top_p,
                seed: self.seed,
            },
            results,
        }
    }

    async fn run_pair(&self, model: &str, pair: &PromptPair) -> ExperimentResult {
        let human = self.query(model, pair.prompt(PromptStyle::Human)).await;
        let llm = self.query(model, pair.prompt(PromptStyle::Llm)).await;

        ExperimentResult {
            id: pair.id,
            topic: pair.topic.clone(),
            base_question: pair.base_question.clone(),
            model: model.to_string(),
            human_style_prompt: pair.human_style_prompt.clone(),
            llm_style_prompt: pair.llm_style_prompt.clone(),
            human_style_response: human,
            llm_style_response: llm,
            timestamp: now_rfc3339(),
        }
    }

    async fn query(&self, model: &str, prompt: &str) -> crate::model::ModelResponse {
        let resp = query_with_retry(self.client.as_ref(), model, prompt, &self.policy.retry).await;
        tokio::time::sleep(self.policy.inter_call_delay).await;
        resp
    }
}
