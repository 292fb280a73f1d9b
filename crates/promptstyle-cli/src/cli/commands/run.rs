use super::exit_codes;
use crate::cli::args::{Provider, RunArgs};
use indicatif::{ProgressBar, ProgressStyle};
use promptstyle_core::engine::retry::RetryPolicy;
use promptstyle_core::engine::runner::{RunObserver, RunPolicy, Runner};
use promptstyle_core::model::ExperimentResult;
use promptstyle_core::prompts::{get_prompt_pairs, BASE_QUESTIONS};
use promptstyle_core::providers::llm::fake::FakeClient;
use promptstyle_core::providers::llm::openrouter::OpenRouterClient;
use promptstyle_core::providers::llm::LlmClient;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub async fn cmd_run(args: RunArgs) -> anyhow::Result<i32> {
    let mut settings = super::load_settings(&args.config)?;
    if !args.models.is_empty() {
        settings.models = args.models.clone();
    }
    let num_questions = args
        .num_questions
        .unwrap_or(settings.num_questions)
        .min(BASE_QUESTIONS.len());
    if num_questions == 0 {
        eprintln!("config error: --num-questions must be at least 1");
        return Ok(exit_codes::CONFIG_ERROR);
    }
    let out = args.out.clone().unwrap_or(settings.output.results.clone());

    // the fake provider has no remote to pace
    let (client, inter_call_delay): (Arc<dyn LlmClient>, Duration) = match args.provider {
        Provider::Fake => (Arc::new(FakeClient), Duration::ZERO),
        Provider::Openrouter => {
            let Some(api_key) = args.api_key.clone().filter(|k| !k.is_empty()) else {
                eprintln!(
                    "config error: OPENROUTER_API_KEY is not set (use --provider fake for an offline run)"
                );
                return Ok(exit_codes::CONFIG_ERROR);
            };
            let client = OpenRouterClient::new(
                settings.endpoint.clone(),
                api_key,
                settings.sampling.clone(),
                Duration::from_secs(settings.request.timeout_seconds),
            )?;
            (
                Arc::new(client),
                Duration::from_millis(settings.request.inter_call_delay_ms),
            )
        }
    };

    let runner = Runner {
        client,
        policy: RunPolicy {
            retry: RetryPolicy {
                max_attempts: settings.request.max_retries,
            },
            inter_call_delay,
        },
        sampling: settings.sampling.clone(),
        seed: settings.seed,
    };
    let pairs = get_prompt_pairs(settings.seed, num_questions);

    let rule = "=".repeat(60);
    eprintln!("\n{}", rule);
    eprintln!("Running LLM Human vs LLM Style Experiment");
    eprintln!("{}", rule);
    eprintln!("Models: {:?}", settings.models);
    eprintln!("Questions: {}", pairs.len());
    eprintln!(
        "Total API calls: {}",
        pairs.len() * settings.models.len() * 2
    );
    eprintln!("{}\n", rule);

    let observer = ProgressObserver::default();
    let record = runner
        .run_experiment(&pairs, &settings.models, &observer)
        .await;

    super::ensure_parent_dir(&out)?;
    record.save(&out)?;
    eprintln!("\nResults saved to {}", out.display());
    eprintln!(
        "\nSuccessful query pairs: {}/{}",
        record.successful_pairs(),
        record.results.len()
    );
    Ok(exit_codes::OK)
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ")
}

/// One progress bar per model on stderr.
#[derive(Default)]
struct ProgressObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl RunObserver for ProgressObserver {
    fn on_model_start(&self, model: &str, pairs: usize) {
        let pb = ProgressBar::new(pairs as u64);
        pb.set_style(bar_style());
        pb.set_message(format!("Processing {}", model));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_pair_done(&self, result: &ExperimentResult) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.inc(1);
                if !result.is_complete() {
                    pb.println(format!("  pair {} incomplete for {}", result.id, result.model));
                }
            }
        }
    }

    fn on_model_done(&self, model: &str) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_with_message(format!("{} done", model));
            }
        }
    }
}
