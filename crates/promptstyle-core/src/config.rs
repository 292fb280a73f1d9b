use crate::errors::ConfigError;
use crate::features_api::Feature;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod path_resolver;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSettings {
    pub version: u32,
    pub endpoint: String,
    pub models: Vec<String>,
    pub num_questions: usize,
    pub seed: u64,
    pub sampling: SamplingSettings,
    pub request: RequestSettings,
    pub analysis: AnalysisSettings,
    pub output: OutputSettings,
}

impl Default for ExperimentSettings {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            models: vec![
                "openai/gpt-4.1-mini".to_string(),
                "anthropic/claude-sonnet-4".to_string(),
            ],
            num_questions: crate::prompts::BASE_QUESTIONS.len(),
            seed: 42,
            sampling: SamplingSettings::default(),
            request: RequestSettings::default(),
            analysis: AnalysisSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
            top_p: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub inter_call_delay_ms: u64,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 60,
            max_retries: 3,
            inter_call_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub features: Vec<String>,
    pub alpha: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            features: Feature::TESTED.iter().map(|f| f.name().to_string()).collect(),
            alpha: 0.05,
        }
    }
}

impl AnalysisSettings {
    /// Parses the configured feature names, preserving their order.
    pub fn tested_features(&self) -> Result<Vec<Feature>, ConfigError> {
        self.features
            .iter()
            .map(|name| {
                name.parse::<Feature>().map_err(|e| match suggest_feature(name) {
                    Some(s) => ConfigError(format!("{} (did you mean '{}'?)", e, s)),
                    None => ConfigError(e),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Experiment record written by `run` and read by `analyze`.
    pub results: PathBuf,
    /// Directory receiving the analysis tables, manifest and plots.
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            results: PathBuf::from("results/experiment_results.json"),
            dir: PathBuf::from("results"),
        }
    }
}

fn suggest_feature(name: &str) -> Option<&'static str> {
    Feature::ALL
        .iter()
        .map(|f| (f.name(), strsim::levenshtein(name, f.name())))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(n, _)| n)
}

pub fn load_config(path: &Path, strict: bool) -> Result<ExperimentSettings, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    parse_config(&raw, path, strict)
}

pub fn parse_config(
    raw: &str,
    path: &Path,
    strict: bool,
) -> Result<ExperimentSettings, ConfigError> {
    let mut ignored_keys = std::collections::BTreeSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(raw);

    let mut cfg: ExperimentSettings = serde_ignored::deserialize(deserializer, |p| {
        ignored_keys.insert(p.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    // YAML anchors and extension keys are allowed to ride along.
    let meaningful_unknowns: Vec<_> = ignored_keys
        .iter()
        .filter(|k| !k.starts_with('_') && !k.starts_with("x-"))
        .collect();
    if !meaningful_unknowns.is_empty() {
        if strict {
            return Err(ConfigError(format!(
                "unknown fields in {}: {:?}",
                path.display(),
                meaningful_unknowns
            )));
        }
        tracing::warn!(
            event = "config.unknown_fields",
            file = %path.display(),
            fields = ?meaningful_unknowns,
            "ignoring unknown config fields"
        );
    }

    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }

    validate(&mut cfg)?;

    let r = path_resolver::PathResolver::new(path);
    r.resolve_in_place(&mut cfg.output.results);
    r.resolve_in_place(&mut cfg.output.dir);

    Ok(cfg)
}

fn validate(cfg: &mut ExperimentSettings) -> Result<(), ConfigError> {
    if cfg.models.is_empty() {
        return Err(ConfigError("config lists no models".into()));
    }
    if cfg.num_questions == 0 {
        return Err(ConfigError("num_questions must be at least 1".into()));
    }
    let catalog = crate::prompts::BASE_QUESTIONS.len();
    if cfg.num_questions > catalog {
        tracing::warn!(
            requested = cfg.num_questions,
            available = catalog,
            "num_questions exceeds the question catalog; using all questions"
        );
        cfg.num_questions = catalog;
    }
    if cfg.request.max_retries == 0 {
        return Err(ConfigError("request.max_retries must be at least 1".into()));
    }
    if !(cfg.analysis.alpha > 0.0 && cfg.analysis.alpha < 1.0) {
        return Err(ConfigError(format!(
            "analysis.alpha must lie in (0, 1), got {}",
            cfg.analysis.alpha
        )));
    }
    let features = cfg.analysis.tested_features()?;
    if features.is_empty() {
        return Err(ConfigError("analysis.features is empty".into()));
    }
    Ok(())
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(
        path,
        r#"version: 1
endpoint: https://openrouter.ai/api/v1/chat/completions
models:
  - openai/gpt-4.1-mini
  - anthropic/claude-sonnet-4
num_questions: 50
seed: 42
sampling:
  temperature: 0.7
  max_tokens: 500
  top_p: 0.95
request:
  timeout_seconds: 60
  max_retries: 3
  inter_call_delay_ms: 500
analysis:
  alpha: 0.05
  features:
    - word_count
    - sentence_count
    - avg_word_length
    - avg_sentence_length
    - type_token_ratio
    - flesch_reading_ease
    - flesch_kincaid_grade
    - formal_word_ratio
    - bullet_points
    - logical_connectors
output:
  results: results/experiment_results.json
  dir: results
"#,
    )
    .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}
