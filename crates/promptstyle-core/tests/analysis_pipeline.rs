use promptstyle_core::analysis::{run_analysis, AnalysisOptions};
use promptstyle_core::config::SamplingSettings;
use promptstyle_core::engine::runner::{NoopObserver, RunPolicy, Runner};
use promptstyle_core::features_api::{Feature, FeatureExtractor, FeatureVector};
use promptstyle_core::model::{ExperimentRecord, ModelResponse};
use promptstyle_core::providers::llm::fake::FakeClient;
use promptstyle_core::report::{plots::PlotStyle, tables, write_reports};
use std::sync::Arc;

/// Word and question-mark counts only; the real extractor lives downstream.
struct Counting;

impl FeatureExtractor for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn extract(&self, text: Option<&str>) -> FeatureVector {
        let Some(t) = text.filter(|t| !t.is_empty()) else {
            return FeatureVector::default();
        };
        FeatureVector {
            word_count: t.split_whitespace().count(),
            char_count: t.chars().count(),
            sentence_count: 1,
            question_marks: t.matches('?').count(),
            ..Default::default()
        }
    }
}

async fn fake_record(models: &[&str], questions: usize) -> ExperimentRecord {
    let runner = Runner {
        client: Arc::new(FakeClient),
        policy: RunPolicy::default(),
        sampling: SamplingSettings::default(),
        seed: 42,
    };
    let pairs = promptstyle_core::prompts::get_prompt_pairs(42, questions);
    let models: Vec<String> = models.iter().map(|m| m.to_string()).collect();
    runner.run_experiment(&pairs, &models, &NoopObserver).await
}

#[tokio::test(start_paused = true)]
async fn test_fake_run_yields_a_significant_length_effect() {
    let record = fake_record(&["a/one", "b/two"], 12).await;
    let a = run_analysis(&record, &Counting, &AnalysisOptions::default()).unwrap();

    assert_eq!(a.rows.len(), 24);
    assert_eq!(a.statistics.len(), 10);
    let wc = a
        .statistics
        .iter()
        .find(|s| s.feature == Feature::WordCount)
        .unwrap();
    assert!(wc.diff_mean > 0.0);
    assert!(wc.significant_bonf);
    assert_eq!(a.models(), vec!["a/one", "b/two"]);
}

#[tokio::test(start_paused = true)]
async fn test_analysis_refuses_records_without_complete_pairs() {
    let mut record = fake_record(&["a/one"], 3).await;
    for r in &mut record.results {
        r.llm_style_response = ModelResponse::failure("HTTP 500: down");
    }
    let err = run_analysis(&record, &Counting, &AnalysisOptions::default()).unwrap_err();
    assert!(err.to_string().contains("no complete response pairs"));
}

#[tokio::test(start_paused = true)]
async fn test_reports_land_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("experiment_results.json");
    let record = fake_record(&["a/one", "b/two"], 6).await;
    record.save(&input).unwrap();

    let loaded = ExperimentRecord::load(&input).unwrap();
    let a = run_analysis(&loaded, &Counting, &AnalysisOptions::default()).unwrap();
    let out = dir.path().join("out");
    let paths = write_reports(
        &a,
        &input,
        &loaded.experiment_config.timestamp,
        &out,
        Some(&PlotStyle::default()),
    )
    .unwrap();

    assert!(paths.statistics.exists());
    assert!(paths.features.exists());
    let stems: Vec<String> = paths
        .plots
        .iter()
        .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        stems,
        vec![
            "response_length_comparison",
            "effect_sizes",
            "formality_analysis",
            "model_comparison",
            "topic_analysis"
        ]
    );
    for p in &paths.plots {
        let svg = std::fs::read_to_string(p).unwrap();
        assert!(svg.contains("<svg"), "{}", p.display());
    }

    let manifest: tables::AnalysisManifest =
        serde_json::from_str(&std::fs::read_to_string(&paths.manifest).unwrap()).unwrap();
    assert_eq!(manifest.pairs, 12);
    assert!(manifest.input_sha256.starts_with("sha256:"));
    assert_eq!(manifest.features, Feature::TESTED.to_vec());

    let stats = std::fs::read_to_string(&paths.statistics).unwrap();
    assert_eq!(stats.lines().count(), 11);
}

#[tokio::test(start_paused = true)]
async fn test_single_model_skips_model_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("r.json");
    let record = fake_record(&["only/one"], 4).await;
    record.save(&input).unwrap();
    let a = run_analysis(&record, &Counting, &AnalysisOptions::default()).unwrap();
    let paths = write_reports(&a, &input, "t", dir.path(), Some(&PlotStyle::default())).unwrap();
    assert_eq!(paths.plots.len(), 4);
    assert!(!dir.path().join("plots/model_comparison.svg").exists());

    let no_plots = write_reports(&a, &input, "t", &dir.path().join("bare"), None).unwrap();
    assert!(no_plots.plots.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_non_text_content_loads_as_zero_features() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("r.json");
    fake_record(&["a/one"], 2).await.save(&input).unwrap();

    let mut raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&input).unwrap()).unwrap();
    raw["results"][0]["llm_style_response"]["content"] =
        serde_json::json!([{"type": "text", "text": "structured"}]);
    raw["results"][1]["human_style_response"]["content"] = serde_json::json!(7);
    std::fs::write(&input, serde_json::to_string(&raw).unwrap()).unwrap();

    let loaded = ExperimentRecord::load(&input).unwrap();
    let a = run_analysis(&loaded, &Counting, &AnalysisOptions::default()).unwrap();
    assert_eq!(a.rows.len(), 2);
    assert_eq!(a.rows[0].llm, FeatureVector::default());
    assert!(a.rows[0].llm_response_content.is_none());
    assert!(a.rows[0].human.word_count > 0);
    assert_eq!(a.rows[1].human, FeatureVector::default());
}
