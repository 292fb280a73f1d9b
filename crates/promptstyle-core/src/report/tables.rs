//! Tabular outputs: the statistics table, the per-pair feature table and
//! the analysis manifest.

use crate::analysis::{AnalysisArtifacts, FeatureStatistics, PairedRow};
use crate::features_api::{Feature, FeatureVector};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const STATISTICS_FILE: &str = "statistical_analysis.csv";
pub const FEATURES_FILE: &str = "features_extracted.csv";
pub const MANIFEST_FILE: &str = "analysis_manifest.json";

const STATISTICS_HEADER: [&str; 15] = [
    "feature",
    "human_mean",
    "human_std",
    "llm_mean",
    "llm_std",
    "diff_mean",
    "diff_std",
    "t_statistic",
    "t_pvalue",
    "wilcoxon_statistic",
    "wilcoxon_pvalue",
    "cohens_d",
    "n",
    "t_pvalue_bonf",
    "significant_bonf",
];

/// Float cell: `NaN` for NaN, `inf`/`-inf` for infinities, shortest
/// round-trip digits otherwise, in exponent form outside `[1e-4, 1e16)`.
fn num(x: f64) -> String {
    if x.is_nan() {
        "NaN".into()
    } else if x == f64::INFINITY {
        "inf".into()
    } else if x == f64::NEG_INFINITY {
        "-inf".into()
    } else if x != 0.0 && !(1e-4..1e16).contains(&x.abs()) {
        format!("{:e}", x)
    } else {
        x.to_string()
    }
}

fn flag(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

fn feature_cell(v: &FeatureVector, f: Feature) -> String {
    let x = v.get(f);
    if f.is_count() {
        format!("{}", x as u64)
    } else {
        num(x)
    }
}

fn statistics_record(s: &FeatureStatistics) -> Vec<String> {
    vec![
        s.feature.to_string(),
        num(s.human_mean),
        num(s.human_std),
        num(s.llm_mean),
        num(s.llm_std),
        num(s.diff_mean),
        num(s.diff_std),
        num(s.t_statistic),
        num(s.t_pvalue),
        num(s.wilcoxon_statistic),
        num(s.wilcoxon_pvalue),
        num(s.cohens_d),
        s.n.to_string(),
        num(s.t_pvalue_bonf),
        flag(s.significant_bonf).to_string(),
    ]
}

pub fn write_statistics_csv(path: &Path, stats: &[FeatureStatistics]) -> anyhow::Result<()> {
    let mut w = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    w.write_record(STATISTICS_HEADER)?;
    for s in stats {
        w.write_record(statistics_record(s))?;
    }
    w.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn features_header() -> Vec<String> {
    let mut h: Vec<String> = ["id", "topic", "model", "base_question"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for side in ["human", "llm"] {
        h.extend(Feature::ALL.iter().map(|f| format!("{}_{}", side, f)));
    }
    h.push("human_response_content".into());
    h.push("llm_response_content".into());
    h
}

fn features_record(r: &PairedRow) -> Vec<String> {
    let mut rec = vec![
        r.id.to_string(),
        r.topic.clone(),
        r.model.clone(),
        r.base_question.clone(),
    ];
    for v in [&r.human, &r.llm] {
        rec.extend(Feature::ALL.iter().map(|f| feature_cell(v, *f)));
    }
    rec.push(r.human_response_content.clone().unwrap_or_default());
    rec.push(r.llm_response_content.clone().unwrap_or_default());
    rec
}

pub fn write_features_csv(path: &Path, rows: &[PairedRow]) -> anyhow::Result<()> {
    let mut w = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    w.write_record(features_header())?;
    for r in rows {
        w.write_record(features_record(r))?;
    }
    w.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Provenance of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisManifest {
    pub tool_version: String,
    pub generated_at: String,
    pub input: String,
    pub input_sha256: String,
    pub experiment_timestamp: String,
    pub pairs: usize,
    pub features: Vec<Feature>,
    pub alpha: f64,
    pub significant: Vec<Feature>,
}

impl AnalysisManifest {
    pub fn new(
        input: &Path,
        experiment_timestamp: &str,
        artifacts: &AnalysisArtifacts,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            input: input.display().to_string(),
            input_sha256: crate::fingerprint::file_fingerprint(input)?,
            experiment_timestamp: experiment_timestamp.to_string(),
            pairs: artifacts.rows.len(),
            features: artifacts.statistics.iter().map(|s| s.feature).collect(),
            alpha: artifacts.alpha,
            significant: artifacts.significant().map(|s| s.feature).collect(),
        })
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, self).context("failed to write analysis manifest")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat() -> FeatureStatistics {
        FeatureStatistics {
            feature: Feature::WordCount,
            human_mean: 12.5,
            human_std: 2.5,
            llm_mean: 40.0,
            llm_std: 5.0,
            diff_mean: 27.5,
            diff_std: 7.5,
            t_statistic: f64::NEG_INFINITY,
            t_pvalue: 0.0,
            wilcoxon_statistic: f64::NAN,
            wilcoxon_pvalue: f64::NAN,
            cohens_d: 3.2,
            n: 2,
            t_pvalue_bonf: 0.0,
            significant_bonf: true,
        }
    }

    #[test]
    fn test_statistics_csv_formats_special_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATISTICS_FILE);
        write_statistics_csv(&path, &[stat()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), STATISTICS_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "word_count,12.5,2.5,40,5,27.5,7.5,-inf,0,NaN,NaN,3.2,2,0,True"
        );
    }

    #[test]
    fn test_tiny_and_huge_values_use_exponent_form() {
        assert_eq!(num(1.2e-40), "1.2e-40");
        assert_eq!(num(-3.5e20), "-3.5e20");
        assert_eq!(num(0.00012), "0.00012");
        assert_eq!(num(0.011056), "0.011056");
        assert_eq!(num(0.0), "0");
    }

    #[test]
    fn test_features_csv_shape_and_quoting() {
        let row = PairedRow {
            id: 7,
            topic: "science".into(),
            model: "openai/gpt-4.1-mini".into(),
            base_question: "Why, exactly?".into(),
            human: FeatureVector {
                word_count: 3,
                avg_word_length: 4.5,
                ..Default::default()
            },
            llm: FeatureVector::default(),
            human_response_content: Some("line one\nline \"two\"".into()),
            llm_response_content: None,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FEATURES_FILE);
        write_features_csv(&path, &[row]).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.len(), 4 + 2 * 13 + 2);
        assert_eq!(&headers[4], "human_word_count");
        assert_eq!(&headers[17], "llm_word_count");

        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(&rec[3], "Why, exactly?");
        assert_eq!(&rec[4], "3");
        assert_eq!(&rec[7], "4.5");
        assert_eq!(&rec[30], "line one\nline \"two\"");
        assert_eq!(&rec[31], "");
    }
}
