//! Paired analysis of an experiment record: feature extraction per response,
//! per-feature paired tests, Bonferroni correction.

pub mod model;
pub mod pairing;
pub mod stats;
pub mod wilcoxon;

pub use model::{FeatureStatistics, PairedRow};
pub use pairing::build_paired_rows;
pub use stats::{apply_bonferroni, cohens_d, compute_statistics, paired_t_test, DEFAULT_ALPHA};

use crate::features_api::{Feature, FeatureExtractor};
use crate::model::ExperimentRecord;

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub features: Vec<Feature>,
    pub alpha: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            features: Feature::TESTED.to_vec(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisArtifacts {
    pub rows: Vec<PairedRow>,
    pub statistics: Vec<FeatureStatistics>,
    pub alpha: f64,
}

impl AnalysisArtifacts {
    pub fn significant(&self) -> impl Iterator<Item = &FeatureStatistics> {
        self.statistics.iter().filter(|s| s.significant_bonf)
    }

    /// Feature with the largest |d|; the first one wins on ties.
    pub fn largest_effect(&self) -> Option<&FeatureStatistics> {
        self.statistics.iter().fold(None, |best, s| match best {
            Some(b) if b.cohens_d.abs() >= s.cohens_d.abs() => Some(b),
            _ => Some(s),
        })
    }

    /// Distinct models in first-seen order.
    pub fn models(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in &self.rows {
            if !out.contains(&r.model.as_str()) {
                out.push(&r.model);
            }
        }
        out
    }

    pub fn topic_count(&self) -> usize {
        let mut topics: Vec<&str> = self.rows.iter().map(|r| r.topic.as_str()).collect();
        topics.sort_unstable();
        topics.dedup();
        topics.len()
    }
}

/// Pairs the record and runs the statistics. Refuses a record with no
/// complete pair instead of producing an all-NaN table.
pub fn run_analysis(
    record: &ExperimentRecord,
    extractor: &dyn FeatureExtractor,
    options: &AnalysisOptions,
) -> anyhow::Result<AnalysisArtifacts> {
    let rows = build_paired_rows(record, extractor);
    if rows.is_empty() {
        anyhow::bail!(
            "no complete response pairs to analyse ({} results, all with at least one failed side)",
            record.results.len()
        );
    }

    let statistics = compute_statistics(&rows, &options.features, options.alpha);
    tracing::info!(
        event = "analysis.complete",
        extractor = extractor.name(),
        pairs = rows.len(),
        features = statistics.len(),
        significant = statistics.iter().filter(|s| s.significant_bonf).count(),
        "analysis complete"
    );

    Ok(AnalysisArtifacts {
        rows,
        statistics,
        alpha: options.alpha,
    })
}
