use crate::features_api::{Feature, FeatureVector};
use serde::{Deserialize, Serialize};

/// Features of both responses to one (question, model) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedRow {
    pub id: u32,
    pub topic: String,
    pub model: String,
    pub base_question: String,
    pub human: FeatureVector,
    pub llm: FeatureVector,
    pub human_response_content: Option<String>,
    pub llm_response_content: Option<String>,
}

impl PairedRow {
    /// `llm − human` for one feature.
    pub fn diff(&self, feature: Feature) -> f64 {
        self.llm.get(feature) - self.human.get(feature)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStatistics {
    pub feature: Feature,
    pub human_mean: f64,
    pub human_std: f64,
    pub llm_mean: f64,
    pub llm_std: f64,
    pub diff_mean: f64,
    pub diff_std: f64,
    pub t_statistic: f64,
    pub t_pvalue: f64,
    pub wilcoxon_statistic: f64,
    pub wilcoxon_pvalue: f64,
    pub cohens_d: f64,
    pub n: usize,
    /// Filled by the Bonferroni pass; NaN until then.
    pub t_pvalue_bonf: f64,
    pub significant_bonf: bool,
}

impl FeatureStatistics {
    /// `higher` when LLM-style prompts raised the feature on average.
    pub fn direction(&self) -> &'static str {
        if self.diff_mean > 0.0 {
            "higher"
        } else {
            "lower"
        }
    }
}
