use super::model::PairedRow;
use crate::features_api::FeatureExtractor;
use crate::model::{ExperimentRecord, PromptStyle};

/// One row per result whose two responses both succeeded, in record order.
pub fn build_paired_rows(
    record: &ExperimentRecord,
    extractor: &dyn FeatureExtractor,
) -> Vec<PairedRow> {
    record
        .results
        .iter()
        .filter_map(|r| {
            if !r.is_complete() {
                tracing::debug!(
                    event = "pair.skipped",
                    id = r.id,
                    model = %r.model,
                    human_error = ?r.human_style_response.error(),
                    llm_error = ?r.llm_style_response.error(),
                    "skipping incomplete pair"
                );
                return None;
            }
            let human_text = r.response(PromptStyle::Human).content();
            let llm_text = r.response(PromptStyle::Llm).content();
            Some(PairedRow {
                id: r.id,
                topic: r.topic.clone(),
                model: r.model.clone(),
                base_question: r.base_question.clone(),
                human: extractor.extract(human_text),
                llm: extractor.extract(llm_text),
                human_response_content: human_text.map(str::to_string),
                llm_response_content: llm_text.map(str::to_string),
            })
        })
        .collect()
}
