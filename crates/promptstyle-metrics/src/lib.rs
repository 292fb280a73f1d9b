//! Linguistic feature extraction for response texts.

use std::sync::Arc;

use promptstyle_core::features_api::FeatureExtractor;

pub mod linguistic;
pub mod markers;
pub mod readability;

pub use linguistic::LinguisticExtractor;

pub fn default_extractor() -> Result<Arc<dyn FeatureExtractor>, regex::Error> {
    Ok(Arc::new(LinguisticExtractor::new()?))
}
