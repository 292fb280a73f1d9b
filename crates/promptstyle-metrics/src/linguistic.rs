use crate::markers::{distinct_present, CONNECTORS, FORMAL_MARKERS};
use crate::readability;
use promptstyle_core::features_api::{FeatureExtractor, FeatureVector};
use regex::Regex;

/// Surface-level linguistic profile of a response.
pub struct LinguisticExtractor {
    sentence_break: Regex,
    numbered_item: Regex,
}

impl LinguisticExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            sentence_break: Regex::new(r"[.!?]+")?,
            // numbered lines only count after a line break
            numbered_item: Regex::new(r"\n\d+\.")?,
        })
    }

    fn sentence_count(&self, text: &str) -> usize {
        self.sentence_break
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count()
            .max(1)
    }

    fn bullet_points(&self, text: &str) -> usize {
        text.matches("- ").count()
            + text.matches("• ").count()
            + self.numbered_item.find_iter(text).count()
    }
}

impl FeatureExtractor for LinguisticExtractor {
    fn name(&self) -> &'static str {
        "linguistic"
    }

    fn extract(&self, text: Option<&str>) -> FeatureVector {
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => return FeatureVector::default(),
        };

        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        let sentence_count = self.sentence_count(text);

        let (avg_word_length, type_token_ratio) = if word_count == 0 {
            (0.0, 0.0)
        } else {
            let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
            let mut unique: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
            unique.sort_unstable();
            unique.dedup();
            (
                total_chars as f64 / word_count as f64,
                unique.len() as f64 / word_count as f64,
            )
        };

        let (flesch_reading_ease, flesch_kincaid_grade) =
            match readability::score(text, sentence_count) {
                Ok(r) => (r.reading_ease, r.grade),
                Err(e) => {
                    tracing::trace!(error = %e, "readability unavailable, scoring 0");
                    (0.0, 0.0)
                }
            };

        let lowered = text.to_lowercase();
        let formal_word_ratio = if word_count == 0 {
            0.0
        } else {
            distinct_present(&lowered, &FORMAL_MARKERS) as f64 / word_count as f64
        };

        FeatureVector {
            word_count,
            char_count: text.chars().count(),
            sentence_count,
            avg_word_length,
            avg_sentence_length: word_count as f64 / sentence_count as f64,
            type_token_ratio,
            flesch_reading_ease,
            flesch_kincaid_grade,
            formal_word_ratio,
            bullet_points: self.bullet_points(text),
            logical_connectors: distinct_present(&lowered, &CONNECTORS),
            question_marks: text.matches('?').count(),
            exclamation_marks: text.matches('!').count(),
        }
    }
}
