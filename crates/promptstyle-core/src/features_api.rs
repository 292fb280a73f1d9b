use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names every field of a [`FeatureVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    WordCount,
    CharCount,
    SentenceCount,
    AvgWordLength,
    AvgSentenceLength,
    TypeTokenRatio,
    FleschReadingEase,
    FleschKincaidGrade,
    FormalWordRatio,
    BulletPoints,
    LogicalConnectors,
    QuestionMarks,
    ExclamationMarks,
}

impl Feature {
    /// Column order used by every table that carries a full vector.
    pub const ALL: [Feature; 13] = [
        Feature::WordCount,
        Feature::CharCount,
        Feature::SentenceCount,
        Feature::AvgWordLength,
        Feature::AvgSentenceLength,
        Feature::TypeTokenRatio,
        Feature::FleschReadingEase,
        Feature::FleschKincaidGrade,
        Feature::FormalWordRatio,
        Feature::BulletPoints,
        Feature::LogicalConnectors,
        Feature::QuestionMarks,
        Feature::ExclamationMarks,
    ];

    /// Features run through the paired statistics by default.
    pub const TESTED: [Feature; 10] = [
        Feature::WordCount,
        Feature::SentenceCount,
        Feature::AvgWordLength,
        Feature::AvgSentenceLength,
        Feature::TypeTokenRatio,
        Feature::FleschReadingEase,
        Feature::FleschKincaidGrade,
        Feature::FormalWordRatio,
        Feature::BulletPoints,
        Feature::LogicalConnectors,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::WordCount => "word_count",
            Feature::CharCount => "char_count",
            Feature::SentenceCount => "sentence_count",
            Feature::AvgWordLength => "avg_word_length",
            Feature::AvgSentenceLength => "avg_sentence_length",
            Feature::TypeTokenRatio => "type_token_ratio",
            Feature::FleschReadingEase => "flesch_reading_ease",
            Feature::FleschKincaidGrade => "flesch_kincaid_grade",
            Feature::FormalWordRatio => "formal_word_ratio",
            Feature::BulletPoints => "bullet_points",
            Feature::LogicalConnectors => "logical_connectors",
            Feature::QuestionMarks => "question_marks",
            Feature::ExclamationMarks => "exclamation_marks",
        }
    }

    /// Integer-valued features (written without a fractional part).
    pub fn is_count(self) -> bool {
        matches!(
            self,
            Feature::WordCount
                | Feature::CharCount
                | Feature::SentenceCount
                | Feature::BulletPoints
                | Feature::LogicalConnectors
                | Feature::QuestionMarks
                | Feature::ExclamationMarks
        )
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown feature '{}'", s))
    }
}

/// Linguistic features of one response text. Every field is always present;
/// absent or empty text maps to [`FeatureVector::default`] (all zeros).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub word_count: usize,
    pub char_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    pub type_token_ratio: f64,
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub formal_word_ratio: f64,
    pub bullet_points: usize,
    pub logical_connectors: usize,
    pub question_marks: usize,
    pub exclamation_marks: usize,
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::WordCount => self.word_count as f64,
            Feature::CharCount => self.char_count as f64,
            Feature::SentenceCount => self.sentence_count as f64,
            Feature::AvgWordLength => self.avg_word_length,
            Feature::AvgSentenceLength => self.avg_sentence_length,
            Feature::TypeTokenRatio => self.type_token_ratio,
            Feature::FleschReadingEase => self.flesch_reading_ease,
            Feature::FleschKincaidGrade => self.flesch_kincaid_grade,
            Feature::FormalWordRatio => self.formal_word_ratio,
            Feature::BulletPoints => self.bullet_points as f64,
            Feature::LogicalConnectors => self.logical_connectors as f64,
            Feature::QuestionMarks => self.question_marks as f64,
            Feature::ExclamationMarks => self.exclamation_marks as f64,
        }
    }

    /// `(feature, value)` pairs in [`Feature::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

/// Maps a response text to its feature vector.
///
/// `None` stands for a response without textual content (e.g. a provider
/// returning `null`). Implementations never fail: malformed input yields a
/// zero vector.
pub trait FeatureExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, text: Option<&str>) -> FeatureVector;
}
