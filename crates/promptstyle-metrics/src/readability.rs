//! Flesch reading ease and Flesch–Kincaid grade.
//!
//! Syllables are estimated from vowel groups; scores are not clamped, so very
//! simple text can produce a negative grade.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReadabilityError {
    #[error("text has no countable words")]
    NoWords,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readability {
    pub reading_ease: f64,
    pub grade: f64,
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Vowel-group estimate with a silent trailing `e`; at least one per word.
pub fn syllables(word: &str) -> usize {
    let w: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if w.is_empty() {
        return 0;
    }

    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &w {
        let v = is_vowel(c);
        if v && !prev_vowel {
            groups += 1;
        }
        prev_vowel = v;
    }

    let n = w.len();
    let silent_e = n > 2 && w[n - 1] == 'e' && !is_vowel(w[n - 2]) && w[n - 2] != 'l';
    if silent_e && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}

/// Scores `text` given its sentence count. Words are whitespace tokens with
/// at least one alphanumeric character.
pub fn score(text: &str, sentences: usize) -> Result<Readability, ReadabilityError> {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .collect();
    if words.is_empty() {
        return Err(ReadabilityError::NoWords);
    }
    let syllable_total: usize = words.iter().map(|w| syllables(w).max(1)).sum();

    let w = words.len() as f64;
    let words_per_sentence = w / sentences.max(1) as f64;
    let syllables_per_word = syllable_total as f64 / w;

    Ok(Readability {
        reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
        grade: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
    })
}
