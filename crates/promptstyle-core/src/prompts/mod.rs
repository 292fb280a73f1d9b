//! Paired prompt generation.
//!
//! Every base question is rendered twice, once per register, from templates
//! chosen by a seeded RNG so a given seed always yields the same pairs.

use crate::model::{BaseQuestion, PromptPair};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod catalog;
mod templates;

pub use catalog::BASE_QUESTIONS;
pub use templates::{HUMAN_STYLE_TEMPLATES, LLM_STYLE_TEMPLATES};

const PLACEHOLDER: &str = "{question}";

pub fn render(template: &str, question: &str) -> String {
    template.replace(PLACEHOLDER, question)
}

/// Builds one pair per catalog question. For each question the human
/// template is drawn before the LLM template, from a single RNG stream.
pub fn create_prompt_pairs(seed: u64) -> Vec<PromptPair> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    BASE_QUESTIONS
        .iter()
        .map(|q| pair_for(q, &mut rng))
        .collect()
}

/// The first `count` pairs, in catalog order.
pub fn get_prompt_pairs(seed: u64, count: usize) -> Vec<PromptPair> {
    let mut pairs = create_prompt_pairs(seed);
    pairs.truncate(count);
    pairs
}

fn pair_for(q: &BaseQuestion, rng: &mut impl Rng) -> PromptPair {
    let human = HUMAN_STYLE_TEMPLATES[rng.random_range(0..HUMAN_STYLE_TEMPLATES.len())];
    let llm = LLM_STYLE_TEMPLATES[rng.random_range(0..LLM_STYLE_TEMPLATES.len())];

    PromptPair {
        id: q.id,
        topic: q.topic.to_string(),
        base_question: q.question.to_string(),
        human_style_prompt: render(human, q.question),
        llm_style_prompt: render(llm, q.question),
    }
}
