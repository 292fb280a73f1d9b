use super::exit_codes;
use crate::cli::args::{PromptsArgs, PromptsFormat};
use promptstyle_core::model::PromptPair;
use promptstyle_core::prompts::get_prompt_pairs;

pub fn cmd_prompts(args: PromptsArgs) -> anyhow::Result<i32> {
    let settings = super::load_settings(&args.config)?;
    let seed = args.seed.unwrap_or(settings.seed);
    let count = args.count.unwrap_or(settings.num_questions);
    let pairs = get_prompt_pairs(seed, count);

    match args.format {
        PromptsFormat::Json => println!("{}", serde_json::to_string_pretty(&pairs)?),
        PromptsFormat::Text => {
            println!("Generated {} prompt pairs (seed {})", pairs.len(), seed);
            for p in &pairs {
                print_pair(p);
            }
        }
    }
    Ok(exit_codes::OK)
}

fn print_pair(p: &PromptPair) {
    println!("\n--- Pair {} ({}) ---", p.id, p.topic);
    println!("Base: {}", p.base_question);
    println!("Human-style: {}", p.human_style_prompt);
    println!("LLM-style: {}", p.llm_style_prompt);
}
