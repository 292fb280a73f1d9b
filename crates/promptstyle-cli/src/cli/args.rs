use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "promptstyle",
    version,
    about = "Do LLMs answer differently when asked like a human or like an LLM?"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a sample promptstyle.yaml
    Init(InitArgs),
    /// Print the generated prompt pairs
    Prompts(PromptsArgs),
    /// Query the models and save the experiment record
    Run(RunArgs),
    /// Extract features, run the paired tests and write reports
    Analyze(AnalyzeArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Experiment config; defaults apply when omitted and ./promptstyle.yaml is absent
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reject unknown config keys instead of warning
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "promptstyle.yaml")]
    pub config: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptsFormat {
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PromptsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Number of pairs to print (default: num_questions from config)
    #[arg(long)]
    pub count: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = PromptsFormat::Text)]
    pub format: PromptsFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Openrouter,
    /// Offline canned answers; needs no API key
    Fake,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Models to query (overrides config)
    #[arg(long, num_args = 1..)]
    pub models: Vec<String>,

    #[arg(long)]
    pub num_questions: Option<usize>,

    #[arg(long, value_enum, default_value_t = Provider::Openrouter)]
    pub provider: Provider,

    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Experiment record path (overrides output.results)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Experiment record to analyse (overrides output.results)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory for tables, manifest and plots (overrides output.dir)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    #[arg(long)]
    pub no_plots: bool,
}
