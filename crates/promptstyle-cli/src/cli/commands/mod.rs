use super::args::*;
use promptstyle_core::config::{load_config, ExperimentSettings};
use std::path::{Path, PathBuf};

pub mod analyze;
pub mod init;
pub mod prompts;
pub mod run;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
}

const DEFAULT_CONFIG: &str = "promptstyle.yaml";

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Init(args) => init::cmd_init(args),
        Command::Prompts(args) => prompts::cmd_prompts(args),
        Command::Run(args) => run::cmd_run(args).await,
        Command::Analyze(args) => analyze::cmd_analyze(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// An explicit `--config` must load. Otherwise `./promptstyle.yaml` is used
/// when present, else the built-in defaults.
pub(crate) fn load_settings(args: &ConfigArgs) -> anyhow::Result<ExperimentSettings> {
    let path: PathBuf = match &args.config {
        Some(p) => p.clone(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG);
            if !p.exists() {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG);
                return Ok(ExperimentSettings::default());
            }
            p
        }
    };
    load_config(&path, args.strict).map_err(|e| anyhow::anyhow!(e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
