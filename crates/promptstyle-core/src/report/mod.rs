pub mod console;
pub mod plots;
pub mod tables;

use crate::analysis::AnalysisArtifacts;
use std::path::{Path, PathBuf};

/// Everything `analyze` leaves on disk.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub statistics: PathBuf,
    pub features: PathBuf,
    pub manifest: PathBuf,
    pub plots: Vec<PathBuf>,
}

/// Writes the tables, the manifest and (optionally) the charts under `out_dir`.
pub fn write_reports(
    artifacts: &AnalysisArtifacts,
    input: &Path,
    experiment_timestamp: &str,
    out_dir: &Path,
    plot_style: Option<&plots::PlotStyle>,
) -> anyhow::Result<ReportPaths> {
    use anyhow::Context;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let statistics = out_dir.join(tables::STATISTICS_FILE);
    tables::write_statistics_csv(&statistics, &artifacts.statistics)?;

    let features = out_dir.join(tables::FEATURES_FILE);
    tables::write_features_csv(&features, &artifacts.rows)?;

    let manifest = out_dir.join(tables::MANIFEST_FILE);
    tables::AnalysisManifest::new(input, experiment_timestamp, artifacts)?.save(&manifest)?;

    let plots = match plot_style {
        Some(style) => plots::generate_plots(artifacts, &out_dir.join(plots::PLOTS_DIR), style)?,
        None => Vec::new(),
    };

    Ok(ReportPaths {
        statistics,
        features,
        manifest,
        plots,
    })
}
