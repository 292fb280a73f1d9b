use super::exit_codes;
use crate::cli::args::AnalyzeArgs;
use promptstyle_core::analysis::{run_analysis, AnalysisOptions};
use promptstyle_core::model::ExperimentRecord;
use promptstyle_core::report::console::print_summary;
use promptstyle_core::report::plots::{PlotStyle, PLOTS_DIR};
use promptstyle_core::report::write_reports;

pub fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<i32> {
    let settings = super::load_settings(&args.config)?;
    let features = settings
        .analysis
        .tested_features()
        .map_err(|e| anyhow::anyhow!(e))?;
    let input = args.input.clone().unwrap_or(settings.output.results.clone());
    let out_dir = args.out_dir.clone().unwrap_or(settings.output.dir.clone());

    let record = ExperimentRecord::load(&input)?;
    eprintln!(
        "Loaded experiment results from {}",
        record.experiment_config.timestamp
    );

    let extractor = promptstyle_metrics::default_extractor()?;
    let options = AnalysisOptions {
        features,
        alpha: settings.analysis.alpha,
    };
    let artifacts = run_analysis(&record, extractor.as_ref(), &options)?;
    eprintln!("Analyzed {} successful response pairs", artifacts.rows.len());

    let style = PlotStyle::default();
    let paths = write_reports(
        &artifacts,
        &input,
        &record.experiment_config.timestamp,
        &out_dir,
        (!args.no_plots).then_some(&style),
    )?;
    if !paths.plots.is_empty() {
        eprintln!("Plots saved to {}/", out_dir.join(PLOTS_DIR).display());
    }

    print_summary(&artifacts);
    eprintln!("\nAnalysis files saved to {}/", out_dir.display());
    Ok(exit_codes::OK)
}
