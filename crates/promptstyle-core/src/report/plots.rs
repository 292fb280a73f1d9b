//! SVG charts for an analysis run.

use crate::analysis::stats::{mean, std_sample};
use crate::analysis::{AnalysisArtifacts, FeatureStatistics, PairedRow};
use crate::features_api::Feature;
use crate::model::PromptStyle;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const PLOTS_DIR: &str = "plots";
/// Paired-line panel draws at most this many rows.
pub const PAIRED_LINE_LIMIT: usize = 50;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Visual settings shared by every chart.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub font: &'static str,
    pub caption_size: f64,
    pub label_size: f64,
    pub margin: u32,
    pub human_color: RGBColor,
    pub llm_color: RGBColor,
    pub positive_color: RGBColor,
    pub negative_color: RGBColor,
    pub neutral_color: RGBColor,
    pub bar_opacity: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            font: "sans-serif",
            caption_size: 22.0,
            label_size: 14.0,
            margin: 20,
            human_color: RGBColor(66, 133, 244),
            llm_color: RGBColor(234, 114, 52),
            positive_color: RGBColor(46, 160, 67),
            negative_color: RGBColor(214, 39, 40),
            neutral_color: RGBColor(128, 128, 128),
            bar_opacity: 0.7,
        }
    }
}

/// `***`, `**`, `*` at 0.001 / 0.01 / 0.05 on the corrected p-value.
pub fn significance_stars(p: f64) -> &'static str {
    if p < 0.001 {
        "***"
    } else if p < 0.01 {
        "**"
    } else if p < 0.05 {
        "*"
    } else {
        ""
    }
}

/// Text after the last `/` of a provider-qualified model id.
pub fn short_model_name(model: &str) -> &str {
    model.rsplit('/').next().unwrap_or(model)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupEffect {
    pub label: String,
    pub mean_diff: f64,
    /// Standard error of the mean difference; NaN for single-row groups.
    pub std_err: f64,
    pub n: usize,
}

/// Mean `llm − human` word-count difference per group, in first-seen order.
pub fn word_count_effects<F>(rows: &[PairedRow], key: F) -> Vec<GroupEffect>
where
    F: Fn(&PairedRow) -> &str,
{
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for r in rows {
        let k = key(r);
        let d = r.diff(Feature::WordCount);
        match groups.iter_mut().find(|(g, _)| *g == k) {
            Some((_, v)) => v.push(d),
            None => groups.push((k, vec![d])),
        }
    }
    groups
        .into_iter()
        .map(|(label, diffs)| GroupEffect {
            label: label.to_string(),
            mean_diff: mean(&diffs),
            std_err: std_sample(&diffs) / (diffs.len() as f64).sqrt(),
            n: diffs.len(),
        })
        .collect()
}

fn padded_range(values: impl Iterator<Item = f64>, include_zero: bool) -> (f64, f64) {
    let (mut lo, mut hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        lo = 0.0;
        hi = 1.0;
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if hi - lo < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.08;
    (lo - pad, hi + pad)
}

fn style_label(v: &SegmentValue<u32>) -> String {
    match v {
        SegmentValue::CenterOf(0) => PromptStyle::Human.label().to_string(),
        SegmentValue::CenterOf(1) => PromptStyle::Llm.label().to_string(),
        _ => String::new(),
    }
}

/// Writes every chart into `dir`; returns the written paths.
pub fn generate_plots(
    a: &AnalysisArtifacts,
    dir: &Path,
    style: &PlotStyle,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join("response_length_comparison.svg");
    response_length_comparison(&path, &a.rows, style)?;
    written.push(path);

    let path = dir.join("effect_sizes.svg");
    effect_sizes(&path, &a.statistics, style)?;
    written.push(path);

    let path = dir.join("formality_analysis.svg");
    formality_analysis(&path, &a.rows, style)?;
    written.push(path);

    // grouped by full id; providers can serve models under the same short name
    let models = word_count_effects(&a.rows, |r| r.model.as_str());
    if models.len() > 1 {
        let path = dir.join("model_comparison.svg");
        model_comparison(&path, &models, style)?;
        written.push(path);
    }

    let mut topics = word_count_effects(&a.rows, |r| r.topic.as_str());
    topics.sort_by(|x, y| x.mean_diff.total_cmp(&y.mean_diff));
    let path = dir.join("topic_analysis.svg");
    topic_analysis(&path, &topics, style)?;
    written.push(path);

    tracing::debug!(plots = written.len(), dir = %dir.display(), "plots written");
    Ok(written)
}

fn style_boxplot(
    area: &Area,
    title: &str,
    y_desc: &str,
    human: &[f64],
    llm: &[f64],
    style: &PlotStyle,
) -> anyhow::Result<()> {
    let (lo, hi) = padded_range(human.iter().chain(llm).copied(), false);
    let mut chart = ChartBuilder::on(area)
        .caption(title, (style.font, style.caption_size))
        .margin(style.margin)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..1u32).into_segmented(), lo as f32..hi as f32)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Prompt Style")
        .y_desc(y_desc)
        .x_label_formatter(&style_label)
        .draw()?;

    for (idx, values, color) in [(0u32, human, style.human_color), (1u32, llm, style.llm_color)] {
        if values.is_empty() {
            continue;
        }
        let quartiles = Quartiles::new(values);
        chart.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(idx), &quartiles)
                .width(60)
                .whisker_width(0.5)
                .style(color.stroke_width(2)),
        ))?;
    }
    Ok(())
}

fn response_length_comparison(
    path: &Path,
    rows: &[PairedRow],
    style: &PlotStyle,
) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(style.width / 2);

    let human: Vec<f64> = rows.iter().map(|r| r.human.get(Feature::WordCount)).collect();
    let llm: Vec<f64> = rows.iter().map(|r| r.llm.get(Feature::WordCount)).collect();
    style_boxplot(
        &left,
        "Response Length by Prompt Style",
        "Word Count",
        &human,
        &llm,
        style,
    )?;

    let (lo, hi) = padded_range(human.iter().chain(&llm).copied(), false);
    let mut chart = ChartBuilder::on(&right)
        .caption(
            "Paired Response Lengths (each line = one question)",
            (style.font, style.caption_size),
        )
        .margin(style.margin)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..1u32).into_segmented(), lo..hi)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Response Word Count")
        .x_label_formatter(&|v| match style_label(v).as_str() {
            "" => String::new(),
            s => format!("{} Prompt", s),
        })
        .draw()?;

    let line = style.neutral_color.mix(0.3);
    for (h, l) in human.iter().zip(&llm).take(PAIRED_LINE_LIMIT) {
        let points = vec![
            (SegmentValue::CenterOf(0u32), *h),
            (SegmentValue::CenterOf(1u32), *l),
        ];
        chart.draw_series(LineSeries::new(points.clone(), line))?;
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 3, line.filled())))?;
    }

    root.present()?;
    Ok(())
}

fn effect_sizes(path: &Path, stats: &[FeatureStatistics], style: &PlotStyle) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (style.width * 5 / 6, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut sorted: Vec<&FeatureStatistics> = stats.iter().collect();
    sorted.sort_by(|x, y| x.cohens_d.abs().total_cmp(&y.cohens_d.abs()));
    let names: Vec<String> = sorted.iter().map(|s| s.feature.to_string()).collect();
    let k = sorted.len() as u32;

    let reach = sorted
        .iter()
        .map(|s| s.cohens_d.abs())
        .filter(|d| d.is_finite())
        .fold(0.6, f64::max)
        + 0.2;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Effect of Prompt Style on Response Features (positive = higher under LLM-style prompts)",
            (style.font, style.caption_size),
        )
        .margin(style.margin)
        .x_label_area_size(40)
        .y_label_area_size(170)
        .build_cartesian_2d(-reach..reach, (0u32..k).into_segmented())?;

    let feature_label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Cohen's d (Effect Size)")
        .y_labels(k as usize + 1)
        .y_label_formatter(&feature_label)
        .draw()?;

    chart.draw_series(sorted.iter().enumerate().map(|(i, s)| {
        let i = i as u32;
        let color = if s.cohens_d > 0.0 {
            style.positive_color
        } else {
            style.negative_color
        };
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(i)),
                (s.cohens_d, SegmentValue::Exact(i + 1)),
            ],
            color.mix(style.bar_opacity).filled(),
        );
        bar.set_margin(4, 4, 0, 0);
        bar
    }))?;

    let grey = style.neutral_color;
    let guides = [
        (0.0, BLACK.stroke_width(1)),
        (0.2, grey.mix(0.6).stroke_width(1)),
        (-0.2, grey.mix(0.6).stroke_width(1)),
        (0.5, grey.mix(0.35).stroke_width(1)),
        (-0.5, grey.mix(0.35).stroke_width(1)),
    ];
    for (x, line) in guides {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, SegmentValue::Exact(0)), (x, SegmentValue::Exact(k))],
            line,
        )))?;
    }

    chart.draw_series(sorted.iter().enumerate().filter_map(|(i, s)| {
        let stars = significance_stars(s.t_pvalue_bonf);
        if stars.is_empty() {
            return None;
        }
        Some(Text::new(
            stars.to_string(),
            (
                s.cohens_d + 0.02 * s.cohens_d.signum(),
                SegmentValue::CenterOf(i as u32),
            ),
            (style.font, style.label_size),
        ))
    }))?;

    root.present()?;
    Ok(())
}

fn formality_analysis(path: &Path, rows: &[PairedRow], style: &PlotStyle) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(style.width / 2);

    let side = |f: Feature| -> (Vec<f64>, Vec<f64>) {
        (
            rows.iter().map(|r| r.human.get(f)).collect(),
            rows.iter().map(|r| r.llm.get(f)).collect(),
        )
    };

    let (h, l) = side(Feature::FormalWordRatio);
    style_boxplot(
        &left,
        "Formality of Responses by Prompt Style",
        "Formal Word Ratio",
        &h,
        &l,
        style,
    )?;
    let (h, l) = side(Feature::LogicalConnectors);
    style_boxplot(
        &right,
        "Logical Connectors in Responses by Prompt Style",
        "Logical Connectors",
        &h,
        &l,
        style,
    )?;

    root.present()?;
    Ok(())
}

fn model_comparison(path: &Path, models: &[GroupEffect], style: &PlotStyle) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = padded_range(
        models.iter().flat_map(|m| {
            let se = if m.std_err.is_finite() { m.std_err } else { 0.0 };
            [m.mean_diff - se, m.mean_diff + se]
        }),
        true,
    );
    let k = models.len() as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Response Length Difference by Model", (style.font, style.caption_size))
        .margin(style.margin)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..k).into_segmented(), lo..hi)?;

    let model_label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => models
            .get(*i as usize)
            .map(|m| short_model_name(&m.label).to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Word Count Difference (LLM-style - Human-style prompt)")
        .x_label_formatter(&model_label)
        .draw()?;

    chart.draw_series(models.iter().enumerate().map(|(i, m)| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), m.mean_diff),
            ],
            style.human_color.mix(style.bar_opacity).filled(),
        );
        bar.set_margin(0, 0, 20, 20);
        bar
    }))?;

    chart.draw_series(
        models
            .iter()
            .enumerate()
            .filter(|(_, m)| m.std_err.is_finite())
            .map(|(i, m)| {
                ErrorBar::new_vertical(
                    SegmentValue::CenterOf(i as u32),
                    m.mean_diff - m.std_err,
                    m.mean_diff,
                    m.mean_diff + m.std_err,
                    BLACK.stroke_width(1),
                    10,
                )
            }),
    )?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(SegmentValue::Exact(0), 0.0), (SegmentValue::Exact(k), 0.0)],
        BLACK.stroke_width(1),
    )))?;

    root.present()?;
    Ok(())
}

fn topic_analysis(path: &Path, topics: &[GroupEffect], style: &PlotStyle) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = padded_range(topics.iter().map(|t| t.mean_diff), true);
    let k = topics.len() as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Response Length Difference by Topic", (style.font, style.caption_size))
        .margin(style.margin)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(lo..hi, (0u32..k).into_segmented())?;

    let topic_label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => topics
            .get(*i as usize)
            .map(|t| t.label.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Word Count Difference (LLM-style - Human-style prompt)")
        .y_labels(k as usize + 1)
        .y_label_formatter(&topic_label)
        .draw()?;

    chart.draw_series(topics.iter().enumerate().map(|(i, t)| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(i)),
                (t.mean_diff, SegmentValue::Exact(i + 1)),
            ],
            style.human_color.mix(style.bar_opacity).filled(),
        );
        bar.set_margin(4, 4, 0, 0);
        bar
    }))?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, SegmentValue::Exact(0)), (0.0, SegmentValue::Exact(k))],
        BLACK.stroke_width(1),
    )))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features_api::FeatureVector;

    fn row(model: &str, topic: &str, h: usize, l: usize) -> PairedRow {
        PairedRow {
            id: 1,
            topic: topic.into(),
            model: model.into(),
            base_question: "q".into(),
            human: FeatureVector {
                word_count: h,
                ..Default::default()
            },
            llm: FeatureVector {
                word_count: l,
                ..Default::default()
            },
            human_response_content: None,
            llm_response_content: None,
        }
    }

    #[test]
    fn test_stars_thresholds() {
        assert_eq!(significance_stars(0.0005), "***");
        assert_eq!(significance_stars(0.005), "**");
        assert_eq!(significance_stars(0.03), "*");
        assert_eq!(significance_stars(0.05), "");
        assert_eq!(significance_stars(f64::NAN), "");
    }

    #[test]
    fn test_short_model_name() {
        assert_eq!(short_model_name("anthropic/claude-sonnet-4"), "claude-sonnet-4");
        assert_eq!(short_model_name("local-model"), "local-model");
    }

    #[test]
    fn test_group_effects_keep_first_seen_order() {
        let rows = vec![
            row("b/two", "math", 10, 20),
            row("a/one", "math", 10, 14),
            row("b/two", "science", 10, 30),
        ];
        let g = word_count_effects(&rows, |r| r.model.as_str());
        assert_eq!(g.len(), 2);
        assert_eq!(g[0].label, "b/two");
        assert_eq!(g[0].mean_diff, 15.0);
        assert_eq!(g[0].n, 2);
        assert!((g[0].std_err - 5.0).abs() < 1e-12);
        assert!(g[1].std_err.is_nan());
    }

    #[test]
    fn test_models_sharing_a_short_name_stay_separate() {
        let rows = vec![
            row("openai/gpt-4o", "math", 10, 20),
            row("azure/gpt-4o", "math", 10, 12),
            row("openai/gpt-4o", "science", 12, 30),
            row("azure/gpt-4o", "science", 9, 15),
        ];
        let a = AnalysisArtifacts {
            statistics: crate::analysis::compute_statistics(&rows, &Feature::TESTED, 0.05),
            rows,
            alpha: 0.05,
        };
        let dir = tempfile::tempdir().unwrap();
        let written = generate_plots(&a, dir.path(), &PlotStyle::default()).unwrap();

        assert_eq!(written.len(), 5);
        let svg = std::fs::read_to_string(dir.path().join("model_comparison.svg")).unwrap();
        assert!(svg.contains("gpt-4o"));
        assert!(!svg.contains("openai/gpt-4o"));
    }

    #[test]
    fn test_padded_range_handles_flat_data() {
        let (lo, hi) = padded_range([3.0, 3.0].into_iter(), false);
        assert!(lo < 3.0 && hi > 3.0);
        let (lo, hi) = padded_range([2.0, 5.0].into_iter(), true);
        assert!(lo < 0.0 && hi > 5.0);
    }
}
