use crate::analysis::AnalysisArtifacts;
use std::fmt::Write;

const WIDE: usize = 70;

fn rule(out: &mut String, c: char) {
    let _ = writeln!(out, "{}", c.to_string().repeat(WIDE));
}

fn fmt3(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.3}", x)
    }
}

/// Human-readable analysis summary.
pub fn render_summary(a: &AnalysisArtifacts) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    rule(&mut out, '=');
    let _ = writeln!(
        out,
        "ANALYSIS SUMMARY: LLM Behavior with Human vs LLM Style Prompts"
    );
    rule(&mut out, '=');

    let _ = writeln!(out, "\nTotal response pairs analyzed: {}", a.rows.len());
    let _ = writeln!(out, "Models tested: {:?}", a.models());
    let _ = writeln!(out, "Topics covered: {}", a.topic_count());

    let _ = writeln!(out);
    rule(&mut out, '-');
    let _ = writeln!(out, "KEY FINDINGS:");
    rule(&mut out, '-');

    let significant: Vec<_> = a.significant().collect();
    if significant.is_empty() {
        let _ = writeln!(
            out,
            "\nNo statistically significant differences found after Bonferroni correction."
        );
    } else {
        let _ = writeln!(
            out,
            "\nStatistically significant differences (Bonferroni-corrected p < {}):",
            a.alpha
        );
        for s in significant {
            let _ = writeln!(
                out,
                "  - {}: LLM-style prompts produce {} values",
                s.feature,
                s.direction()
            );
            let _ = writeln!(
                out,
                "    (d = {:.3}, p = {:.4})",
                s.cohens_d, s.t_pvalue_bonf
            );
        }
    }

    let _ = writeln!(out);
    rule(&mut out, '-');
    let _ = writeln!(out, "DETAILED STATISTICS:");
    rule(&mut out, '-');
    render_table(&mut out, a);

    let _ = writeln!(out);
    rule(&mut out, '-');
    let _ = writeln!(out, "EFFECT SIZE INTERPRETATION:");
    rule(&mut out, '-');
    let _ = writeln!(
        out,
        "Cohen's d: |0.2| = small, |0.5| = medium, |0.8| = large"
    );
    if let Some(s) = a.largest_effect() {
        let _ = writeln!(
            out,
            "\nLargest effect: {} (d = {:.3})",
            s.feature, s.cohens_d
        );
    }
    out
}

fn render_table(out: &mut String, a: &AnalysisArtifacts) {
    const HEADERS: [&str; 7] = [
        "feature",
        "human_mean",
        "llm_mean",
        "diff_mean",
        "cohens_d",
        "t_pvalue",
        "t_pvalue_bonf",
    ];
    let cells: Vec<[String; 7]> = a
        .statistics
        .iter()
        .map(|s| {
            [
                s.feature.to_string(),
                fmt3(s.human_mean),
                fmt3(s.llm_mean),
                fmt3(s.diff_mean),
                fmt3(s.cohens_d),
                fmt3(s.t_pvalue),
                fmt3(s.t_pvalue_bonf),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row) {
            *w = (*w).max(c.len());
        }
    }

    let line = |cols: Vec<&str>| -> String {
        cols.iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c, w = *w))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let _ = writeln!(out, "{}", line(HEADERS.to_vec()));
    for row in &cells {
        let _ = writeln!(out, "{}", line(row.iter().map(String::as_str).collect()));
    }
}

pub fn print_summary(a: &AnalysisArtifacts) {
    eprint!("{}", render_summary(a));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FeatureStatistics, PairedRow};
    use crate::features_api::{Feature, FeatureVector};

    fn stat(feature: Feature, d: f64, p_bonf: f64, diff_mean: f64) -> FeatureStatistics {
        FeatureStatistics {
            feature,
            human_mean: 10.0,
            human_std: 1.0,
            llm_mean: 10.0 + diff_mean,
            llm_std: 1.0,
            diff_mean,
            diff_std: 1.0,
            t_statistic: -3.0,
            t_pvalue: p_bonf / 2.0,
            wilcoxon_statistic: 1.0,
            wilcoxon_pvalue: 0.01,
            cohens_d: d,
            n: 2,
            t_pvalue_bonf: p_bonf,
            significant_bonf: p_bonf < 0.05,
        }
    }

    fn row(model: &str, topic: &str) -> PairedRow {
        PairedRow {
            id: 1,
            topic: topic.into(),
            model: model.into(),
            base_question: "q".into(),
            human: FeatureVector::default(),
            llm: FeatureVector::default(),
            human_response_content: None,
            llm_response_content: None,
        }
    }

    #[test]
    fn test_summary_lists_significant_features_and_largest_effect() {
        let a = AnalysisArtifacts {
            rows: vec![row("a/x", "science"), row("b/y", "math")],
            statistics: vec![
                stat(Feature::WordCount, 1.234, 0.001, 120.0),
                stat(Feature::TypeTokenRatio, -2.5, 0.02, -0.1),
                stat(Feature::BulletPoints, 0.1, 1.0, 0.2),
            ],
            alpha: 0.05,
        };
        let s = render_summary(&a);
        assert!(s.contains("Total response pairs analyzed: 2"));
        assert!(s.contains("Models tested: [\"a/x\", \"b/y\"]"));
        assert!(s.contains("Topics covered: 2"));
        assert!(s.contains("  - word_count: LLM-style prompts produce higher values"));
        assert!(s.contains("    (d = 1.234, p = 0.0010)"));
        assert!(s.contains("  - type_token_ratio: LLM-style prompts produce lower values"));
        assert!(!s.contains("bullet_points: LLM-style"));
        assert!(s.contains("Largest effect: type_token_ratio (d = -2.500)"));
    }

    #[test]
    fn test_summary_without_significance() {
        let a = AnalysisArtifacts {
            rows: vec![row("a/x", "science")],
            statistics: vec![stat(Feature::WordCount, 0.0, f64::NAN, 0.0)],
            alpha: 0.05,
        };
        let s = render_summary(&a);
        assert!(s.contains("No statistically significant differences found"));
        assert!(s.contains("NaN"));
    }
}
