use super::model::{FeatureStatistics, PairedRow};
use super::wilcoxon::wilcoxon_signed_rank;
use crate::features_api::Feature;
use statrs::distribution::{ContinuousCDF, StudentsT};

pub const DEFAULT_ALPHA: f64 = 0.05;

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn sum_sq_dev(xs: &[f64]) -> f64 {
    let m = mean(xs);
    xs.iter().map(|x| (x - m) * (x - m)).sum()
}

/// Population standard deviation (ddof 0).
pub fn std_population(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    (sum_sq_dev(xs) / xs.len() as f64).sqrt()
}

/// Sample standard deviation (ddof 1); NaN below two observations.
pub fn std_sample(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    (sum_sq_dev(xs) / (xs.len() - 1) as f64).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    pub statistic: f64,
    pub pvalue: f64,
}

/// Two-sided paired t-test on `a − b`.
///
/// Zero-variance differences give an infinite statistic (p = 0) or, when
/// every difference is zero, NaN.
pub fn paired_t_test(a: &[f64], b: &[f64]) -> TTest {
    let n = a.len().min(b.len());
    if n < 2 {
        return TTest {
            statistic: f64::NAN,
            pvalue: f64::NAN,
        };
    }
    let d: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    let m = mean(&d);
    let se = std_sample(&d) / (n as f64).sqrt();
    let statistic = m / se;

    let pvalue = if statistic.is_nan() {
        f64::NAN
    } else if statistic.is_infinite() {
        0.0
    } else {
        match StudentsT::new(0.0, 1.0, (n - 1) as f64) {
            Ok(dist) => f64::min(1.0, 2.0 * dist.sf(statistic.abs())),
            Err(_) => f64::NAN,
        }
    };
    TTest { statistic, pvalue }
}

/// Paired Cohen's d: `mean(diff) / sd(diff)` with ddof 1; 0 when the
/// spread is zero or undefined.
pub fn cohens_d(diffs: &[f64]) -> f64 {
    let sd = std_sample(diffs);
    if sd > 0.0 {
        mean(diffs) / sd
    } else {
        0.0
    }
}

/// Per-feature paired comparison. `t_pvalue_bonf` stays NaN until
/// [`apply_bonferroni`] runs.
pub fn compute_feature_statistics(rows: &[PairedRow], feature: Feature) -> FeatureStatistics {
    let human: Vec<f64> = rows.iter().map(|r| r.human.get(feature)).collect();
    let llm: Vec<f64> = rows.iter().map(|r| r.llm.get(feature)).collect();
    let diffs: Vec<f64> = llm.iter().zip(&human).map(|(l, h)| l - h).collect();

    let t = paired_t_test(&human, &llm);
    let w = wilcoxon_signed_rank(&human, &llm);

    FeatureStatistics {
        feature,
        human_mean: mean(&human),
        human_std: std_population(&human),
        llm_mean: mean(&llm),
        llm_std: std_population(&llm),
        diff_mean: mean(&diffs),
        diff_std: std_population(&diffs),
        t_statistic: t.statistic,
        t_pvalue: t.pvalue,
        wilcoxon_statistic: w.statistic,
        wilcoxon_pvalue: w.pvalue,
        cohens_d: cohens_d(&diffs),
        n: rows.len(),
        t_pvalue_bonf: f64::NAN,
        significant_bonf: false,
    }
}

/// Multiplies every t-test p-value by the number of tests (capped at 1) and
/// flags those strictly below `alpha`. NaN stays NaN and is never flagged.
pub fn apply_bonferroni(stats: &mut [FeatureStatistics], alpha: f64) {
    let k = stats.len() as f64;
    for s in stats.iter_mut() {
        s.t_pvalue_bonf = if s.t_pvalue.is_nan() {
            f64::NAN
        } else {
            f64::min(s.t_pvalue * k, 1.0)
        };
        s.significant_bonf = s.t_pvalue_bonf < alpha;
    }
}

pub fn compute_statistics(
    rows: &[PairedRow],
    features: &[Feature],
    alpha: f64,
) -> Vec<FeatureStatistics> {
    let mut stats: Vec<_> = features
        .iter()
        .map(|f| compute_feature_statistics(rows, *f))
        .collect();
    apply_bonferroni(&mut stats, alpha);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features_api::FeatureVector;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn row(human_words: usize, llm_words: usize) -> PairedRow {
        PairedRow {
            id: 1,
            topic: "science".into(),
            model: "m".into(),
            base_question: "q".into(),
            human: FeatureVector {
                word_count: human_words,
                ..Default::default()
            },
            llm: FeatureVector {
                word_count: llm_words,
                ..Default::default()
            },
            human_response_content: None,
            llm_response_content: None,
        }
    }

    fn stat_with_p(p: f64) -> FeatureStatistics {
        FeatureStatistics {
            feature: Feature::WordCount,
            human_mean: 0.0,
            human_std: 0.0,
            llm_mean: 0.0,
            llm_std: 0.0,
            diff_mean: 0.0,
            diff_std: 0.0,
            t_statistic: 0.0,
            t_pvalue: p,
            wilcoxon_statistic: 0.0,
            wilcoxon_pvalue: 0.0,
            cohens_d: 0.0,
            n: 0,
            t_pvalue_bonf: f64::NAN,
            significant_bonf: false,
        }
    }

    #[test]
    fn test_descriptives() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&xs), 5.0);
        assert_eq!(std_population(&xs), 2.0);
        assert!(close(std_sample(&xs), 2.138089935, 1e-9));
        assert!(std_sample(&[1.0]).is_nan());
    }

    #[test]
    fn test_paired_t_known_value() {
        // d = a - b = [-1, -2, -3, -1, -3]; mean -2, sd 1, se 1/sqrt(5)
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 5.0, 8.0];
        let t = paired_t_test(&a, &b);
        assert!(close(t.statistic, -4.472135955, 1e-8));
        assert!(close(t.pvalue, 0.011050, 1e-4), "{}", t.pvalue);
    }

    #[test]
    fn test_paired_t_degenerate_cases() {
        let constant = paired_t_test(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]);
        assert_eq!(constant.statistic, f64::NEG_INFINITY);
        assert_eq!(constant.pvalue, 0.0);

        let identical = paired_t_test(&[1.0, 2.0], &[1.0, 2.0]);
        assert!(identical.statistic.is_nan());
        assert!(identical.pvalue.is_nan());

        assert!(paired_t_test(&[1.0], &[2.0]).statistic.is_nan());
    }

    #[test]
    fn test_identical_differences_give_zero_effect() {
        assert_eq!(cohens_d(&[3.0, 3.0, 3.0, 3.0]), 0.0);
        assert_eq!(cohens_d(&[3.0]), 0.0);
    }

    #[test]
    fn test_bonferroni_scaling_and_flag() {
        let mut s = vec![stat_with_p(0.01), stat_with_p(0.02), stat_with_p(0.5)];
        apply_bonferroni(&mut s, DEFAULT_ALPHA);
        let bonf: Vec<f64> = s.iter().map(|x| x.t_pvalue_bonf).collect();
        assert!(close(bonf[0], 0.03, 1e-12));
        assert!(close(bonf[1], 0.06, 1e-12));
        assert_eq!(bonf[2], 1.0);
        assert_eq!(
            s.iter().map(|x| x.significant_bonf).collect::<Vec<_>>(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_bonferroni_keeps_nan_unflagged() {
        let mut s = vec![stat_with_p(f64::NAN), stat_with_p(0.001)];
        apply_bonferroni(&mut s, DEFAULT_ALPHA);
        assert!(s[0].t_pvalue_bonf.is_nan());
        assert!(!s[0].significant_bonf);
        assert!(s[1].significant_bonf);
    }

    #[test]
    fn test_swapping_sides_flips_t_only() {
        let rows: Vec<_> = [(10, 30), (12, 25), (8, 40), (15, 14), (9, 33)]
            .iter()
            .map(|(h, l)| row(*h, *l))
            .collect();
        let swapped: Vec<_> = rows
            .iter()
            .map(|r| PairedRow {
                human: r.llm,
                llm: r.human,
                ..r.clone()
            })
            .collect();
        let a = compute_feature_statistics(&rows, Feature::WordCount);
        let b = compute_feature_statistics(&swapped, Feature::WordCount);
        assert_eq!(a.t_statistic, -b.t_statistic);
        assert_eq!(a.t_pvalue, b.t_pvalue);
        assert_eq!(a.wilcoxon_statistic, b.wilcoxon_statistic);
        assert_eq!(a.wilcoxon_pvalue, b.wilcoxon_pvalue);
        assert_eq!(a.cohens_d, -b.cohens_d);
    }

    #[test]
    fn test_statistics_are_bit_identical_across_runs() {
        let rows: Vec<_> = (0..20).map(|i| row(10 + i % 7, 20 + (i * 3) % 11)).collect();
        let a = compute_statistics(&rows, &Feature::TESTED, DEFAULT_ALPHA);
        let b = compute_statistics(&rows, &Feature::TESTED, DEFAULT_ALPHA);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.t_statistic.to_bits(), y.t_statistic.to_bits());
            assert_eq!(x.t_pvalue.to_bits(), y.t_pvalue.to_bits());
            assert_eq!(x.wilcoxon_pvalue.to_bits(), y.wilcoxon_pvalue.to_bits());
            assert_eq!(x.cohens_d.to_bits(), y.cohens_d.to_bits());
        }
    }

    #[test]
    fn test_direction_and_sign_convention() {
        let rows: Vec<_> = [(10, 30), (12, 25), (8, 40)]
            .iter()
            .map(|(h, l)| row(*h, *l))
            .collect();
        let s = compute_feature_statistics(&rows, Feature::WordCount);
        assert!(s.diff_mean > 0.0);
        assert!(s.t_statistic < 0.0);
        assert!(s.cohens_d > 0.0);
        assert_eq!(s.direction(), "higher");
        assert_eq!(s.n, 3);
    }
}
