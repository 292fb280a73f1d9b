//! Two-sided Wilcoxon signed-rank test on paired samples.
//!
//! Zero differences are discarded, tied magnitudes share their average rank.
//! The exact null distribution is used for up to [`EXACT_LIMIT`] differences
//! when none were zero and none are tied; otherwise the tie-corrected normal
//! approximation without continuity correction.

use statrs::distribution::{ContinuousCDF, Normal};

pub const EXACT_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilcoxonOutcome {
    /// `min(R+, R-)`.
    pub statistic: f64,
    pub pvalue: f64,
}

impl WilcoxonOutcome {
    fn undefined() -> Self {
        Self {
            statistic: f64::NAN,
            pvalue: f64::NAN,
        }
    }
}

pub fn wilcoxon_signed_rank(x: &[f64], y: &[f64]) -> WilcoxonOutcome {
    let all: Vec<f64> = x.iter().zip(y).map(|(a, b)| a - b).collect();
    let diffs: Vec<f64> = all.iter().copied().filter(|d| *d != 0.0).collect();
    let had_zeros = diffs.len() < all.len();
    if diffs.is_empty() || diffs.iter().any(|d| d.is_nan()) {
        return WilcoxonOutcome::undefined();
    }

    let (ranks, tie_sizes) = average_ranks(&diffs);
    let (mut r_plus, mut r_minus) = (0.0, 0.0);
    for (d, r) in diffs.iter().zip(&ranks) {
        if *d > 0.0 {
            r_plus += r;
        } else {
            r_minus += r;
        }
    }
    let statistic = f64::min(r_plus, r_minus);
    let n = diffs.len();

    let pvalue = if n <= EXACT_LIMIT && tie_sizes.is_empty() && !had_zeros {
        exact_pvalue(n, statistic)
    } else {
        normal_pvalue(n, statistic, &tie_sizes)
    };

    WilcoxonOutcome { statistic, pvalue }
}

/// Ranks of `|d|` (1-based, ties averaged) and the sizes of every tie group.
fn average_ranks(diffs: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let mut order: Vec<usize> = (0..diffs.len()).collect();
    order.sort_by(|&a, &b| diffs[a].abs().total_cmp(&diffs[b].abs()));

    let mut ranks = vec![0.0; diffs.len()];
    let mut ties = Vec::new();
    let mut i = 0;
    while i < order.len() {
        let mut j = i + 1;
        while j < order.len() && diffs[order[j]].abs() == diffs[order[i]].abs() {
            j += 1;
        }
        // positions i..j share ranks i+1..=j
        let avg = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg;
        }
        if j - i > 1 {
            ties.push(j - i);
        }
        i = j;
    }
    (ranks, ties)
}

/// `min(1, 2·P(W ≤ t))` under the exact null distribution of W for `n` ranks.
fn exact_pvalue(n: usize, t: f64) -> f64 {
    let max_sum = n * (n + 1) / 2;
    // counts[s] = number of subsets of {1..n} whose rank sum is s
    let mut counts = vec![0.0f64; max_sum + 1];
    counts[0] = 1.0;
    for k in 1..=n {
        for s in (k..=max_sum).rev() {
            counts[s] += counts[s - k];
        }
    }
    let total = 2f64.powi(n as i32);
    let upto = t.floor() as usize;
    let cdf: f64 = counts[..=upto.min(max_sum)].iter().sum::<f64>() / total;
    f64::min(1.0, 2.0 * cdf)
}

fn normal_pvalue(n: usize, t: f64, tie_sizes: &[usize]) -> f64 {
    let n = n as f64;
    let mean = n * (n + 1.0) / 4.0;
    let tie_term: f64 = tie_sizes
        .iter()
        .map(|&s| {
            let s = s as f64;
            s * (s * s - 1.0)
        })
        .sum();
    let var = (n * (n + 1.0) * (2.0 * n + 1.0) - 0.5 * tie_term) / 24.0;
    let se = var.sqrt();
    if !(se > 0.0) {
        return f64::NAN;
    }
    let z = (t - mean) / se;
    match Normal::new(0.0, 1.0) {
        Ok(norm) => f64::min(1.0, 2.0 * norm.sf(z.abs())),
        Err(_) => f64::NAN,
    }
}
