//! Five-number summaries for box marks.

use crate::core::constants::WHISKER_IQR;

/// `p`-quantile of ascending `sorted` by linear interpolation (R-7).
#[must_use]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64))
}

/// Box, whiskers and outliers of one group.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest datum `>= q1 - 1.5 IQR`.
    pub low_whisker: f64,
    /// Largest datum `<= q3 + 1.5 IQR`.
    pub high_whisker: f64,
    /// Ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` when there is no finite value.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let (fence_lo, fence_hi) = (q1 - WHISKER_IQR * iqr, q3 + WHISKER_IQR * iqr);

        // Fences bracket [q1, q3], which always holds at least one datum.
        let low_whisker = sorted.iter().copied().find(|&v| v >= fence_lo)?;
        let high_whisker = sorted.iter().rev().copied().find(|&v| v <= fence_hi)?;
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_whisker || v > high_whisker)
            .collect();

        Some(Self {
            count: sorted.len(),
            q1,
            median,
            q3,
            low_whisker,
            high_whisker,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn r7_quantiles() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert!(close(quantile_sorted(&s, 0.25).unwrap(), 1.75));
        assert!(close(quantile_sorted(&s, 0.5).unwrap(), 2.5));
        assert!(close(quantile_sorted(&s, 0.75).unwrap(), 3.25));
        assert!(close(quantile_sorted(&s, 1.0).unwrap(), 4.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn whiskers_stop_at_fences() {
        // q1 = 2, q3 = 4, IQR 2, fences [-1, 7]
        let stats = BoxStats::from_values(&[5.0, 1.0, 2.0, 3.0, 4.0, 20.0, 2.0, 4.0, 3.0]).unwrap();
        assert!(close(stats.q1, 2.0));
        assert!(close(stats.median, 3.0));
        assert!(close(stats.q3, 4.0));
        assert!(close(stats.low_whisker, 1.0));
        assert!(close(stats.high_whisker, 5.0));
        assert_eq!(stats.outliers, vec![20.0]);
        assert_eq!(stats.count, 9);
    }

    #[test]
    fn single_value_and_non_finite() {
        let one = BoxStats::from_values(&[0.4, f64::NAN]).unwrap();
        assert_eq!(one.count, 1);
        assert!(close(one.q1, 0.4) && close(one.q3, 0.4));
        assert!(one.outliers.is_empty());
        assert!(BoxStats::from_values(&[f64::INFINITY]).is_none());
    }
}
