//! Descriptive statistics for a numeric column.

use std::fmt;

/// Count, mean, sample standard deviation, min, quartiles and max.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1). `None` below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Describe `values`. Returns `None` for an empty column.
    pub fn describe(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        });

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.50),
            p75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

impl fmt::Display for ColumnStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let std = self
            .std
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "n/a".to_string());
        write!(
            f,
            "count={} mean={:.2} std={} min={:.0} 25%={:.2} 50%={:.2} 75%={:.2} max={:.0}",
            self.count, self.mean, std, self.min, self.p25, self.p50, self.p75, self.max
        )
    }
}
