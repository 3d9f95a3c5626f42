//! Chart Data Module
//! Prepares billions-scaled series, histogram bins and axis ranges for rendering.

use crate::data::{Table, BILLION};
use crate::stats::StabilityReport;

/// Number of histogram bins for the value distribution chart.
pub const HISTOGRAM_BINS: usize = 15;

/// Values for all three charts, in table order and scaled to billions.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub continent: String,
    pub countries: Vec<String>,
    pub values_billions: Vec<f64>,
    pub within_stable_range: Vec<bool>,
    pub mean_billions: f64,
    pub lower_billions: f64,
    pub upper_billions: f64,
}

impl ChartData {
    /// The chart titles use the continent of the table's rows.
    pub fn new(table: &Table, stability: &StabilityReport) -> Self {
        let records = table.records();
        Self {
            continent: records
                .first()
                .map(|r| r.continent.clone())
                .unwrap_or_default(),
            countries: records.iter().map(|r| r.country.clone()).collect(),
            values_billions: records.iter().map(|r| r.trade_value_billions()).collect(),
            within_stable_range: records
                .iter()
                .map(|r| stability.is_within(r.trade_value))
                .collect(),
            mean_billions: stability.mean / BILLION,
            lower_billions: stability.lower_bound() / BILLION,
            upper_billions: stability.upper_bound() / BILLION,
        }
    }

    pub fn len(&self) -> usize {
        self.values_billions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values_billions.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.values_billions
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_value(&self) -> f64 {
        self.values_billions
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }
}

/// One histogram bar: `[start, end)`, the last bin also includes `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split `[min, max]` of `values` into `bins` equal-width bins.
///
/// When all values are equal the range is widened by 0.5 on both sides.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        result[idx].count += 1;
    }

    result
}

/// Axis range covering `[lo, hi]` with `pad_ratio` of the span added on each side.
pub fn padded_range(lo: f64, hi: f64, pad_ratio: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= 0.0 {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * pad_ratio.max(0.1) };
        return (lo - pad, hi + pad);
    }
    (lo - span * pad_ratio, hi + span * pad_ratio)
}
