//! Statistics Calculator Module
//! Descriptive statistics over the Trade Value column.

use crate::data::Table;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StatsError {
    #[error("No data: the table has no rows")]
    EmptyTable,
    #[error("Percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(f64),
}

/// Summary of Trade Value across a table, in raw currency units.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl StatsSummary {
    /// Labelled values in report order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("Mean", self.mean),
            ("Std", self.std),
            ("Min", self.min),
            ("Max", self.max),
            ("Range", self.range),
        ]
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute the summary for a table.
    pub fn compute_summary(table: &Table) -> Result<StatsSummary, StatsError> {
        Self::compute_descriptive_stats(&table.values())
    }

    /// Mean, sample standard deviation (N - 1) and extrema of `values`.
    ///
    /// A single value has a standard deviation of 0.
    pub fn compute_descriptive_stats(values: &[f64]) -> Result<StatsSummary, StatsError> {
        let n = values.len();
        if n == 0 {
            return Err(StatsError::EmptyTable);
        }

        let mean = values.iter().mean();
        let std = if n > 1 { values.iter().std_dev() } else { 0.0 };
        let (min, max) = Self::extrema(values);

        Ok(StatsSummary {
            count: n,
            mean,
            std,
            min,
            max,
            range: max - min,
        })
    }

    /// Largest value, or `EmptyTable` when there is none.
    pub fn max_value(values: &[f64]) -> Result<f64, StatsError> {
        if values.is_empty() {
            return Err(StatsError::EmptyTable);
        }
        Ok(Self::extrema(values).1)
    }

    fn extrema(values: &[f64]) -> (f64, f64) {
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TradeRecord;

    const EPS: f64 = 1e-9;

    fn table(values: &[f64]) -> Table {
        Table::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| TradeRecord::new(&format!("C{}", i), "XXX", "Europe", v))
                .collect(),
        )
    }

    #[test]
    fn sample_statistics() {
        let summary = StatsCalculator::compute_summary(&table(&[1e10, 2e10, 3e10])).unwrap();

        assert_eq!(summary.count, 3);
        assert!((summary.mean - 2e10).abs() < 1.0);
        assert!((summary.std - 1e10).abs() < 1.0);
        assert_eq!(summary.min, 1e10);
        assert_eq!(summary.max, 3e10);
    }

    #[test]
    fn std_divides_by_n_minus_one() {
        let summary = StatsCalculator::compute_descriptive_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .unwrap();
        // population std is 2.0; sample std is sqrt(32 / 7)
        assert!((summary.std - (32.0f64 / 7.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn range_is_max_minus_min() {
        for values in [
            vec![5.0],
            vec![3.0, -1.0, 8.5],
            vec![100.0, 95.0, 50.0, 50.0],
        ] {
            let summary = StatsCalculator::compute_descriptive_stats(&values).unwrap();
            assert_eq!(summary.range, summary.max - summary.min);
        }
    }

    #[test]
    fn single_value_has_zero_std() {
        let summary = StatsCalculator::compute_descriptive_stats(&[42.0]).unwrap();
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.range, 0.0);
    }

    #[test]
    fn empty_table_is_an_error() {
        assert_eq!(
            StatsCalculator::compute_summary(&Table::default()),
            Err(StatsError::EmptyTable)
        );
        assert_eq!(StatsCalculator::max_value(&[]), Err(StatsError::EmptyTable));
    }

    #[test]
    fn entries_follow_report_order() {
        let summary = StatsCalculator::compute_descriptive_stats(&[1.0, 3.0]).unwrap();
        let labels: Vec<&str> = summary.entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Mean", "Std", "Min", "Max", "Range"]);
    }
}
