//! Row Filters
//! Countries near the maximum, and proximity to the mean.

use crate::data::{Table, TradeRecord};
use crate::stats::calculator::{StatsCalculator, StatsError};

/// A record annotated with its distance from the table mean.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityRecord {
    pub record: TradeRecord,
    /// Always >= 0.
    pub deviation_from_mean: f64,
    pub within_stable_range: bool,
}

/// Every row of a table annotated against `[mean - std, mean + std]`,
/// sorted by ascending deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityReport {
    pub mean: f64,
    pub std: f64,
    pub records: Vec<StabilityRecord>,
}

impl StabilityReport {
    pub fn lower_bound(&self) -> f64 {
        self.mean - self.std
    }

    pub fn upper_bound(&self) -> f64 {
        self.mean + self.std
    }

    /// Bounds are inclusive.
    pub fn is_within(&self, value: f64) -> bool {
        self.lower_bound() <= value && value <= self.upper_bound()
    }

    pub fn stable_count(&self) -> usize {
        self.records.iter().filter(|r| r.within_stable_range).count()
    }
}

/// Rows whose value is at least `max * (1 - percentage / 100)`, highest first.
/// Equal values keep their table order.
pub fn find_countries_in_range(
    table: &Table,
    percentage: f64,
) -> Result<Vec<TradeRecord>, StatsError> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err(StatsError::InvalidPercentage(percentage));
    }

    let max = StatsCalculator::max_value(&table.values())?;
    let threshold = range_threshold(max, percentage);

    let mut selected: Vec<TradeRecord> = table
        .records()
        .iter()
        .filter(|r| r.trade_value >= threshold)
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.trade_value.total_cmp(&a.trade_value));

    Ok(selected)
}

/// Lowest value still counted as "near the maximum".
pub fn range_threshold(max: f64, percentage: f64) -> f64 {
    max * (1.0 - percentage / 100.0)
}

/// Annotate every row with its deviation from the mean. Recomputed on each call.
pub fn analyze_stability(table: &Table) -> Result<StabilityReport, StatsError> {
    let summary = StatsCalculator::compute_summary(table)?;
    let mut report = StabilityReport {
        mean: summary.mean,
        std: summary.std,
        records: Vec::with_capacity(table.len()),
    };

    let records: Vec<StabilityRecord> = table
        .records()
        .iter()
        .map(|r| StabilityRecord {
            record: r.clone(),
            deviation_from_mean: (r.trade_value - report.mean).abs(),
            within_stable_range: report.is_within(r.trade_value),
        })
        .collect();
    report.records = records;
    report
        .records
        .sort_by(|a, b| a.deviation_from_mean.total_cmp(&b.deviation_from_mean));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(values: &[(&str, f64)]) -> Table {
        Table::new(
            values
                .iter()
                .map(|(name, v)| TradeRecord::new(name, "XXX", "Europe", *v))
                .collect(),
        )
    }

    fn names(records: &[TradeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.country.as_str()).collect()
    }

    #[test]
    fn range_filter_keeps_values_near_max() {
        let t = table(&[("C", 50.0), ("A", 100.0), ("B", 95.0)]);
        assert_eq!(range_threshold(100.0, 10.0), 90.0);

        let top = find_countries_in_range(&t, 10.0).unwrap();
        assert_eq!(names(&top), vec!["A", "B"]);
    }

    #[test]
    fn range_filter_is_exact_partition() {
        let t = table(&[
            ("A", 12.0),
            ("B", 7.5),
            ("C", 30.0),
            ("D", 28.0),
            ("E", 27.0),
            ("F", 0.0),
        ]);
        for pct in [0.0, 5.0, 10.0, 50.0, 100.0] {
            let top = find_countries_in_range(&t, pct).unwrap();
            let threshold = range_threshold(30.0, pct);

            assert!(top.iter().all(|r| r.trade_value >= threshold));
            let outside = t
                .records()
                .iter()
                .filter(|r| !top.iter().any(|s| s.country == r.country));
            for r in outside {
                assert!(r.trade_value < threshold);
            }
            assert!(top.windows(2).all(|w| w[0].trade_value >= w[1].trade_value));
        }
    }

    #[test]
    fn range_filter_ties_keep_table_order() {
        let t = table(&[("First", 100.0), ("Low", 1.0), ("Second", 100.0), ("Top", 200.0)]);
        let top = find_countries_in_range(&t, 60.0).unwrap();
        assert_eq!(names(&top), vec!["Top", "First", "Second"]);
    }

    #[test]
    fn range_filter_rejects_bad_percentage() {
        let t = table(&[("A", 1.0)]);
        assert_eq!(
            find_countries_in_range(&t, 120.0),
            Err(StatsError::InvalidPercentage(120.0))
        );
        assert_eq!(
            find_countries_in_range(&t, -1.0),
            Err(StatsError::InvalidPercentage(-1.0))
        );
    }

    #[test]
    fn range_filter_on_empty_table() {
        assert_eq!(
            find_countries_in_range(&Table::default(), 10.0),
            Err(StatsError::EmptyTable)
        );
    }

    #[test]
    fn stability_marks_all_three_within() {
        let t = table(&[("A", 1e10), ("B", 2e10), ("C", 3e10)]);
        let report = analyze_stability(&t).unwrap();

        assert_eq!(report.records.len(), 3);
        assert!(report.records.iter().all(|r| r.within_stable_range));
        assert_eq!(report.records[0].record.country, "B");
    }

    #[test]
    fn stability_bounds_are_inclusive() {
        // mean 2, sample std 1
        let t = table(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]);
        let report = analyze_stability(&t).unwrap();

        assert_eq!(report.lower_bound(), 1.0);
        assert_eq!(report.upper_bound(), 3.0);
        assert!(report.is_within(1.0));
        assert!(report.is_within(3.0));
        assert!(!report.is_within(3.000001));
        assert_eq!(report.stable_count(), 3);
    }

    #[test]
    fn stability_flags_outliers_and_sorts_by_deviation() {
        let t = table(&[
            ("Big", 100.0),
            ("A", 10.0),
            ("B", 12.0),
            ("C", 11.0),
            ("D", 9.0),
        ]);
        let report = analyze_stability(&t).unwrap();

        assert_eq!(report.records.len(), t.len());
        assert!(report
            .records
            .windows(2)
            .all(|w| w[0].deviation_from_mean <= w[1].deviation_from_mean));
        for r in &report.records {
            assert!(r.deviation_from_mean >= 0.0);
            let v = r.record.trade_value;
            let expected = report.mean - report.std <= v && v <= report.mean + report.std;
            assert_eq!(r.within_stable_range, expected);
        }
        let big = report
            .records
            .iter()
            .find(|r| r.record.country == "Big")
            .unwrap();
        assert!(!big.within_stable_range);
        assert_eq!(report.records.last().unwrap().record.country, "Big");
    }

    #[test]
    fn stability_ties_keep_table_order() {
        let t = table(&[("Above", 3.0), ("Mid", 2.0), ("Below", 1.0)]);
        let report = analyze_stability(&t).unwrap();
        let order: Vec<&str> = report
            .records
            .iter()
            .map(|r| r.record.country.as_str())
            .collect();
        assert_eq!(order, vec!["Mid", "Above", "Below"]);
    }

    #[test]
    fn stability_on_empty_table() {
        assert_eq!(
            analyze_stability(&Table::default()),
            Err(StatsError::EmptyTable)
        );
    }
}
