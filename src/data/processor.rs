//! Data Processor Module
//! Continent filtering and Trade Value coercion.

use crate::data::record::{Table, TradeRecord};
use polars::prelude::*;
use thiserror::Error;

pub const CONTINENT_COL: &str = "Continent";
pub const COUNTRY_COL: &str = "Country";
pub const ISO3_COL: &str = "ISO 3";
pub const TRADE_VALUE_COL: &str = "Trade Value";

const REQUIRED_COLUMNS: [&str; 4] = [CONTINENT_COL, COUNTRY_COL, ISO3_COL, TRADE_VALUE_COL];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
    #[error("No rows with a numeric Trade Value for continent '{0}'")]
    EmptyResult(String),
}

/// Handles row selection and cleaning.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows of `continent`, coerce Trade Value to a number and drop rows where
    /// coercion failed. Row order is preserved.
    pub fn filter_by_continent(df: &DataFrame, continent: &str) -> Result<Table, ProcessorError> {
        Self::check_required_columns(df)?;

        let continent_rows = df
            .clone()
            .lazy()
            .filter(col(CONTINENT_COL).cast(DataType::String).eq(lit(continent)))
            .collect()?;

        // Non-strict cast: unparseable values become null
        let cleaned = continent_rows
            .clone()
            .lazy()
            .with_column(col(TRADE_VALUE_COL).cast(DataType::Float64))
            .filter(
                col(TRADE_VALUE_COL)
                    .is_not_null()
                    .and(col(TRADE_VALUE_COL).is_not_nan()),
            )
            .collect()?;

        log::info!(
            "{} of {} rows match continent '{}'",
            continent_rows.height(),
            df.height(),
            continent
        );
        let dropped = continent_rows.height() - cleaned.height();
        if dropped > 0 {
            log::debug!("Dropped {} rows without a numeric Trade Value", dropped);
        }

        let table = Self::to_table(&cleaned)?;
        if table.is_empty() {
            return Err(ProcessorError::EmptyResult(continent.to_string()));
        }
        Ok(table)
    }

    fn check_required_columns(df: &DataFrame) -> Result<(), ProcessorError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        match REQUIRED_COLUMNS
            .iter()
            .find(|required| !names.iter().any(|n| n == *required))
        {
            Some(missing) => Err(ProcessorError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Build records from a cleaned DataFrame. Null text cells become empty strings.
    fn to_table(df: &DataFrame) -> Result<Table, ProcessorError> {
        let continent = df.column(CONTINENT_COL)?.cast(&DataType::String)?;
        let country = df.column(COUNTRY_COL)?.cast(&DataType::String)?;
        let iso3 = df.column(ISO3_COL)?.cast(&DataType::String)?;
        let value = df.column(TRADE_VALUE_COL)?;

        let continent_ca = continent.str()?;
        let country_ca = country.str()?;
        let iso3_ca = iso3.str()?;
        let value_ca = value.f64()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            if let Some(v) = value_ca.get(i) {
                records.push(TradeRecord::new(
                    country_ca.get(i).unwrap_or_default(),
                    iso3_ca.get(i).unwrap_or_default(),
                    continent_ca.get(i).unwrap_or_default(),
                    v,
                ));
            }
        }

        Ok(Table::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rows: &[(&str, &str, &str, Option<&str>)]) -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                CONTINENT_COL.into(),
                rows.iter().map(|r| r.0).collect::<Vec<_>>(),
            ),
            Column::new(
                COUNTRY_COL.into(),
                rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            ),
            Column::new(ISO3_COL.into(), rows.iter().map(|r| r.2).collect::<Vec<_>>()),
            Column::new(
                TRADE_VALUE_COL.into(),
                rows.iter().map(|r| r.3).collect::<Vec<_>>(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_only_target_continent() {
        let df = frame(&[
            ("Europe", "A", "AAA", Some("100")),
            ("Asia", "B", "BBB", Some("999")),
        ]);
        let table = DataProcessor::filter_by_continent(&df, "Europe").unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].country, "A");
        assert_eq!(table.records()[0].trade_value, 100.0);
    }

    #[test]
    fn drops_non_numeric_and_missing_values() {
        let df = frame(&[
            ("Europe", "A", "AAA", Some("1.5e9")),
            ("Europe", "B", "BBB", Some("n/a")),
            ("Europe", "C", "CCC", None),
            ("Europe", "D", "DDD", Some("42")),
        ]);
        let table = DataProcessor::filter_by_continent(&df, "Europe").unwrap();

        let countries: Vec<&str> = table.records().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["A", "D"]);
        assert_eq!(table.values(), vec![1.5e9, 42.0]);
    }

    #[test]
    fn preserves_source_order() {
        let df = frame(&[
            ("Europe", "Low", "LOW", Some("1")),
            ("Europe", "High", "HIG", Some("3")),
            ("Europe", "Mid", "MID", Some("2")),
        ]);
        let table = DataProcessor::filter_by_continent(&df, "Europe").unwrap();
        assert_eq!(table.values(), vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn empty_result_is_an_error() {
        let df = frame(&[("Asia", "B", "BBB", Some("999"))]);
        let err = DataProcessor::filter_by_continent(&df, "Europe").unwrap_err();
        assert!(matches!(err, ProcessorError::EmptyResult(c) if c == "Europe"));
    }

    #[test]
    fn missing_column_is_reported() {
        let df = DataFrame::new(vec![
            Column::new(CONTINENT_COL.into(), ["Europe"]),
            Column::new(COUNTRY_COL.into(), ["A"]),
            Column::new(TRADE_VALUE_COL.into(), ["1"]),
        ])
        .unwrap();
        let err = DataProcessor::filter_by_continent(&df, "Europe").unwrap_err();
        assert!(matches!(err, ProcessorError::MissingColumn(c) if c == ISO3_COL));
    }

    #[test]
    fn numeric_trade_column_passes_through() {
        let df = DataFrame::new(vec![
            Column::new(CONTINENT_COL.into(), ["Europe", "Europe"]),
            Column::new(COUNTRY_COL.into(), ["A", "B"]),
            Column::new(ISO3_COL.into(), ["AAA", "BBB"]),
            Column::new(TRADE_VALUE_COL.into(), [10i64, 20]),
        ])
        .unwrap();
        let table = DataProcessor::filter_by_continent(&df, "Europe").unwrap();
        assert_eq!(table.values(), vec![10.0, 20.0]);
    }
}
