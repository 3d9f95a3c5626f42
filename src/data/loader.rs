//! Spreadsheet Data Loader Module
//! Reads a worksheet (calamine) or CSV file (Polars) into a DataFrame.

use crate::data::processor::ProcessorError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File {} not found.", .0.display())]
    FileNotFound(PathBuf),
    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),
    #[error("Failed to read workbook: {0}")]
    Excel(#[from] calamine::Error),
    #[error("Failed to load data: {0}")]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Processing(#[from] ProcessorError),
}

/// Input formats the loader understands, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            "csv" => Ok(SourceFormat::Csv),
            _ => Err(LoaderError::UnsupportedFormat(ext)),
        }
    }
}

/// Loads one sheet of trade data into a Polars DataFrame.
pub struct DataLoader;

impl DataLoader {
    /// Load `path`, reading `sheet_name` when the file is a workbook.
    pub fn load(path: &Path, sheet_name: &str) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        let df = match SourceFormat::from_path(path)? {
            SourceFormat::Workbook => Self::read_workbook(path, sheet_name)?,
            SourceFormat::Csv => Self::read_csv(path)?,
        };
        log::debug!(
            "Read {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        Ok(df)
    }

    /// Every CSV column is read as text; numeric parsing happens in the processor.
    fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        Ok(df)
    }

    fn read_workbook(path: &Path, sheet_name: &str) -> Result<DataFrame, LoaderError> {
        let mut workbook = open_workbook_auto(path)?;

        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(LoaderError::SheetNotFound(sheet_name.to_string()));
        }

        let range = workbook.worksheet_range(sheet_name)?;
        Self::range_to_dataframe(&range)
    }

    /// Convert a worksheet range to a DataFrame of text columns.
    ///
    /// The first row supplies the column names. Empty and error cells become nulls so
    /// that numeric coercion later treats them as missing.
    pub fn range_to_dataframe(range: &Range<Data>) -> Result<DataFrame, LoaderError> {
        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(DataFrame::empty());
        };

        let names: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| match Self::cell_to_text(cell) {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => format!("column_{}", i),
            })
            .collect();

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
        for row in rows {
            for (i, column) in values.iter_mut().enumerate() {
                column.push(row.get(i).and_then(Self::cell_to_text));
            }
        }

        let columns: Vec<Column> = names
            .iter()
            .zip(values)
            .map(|(name, column)| Column::new(name.as_str().into(), column))
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    fn cell_to_text(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::String(s) => Some(s.clone()),
            Data::Float(f) => Some(f.to_string()),
            Data::Int(i) => Some(i.to_string()),
            other => Some(other.to_string()),
        }
    }
}
