//! Data module - spreadsheet loading and filtering

mod loader;
mod processor;
mod record;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use record::{Table, TradeRecord, BILLION};

use std::path::Path;

/// Load `sheet_name` from `path` and keep the numeric rows of `continent`.
pub fn load_trade_table(path: &Path, sheet_name: &str, continent: &str) -> Result<Table, LoaderError> {
    let df = DataLoader::load(path, sheet_name)?;
    Ok(DataProcessor::filter_by_continent(&df, continent)?)
}
