//! Analysis Configuration
//! Command line parsing and the settings consumed by the pipeline.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "data.xlsx";
pub const DEFAULT_SHEET: &str = "Exporters-of-Crude-Petroleum-2";
pub const DEFAULT_CONTINENT: &str = "Europe";
pub const DEFAULT_PERCENTAGE: f64 = 10.0;
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Spreadsheet (.xlsx, .xls, .ods) or CSV file to analyze
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Worksheet holding the trade records (ignored for CSV input)
    #[arg(long, default_value = DEFAULT_SHEET)]
    pub sheet: String,

    /// Keep only rows whose Continent equals this value
    #[arg(long, default_value = DEFAULT_CONTINENT)]
    pub continent: String,

    /// Report countries within this percentage of the maximum value
    #[arg(long, default_value_t = DEFAULT_PERCENTAGE)]
    pub percentage: f64,

    /// Directory the chart images are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Print the report without rendering charts
    #[arg(long)]
    pub no_charts: bool,
}

/// Settings for a single analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub sheet: String,
    pub continent: String,
    pub percentage: f64,
    pub output_dir: PathBuf,
    pub render_charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            sheet: DEFAULT_SHEET.to_string(),
            continent: DEFAULT_CONTINENT.to_string(),
            percentage: DEFAULT_PERCENTAGE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            render_charts: true,
        }
    }
}

impl From<Cli> for AnalysisConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            sheet: cli.sheet,
            continent: cli.continent,
            percentage: cli.percentage,
            output_dir: cli.output_dir,
            render_charts: !cli.no_charts,
        }
    }
}
