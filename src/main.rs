//! Trade Stats - Trade Value Statistics & Static Chart Report
//!
//! Loads one sheet of per-country trade values, keeps a single continent, prints
//! summary statistics plus top-exporter and stability tables, and saves charts.

mod charts;
mod config;
mod data;
mod report;
mod stats;

use charts::{ChartData, StaticChartRenderer};
use clap::Parser;
use config::{AnalysisConfig, Cli};
use data::{LoaderError, ProcessorError};
use report::Reporter;
use stats::{StatsCalculator, StatsError};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::from(Cli::parse());
    run(&config)
}

fn run(config: &AnalysisConfig) -> anyhow::Result<()> {
    if !(0.0..=100.0).contains(&config.percentage) {
        return Err(StatsError::InvalidPercentage(config.percentage).into());
    }

    log::info!(
        "Loading sheet '{}' from {}",
        config.sheet,
        config.input.display()
    );
    let table = match data::load_trade_table(&config.input, &config.sheet, &config.continent) {
        Ok(table) => table,
        Err(e) => {
            report_load_failure(&e);
            return Ok(());
        }
    };
    log::info!("{} {} rows ready for analysis", table.len(), config.continent);

    let summary = StatsCalculator::compute_summary(&table)?;
    println!("{}", Reporter::summary_table(&summary));

    let top_exporters = stats::find_countries_in_range(&table, config.percentage)?;
    println!(
        "{}",
        Reporter::top_exporters_table(&top_exporters, config.percentage)
    );

    let stability = stats::analyze_stability(&table)?;
    println!("{}", Reporter::stability_table(&stability));

    if config.render_charts {
        let chart_data = ChartData::new(&table, &stability);
        for path in StaticChartRenderer::render_all(&chart_data, &config.output_dir)? {
            log::info!("Wrote {}", path.display());
        }
        println!(
            "\nVisualizations have been saved to the '{}' directory.",
            config.output_dir.display()
        );
    }

    Ok(())
}

/// A failed load ends the run without propagating an error.
fn report_load_failure(err: &LoaderError) {
    log::error!("{}", err);
    match err {
        LoaderError::FileNotFound(_) => println!("Error: {}", err),
        LoaderError::Processing(ProcessorError::EmptyResult(continent)) => {
            println!("No data: no rows with a numeric Trade Value for '{}'.", continent)
        }
        _ => println!("Error loading data: {}", err),
    }
}
