//! Static Chart Renderer
//! Writes the three report charts as PNG files using plotters' bitmap backend.
//!
//! Charts:
//! 1. Bar chart of trade value by country (table order)
//! 2. Histogram of the value distribution (15 bins)
//! 3. Scatter of value by country, coloured by stability, with mean and +/-1 std lines

use crate::charts::plotter::{histogram_bins, padded_range, ChartData, HISTOGRAM_BINS};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BAR_CHART_FILE: &str = "export_values_by_country.png";
pub const HISTOGRAM_FILE: &str = "export_values_distribution.png";
pub const STABILITY_FILE: &str = "stability_analysis.png";

const Y_DESC: &str = "Trade Value (Billions USD)";

// Colors
const BAR: RGBColor = RGBColor(91, 155, 213);
const HIST_FILL: RGBColor = RGBColor(112, 173, 71);
const HIST_EDGE: RGBColor = RGBColor(56, 87, 35);
const STABLE: RGBColor = RGBColor(46, 204, 113);
const UNSTABLE: RGBColor = RGBColor(231, 76, 60);
const MEAN_LINE: RGBColor = RGBColor(52, 152, 219);
const BOUND_LINE: RGBColor = RGBColor(243, 156, 18);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to create output directory: {0}")]
    OutputDir(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

fn drawing_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}

fn config_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::ChartConfig(e.to_string())
}

fn area_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::DrawingArea(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Create `output_dir` if needed and render every chart into it.
    ///
    /// Returns the written file paths in rendering order.
    pub fn render_all(data: &ChartData, output_dir: &Path) -> Result<Vec<PathBuf>> {
        if data.is_empty() {
            return Err(ChartError::InvalidData("no values to plot".to_string()));
        }
        Self::ensure_output_dir(output_dir)?;

        let bar = output_dir.join(BAR_CHART_FILE);
        Self::draw_bar_chart(data, &bar)?;

        let hist = output_dir.join(HISTOGRAM_FILE);
        Self::draw_histogram(data, &hist)?;

        let scatter = output_dir.join(STABILITY_FILE);
        Self::draw_stability_scatter(data, &scatter)?;

        Ok(vec![bar, hist, scatter])
    }

    pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;
        Ok(())
    }

    fn country_label(countries: &[String], value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(i) => countries.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Bar chart of trade value per country.
    pub fn draw_bar_chart(data: &ChartData, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (1800, 900)).into_drawing_area();
        root.fill(&WHITE).map_err(area_err)?;

        let n = data.len() as u32;
        let (_, y_max) = padded_range(0.0, data.max_value().max(0.0), 0.05);
        let title = format!("Export Values by Country ({})", data.continent);
        let countries = &data.countries;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 36))
            .margin(20)
            .x_label_area_size(180)
            .y_label_area_size(90)
            .build_cartesian_2d((0u32..n).into_segmented(), 0.0..y_max)
            .map_err(config_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(&BLACK.mix(0.08))
            .bold_line_style(&BLACK.mix(0.3))
            .x_labels(data.len())
            .x_label_formatter(&|v| Self::country_label(countries, v))
            .x_label_style(
                ("sans-serif", 16)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_desc(Y_DESC)
            .y_label_formatter(&|y| format!("{:.1}", y))
            .axis_desc_style(("sans-serif", 22))
            .draw()
            .map_err(drawing_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR.filled())
                    .margin(4)
                    .data(
                        data.values_billions
                            .iter()
                            .enumerate()
                            .map(|(i, v)| (i as u32, *v)),
                    ),
            )
            .map_err(drawing_err)?;

        root.present().map_err(drawing_err)?;
        Ok(())
    }

    /// Histogram of the billions values.
    pub fn draw_histogram(data: &ChartData, path: &Path) -> Result<()> {
        let bins = histogram_bins(&data.values_billions, HISTOGRAM_BINS);
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return Err(ChartError::InvalidData("no values to bin".to_string()));
        };
        let x_range = first.start..last.end;
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
        let y_max = (max_count + 1) as f64;

        let root = BitMapBackend::new(path, (1500, 900)).into_drawing_area();
        root.fill(&WHITE).map_err(area_err)?;

        let title = format!("Distribution of Export Values ({})", data.continent);
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 36))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, 0.0..y_max)
            .map_err(config_err)?;

        chart
            .configure_mesh()
            .light_line_style(&BLACK.mix(0.08))
            .bold_line_style(&BLACK.mix(0.3))
            .x_desc(Y_DESC)
            .y_desc("Count")
            .x_label_formatter(&|x| format!("{:.1}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .axis_desc_style(("sans-serif", 22))
            .draw()
            .map_err(drawing_err)?;

        chart
            .draw_series(bins.iter().map(|bin| {
                Rectangle::new(
                    [(bin.start, 0.0), (bin.end, bin.count as f64)],
                    HIST_FILL.mix(0.8).filled(),
                )
            }))
            .map_err(drawing_err)?;
        chart
            .draw_series(bins.iter().filter(|bin| bin.count > 0).map(|bin| {
                Rectangle::new(
                    [(bin.start, 0.0), (bin.end, bin.count as f64)],
                    HIST_EDGE.stroke_width(1),
                )
            }))
            .map_err(drawing_err)?;

        root.present().map_err(drawing_err)?;
        Ok(())
    }

    /// Scatter of value per country with the stable band marked.
    pub fn draw_stability_scatter(data: &ChartData, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (1800, 900)).into_drawing_area();
        root.fill(&WHITE).map_err(area_err)?;

        let n = data.len() as u32;
        let lo = data.min_value().min(data.lower_billions);
        let hi = data.max_value().max(data.upper_billions);
        let (y_min, y_max) = padded_range(lo, hi, 0.1);
        let title = format!("Stability Analysis ({})", data.continent);
        let countries = &data.countries;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 36))
            .margin(20)
            .x_label_area_size(180)
            .y_label_area_size(90)
            .build_cartesian_2d((0u32..n).into_segmented(), y_min..y_max)
            .map_err(config_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(&BLACK.mix(0.08))
            .bold_line_style(&BLACK.mix(0.3))
            .x_labels(data.len())
            .x_label_formatter(&|v| Self::country_label(countries, v))
            .x_label_style(
                ("sans-serif", 16)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_desc(Y_DESC)
            .y_label_formatter(&|y| format!("{:.1}", y))
            .axis_desc_style(("sans-serif", 22))
            .draw()
            .map_err(drawing_err)?;

        let first = SegmentValue::CenterOf(0u32);
        let last = SegmentValue::CenterOf(n.saturating_sub(1));
        let hline = |y: f64| vec![(first.clone(), y), (last.clone(), y)];

        chart
            .draw_series(LineSeries::new(
                hline(data.mean_billions),
                MEAN_LINE.stroke_width(2),
            ))
            .map_err(drawing_err)?
            .label(format!("Mean ({:.2})", data.mean_billions))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MEAN_LINE.stroke_width(2)));

        chart
            .draw_series(LineSeries::new(
                hline(data.upper_billions),
                BOUND_LINE.stroke_width(1),
            ))
            .map_err(drawing_err)?
            .label("Mean ± 1 std")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BOUND_LINE.stroke_width(1)));
        chart
            .draw_series(LineSeries::new(
                hline(data.lower_billions),
                BOUND_LINE.stroke_width(1),
            ))
            .map_err(drawing_err)?;

        let points = |stable: bool| {
            data.values_billions
                .iter()
                .zip(&data.within_stable_range)
                .enumerate()
                .filter(move |(_, (_, within))| **within == stable)
                .map(|(i, (v, _))| (SegmentValue::CenterOf(i as u32), *v))
                .collect::<Vec<_>>()
        };

        chart
            .draw_series(
                points(true)
                    .into_iter()
                    .map(|p| Circle::new(p, 7, STABLE.filled())),
            )
            .map_err(drawing_err)?
            .label("Within stable range")
            .legend(|(x, y)| Circle::new((x + 10, y), 6, STABLE.filled()));

        chart
            .draw_series(
                points(false)
                    .into_iter()
                    .map(|p| Circle::new(p, 7, UNSTABLE.filled())),
            )
            .map_err(drawing_err)?
            .label("Outside stable range")
            .legend(|(x, y)| Circle::new((x + 10, y), 6, UNSTABLE.filled()));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .label_font(("sans-serif", 18))
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(drawing_err)?;

        root.present().map_err(drawing_err)?;
        Ok(())
    }
}
