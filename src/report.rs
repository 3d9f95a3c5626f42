//! Console Report
//! Fixed-width text tables for the summary, top exporters and stability analysis.

use crate::data::{TradeRecord, BILLION};
use crate::stats::{StabilityReport, StatsSummary};

const STABLE_GLYPH: &str = "✓";
const UNSTABLE_GLYPH: &str = "✗";

/// Format with `,` thousands separators and a fixed number of decimals.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    // Negative zero after rounding prints without a sign
    if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn billions(value: f64) -> String {
    format_thousands(value / BILLION, 2)
}

/// Renders report sections as printable text.
pub struct Reporter;

impl Reporter {
    pub fn summary_table(summary: &StatsSummary) -> String {
        let mut lines = vec![
            String::new(),
            "Summary Statistics (in USD):".to_string(),
            "-".repeat(40),
        ];
        for (label, value) in summary.entries() {
            lines.push(format!("{:15}: {} billion", label, billions(value)));
        }
        lines.push(format!("{:15}: {}", "Count", summary.count));
        lines.join("\n")
    }

    pub fn top_exporters_table(records: &[TradeRecord], percentage: f64) -> String {
        let mut lines = vec![
            String::new(),
            format!(
                "Top Exporters (within {}% of maximum value):",
                format_percentage(percentage)
            ),
            "-".repeat(60),
            format!(
                "{:15} {:8} {:>25}",
                "Country", "ISO 3", "Trade Value (Billions USD)"
            ),
            "-".repeat(60),
        ];
        for r in records {
            lines.push(format!(
                "{:15} {:8} {:>25}",
                r.country,
                r.iso3,
                billions(r.trade_value)
            ));
        }
        lines.join("\n")
    }

    pub fn stability_table(report: &StabilityReport) -> String {
        let mut lines = vec![
            String::new(),
            "Stability Analysis (within one standard deviation of the mean):".to_string(),
            "-".repeat(70),
            format!(
                "Stable range: {} to {} billion ({} of {} countries)",
                billions(report.lower_bound()),
                billions(report.upper_bound()),
                report.stable_count(),
                report.records.len()
            ),
            "-".repeat(70),
            format!(
                "{:15} {:8} {:>17} {:>17} {:>8}",
                "Country", "ISO 3", "Value (B USD)", "Deviation (B)", "Stable"
            ),
            "-".repeat(70),
        ];
        for r in &report.records {
            let glyph = if r.within_stable_range {
                STABLE_GLYPH
            } else {
                UNSTABLE_GLYPH
            };
            lines.push(format!(
                "{:15} {:8} {:>17} {:>17} {:>8}",
                r.record.country,
                r.record.iso3,
                billions(r.record.trade_value),
                billions(r.deviation_from_mean),
                glyph
            ));
        }
        lines.join("\n")
    }
}

fn format_percentage(percentage: f64) -> String {
    if percentage.fract() == 0.0 {
        format!("{:.0}", percentage)
    } else {
        percentage.to_string()
    }
}
