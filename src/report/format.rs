//! Formatted terminal output.
//!
//! JSON goes to stdout; these tables go to stderr alongside it (`--summary`),
//! so formatting stays out of the conversion code.

use chrono::DateTime;

use crate::domain::{AxisIndex, ChartKind, ConvertedSeries};
use crate::io::ingest::RowError;
use crate::normalize::{AssemblyStatus, Normalized};

use super::summarize;

/// One line per series: name, type, axis, point count, x/value ranges.
pub fn format_series_summary(title: &str, series: &[ConvertedSeries]) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {title} ===\n"));

    out.push_str(
        format!(
            "{:<28} {:<8} {:>4} {:>6} {:<23} {:>21}\n",
            "name", "type", "axis", "points", "x-range", "value-range"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!("{:-<28} {:-<8} {:-<4} {:-<6} {:-<23} {:-<21}\n", "", "", "", "", "", "").trim_end(),
    );
    out.push('\n');

    for s in series.iter().map(summarize) {
        let axis = match s.axis {
            Some(AxisIndex::Primary) => "0",
            Some(AxisIndex::Secondary) => "1",
            None => "-",
        };
        let x_range = s
            .time_range
            .map(|(lo, hi)| format!("{}..{}", fmt_millis(lo), fmt_millis(hi)))
            .unwrap_or_else(|| "-".to_string());
        let value_range = s
            .value_range
            .map(|(lo, hi)| format!("{lo:.2}..{hi:.2}"))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(
            format!(
                "{:<28} {:<8} {:>4} {:>6} {:<23} {:>21}\n",
                truncate(&s.name, 28),
                s.kind,
                axis,
                s.points,
                x_range,
                value_range
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Recommended chart families, one per line.
pub fn format_recommendations(kinds: &[ChartKind]) -> String {
    if kinds.is_empty() {
        return "No chart type recommendations for this table.\n".to_string();
    }
    let mut out = String::from("Recommended chart types:\n");
    for (idx, kind) in kinds.iter().enumerate() {
        out.push_str(&format!("{}. {:<16} {}\n", idx + 1, kind.tag(), kind.display_name()));
    }
    out
}

/// Skipped CSV records.
pub fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = String::new();
    for e in errors {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    out
}

/// What normalization changed.
pub fn format_normalize_report(report: &Normalized) -> String {
    let assembly = match &report.assembly {
        AssemblyStatus::NotRequested => "not requested".to_string(),
        AssemblyStatus::Assembled { series } => format!("assembled {series} series"),
        AssemblyStatus::Failed { reason } => format!("failed ({reason})"),
    };
    format!(
        "Formatters resolved: {}\nTime-series assembly: {assembly}\n",
        report.formatters_resolved
    )
}

fn fmt_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
