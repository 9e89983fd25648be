//! Y-axis assignment for multi-series charts.
//!
//! Series are grouped by a unit title derived from their `units` and
//! `currency` metadata. The largest group (ties: first seen) stays on the
//! primary axis; every other group collapses onto the secondary axis.
//! Without unit metadata everything shares the primary axis.

use crate::domain::{AxisIndex, NamedSeries};

/// Expand a unit code into a readable axis title.
pub fn unit_label(code: &str) -> String {
    let label = match code.trim().to_ascii_lowercase().as_str() {
        "" => "Number",
        "k" => "Thousands",
        "10k" => "10 Thousands",
        "m" => "Millions",
        "10m" => "10 Millions",
        "100m" => "100 Millions",
        "b" => "Billions",
        "t" => "Trillions",
        "pct" => "Percent",
        "pctp" => "Percentage Point",
        "idx" => "Index",
        "bp" => "Basis Point",
        _ => return code.trim().to_string(),
    };
    label.to_string()
}

/// Grouping key for a series, e.g. `"Millions, USD"`.
///
/// `None` when the series carries no unit metadata at all.
pub fn unit_title(series: &NamedSeries) -> Option<String> {
    let currency = series
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("n/a"));

    match (series.units.as_deref(), currency) {
        (None, None) => None,
        (units, Some(cur)) => Some(format!("{}, {}", unit_label(units.unwrap_or("")), cur.to_ascii_uppercase())),
        (Some(units), None) => Some(unit_label(units)),
    }
}

/// One axis slot per input series, in input order.
pub fn assign_y_axes(series: &[NamedSeries]) -> Vec<AxisIndex> {
    let keys: Vec<Option<String>> = series.iter().map(unit_title).collect();
    if series.len() <= 1 || keys.iter().all(Option::is_none) {
        return vec![AxisIndex::Primary; series.len()];
    }

    // (key, count) in first-seen order.
    let mut groups: Vec<(&Option<String>, usize)> = Vec::new();
    for key in &keys {
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => groups.push((key, 1)),
        }
    }

    let mut dominant = groups[0];
    for group in &groups[1..] {
        if group.1 > dominant.1 {
            dominant = *group;
        }
    }

    keys.iter()
        .map(|key| {
            if key == dominant.0 {
                AxisIndex::Primary
            } else {
                AxisIndex::Secondary
            }
        })
        .collect()
}
