//! Chart-family recommendation.
//!
//! Only the first rows are inspected. The rules are additive and evaluated in
//! a fixed order; the first three distinct families win.

use std::collections::HashSet;

use crate::convert::points::parse_value;
use crate::domain::{ChartKind, Scalar, Table};

const SAMPLE_ROWS: usize = 10;
const MAX_RECOMMENDATIONS: usize = 3;
/// A column is categorical when its distinct share is below this ratio.
const CATEGORICAL_RATIO: f64 = 0.7;

const TIME_HINTS: [&str; 7] = ["date", "datetime", "period", "time", "年", "月", "日"];

/// What the recommender saw in the sampled rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProfile {
    pub has_time_column: bool,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub has_negative_values: bool,
}

pub fn profile_table(table: &Table) -> TableProfile {
    let sample = &table.rows[..table.rows.len().min(SAMPLE_ROWS)];

    let has_time_column = table.fields.iter().any(|field| is_time_like(field));

    let present = |field: &str| -> Vec<&Scalar> {
        sample
            .iter()
            .filter_map(|row| row.get(field))
            .filter(|v| !v.is_null())
            .collect()
    };

    let mut numeric_columns = Vec::new();
    let mut categorical_columns = Vec::new();
    let mut has_negative_values = false;

    for field in &table.fields {
        let values = present(field);

        let numbers: Option<Vec<f64>> = values.iter().map(|v| parse_value(v)).collect();
        if let Some(numbers) = numbers.filter(|n| !n.is_empty()) {
            has_negative_values |= numbers.iter().any(|n| *n < 0.0);
            numeric_columns.push(field.clone());
        }

        let distinct: HashSet<String> = values.iter().map(|v| distinct_key(v)).collect();
        if distinct.len() > 1 && (distinct.len() as f64) < values.len() as f64 * CATEGORICAL_RATIO {
            categorical_columns.push(field.clone());
        }
    }

    TableProfile {
        has_time_column,
        numeric_columns,
        categorical_columns,
        has_negative_values,
    }
}

/// Up to three chart families suited to `table`, best first.
pub fn recommend_chart_kinds(table: &Table) -> Vec<ChartKind> {
    let profile = profile_table(table);
    let numeric = profile.numeric_columns.len();
    let categorical = !profile.categorical_columns.is_empty();

    let mut picks = Vec::new();
    if profile.has_time_column && numeric > 0 {
        picks.extend([ChartKind::Line, ChartKind::Area, ChartKind::Spline]);
        if numeric >= 2 {
            picks.push(ChartKind::Combo);
        }
    }
    if categorical && numeric > 0 {
        picks.extend([ChartKind::Column, ChartKind::StackedColumn]);
        if profile.has_negative_values {
            picks.push(ChartKind::Waterfall);
        }
    }
    if categorical && numeric == 1 {
        picks.extend([ChartKind::Pie, ChartKind::Donut]);
    }
    if numeric >= 2 {
        picks.push(ChartKind::Scatter);
    }
    if numeric >= 3 {
        picks.push(ChartKind::Bubble);
    }

    let mut seen = HashSet::new();
    picks.retain(|kind| seen.insert(*kind));
    picks.truncate(MAX_RECOMMENDATIONS);

    log::debug!("profile {profile:?} -> {picks:?}");
    picks
}

fn is_time_like(field: &str) -> bool {
    let lower = field.to_lowercase();
    TIME_HINTS.iter().any(|hint| lower.contains(hint))
}

fn distinct_key(value: &Scalar) -> String {
    match value {
        Scalar::Number(n) => format!("n:{n}"),
        Scalar::Bool(b) => format!("b:{b}"),
        Scalar::Text(s) => format!("s:{s}"),
        Scalar::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Row;

    fn table(fields: &[&str], rows: Vec<Vec<Scalar>>) -> Table {
        Table {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|cells| fields.iter().map(|f| f.to_string()).zip(cells).collect::<Row>())
                .collect(),
        }
    }

    #[test]
    fn time_series_with_two_metrics() {
        let t = table(
            &["Date", "gdp", "cpi"],
            vec![
                vec!["2024-01".into(), 1.0.into(), 2.0.into()],
                vec!["2024-02".into(), 1.5.into(), 2.1.into()],
            ],
        );
        assert_eq!(
            recommend_chart_kinds(&t),
            vec![ChartKind::Line, ChartKind::Area, ChartKind::Spline]
        );
        let profile = profile_table(&t);
        assert!(profile.has_time_column);
        // "2024-01" has a numeric prefix, so the date column counts too.
        assert_eq!(profile.numeric_columns, vec!["Date", "gdp", "cpi"]);
    }

    #[test]
    fn categories_with_one_metric() {
        let t = table(
            &["region", "sales"],
            vec![
                vec!["north".into(), 10.0.into()],
                vec!["north".into(), 12.0.into()],
                vec!["south".into(), 3.0.into()],
                vec!["south".into(), 4.0.into()],
            ],
        );
        assert_eq!(
            recommend_chart_kinds(&t),
            vec![ChartKind::Column, ChartKind::StackedColumn, ChartKind::Pie]
        );
    }

    #[test]
    fn negative_values_suggest_waterfall() {
        let t = table(
            &["step", "delta"],
            vec![
                vec!["a".into(), 10.0.into()],
                vec!["a".into(), (-4.0).into()],
                vec!["b".into(), 2.0.into()],
                vec!["b".into(), 2.0.into()],
            ],
        );
        let profile = profile_table(&t);
        assert!(profile.has_negative_values);
        assert_eq!(profile.categorical_columns, vec!["step"]);
        assert_eq!(
            recommend_chart_kinds(&t),
            vec![ChartKind::Column, ChartKind::StackedColumn, ChartKind::Waterfall]
        );
    }

    #[test]
    fn many_metrics_without_time_or_categories() {
        let t = table(
            &["x", "y", "z"],
            vec![
                vec![1.0.into(), 2.0.into(), 3.0.into()],
                vec![4.0.into(), 5.0.into(), 6.0.into()],
            ],
        );
        assert_eq!(recommend_chart_kinds(&t), vec![ChartKind::Scatter, ChartKind::Bubble]);
    }

    #[test]
    fn numeric_text_counts_as_numeric_but_nulls_are_ignored() {
        let t = table(
            &["period", "rate"],
            vec![vec!["Q1".into(), "3.5%".into()], vec!["Q2".into(), Scalar::Null]],
        );
        assert_eq!(profile_table(&t).numeric_columns, vec!["rate"]);
    }

    #[test]
    fn only_first_ten_rows_are_sampled() {
        let mut rows: Vec<Vec<Scalar>> = (0..10).map(|i| vec![f64::from(i).into()]).collect();
        rows.push(vec!["not a number".into()]);
        let t = table(&["v"], rows);
        assert_eq!(profile_table(&t).numeric_columns, vec!["v"]);
    }

    #[test]
    fn empty_table_has_no_recommendations() {
        assert!(recommend_chart_kinds(&Table::default()).is_empty());
    }
}
