//! Shared domain types.
//!
//! Inputs mirror what the upstream collaborators hand us (file-parsed tables,
//! backend time series, AI assembly instructions); outputs are the series
//! objects a charting layer consumes. Everything is serde-friendly so it can
//! be read from and written to JSON unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single cell or point field as produced by a file decoder or the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Bool(bool),
    Text(String),
    #[default]
    Null,
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// `true` for null and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// One table row keyed by column name.
pub type Row = BTreeMap<String, Scalar>;

/// A decoded table: header order plus rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub fields: Vec<String>,
    pub rows: Vec<Row>,
}

/// One observation of a time series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(default)]
    pub date: Scalar,
    #[serde(default)]
    pub value: Scalar,
}

impl RawPoint {
    pub fn new(date: impl Into<Scalar>, value: impl Into<Scalar>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// One input time series, as loaded from the search/load backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSeries {
    pub id: String,
    #[serde(default, alias = "name_tc", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// Unit code (`k`, `m`, `pct`, `bp`, ...). Drives Y-axis grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, alias = "data")]
    pub data_points: Vec<RawPoint>,
}

impl NamedSeries {
    pub fn new(id: impl Into<String>, data_points: Vec<RawPoint>) -> Self {
        Self {
            id: id.into(),
            data_points,
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Display label: `displayName` when present and non-empty, else `id`.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.id)
    }
}

/// The logical chart family requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Column,
    StackedColumn,
    Area,
    Pie,
    Scatter,
    Spline,
    Donut,
    Bubble,
    Waterfall,
    Combo,
}

impl ChartKind {
    pub const ALL: [ChartKind; 11] = [
        ChartKind::Line,
        ChartKind::Column,
        ChartKind::StackedColumn,
        ChartKind::Area,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::Spline,
        ChartKind::Donut,
        ChartKind::Bubble,
        ChartKind::Waterfall,
        ChartKind::Combo,
    ];

    /// Parse a family tag (`stacked_column`, `donut`, ...). Case-insensitive.
    pub fn parse(tag: &str) -> Option<ChartKind> {
        let tag = tag.trim();
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
    }

    pub fn tag(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Column => "column",
            ChartKind::StackedColumn => "stacked_column",
            ChartKind::Area => "area",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Spline => "spline",
            ChartKind::Donut => "donut",
            ChartKind::Bubble => "bubble",
            ChartKind::Waterfall => "waterfall",
            ChartKind::Combo => "combo",
        }
    }

    /// Human-readable label for menus and terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ChartKind::Line => "Line chart",
            ChartKind::Column => "Column chart",
            ChartKind::StackedColumn => "Stacked column chart",
            ChartKind::Area => "Area chart",
            ChartKind::Pie => "Pie chart",
            ChartKind::Scatter => "Scatter plot",
            ChartKind::Spline => "Smooth line chart",
            ChartKind::Donut => "Donut chart",
            ChartKind::Bubble => "Bubble chart",
            ChartKind::Waterfall => "Waterfall chart",
            ChartKind::Combo => "Combo chart",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Rendering primitive of a converted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Line,
    Spline,
    Area,
    Column,
    Pie,
    Scatter,
    Bubble,
}

impl SeriesType {
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesType::Line => "line",
            SeriesType::Spline => "spline",
            SeriesType::Area => "area",
            SeriesType::Column => "column",
            SeriesType::Pie => "pie",
            SeriesType::Scatter => "scatter",
            SeriesType::Bubble => "bubble",
        }
    }

    /// Map a family tag onto the primitive that draws it.
    ///
    /// Unknown tags fall back to `line`.
    pub fn from_family_tag(tag: &str) -> SeriesType {
        match ChartKind::parse(tag) {
            Some(ChartKind::Line) | None => SeriesType::Line,
            Some(ChartKind::Spline) => SeriesType::Spline,
            Some(ChartKind::Area) => SeriesType::Area,
            Some(ChartKind::Column | ChartKind::StackedColumn | ChartKind::Waterfall | ChartKind::Combo) => {
                SeriesType::Column
            }
            Some(ChartKind::Pie | ChartKind::Donut) => SeriesType::Pie,
            Some(ChartKind::Scatter) => SeriesType::Scatter,
            Some(ChartKind::Bubble) => SeriesType::Bubble,
        }
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output point. Always serialized as a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoint {
    /// `[timestampMillis, value]`
    Timed(i64, f64),
    /// `[x, y]` value pair (scatter).
    Pair(f64, f64),
    /// `[positionalIndex, value]` (bubble).
    Indexed(usize, f64),
    /// `[label, value]` (pie/donut).
    Slice(String, f64),
}

impl DataPoint {
    /// The y-component shared by every variant.
    pub fn value(&self) -> f64 {
        match self {
            DataPoint::Timed(_, v) | DataPoint::Pair(_, v) | DataPoint::Indexed(_, v) | DataPoint::Slice(_, v) => *v,
        }
    }
}

/// Y-axis slot. The engine never creates more than two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AxisIndex {
    #[default]
    Primary,
    Secondary,
}

impl From<AxisIndex> for u8 {
    fn from(value: AxisIndex) -> Self {
        match value {
            AxisIndex::Primary => 0,
            AxisIndex::Secondary => 1,
        }
    }
}

impl TryFrom<u8> for AxisIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AxisIndex::Primary),
            1 => Ok(AxisIndex::Secondary),
            other => Err(format!("y-axis index {other} out of range (0 or 1)")),
        }
    }
}

/// Output unit handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesType,
    pub data: Vec<DataPoint>,
    #[serde(rename = "yAxis", default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisIndex>,
    /// Donut hole size (e.g. `"60%"`).
    #[serde(rename = "innerSize", default, skip_serializing_if = "Option::is_none")]
    pub inner_size: Option<String>,
}

impl ConvertedSeries {
    pub fn new(name: impl Into<String>, kind: SeriesType, data: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            kind,
            data,
            y_axis: None,
            inner_size: None,
        }
    }

    pub fn on_axis(mut self, axis: AxisIndex) -> Self {
        self.y_axis = Some(axis);
        self
    }
}

/// Per-call converter options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Requested family tag; selects e.g. `area` vs `line`, `donut` vs `pie`.
    pub chart_type: Option<String>,
    /// Snapshot date for proportion charts. Defaults to the last shared date.
    pub target_date: Option<String>,
}

impl ConvertOptions {
    pub fn for_chart(tag: impl Into<String>) -> Self {
        Self {
            chart_type: Some(tag.into()),
            target_date: None,
        }
    }

    pub fn with_target_date(mut self, date: impl Into<String>) -> Self {
        self.target_date = Some(date.into());
        self
    }
}

/// How to slice one wide-table column into a named series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Column mapping supplied by the AI collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyInstruction {
    #[serde(default)]
    pub time_column: String,
    #[serde(default, alias = "seriesSpecs")]
    pub series: Vec<SeriesSpec>,
}

/// Output handling for a CLI run, derived from flags plus environment.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub output: Option<PathBuf>,
    pub pretty: bool,
    pub summary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_series_accepts_backend_aliases() {
        let json = r#"{"id":"GDP","name_tc":"Gross product","frequency":"Q","data":[{"date":"2023-01-01","value":"1.5"}]}"#;
        let series: NamedSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.label(), "Gross product");
        assert_eq!(series.data_points.len(), 1);
        assert_eq!(series.data_points[0].value, Scalar::Text("1.5".to_string()));
    }

    #[test]
    fn label_falls_back_to_id() {
        let series = NamedSeries::new("CPI", vec![]).with_display_name("  ");
        assert_eq!(series.label(), "CPI");
    }

    #[test]
    fn missing_point_fields_default_to_null() {
        let point: RawPoint = serde_json::from_str(r#"{"date":"2024-01-01"}"#).unwrap();
        assert!(point.value.is_null());
    }

    #[test]
    fn converted_series_serializes_as_chart_json() {
        let series = ConvertedSeries::new("A", SeriesType::Line, vec![DataPoint::Timed(1_700_000_000_000, 2.5)])
            .on_axis(AxisIndex::Secondary);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "A", "type": "line", "data": [[1_700_000_000_000_i64, 2.5]], "yAxis": 1})
        );
    }

    #[test]
    fn axis_index_rejects_third_axis() {
        assert!(serde_json::from_str::<AxisIndex>("2").is_err());
        assert_eq!(serde_json::from_str::<AxisIndex>("1").unwrap(), AxisIndex::Secondary);
    }

    #[test]
    fn family_tags_map_to_primitives() {
        assert_eq!(SeriesType::from_family_tag("stacked_column"), SeriesType::Column);
        assert_eq!(SeriesType::from_family_tag("donut"), SeriesType::Pie);
        assert_eq!(SeriesType::from_family_tag("AREA"), SeriesType::Area);
        assert_eq!(SeriesType::from_family_tag("radar"), SeriesType::Line);
    }

    #[test]
    fn assembly_instruction_accepts_series_specs_alias() {
        let json = r#"{"timeColumn":"date","seriesSpecs":[{"column":"gdp","name":"GDP","type":"line"}]}"#;
        let instr: AssemblyInstruction = serde_json::from_str(json).unwrap();
        assert_eq!(instr.time_column, "date");
        assert_eq!(instr.series[0].kind, "line");
    }
}
