//! Shared workflows behind the CLI commands.
//!
//! Each workflow is load -> transform and returns plain data; printing and
//! writing stay in `app` so these are testable without touching stdout.

use std::path::Path;

use crate::analysis::{prepare_sample, recommend_chart_kinds};
use crate::assemble::assemble;
use crate::convert::{pie, registry};
use crate::domain::{ChartKind, ConvertedSeries, Row};
use crate::error::AppError;
use crate::io::ingest::{TableIngest, read_instruction_json, read_series_json, read_table_csv, read_text};
use crate::normalize::{Normalized, extract_json_object, normalize_with_report};

/// Outputs of a `convert` run.
#[derive(Debug, Clone)]
pub struct ConvertRun {
    pub converter: &'static str,
    pub inputs: usize,
    pub series: Vec<ConvertedSeries>,
}

pub fn run_convert(input: &Path, chart_type: &str, target_date: Option<&str>) -> Result<ConvertRun, AppError> {
    let series = read_series_json(input)?;
    let registry = registry();
    let converter = registry.get_converter(chart_type);

    log::info!("converting {} series as '{chart_type}' with {converter}", series.len());
    let output = registry.convert(chart_type, &series, target_date)?;

    Ok(ConvertRun {
        converter: converter.name(),
        inputs: series.len(),
        series: output,
    })
}

/// Dates shared by every series in `input`, ascending.
pub fn run_dates(input: &Path) -> Result<Vec<String>, AppError> {
    let series = read_series_json(input)?;
    Ok(pie::available_dates(&series))
}

/// Outputs of an `assemble` run.
#[derive(Debug, Clone)]
pub struct AssembleRun {
    pub ingest: TableIngest,
    pub series: Vec<ConvertedSeries>,
}

pub fn run_assemble(table: &Path, instructions: &Path) -> Result<AssembleRun, AppError> {
    let instruction = read_instruction_json(instructions)?;
    let ingest = read_table_csv(table)?;
    let series = assemble(&ingest.table.rows, &instruction)?;
    log::info!("assembled {} series from {} rows", series.len(), ingest.table.rows.len());
    Ok(AssembleRun { ingest, series })
}

pub fn run_normalize(response: &Path, table: &Path) -> Result<Normalized, AppError> {
    let text = read_text(response)?;
    let config = extract_json_object(&text)?;
    let ingest = read_table_csv(table)?;
    Ok(normalize_with_report(config, &ingest.table.rows))
}

pub fn run_recommend(table: &Path) -> Result<Vec<ChartKind>, AppError> {
    let ingest = read_table_csv(table)?;
    Ok(recommend_chart_kinds(&ingest.table))
}

pub fn run_sample(table: &Path) -> Result<Vec<Row>, AppError> {
    let ingest = read_table_csv(table)?;
    let sample = prepare_sample(&ingest.table);
    log::info!("prepared {} of {} rows", sample.len(), ingest.table.rows.len());
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AxisIndex, DataPoint, SeriesType};
    use crate::normalize::AssemblyStatus;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const SERIES: &str = r#"{"time_series": [
        {"id": "GDP", "units": "b", "currency": "usd",
         "dataPoints": [{"date": "2024-01-01", "value": "1.5"}, {"date": "2024-02-01", "value": 2}]},
        {"id": "CPI", "units": "pct",
         "dataPoints": [{"date": "2024-01-01", "value": 3.1}, {"date": "2024-02-01", "value": null}]}
    ]}"#;

    #[test]
    fn convert_line_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "series.json", SERIES);
        let run = run_convert(&input, "area", None).unwrap();
        assert_eq!(run.converter, "LineConverter");
        assert_eq!(run.inputs, 2);
        assert_eq!(run.series[0].kind, SeriesType::Area);
        assert_eq!(run.series[0].data.len(), 2);
        assert_eq!(run.series[1].data.len(), 1);
        assert_eq!(run.series[0].y_axis, Some(AxisIndex::Primary));
        assert_eq!(run.series[1].y_axis, Some(AxisIndex::Secondary));
    }

    #[test]
    fn convert_errors_surface_with_exit_code_3() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "one.json", r#"[{"id": "A", "data": [{"date": "2024-01-01", "value": 1}]}]"#);
        let err = run_convert(&input, "scatter", None).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn dates_lists_common_dates() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "series.json", SERIES);
        assert_eq!(run_dates(&input).unwrap(), vec!["2024-01-01", "2024-02-01"]);
    }

    #[test]
    fn assemble_from_files() {
        let dir = TempDir::new().unwrap();
        let table = write(&dir, "t.csv", "date,gdp\n2023-11-14,1.5\nbad,2\n");
        let instr = write(
            &dir,
            "i.json",
            r#"{"timeColumn": "date", "series": [{"column": "gdp", "name": "GDP", "type": "column"}]}"#,
        );
        let run = run_assemble(&table, &instr).unwrap();
        assert_eq!(run.ingest.rows_read, 2);
        assert_eq!(run.series[0].data, vec![DataPoint::Timed(1_699_920_000_000, 1.5)]);
    }

    #[test]
    fn normalize_from_files() {
        let dir = TempDir::new().unwrap();
        let table = write(&dir, "t.csv", "date,gdp\n2023-11-14,1.5\n");
        let response = write(
            &dir,
            "r.txt",
            "```json\n{\"_time_series_data\": true, \"_assembly_instructions\": {\"timeColumn\": \"date\", \"series\": [{\"column\": \"gdp\", \"name\": \"GDP\", \"type\": \"line\"}]}}\n```",
        );
        let report = run_normalize(&response, &table).unwrap();
        assert_eq!(report.assembly, AssemblyStatus::Assembled { series: 1 });
        assert_eq!(report.config["_data_assembled"], serde_json::json!(true));
    }

    #[test]
    fn unusable_response_is_exit_code_4() {
        let dir = TempDir::new().unwrap();
        let table = write(&dir, "t.csv", "date,gdp\n2023-11-14,1.5\n");
        let response = write(&dir, "r.txt", "Sorry, I cannot help with that.");
        assert_eq!(run_normalize(&response, &table).unwrap_err().exit_code(), 4);
    }

    #[test]
    fn recommend_and_sample_from_csv() {
        let dir = TempDir::new().unwrap();
        let table = write(&dir, "t.csv", "period,sales\n2024-01,1.23456\n2024-02,2\n");
        assert_eq!(
            run_recommend(&table).unwrap(),
            vec![ChartKind::Line, ChartKind::Area, ChartKind::Spline]
        );
        let sample = run_sample(&table).unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0]["sales"], crate::domain::Scalar::Number(1.2346));
    }
}
