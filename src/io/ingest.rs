//! Ingest for tables, series and instruction files.
//!
//! This module stands in for the upstream collaborators:
//! - the file decoder (CSV → `Table` with dynamically typed cells)
//! - the search/load backend (JSON → `Vec<NamedSeries>`)
//! - the AI collaborator (assembly instructions and raw response text)
//!
//! Malformed CSV records are collected as row errors and skipped. Only an
//! unreadable file or an empty table is fatal (exit code 2).

use std::fs::{self, File};
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;

use crate::domain::{AssemblyInstruction, NamedSeries, Row, Scalar, Table};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: decoded table + what was skipped.
#[derive(Debug, Clone)]
pub struct TableIngest {
    pub table: Table,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load a CSV file into a `Table`.
pub fn read_table_csv(path: &Path) -> Result<TableIngest, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let fields = header_names(&headers);
    if fields.iter().all(String::is_empty) {
        return Err(AppError::new(2, format!("CSV '{}' has no header row.", path.display())));
    }

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        match result {
            Ok(record) => rows.push(decode_row(&record, &fields)),
            Err(e) => row_errors.push(RowError {
                line,
                message: format!("CSV parse error: {e}"),
            }),
        }
    }

    if rows.is_empty() {
        return Err(AppError::new(2, format!("CSV '{}' contains no data rows.", path.display())));
    }
    if !row_errors.is_empty() {
        log::warn!("skipped {} malformed CSV records in '{}'", row_errors.len(), path.display());
    }
    log::info!("read {} rows x {} columns from '{}'", rows.len(), fields.len(), path.display());

    Ok(TableIngest {
        table: Table { fields, rows },
        row_errors,
        rows_read,
    })
}

fn header_names(headers: &StringRecord) -> Vec<String> {
    headers.iter().map(normalize_header_name).collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel UTF-8 exports prefix the first header with a BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn decode_row(record: &StringRecord, fields: &[String]) -> Row {
    fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.is_empty())
        .map(|(idx, field)| (field.clone(), decode_cell(record.get(idx).unwrap_or(""))))
        .collect()
}

/// Dynamic typing of one CSV cell.
pub fn decode_cell(raw: &str) -> Scalar {
    let s = raw.trim();
    if s.is_empty() {
        return Scalar::Null;
    }
    match s {
        "true" | "TRUE" | "True" => return Scalar::Bool(true),
        "false" | "FALSE" | "False" => return Scalar::Bool(false),
        _ => {}
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Scalar::Number(n),
        _ => Scalar::Text(s.to_string()),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeriesDocument {
    Bare(Vec<NamedSeries>),
    Loaded { time_series: Vec<NamedSeries> },
}

/// Load series JSON: a bare array or a backend `{ "time_series": [...] }` body.
pub fn read_series_json(path: &Path) -> Result<Vec<NamedSeries>, AppError> {
    let text = read_text(path)?;
    let doc: SeriesDocument = serde_json::from_str(&text)
        .map_err(|e| AppError::new(2, format!("Invalid series JSON '{}': {e}", path.display())))?;
    let series = match doc {
        SeriesDocument::Bare(series) | SeriesDocument::Loaded { time_series: series } => series,
    };
    log::info!("loaded {} series from '{}'", series.len(), path.display());
    Ok(series)
}

pub fn read_instruction_json(path: &Path) -> Result<AssemblyInstruction, AppError> {
    let text = read_text(path)?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::new(2, format!("Invalid assembly instructions '{}': {e}", path.display())))
}

pub fn read_text(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))
}
