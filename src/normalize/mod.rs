//! AI response normalization.
//!
//! The AI collaborator returns chart configuration as loosely formatted text.
//! This module:
//!
//! - extracts the JSON object from that text (`extract_json_object`)
//! - resolves formatter callbacks into templates (`formatter`)
//! - runs the time-series assembler when the response asks for it and splices
//!   the assembled series into the config

pub mod formatter;

use serde_json::{Map, Value};

use crate::assemble::assemble;
use crate::domain::{AssemblyInstruction, Row};
use crate::error::ResponseError;

pub use formatter::{FormatterField, FormatterTemplate, Render, resolve_formatters};

/// Sentinel: the response wants local assembly.
pub const ASSEMBLE_FLAG: &str = "_time_series_data";
/// The accompanying column mapping.
pub const INSTRUCTIONS_KEY: &str = "_assembly_instructions";
/// Set on the config after a successful assembly.
pub const ASSEMBLED_MARKER: &str = "_data_assembled";

/// What happened to the assembly request, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyStatus {
    NotRequested,
    Assembled { series: usize },
    Failed { reason: String },
}

/// A normalized config plus a record of what was changed.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub config: Value,
    pub assembly: AssemblyStatus,
    pub formatters_resolved: usize,
}

/// Pull the JSON object out of AI text.
///
/// Markdown fences and any prose around the outermost braces are ignored.
pub fn extract_json_object(text: &str) -> Result<Value, ResponseError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let unfenced = unfenced.trim_end().strip_suffix("```").unwrap_or(unfenced);

    let (Some(start), Some(end)) = (unfenced.find('{'), unfenced.rfind('}')) else {
        return Err(ResponseError::NoJsonObject);
    };
    if end < start {
        return Err(ResponseError::NoJsonObject);
    }

    let value: Value = serde_json::from_str(&unfenced[start..=end])?;
    if !value.is_object() {
        return Err(ResponseError::NotAnObject);
    }
    Ok(value)
}

/// Normalize an AI response against the full local dataset.
pub fn normalize(response: Value, rows: &[Row]) -> Value {
    normalize_with_report(response, rows).config
}

pub fn normalize_with_report(mut response: Value, rows: &[Row]) -> Normalized {
    let formatters_resolved = resolve_formatters(&mut response);

    let assembly = match response.as_object_mut() {
        Some(config) => apply_assembly(config, rows),
        None => AssemblyStatus::NotRequested,
    };

    Normalized {
        config: response,
        assembly,
        formatters_resolved,
    }
}

fn apply_assembly(config: &mut Map<String, Value>, rows: &[Row]) -> AssemblyStatus {
    let requested = config.remove(ASSEMBLE_FLAG).is_some_and(|flag| is_truthy(&flag));
    let instructions = config.remove(INSTRUCTIONS_KEY);
    if !requested {
        return AssemblyStatus::NotRequested;
    }

    let result = instructions
        .ok_or_else(|| format!("`{INSTRUCTIONS_KEY}` is missing"))
        .and_then(|raw| {
            serde_json::from_value::<AssemblyInstruction>(raw).map_err(|e| format!("invalid instructions: {e}"))
        })
        .and_then(|instruction| assemble(rows, &instruction).map_err(|e| e.to_string()))
        .and_then(|series| {
            let count = series.len();
            serde_json::to_value(series)
                .map(|value| (value, count))
                .map_err(|e| format!("could not encode series: {e}"))
        });

    match result {
        Ok((series, count)) => {
            log::info!("assembled {count} series from local data");
            config.insert("series".to_string(), series);
            config.insert(ASSEMBLED_MARKER.to_string(), Value::Bool(true));
            AssemblyStatus::Assembled { series: count }
        }
        Err(reason) => {
            log::warn!("time-series assembly failed, keeping the response's own series: {reason}");
            AssemblyStatus::Failed { reason }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
