//! Wide-table time-series assembly.
//!
//! Large tables are not sent to the AI collaborator; it only returns a
//! column mapping (`AssemblyInstruction`) and the expansion into series
//! happens here.
//!
//! Row-level problems (bad timestamps, blank or non-numeric values) skip the
//! row for that series. Only a malformed instruction is an error.

use crate::convert::points::{normalize_epoch, parse_timestamp, parse_value};
use crate::domain::{AssemblyInstruction, ConvertedSeries, DataPoint, Row, Scalar, SeriesSpec, SeriesType};
use crate::error::ConvertError;

/// Expand `rows` into one series per instruction entry.
pub fn assemble(rows: &[Row], instruction: &AssemblyInstruction) -> Result<Vec<ConvertedSeries>, ConvertError> {
    validate_instruction(instruction)?;
    if rows.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    // Timestamps are shared by every series; resolve them once per row.
    let timestamps: Vec<Option<i64>> = rows
        .iter()
        .map(|row| row.get(&instruction.time_column).and_then(resolve_row_time))
        .collect();

    let bad_times = timestamps.iter().filter(|t| t.is_none()).count();
    if bad_times > 0 {
        log::warn!(
            "{bad_times} of {} rows have no usable '{}' timestamp and were skipped",
            rows.len(),
            instruction.time_column
        );
    }

    Ok(instruction
        .series
        .iter()
        .map(|spec| assemble_series(rows, &timestamps, spec))
        .collect())
}

fn assemble_series(rows: &[Row], timestamps: &[Option<i64>], spec: &SeriesSpec) -> ConvertedSeries {
    let data: Vec<DataPoint> = rows
        .iter()
        .zip(timestamps)
        .filter_map(|(row, ts)| {
            let ts = (*ts)?;
            let value = row.get(&spec.column).filter(|v| !v.is_blank()).and_then(parse_value)?;
            Some(DataPoint::Timed(ts, value))
        })
        .collect();

    log::debug!(
        "assembled '{}' from column '{}': {} of {} rows",
        spec.name,
        spec.column,
        data.len(),
        rows.len()
    );

    ConvertedSeries::new(spec.name.clone(), SeriesType::from_family_tag(&spec.kind), data)
}

/// Row time value to epoch millis.
///
/// Numbers must sit in the epoch-seconds or epoch-millis range; other
/// truthy values go through generic date parsing.
pub fn resolve_row_time(value: &Scalar) -> Option<i64> {
    match value {
        Scalar::Number(n) => normalize_epoch(*n),
        Scalar::Text(s) => parse_timestamp(s),
        Scalar::Bool(_) | Scalar::Null => None,
    }
}

fn validate_instruction(instruction: &AssemblyInstruction) -> Result<(), ConvertError> {
    if instruction.time_column.trim().is_empty() {
        return Err(ConvertError::InvalidInstruction {
            reason: "missing `timeColumn`".to_string(),
        });
    }
    if instruction.series.is_empty() {
        return Err(ConvertError::InvalidInstruction {
            reason: "no series specs".to_string(),
        });
    }
    for (idx, spec) in instruction.series.iter().enumerate() {
        if spec.column.trim().is_empty() {
            return Err(ConvertError::InvalidInstruction {
                reason: format!("series #{idx} has no `column`"),
            });
        }
        if spec.name.trim().is_empty() {
            return Err(ConvertError::InvalidInstruction {
                reason: format!("series #{idx} has no `name`"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: Scalar, gdp: Scalar, cpi: Scalar) -> Row {
        Row::from([
            ("date".to_string(), time),
            ("gdp".to_string(), gdp),
            ("cpi".to_string(), cpi),
        ])
    }

    fn instruction() -> AssemblyInstruction {
        AssemblyInstruction {
            time_column: "date".to_string(),
            series: vec![
                SeriesSpec {
                    column: "gdp".to_string(),
                    name: "GDP".to_string(),
                    kind: "column".to_string(),
                },
                SeriesSpec {
                    column: "cpi".to_string(),
                    name: "Inflation".to_string(),
                    kind: "spline".to_string(),
                },
            ],
        }
    }

    #[test]
    fn time_values_normalize_to_millis() {
        assert_eq!(resolve_row_time(&Scalar::Number(1_700_000_000.0)), Some(1_700_000_000_000));
        assert_eq!(resolve_row_time(&Scalar::Number(1_700_000_000_000.0)), Some(1_700_000_000_000));
        assert_eq!(resolve_row_time(&Scalar::from("2023-11-14")), Some(1_699_920_000_000));
        assert_eq!(resolve_row_time(&Scalar::from("not-a-date")), None);
        assert_eq!(resolve_row_time(&Scalar::Number(12345.0)), None);
        assert_eq!(resolve_row_time(&Scalar::Bool(true)), None);
        assert_eq!(resolve_row_time(&Scalar::Null), None);
    }

    #[test]
    fn written_and_us_style_dates_assemble() {
        let rows = vec![
            row("11/14/2023".into(), 1.0.into(), 1.0.into()),
            row("Nov 14, 2023".into(), 2.0.into(), 2.0.into()),
            row("14 Nov 2023".into(), 3.0.into(), 3.0.into()),
        ];
        let out = assemble(&rows, &instruction()).unwrap();
        assert_eq!(
            out[0].data,
            vec![
                DataPoint::Timed(1_699_920_000_000, 1.0),
                DataPoint::Timed(1_699_920_000_000, 2.0),
                DataPoint::Timed(1_699_920_000_000, 3.0),
            ]
        );
    }

    #[test]
    fn rows_failing_either_step_are_omitted() {
        let rows = vec![
            row(Scalar::Number(1_700_000_000.0), "1.5".into(), 2.0.into()),
            row("not-a-date".into(), 9.0.into(), 9.0.into()),
            row(Scalar::Number(1_700_000_000_000.0), "".into(), "x".into()),
            row("2023-11-14".into(), 3.0.into(), Scalar::Null),
        ];
        let out = assemble(&rows, &instruction()).unwrap();
        assert_eq!(out.len(), 2);

        assert_eq!(out[0].name, "GDP");
        assert_eq!(out[0].kind, SeriesType::Column);
        assert_eq!(
            out[0].data,
            vec![
                DataPoint::Timed(1_700_000_000_000, 1.5),
                DataPoint::Timed(1_699_920_000_000, 3.0),
            ]
        );

        assert_eq!(out[1].kind, SeriesType::Spline);
        assert_eq!(out[1].data, vec![DataPoint::Timed(1_700_000_000_000, 2.0)]);
    }

    #[test]
    fn missing_column_yields_empty_series() {
        let rows = vec![row("2023-11-14".into(), 1.0.into(), 1.0.into())];
        let mut instr = instruction();
        instr.series[0].column = "exports".to_string();
        let out = assemble(&rows, &instr).unwrap();
        assert!(out[0].data.is_empty());
    }

    #[test]
    fn malformed_instruction_is_an_error() {
        let rows = vec![row("2023-11-14".into(), 1.0.into(), 1.0.into())];

        let mut instr = instruction();
        instr.time_column = " ".to_string();
        assert!(matches!(assemble(&rows, &instr), Err(ConvertError::InvalidInstruction { .. })));

        let mut instr = instruction();
        instr.series.clear();
        assert!(matches!(assemble(&rows, &instr), Err(ConvertError::InvalidInstruction { .. })));

        let mut instr = instruction();
        instr.series[1].name.clear();
        assert!(matches!(assemble(&rows, &instr), Err(ConvertError::InvalidInstruction { .. })));
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(assemble(&[], &instruction()), Err(ConvertError::EmptyInput));
    }
}
