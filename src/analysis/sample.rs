//! Sample preparation for AI requests.

use crate::domain::{Row, Scalar, Table};

/// Tables longer than this are sampled.
const LARGE_TABLE_ROWS: usize = 100;
const SAMPLE_ROWS: usize = 50;
const PRECISION: f64 = 10_000.0;

/// Rows to send upstream: the first 50 of a large table, numbers rounded to
/// four decimals. Non-numeric cells pass through untouched.
pub fn prepare_sample(table: &Table) -> Vec<Row> {
    let rows = if table.rows.len() > LARGE_TABLE_ROWS {
        &table.rows[..SAMPLE_ROWS]
    } else {
        &table.rows[..]
    };

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(key, value)| (key.clone(), round_cell(value)))
                .collect()
        })
        .collect()
}

fn round_cell(value: &Scalar) -> Scalar {
    match value {
        Scalar::Number(n) if n.is_finite() => Scalar::Number((n * PRECISION).round() / PRECISION),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(len: usize) -> Table {
        Table {
            fields: vec!["v".to_string()],
            rows: (0..len)
                .map(|i| Row::from([("v".to_string(), Scalar::Number(i as f64))]))
                .collect(),
        }
    }

    #[test]
    fn large_tables_are_cut_to_fifty_rows() {
        assert_eq!(prepare_sample(&table(101)).len(), 50);
        assert_eq!(prepare_sample(&table(100)).len(), 100);
        assert!(prepare_sample(&table(0)).is_empty());
    }

    #[test]
    fn numbers_are_rounded_to_four_decimals() {
        let t = Table {
            fields: vec!["a".to_string(), "b".to_string()],
            rows: vec![Row::from([
                ("a".to_string(), Scalar::Number(3.141_592_65)),
                ("b".to_string(), Scalar::from("3.14159265")),
            ])],
        };
        let out = prepare_sample(&t);
        assert_eq!(out[0]["a"], Scalar::Number(3.1416));
        assert_eq!(out[0]["b"], Scalar::from("3.14159265"));
    }
}
