//! JSON output.
//!
//! Results go to `--output` when given, otherwise to stdout. Pretty printing
//! follows `RunConfig::pretty`.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use serde::Serialize;

use crate::domain::RunConfig;
use crate::error::AppError;

/// Serialize `value` according to the run's output settings.
pub fn write_json<T: Serialize + ?Sized>(value: &T, config: &RunConfig) -> Result<(), AppError> {
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| AppError::new(2, format!("Failed to create output '{}': {e}", path.display())))?;
            write_to(BufWriter::new(file), value, config.pretty)?;
            log::info!("wrote {}", path.display());
            Ok(())
        }
        None => write_to(io::stdout().lock(), value, config.pretty),
    }
}

fn write_to<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T, pretty: bool) -> Result<(), AppError> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    };
    result.map_err(|e| AppError::new(2, format!("Failed to write JSON: {e}")))?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write JSON: {e}")))
}
