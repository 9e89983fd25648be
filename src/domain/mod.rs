//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - input records (`Scalar`, `Row`, `Table`, `RawPoint`, `NamedSeries`)
//! - chart vocabulary (`ChartKind` family tags, `SeriesType` primitives)
//! - conversion outputs (`ConvertedSeries`, `DataPoint`, `AxisIndex`)
//! - the AI assembly contract (`AssemblyInstruction`, `SeriesSpec`)

pub mod types;

pub use types::*;
