//! Input/output helpers.
//!
//! - CSV table + series/instruction JSON ingest (`ingest`)
//! - JSON output to a file or stdout (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
