//! `chart-series` library crate.
//!
//! Turns backend time series, local tables and AI chart-config responses into
//! chart-ready series. The binary (`chartconv`) is a thin wrapper so that:
//!
//! - core logic is testable without spawning processes
//! - the conversion engine is reusable from other front-ends

pub mod analysis;
pub mod app;
pub mod assemble;
pub mod cli;
pub mod convert;
pub mod domain;
pub mod error;
pub mod io;
pub mod normalize;
pub mod report;
