//! Command-line parsing for the chart series converter.
//!
//! Argument parsing stays here; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "chartconv", version, about = "Convert time series and tables into chart series JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert series JSON into chart series for one chart family.
    Convert(ConvertArgs),
    /// List dates present in every input series (for pie/donut snapshots).
    Dates(DatesArgs),
    /// Expand a wide CSV table into series using assembly instructions.
    Assemble(AssembleArgs),
    /// Extract and normalize an AI chart-config response against a CSV table.
    Normalize(NormalizeArgs),
    /// Recommend chart families for a CSV table.
    Recommend(TableArgs),
    /// Print the rows that would be sent upstream for a CSV table.
    Sample(SampleArgs),
    /// List supported chart family tags.
    Types,
}

/// Output options shared by commands that emit JSON.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Write JSON here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Force compact JSON regardless of `CHARTCONV_PRETTY`.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ConvertArgs {
    /// Series JSON: an array of series or `{"time_series": [...]}`.
    #[arg(short, long, value_name = "JSON")]
    pub input: PathBuf,

    /// Chart family tag (line, column, stacked_column, area, pie, ...).
    #[arg(short = 't', long)]
    pub chart_type: String,

    /// Snapshot date for pie/donut charts; defaults to the last common date.
    #[arg(long, value_name = "DATE")]
    pub target_date: Option<String>,

    /// Print a per-series summary table to stderr.
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DatesArgs {
    /// Series JSON: an array of series or `{"time_series": [...]}`.
    #[arg(short, long, value_name = "JSON")]
    pub input: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct AssembleArgs {
    /// CSV table with a time column and one column per metric.
    #[arg(long, value_name = "CSV")]
    pub table: PathBuf,

    /// Assembly instructions JSON (`timeColumn` + `series`).
    #[arg(long, value_name = "JSON")]
    pub instructions: PathBuf,

    /// Print a per-series summary table to stderr.
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct NormalizeArgs {
    /// Raw AI response text (may include Markdown fences or prose).
    #[arg(long, value_name = "FILE")]
    pub response: PathBuf,

    /// The full local CSV table the response was generated for.
    #[arg(long, value_name = "CSV")]
    pub table: PathBuf,

    /// Print what normalization changed to stderr.
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[arg(long, value_name = "CSV")]
    pub table: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    #[arg(long, value_name = "CSV")]
    pub table: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}
