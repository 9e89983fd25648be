//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the requested workflow (`pipeline`)
//! - writes JSON to stdout or `--output`, summaries to stderr

use clap::Parser;

use crate::cli::{AssembleArgs, Cli, Command, ConvertArgs, NormalizeArgs, OutputArgs, SampleArgs};
use crate::convert::registry;
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::io::export::write_json;
use crate::report;

pub mod pipeline;

/// Log filter variable (`env_logger` syntax).
pub const LOG_ENV: &str = "CHARTCONV_LOG";
/// Pretty-print JSON output unless set to `0`/`false`/`no`/`off`.
pub const PRETTY_ENV: &str = "CHARTCONV_PRETTY";

/// Entry point for the `chartconv` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => handle_convert(args),
        Command::Dates(args) => {
            for date in pipeline::run_dates(&args.input)? {
                println!("{date}");
            }
            Ok(())
        }
        Command::Assemble(args) => handle_assemble(args),
        Command::Normalize(args) => handle_normalize(args),
        Command::Recommend(args) => {
            let kinds = pipeline::run_recommend(&args.table)?;
            print!("{}", report::format_recommendations(&kinds));
            Ok(())
        }
        Command::Sample(args) => handle_sample(args),
        Command::Types => {
            for tag in registry().supported_types() {
                println!("{tag}");
            }
            Ok(())
        }
    }
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or(LOG_ENV, "warn");
    // A second init (e.g. in tests) is harmless.
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

fn handle_convert(args: ConvertArgs) -> Result<(), AppError> {
    let config = run_config(&args.output, args.summary);
    let run = pipeline::run_convert(&args.input, &args.chart_type, args.target_date.as_deref())?;

    if config.summary {
        let title = format!("{} via {} ({} inputs)", args.chart_type, run.converter, run.inputs);
        eprint!("{}", report::format_series_summary(&title, &run.series));
    }
    write_json(&run.series, &config)
}

fn handle_assemble(args: AssembleArgs) -> Result<(), AppError> {
    let config = run_config(&args.output, args.summary);
    let run = pipeline::run_assemble(&args.table, &args.instructions)?;

    if config.summary {
        let title = format!("assembled from {} rows", run.ingest.rows_read);
        eprint!("{}", report::format_series_summary(&title, &run.series));
        if !run.ingest.row_errors.is_empty() {
            eprintln!("Skipped records:");
            eprint!("{}", report::format_row_errors(&run.ingest.row_errors));
        }
    }
    write_json(&run.series, &config)
}

fn handle_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    let config = run_config(&args.output, args.summary);
    let normalized = pipeline::run_normalize(&args.response, &args.table)?;

    if config.summary {
        eprint!("{}", report::format_normalize_report(&normalized));
    }
    write_json(&normalized.config, &config)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = run_config(&args.output, false);
    let sample = pipeline::run_sample(&args.table)?;
    write_json(&sample, &config)
}

/// Resolve output settings from flags plus environment.
pub fn run_config(output: &OutputArgs, summary: bool) -> RunConfig {
    let env_pretty = std::env::var(PRETTY_ENV).ok();
    RunConfig {
        output: output.output.clone(),
        pretty: !output.compact && parse_flag(env_pretty.as_deref(), true),
        summary,
    }
}

/// Boolean environment flag; unset or unrecognised values use `default`.
pub fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
