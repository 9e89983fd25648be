//! Error types.
//!
//! Two layers:
//!
//! - engine errors (`ConvertError`, `ResponseError`) are typed so callers can
//!   react to a specific failure (e.g. offer a date picker on `NoCommonDate`)
//! - `AppError` is the CLI boundary: a message plus the process exit code
//!
//! Exit codes: `2` input/config problems, `3` conversion failures,
//! `4` unusable AI responses.

use thiserror::Error;

/// A fatal condition for a single conversion call.
///
/// Individual malformed points are never reported here; they are dropped
/// silently by the converters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("No input series to convert.")]
    EmptyInput,

    #[error("Scatter charts need exactly 2 series, got {count}.")]
    WrongSeriesCount { count: usize },

    #[error("Series '{name}' has no data points.")]
    IncompleteData { name: String },

    #[error("Frequency mismatch: {left} vs {right}; pick series with the same frequency.")]
    FrequencyMismatch { left: String, right: String },

    #[error("Series '{left}' and '{right}' share no dates.")]
    NoOverlap { left: String, right: String },

    #[error("No aligned numeric pairs between '{left}' and '{right}'.")]
    NoValidPairs { left: String, right: String },

    #[error("Input series share no common date.")]
    NoCommonDate,

    #[error("No positive values found at {date}.")]
    NoDataAtDate { date: String },

    #[error("Invalid assembly instruction: {reason}")]
    InvalidInstruction { reason: String },
}

/// Failure to turn AI-collaborator text into a configuration object.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("AI response contains no JSON object.")]
    NoJsonObject,

    #[error("AI response JSON is invalid: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("AI response is not a JSON object.")]
    NotAnObject,
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl From<ResponseError> for AppError {
    fn from(err: ResponseError) -> Self {
        AppError::new(4, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
