//! CLI error type. Printed as `{"code": ..., "message": ...}` on stdout so
//! scripted callers see failures in the same JSON stream.

use money_input_field::FieldError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad arguments or script tokens.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] FieldError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "USAGE",
            CliError::Config(_) => "CONFIG",
            CliError::Output(_) => "OUTPUT",
        }
    }
}

/// JSON shape of a failure.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
}

impl From<&CliError> for ErrorReport {
    fn from(err: &CliError) -> Self {
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
