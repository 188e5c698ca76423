//! Error reporting for `--json` mode.

use crate::cli::literal::LiteralError;
use nullable_db::{CoercionError, ProjectionError, ShapeParseError};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonError {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

/// Stable machine-readable name for the root cause of `err`.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(err) = err.downcast_ref::<CoercionError>() {
        return match err {
            CoercionError::NullUnsupported { .. } => "null_unsupported",
            CoercionError::ConversionFailed { .. } => "conversion_failed",
            CoercionError::UnsupportedConversion { .. } => "unsupported_conversion",
            CoercionError::NotAPointer { .. } => "not_a_pointer",
            CoercionError::Custom(_) => "coercion_failed",
        };
    }
    if let Some(err) = err.downcast_ref::<ProjectionError>() {
        return match err {
            ProjectionError::MagnitudeOverflow { .. } => "magnitude_overflow",
            ProjectionError::Custom(_) => "projection_failed",
        };
    }
    if err.downcast_ref::<ShapeParseError>().is_some() {
        return "invalid_shape";
    }
    if err.downcast_ref::<LiteralError>().is_some() {
        return "invalid_literal";
    }
    "error"
}

/// Print `err` to stdout as `{"error": {"kind": ..., "message": ...}}`.
pub fn print_json_error(err: &anyhow::Error) {
    let payload = JsonError {
        error: ErrorBody {
            kind: error_kind(err),
            message: format!("{:#}", err),
        },
    };
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => println!("{}", text),
        Err(_) => eprintln!("Error: {:#}", err),
    }
}
