//! Error types for the value adapter.
//!
//! Coercion (storage read) and projection (storage write) each have their own
//! error enum. `DbError` aggregates both for callers working at row level.

use crate::shape::{Kind, Shape};
use std::fmt;
use thiserror::Error;

/// Result type for row-level operations.
pub type Result<T> = std::result::Result<T, DbError>;

/// Why a bounded base-10 parse rejected its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// Not a literal of the requested numeric family.
    InvalidSyntax,
    /// A well-formed literal that does not fit the requested width.
    OutOfRange,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::InvalidSyntax => write!(f, "invalid syntax"),
            ParseFailure::OutOfRange => write!(f, "value out of range"),
        }
    }
}

/// Errors from storing a source value into a typed destination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    /// NULL cannot be stored in a non-nullable destination.
    #[error("converting NULL to {destination} is unsupported")]
    NullUnsupported { destination: Shape },

    /// The source was stringified but did not parse as the destination.
    #[error("converting source type {source_type} ({attempted:?}) to a {destination}: {cause}")]
    ConversionFailed {
        source_type: Kind,
        attempted: String,
        destination: Shape,
        cause: ParseFailure,
    },

    /// No coercion rule connects the two shapes.
    #[error("unsupported scan, storing source type {source_type} into type {destination}")]
    UnsupportedConversion { source_type: Kind, destination: Shape },

    /// The destination handle rejected the coerced slot.
    #[error("destination {destination} cannot hold a {slot} slot")]
    NotAPointer {
        destination: &'static str,
        slot: &'static str,
    },

    /// Failure reported by a destination type's own scan hook.
    #[error("{0}")]
    Custom(String),
}

impl CoercionError {
    /// Create an error for a custom scan hook.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub(crate) fn not_a_pointer(destination: &'static str, slot: &'static str) -> Self {
        Self::NotAPointer { destination, slot }
    }
}

/// Errors from producing a wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Unsigned value larger than the widest wire integer.
    #[error("unsigned value {value} exceeds the largest wire integer {limit}")]
    MagnitudeOverflow { value: u64, limit: i64 },

    /// Failure reported by a value type's own projection hook.
    #[error("{0}")]
    Custom(String),
}

impl ProjectionError {
    /// Create an error for a custom projection hook.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// Row-level errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Reading a column failed
    #[error("Coercion error: {0}")]
    Coercion(#[from] CoercionError),

    /// Building a row value failed
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Column index past the end of the row
    #[error("Column index {index} out of bounds for row of {len} columns")]
    ColumnIndex { index: usize, len: usize },

    /// No column with this name
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// Row shape does not match its column list
    #[error("Row has {columns} columns but {values} values")]
    ColumnCount { columns: usize, values: usize },
}

impl DbError {
    /// Create a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::IntWidth;

    #[test]
    fn test_conversion_failed_display() {
        let err = CoercionError::ConversionFailed {
            source_type: Kind::Text,
            attempted: "300".to_string(),
            destination: Shape::Int(IntWidth::W8),
            cause: ParseFailure::OutOfRange,
        };
        let msg = err.to_string();
        assert!(msg.contains("text"));
        assert!(msg.contains("\"300\""));
        assert!(msg.contains("int8"));
        assert!(msg.contains("value out of range"));
    }

    #[test]
    fn test_null_unsupported_display() {
        let err = CoercionError::NullUnsupported {
            destination: Shape::Uint(IntWidth::W16),
        };
        assert_eq!(err.to_string(), "converting NULL to uint16 is unsupported");
    }

    #[test]
    fn test_magnitude_overflow_display() {
        let err = ProjectionError::MagnitudeOverflow {
            value: u64::MAX,
            limit: i64::MAX,
        };
        let msg = err.to_string();
        assert!(msg.contains("18446744073709551615"));
        assert!(msg.contains("9223372036854775807"));
    }

    #[test]
    fn test_db_error_from_coercion() {
        let err: DbError = CoercionError::custom("bad money").into();
        assert!(matches!(err, DbError::Coercion(CoercionError::Custom(_))));
        assert!(err.to_string().contains("bad money"));
    }
}
