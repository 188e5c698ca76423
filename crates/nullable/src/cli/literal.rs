//! Source literals given on the command line.
//!
//! Literals are `<type>:<value>`, or bare `null`:
//!
//! | Literal | Source value |
//! |---------|--------------|
//! | `null` | null |
//! | `int:-5` | signed integer |
//! | `uint:7` | unsigned integer |
//! | `real:1.5` / `real32:1.5` | 64/32-bit float |
//! | `bool:true` | boolean |
//! | `text:42` | text |
//! | `bytes:fffe` | hex-encoded bytes |
//! | `ts:2024-01-01T00:00:00Z` | RFC3339 timestamp |

use nullable_db::{DbTimestamp, SourceValue};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiteralError {
    #[error("missing type prefix in '{0}' (expected e.g. int:5, text:hello or null)")]
    MissingPrefix(String),

    #[error("unknown literal type '{0}'")]
    UnknownType(String),

    #[error("invalid {kind} literal '{value}'")]
    InvalidValue { kind: &'static str, value: String },
}

impl LiteralError {
    fn invalid(kind: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            kind,
            value: value.to_string(),
        }
    }
}

/// An owned source value parsed from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Integer(i64),
    Unsigned(u64),
    Real(f64),
    Real32(f32),
    Boolean(bool),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DbTimestamp),
}

impl Literal {
    /// Borrow as the source value a driver would hand over.
    pub fn as_source(&self) -> SourceValue<'_> {
        match self {
            Literal::Null => SourceValue::Null,
            Literal::Integer(v) => SourceValue::Integer(*v),
            Literal::Unsigned(v) => SourceValue::Unsigned(*v),
            Literal::Real(v) => SourceValue::Real(*v),
            Literal::Real32(v) => SourceValue::Real32(*v),
            Literal::Boolean(v) => SourceValue::Boolean(*v),
            Literal::Text(v) => SourceValue::Text(v),
            Literal::Bytes(v) => SourceValue::Blob(v),
            Literal::Timestamp(v) => SourceValue::Timestamp(*v),
        }
    }
}

impl FromStr for Literal {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("null") {
            return Ok(Literal::Null);
        }
        let (prefix, value) = s
            .split_once(':')
            .ok_or_else(|| LiteralError::MissingPrefix(s.to_string()))?;

        let literal = match prefix.to_ascii_lowercase().as_str() {
            "int" => Literal::Integer(
                value
                    .parse()
                    .map_err(|_| LiteralError::invalid("int", value))?,
            ),
            "uint" => Literal::Unsigned(
                value
                    .parse()
                    .map_err(|_| LiteralError::invalid("uint", value))?,
            ),
            "real" => Literal::Real(
                value
                    .parse()
                    .map_err(|_| LiteralError::invalid("real", value))?,
            ),
            "real32" => Literal::Real32(
                value
                    .parse()
                    .map_err(|_| LiteralError::invalid("real32", value))?,
            ),
            "bool" => Literal::Boolean(
                value
                    .parse()
                    .map_err(|_| LiteralError::invalid("bool", value))?,
            ),
            "text" => Literal::Text(value.to_string()),
            "bytes" => {
                Literal::Bytes(hex::decode(value).map_err(|_| LiteralError::invalid("bytes", value))?)
            }
            "ts" => Literal::Timestamp(
                DbTimestamp::from_rfc3339(value).map_err(|_| LiteralError::invalid("ts", value))?,
            ),
            other => return Err(LiteralError::UnknownType(other.to_string())),
        };
        Ok(literal)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Integer(v) => write!(f, "int:{}", v),
            Literal::Unsigned(v) => write!(f, "uint:{}", v),
            Literal::Real(v) => write!(f, "real:{}", v),
            Literal::Real32(v) => write!(f, "real32:{}", v),
            Literal::Boolean(v) => write!(f, "bool:{}", v),
            Literal::Text(v) => write!(f, "text:{}", v),
            Literal::Bytes(v) => write!(f, "bytes:{}", hex::encode(v)),
            Literal::Timestamp(v) => write!(f, "ts:{}", v),
        }
    }
}
