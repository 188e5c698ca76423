//! Inbound coercion: storage read into a typed destination.
//!
//! [`convert`] is the runtime-shape engine. It first tries a lossless
//! same-family conversion, then falls back to the ordered
//! `(source kind, destination shape)` rules in `convert_assign`. The
//! generic [`coerce`] entry runs the engine for a [`FromDbValue`] type and
//! hands the resulting [`Slot`] to that type.
//!
//! Null handling lives one level up: the optional container clears itself on
//! a null source before anything here runs. Reaching the engine with a null
//! source is only meaningful for opaque, byte and pointer destinations.

use crate::error::CoercionError;
use crate::shape::{
    canonical_bool, parse_float, parse_signed, parse_unsigned, stringify, FloatWidth,
    IntWidth, Kind, Shape,
};
use crate::timestamp::DbTimestamp;
use crate::value::{DbValue, SourceValue};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Owned value produced by the engine for a [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "slot", content = "value", rename_all = "snake_case")]
pub enum Slot {
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// `None` is an explicit null written into a byte destination.
    Bytes(#[serde(serialize_with = "serialize_opt_hex")] Option<Vec<u8>>),
    Text(String),
    Timestamp(DbTimestamp),
    /// `DbValue::Null` is an explicit null written into an opaque destination.
    Opaque(DbValue),
    Pointer(Option<Box<Slot>>),
}

impl Slot {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Slot::Int(_) => "int",
            Slot::Uint(_) => "uint",
            Slot::Float(_) => "float",
            Slot::Bool(_) => "bool",
            Slot::Bytes(_) => "bytes",
            Slot::Text(_) => "text",
            Slot::Timestamp(_) => "timestamp",
            Slot::Opaque(_) => "opaque",
            Slot::Pointer(_) => "pointer",
        }
    }
}

fn serialize_opt_hex<S: Serializer>(
    bytes: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(bytes) => crate::value::serialize_hex(bytes, serializer),
        None => serializer.serialize_none(),
    }
}

/// A type that can be read from a storage value.
///
/// `shape` and `from_slot` plug the type into the generic engine. Overriding
/// `scan` replaces the engine entirely for this type.
pub trait FromDbValue: Sized {
    /// Destination shape the engine coerces into.
    fn shape() -> Shape;

    /// Take ownership of an engine result.
    fn from_slot(slot: Slot) -> Result<Self, CoercionError>;

    /// Read a value of this type from `src`.
    fn scan(src: SourceValue<'_>) -> Result<Self, CoercionError> {
        coerce(src)
    }
}

/// Run the engine for `T`'s shape and hand the slot to `T`.
pub fn coerce<T: FromDbValue>(src: SourceValue<'_>) -> Result<T, CoercionError> {
    let slot = convert(&T::shape(), src)?;
    T::from_slot(slot)
}

/// Coerce `src` into a value of `shape`.
pub fn convert(shape: &Shape, src: SourceValue<'_>) -> Result<Slot, CoercionError> {
    match direct(shape, src) {
        Some(slot) => Ok(slot),
        None => convert_assign(shape, src),
    }
}

// ============================================================================
// Direct conversions
// ============================================================================

/// Lossless same-family conversions. Bytes are always copied.
fn direct(shape: &Shape, src: SourceValue<'_>) -> Option<Slot> {
    let slot = match (src, shape) {
        (SourceValue::Integer(v), Shape::Int(w)) if w.contains_signed(v) => Slot::Int(v),
        (SourceValue::Integer(v), Shape::Uint(w)) => {
            let v = u64::try_from(v).ok()?;
            if !w.contains_unsigned(v) {
                return None;
            }
            Slot::Uint(v)
        }
        (SourceValue::Unsigned(v), Shape::Uint(w)) if w.contains_unsigned(v) => Slot::Uint(v),
        (SourceValue::Unsigned(v), Shape::Int(w)) => {
            let v = i64::try_from(v).ok()?;
            if !w.contains_signed(v) {
                return None;
            }
            Slot::Int(v)
        }
        (SourceValue::Real(v), Shape::Float(FloatWidth::W64)) => Slot::Float(v),
        (SourceValue::Real(v), Shape::Float(FloatWidth::W32))
            if v.is_nan() || f64::from(v as f32) == v =>
        {
            Slot::Float(v)
        }
        (SourceValue::Real32(v), Shape::Float(_)) => Slot::Float(f64::from(v)),
        (SourceValue::Boolean(v), Shape::Bool) => Slot::Bool(v),
        (SourceValue::Text(v), Shape::Text) => Slot::Text(v.to_owned()),
        (SourceValue::Blob(v), Shape::Bytes) => Slot::Bytes(Some(v.to_vec())),
        (SourceValue::Timestamp(v), Shape::Timestamp) => Slot::Timestamp(v),
        (SourceValue::Opaque(v), Shape::Opaque) => Slot::Opaque(DbValue::Opaque(v.clone())),
        _ => return None,
    };
    Some(slot)
}

// ============================================================================
// General rules
// ============================================================================

fn unsupported(src: &SourceValue<'_>, shape: &Shape) -> CoercionError {
    CoercionError::UnsupportedConversion {
        source_type: src.kind(),
        destination: shape.clone(),
    }
}

/// Ordered fallback rules. First match wins.
fn convert_assign(shape: &Shape, src: SourceValue<'_>) -> Result<Slot, CoercionError> {
    match (src, shape) {
        (SourceValue::Text(s), Shape::Text) => return Ok(Slot::Text(s.to_owned())),
        (SourceValue::Text(s), Shape::Bytes) => {
            return Ok(Slot::Bytes(Some(s.as_bytes().to_vec())))
        }
        (SourceValue::Blob(b), Shape::Text) => {
            return Ok(Slot::Text(String::from_utf8_lossy(b).into_owned()))
        }
        (SourceValue::Blob(b), Shape::Opaque) => {
            return Ok(Slot::Opaque(DbValue::Blob(b.to_vec())))
        }
        (SourceValue::Blob(b), Shape::Bytes) => return Ok(Slot::Bytes(Some(b.to_vec()))),
        (SourceValue::Timestamp(ts), Shape::Timestamp) => return Ok(Slot::Timestamp(ts)),
        (SourceValue::Timestamp(ts), Shape::Text) => return Ok(Slot::Text(ts.to_rfc3339())),
        (SourceValue::Timestamp(ts), Shape::Bytes) => {
            return Ok(Slot::Bytes(Some(ts.to_rfc3339().into_bytes())))
        }
        (SourceValue::Null, Shape::Opaque) => return Ok(Slot::Opaque(DbValue::Null)),
        (SourceValue::Null, Shape::Bytes) => return Ok(Slot::Bytes(None)),
        _ => {}
    }

    let kind = src.kind();
    match shape {
        Shape::Text if kind.is_numeric() => match stringify(&src) {
            Some(text) => Ok(Slot::Text(text)),
            None => Err(unsupported(&src, shape)),
        },
        Shape::Bytes if kind.is_numeric() => match stringify(&src) {
            Some(text) => Ok(Slot::Bytes(Some(text.into_bytes()))),
            None => Err(unsupported(&src, shape)),
        },
        Shape::Bool => convert_bool(src),
        Shape::Opaque => Ok(Slot::Opaque(src.to_db_value())),
        Shape::Pointer(inner) => {
            if src.is_null() {
                return Ok(Slot::Pointer(None));
            }
            let slot = convert(inner, src)?;
            Ok(Slot::Pointer(Some(Box::new(slot))))
        }
        Shape::Int(_) | Shape::Uint(_) | Shape::Float(_) => convert_numeric(shape, src),
        _ if src.is_null() => Err(CoercionError::NullUnsupported {
            destination: shape.clone(),
        }),
        _ => Err(unsupported(&src, shape)),
    }
}

fn convert_bool(src: SourceValue<'_>) -> Result<Slot, CoercionError> {
    match canonical_bool(&src) {
        Some(Ok(v)) => Ok(Slot::Bool(v)),
        Some(Err(cause)) => Err(CoercionError::ConversionFailed {
            source_type: src.kind(),
            attempted: stringify(&src).unwrap_or_default(),
            destination: Shape::Bool,
            cause,
        }),
        None if src.is_null() => Err(CoercionError::NullUnsupported {
            destination: Shape::Bool,
        }),
        None => Err(unsupported(&src, &Shape::Bool)),
    }
}

/// Stringify then parse with a bounds check for the destination width.
fn convert_numeric(shape: &Shape, src: SourceValue<'_>) -> Result<Slot, CoercionError> {
    if src.is_null() {
        return Err(CoercionError::NullUnsupported {
            destination: shape.clone(),
        });
    }
    let text = match stringify(&src) {
        Some(text) => text,
        None => return Err(unsupported(&src, shape)),
    };

    let parsed = match shape {
        Shape::Int(w) => parse_signed(&text, *w).map(Slot::Int),
        Shape::Uint(w) => parse_unsigned(&text, *w).map(Slot::Uint),
        Shape::Float(w) => parse_float(&text, *w).map(Slot::Float),
        _ => return Err(unsupported(&src, shape)),
    };

    match parsed {
        Ok(slot) => Ok(slot),
        Err(cause) => Err(CoercionError::ConversionFailed {
            source_type: src.kind(),
            attempted: text,
            destination: shape.clone(),
            cause,
        }),
    }
}

// ============================================================================
// Destination types
// ============================================================================

fn mismatch<T>(slot: &Slot) -> CoercionError {
    CoercionError::not_a_pointer(std::any::type_name::<T>(), slot.kind_name())
}

macro_rules! impl_from_db_signed {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl FromDbValue for $ty {
                fn shape() -> Shape {
                    Shape::Int($width)
                }

                fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
                    match slot {
                        Slot::Int(v) => <$ty>::try_from(v).map_err(|_| CoercionError::ConversionFailed {
                            source_type: Kind::Signed,
                            attempted: v.to_string(),
                            destination: Self::shape(),
                            cause: crate::error::ParseFailure::OutOfRange,
                        }),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

macro_rules! impl_from_db_unsigned {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl FromDbValue for $ty {
                fn shape() -> Shape {
                    Shape::Uint($width)
                }

                fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
                    match slot {
                        Slot::Uint(v) => <$ty>::try_from(v).map_err(|_| CoercionError::ConversionFailed {
                            source_type: Kind::Unsigned,
                            attempted: v.to_string(),
                            destination: Self::shape(),
                            cause: crate::error::ParseFailure::OutOfRange,
                        }),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

impl_from_db_signed! {
    i8 => IntWidth::W8,
    i16 => IntWidth::W16,
    i32 => IntWidth::W32,
    i64 => IntWidth::W64,
    isize => IntWidth::POINTER,
}

impl_from_db_unsigned! {
    u8 => IntWidth::W8,
    u16 => IntWidth::W16,
    u32 => IntWidth::W32,
    u64 => IntWidth::W64,
    usize => IntWidth::POINTER,
}

impl FromDbValue for f64 {
    fn shape() -> Shape {
        Shape::Float(FloatWidth::W64)
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        match slot {
            Slot::Float(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromDbValue for f32 {
    fn shape() -> Shape {
        Shape::Float(FloatWidth::W32)
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        match slot {
            // Slot values for this shape are exact at 32-bit precision.
            Slot::Float(v) => Ok(v as f32),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromDbValue for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        match slot {
            Slot::Bool(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromDbValue for String {
    fn shape() -> Shape {
        Shape::Text
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        match slot {
            Slot::Text(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromDbValue for Vec<u8> {
    fn shape() -> Shape {
        Shape::Bytes
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        match slot {
            Slot::Bytes(v) => Ok(v.unwrap_or_default()),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// Opaque passthrough destination.
impl FromDbValue for DbValue {
    fn shape() -> Shape {
        Shape::Opaque
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        match slot {
            Slot::Opaque(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

fn parse_timestamp(text: &str, source_type: Kind) -> Result<DbTimestamp, CoercionError> {
    DbTimestamp::from_rfc3339(text).map_err(|_| CoercionError::ConversionFailed {
        source_type,
        attempted: text.to_string(),
        destination: Shape::Timestamp,
        cause: crate::error::ParseFailure::InvalidSyntax,
    })
}

/// Also accepts RFC3339 text, as drivers without a native temporal type
/// hand timestamps back as strings.
impl FromDbValue for DbTimestamp {
    fn shape() -> Shape {
        Shape::Timestamp
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        match slot {
            Slot::Timestamp(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn scan(src: SourceValue<'_>) -> Result<Self, CoercionError> {
        match src {
            SourceValue::Text(text) => parse_timestamp(text, Kind::Text),
            SourceValue::Blob(bytes) => {
                let text = String::from_utf8_lossy(bytes);
                parse_timestamp(&text, Kind::Bytes)
            }
            other => coerce(other),
        }
    }
}

impl FromDbValue for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Timestamp
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        DbTimestamp::from_slot(slot).map(Into::into)
    }

    fn scan(src: SourceValue<'_>) -> Result<Self, CoercionError> {
        DbTimestamp::scan(src).map(Into::into)
    }
}

/// Pointer-of destination: null reads as `None`.
impl<T: FromDbValue> FromDbValue for Option<T> {
    fn shape() -> Shape {
        Shape::pointer_to(T::shape())
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        match slot {
            Slot::Pointer(None) => Ok(None),
            Slot::Pointer(Some(inner)) => T::from_slot(*inner).map(Some),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn scan(src: SourceValue<'_>) -> Result<Self, CoercionError> {
        match src {
            SourceValue::Null => Ok(None),
            other => T::scan(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseFailure;
    use crate::value::OpaqueValue;

    #[test]
    fn test_text_into_int32() {
        assert_eq!(coerce::<i32>(SourceValue::Text("42")).unwrap(), 42);
    }

    #[test]
    fn test_integer_overflow_fails() {
        let err = coerce::<i8>(SourceValue::Integer(300)).unwrap_err();
        match err {
            CoercionError::ConversionFailed {
                source_type,
                attempted,
                destination,
                cause,
            } => {
                assert_eq!(source_type, Kind::Signed);
                assert_eq!(attempted, "300");
                assert_eq!(destination, Shape::Int(IntWidth::W8));
                assert_eq!(cause, ParseFailure::OutOfRange);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_into_unsigned_is_syntax_error() {
        let err = coerce::<u32>(SourceValue::Integer(-1)).unwrap_err();
        assert!(matches!(
            err,
            CoercionError::ConversionFailed {
                cause: ParseFailure::InvalidSyntax,
                ..
            }
        ));
    }

    #[test]
    fn test_signed_into_unsigned_direct() {
        assert_eq!(coerce::<u16>(SourceValue::Integer(65535)).unwrap(), 65535);
        assert_eq!(coerce::<i64>(SourceValue::Unsigned(7)).unwrap(), 7);
    }

    #[test]
    fn test_null_into_numeric_unsupported() {
        let err = coerce::<i64>(SourceValue::Null).unwrap_err();
        assert_eq!(
            err,
            CoercionError::NullUnsupported {
                destination: Shape::Int(IntWidth::W64)
            }
        );
    }

    #[test]
    fn test_real_into_int_via_text() {
        assert_eq!(coerce::<i64>(SourceValue::Real(42.0)).unwrap(), 42);
        let err = coerce::<i64>(SourceValue::Real(4.5)).unwrap_err();
        assert!(matches!(
            err,
            CoercionError::ConversionFailed {
                cause: ParseFailure::InvalidSyntax,
                ..
            }
        ));

        let err = coerce::<i64>(SourceValue::Real(1e18)).unwrap_err();
        match err {
            CoercionError::ConversionFailed { attempted, cause, .. } => {
                assert_eq!(attempted, "1e+18");
                assert_eq!(cause, ParseFailure::InvalidSyntax);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(coerce::<i64>(SourceValue::Real(100000.0)).unwrap(), 100000);
    }

    #[test]
    fn test_real_into_f32_out_of_range() {
        let err = coerce::<f32>(SourceValue::Real(1e300)).unwrap_err();
        assert!(matches!(
            err,
            CoercionError::ConversionFailed {
                cause: ParseFailure::OutOfRange,
                ..
            }
        ));
        assert_eq!(coerce::<f32>(SourceValue::Real(0.5)).unwrap(), 0.5);
        assert_eq!(coerce::<f32>(SourceValue::Text("0.1")).unwrap(), 0.1f32);
    }

    #[test]
    fn test_bytes_into_opaque_are_copied() {
        let mut buffer = vec![1u8, 2, 3];
        let value = coerce::<DbValue>(SourceValue::Blob(&buffer)).unwrap();
        buffer[0] = 9;
        assert_eq!(value, DbValue::Blob(vec![1, 2, 3]));
        assert_eq!(
            convert(&Shape::Opaque, SourceValue::Blob(b"ab")).unwrap(),
            Slot::Opaque(DbValue::Blob(b"ab".to_vec()))
        );
    }

    #[test]
    fn test_numeric_into_text() {
        assert_eq!(coerce::<String>(SourceValue::Integer(-7)).unwrap(), "-7");
        assert_eq!(coerce::<String>(SourceValue::Real(2.5)).unwrap(), "2.5");
        assert_eq!(coerce::<String>(SourceValue::Real(1e21)).unwrap(), "1e+21");
        assert_eq!(coerce::<String>(SourceValue::Real(1e-7)).unwrap(), "1e-07");
        assert_eq!(coerce::<String>(SourceValue::Real(1e300)).unwrap(), "1e+300");
        assert_eq!(coerce::<String>(SourceValue::Boolean(false)).unwrap(), "false");
        assert_eq!(coerce::<Vec<u8>>(SourceValue::Unsigned(9)).unwrap(), b"9".to_vec());
    }

    #[test]
    fn test_bytes_and_text_cross() {
        assert_eq!(coerce::<Vec<u8>>(SourceValue::Text("hi")).unwrap(), b"hi".to_vec());
        assert_eq!(coerce::<String>(SourceValue::Blob(b"hi")).unwrap(), "hi");
    }

    #[test]
    fn test_timestamp_into_text_and_bytes() {
        let ts = DbTimestamp::from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(
            coerce::<String>(SourceValue::Timestamp(ts)).unwrap(),
            "2024-01-01T00:00:00Z"
        );
        assert_eq!(
            coerce::<Vec<u8>>(SourceValue::Timestamp(ts)).unwrap(),
            b"2024-01-01T00:00:00Z".to_vec()
        );
    }

    #[test]
    fn test_timestamp_scan_parses_text() {
        let ts = DbTimestamp::scan(SourceValue::Text("2024-01-01T00:00:00.5Z")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T00:00:00.5Z");

        let err = DbTimestamp::scan(SourceValue::Text("noon")).unwrap_err();
        assert!(matches!(err, CoercionError::ConversionFailed { .. }));

        let err = DbTimestamp::scan(SourceValue::Integer(5)).unwrap_err();
        assert!(matches!(err, CoercionError::UnsupportedConversion { .. }));
    }

    #[test]
    fn test_bool_destination() {
        assert!(coerce::<bool>(SourceValue::Text("TRUE")).unwrap());
        assert!(!coerce::<bool>(SourceValue::Integer(0)).unwrap());
        assert!(matches!(
            coerce::<bool>(SourceValue::Integer(5)).unwrap_err(),
            CoercionError::ConversionFailed {
                cause: ParseFailure::OutOfRange,
                ..
            }
        ));
        assert!(matches!(
            coerce::<bool>(SourceValue::Real(1.0)).unwrap_err(),
            CoercionError::UnsupportedConversion { .. }
        ));
        assert!(matches!(
            coerce::<bool>(SourceValue::Null).unwrap_err(),
            CoercionError::NullUnsupported { .. }
        ));
    }

    #[test]
    fn test_null_into_opaque_and_bytes_is_explicit_null() {
        assert_eq!(
            convert(&Shape::Opaque, SourceValue::Null).unwrap(),
            Slot::Opaque(DbValue::Null)
        );
        assert_eq!(convert(&Shape::Bytes, SourceValue::Null).unwrap(), Slot::Bytes(None));
    }

    #[test]
    fn test_opaque_passthrough() {
        let opaque = OpaqueValue::new(3u128);
        let value = coerce::<DbValue>(SourceValue::Opaque(&opaque)).unwrap();
        assert_eq!(value, DbValue::Opaque(opaque.clone()));

        let value = coerce::<DbValue>(SourceValue::Text("x")).unwrap();
        assert_eq!(value, DbValue::Text("x".to_string()));
    }

    #[test]
    fn test_opaque_into_numeric_unsupported() {
        let opaque = OpaqueValue::new(3u128);
        let err = coerce::<i64>(SourceValue::Opaque(&opaque)).unwrap_err();
        assert_eq!(
            err,
            CoercionError::UnsupportedConversion {
                source_type: Kind::Opaque,
                destination: Shape::Int(IntWidth::W64),
            }
        );
    }

    #[test]
    fn test_pointer_shape() {
        let shape = Shape::pointer_to(Shape::Uint(IntWidth::W8));
        assert_eq!(convert(&shape, SourceValue::Null).unwrap(), Slot::Pointer(None));
        assert_eq!(
            convert(&shape, SourceValue::Text("200")).unwrap(),
            Slot::Pointer(Some(Box::new(Slot::Uint(200))))
        );
        assert!(convert(&shape, SourceValue::Text("256")).is_err());
    }

    #[test]
    fn test_option_scan() {
        assert_eq!(Option::<i32>::scan(SourceValue::Null).unwrap(), None);
        assert_eq!(Option::<i32>::scan(SourceValue::Text("5")).unwrap(), Some(5));
        assert_eq!(
            coerce::<Option<String>>(SourceValue::Integer(5)).unwrap(),
            Some("5".to_string())
        );
    }

    #[test]
    fn test_from_slot_mismatch_is_not_a_pointer() {
        let err = i32::from_slot(Slot::Text("1".to_string())).unwrap_err();
        match err {
            CoercionError::NotAPointer { destination, slot } => {
                assert_eq!(destination, "i32");
                assert_eq!(slot, "text");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_null_into_text_unsupported() {
        assert!(matches!(
            coerce::<String>(SourceValue::Null).unwrap_err(),
            CoercionError::NullUnsupported { .. }
        ));
    }
}
