//! Values crossing the storage boundary.
//!
//! - [`DbValue`]: owned wire payload handed to storage on writes
//! - [`SourceValue`]: borrowed value produced by storage on reads
//! - [`ValueView`]: borrowed look at a typed value before projection
//! - [`OpaqueValue`]: type-erased passthrough for values with no wire shape

use crate::shape::{self, Kind, WireKind};
use crate::timestamp::DbTimestamp;
use serde::{Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased value passed through the boundary unconverted.
///
/// Cloning shares the underlying value. Two opaque values are equal only if
/// they share the same allocation.
#[derive(Clone)]
pub struct OpaqueValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        (*self.inner).is::<T>()
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.type_name).finish()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Serialize for OpaqueValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name)
    }
}

pub(crate) fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// Value type for storage writes.
///
/// `Null` is the absent payload: it is produced for an empty container, or
/// for an explicit null held in an opaque destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DbValue {
    Null,
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Blob(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
    Text(String),
    Timestamp(DbTimestamp),
    Opaque(OpaqueValue),
}

impl DbValue {
    pub fn kind(&self) -> WireKind {
        match self {
            DbValue::Null => WireKind::Null,
            DbValue::Integer(_) => WireKind::Integer,
            DbValue::Real(_) => WireKind::Real,
            DbValue::Boolean(_) => WireKind::Boolean,
            DbValue::Blob(_) => WireKind::Blob,
            DbValue::Text(_) => WireKind::Text,
            DbValue::Timestamp(_) => WireKind::Timestamp,
            DbValue::Opaque(_) => WireKind::Opaque,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null)
    }

    /// Borrow this payload as a read-side source value.
    pub fn as_source(&self) -> SourceValue<'_> {
        match self {
            DbValue::Null => SourceValue::Null,
            DbValue::Integer(v) => SourceValue::Integer(*v),
            DbValue::Real(v) => SourceValue::Real(*v),
            DbValue::Boolean(v) => SourceValue::Boolean(*v),
            DbValue::Blob(v) => SourceValue::Blob(v),
            DbValue::Text(v) => SourceValue::Text(v),
            DbValue::Timestamp(v) => SourceValue::Timestamp(*v),
            DbValue::Opaque(v) => SourceValue::Opaque(v),
        }
    }
}

impl From<i32> for DbValue {
    fn from(v: i32) -> Self {
        DbValue::Integer(v as i64)
    }
}

impl From<i64> for DbValue {
    fn from(v: i64) -> Self {
        DbValue::Integer(v)
    }
}

impl From<f64> for DbValue {
    fn from(v: f64) -> Self {
        DbValue::Real(v)
    }
}

impl From<String> for DbValue {
    fn from(v: String) -> Self {
        DbValue::Text(v)
    }
}

impl From<&str> for DbValue {
    fn from(v: &str) -> Self {
        DbValue::Text(v.to_string())
    }
}

impl From<bool> for DbValue {
    fn from(v: bool) -> Self {
        DbValue::Boolean(v)
    }
}

impl From<DbTimestamp> for DbValue {
    fn from(v: DbTimestamp) -> Self {
        DbValue::Timestamp(v)
    }
}

impl From<Vec<u8>> for DbValue {
    fn from(v: Vec<u8>) -> Self {
        DbValue::Blob(v)
    }
}

impl From<&[u8]> for DbValue {
    fn from(v: &[u8]) -> Self {
        DbValue::Blob(v.to_vec())
    }
}

impl From<OpaqueValue> for DbValue {
    fn from(v: OpaqueValue) -> Self {
        DbValue::Opaque(v)
    }
}

impl<T: Into<DbValue>> From<Option<T>> for DbValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => DbValue::Null,
        }
    }
}

/// A value produced by storage on read.
///
/// Text and bytes borrow the driver's buffer for the duration of a single
/// coercion; anything kept must be copied out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceValue<'a> {
    Null,
    Integer(i64),
    Unsigned(u64),
    Real(f64),
    /// Single-precision real, stringified at 32-bit precision.
    Real32(f32),
    Boolean(bool),
    Text(&'a str),
    Blob(&'a [u8]),
    Timestamp(DbTimestamp),
    Opaque(&'a OpaqueValue),
}

impl<'a> SourceValue<'a> {
    pub fn kind(&self) -> Kind {
        shape::classify(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SourceValue::Null)
    }

    /// Copy this source into an owned payload.
    ///
    /// Unsigned values above `i64::MAX` have no wire integer and are kept as
    /// an opaque `u64`.
    pub fn to_db_value(&self) -> DbValue {
        match *self {
            SourceValue::Null => DbValue::Null,
            SourceValue::Integer(v) => DbValue::Integer(v),
            SourceValue::Unsigned(v) => match i64::try_from(v) {
                Ok(v) => DbValue::Integer(v),
                Err(_) => DbValue::Opaque(OpaqueValue::new(v)),
            },
            SourceValue::Real(v) => DbValue::Real(v),
            SourceValue::Real32(v) => DbValue::Real(f64::from(v)),
            SourceValue::Boolean(v) => DbValue::Boolean(v),
            SourceValue::Text(v) => DbValue::Text(v.to_owned()),
            SourceValue::Blob(v) => DbValue::Blob(v.to_vec()),
            SourceValue::Timestamp(v) => DbValue::Timestamp(v),
            SourceValue::Opaque(v) => DbValue::Opaque(v.clone()),
        }
    }
}

impl From<i64> for SourceValue<'_> {
    fn from(v: i64) -> Self {
        SourceValue::Integer(v)
    }
}

impl From<i32> for SourceValue<'_> {
    fn from(v: i32) -> Self {
        SourceValue::Integer(i64::from(v))
    }
}

impl From<u64> for SourceValue<'_> {
    fn from(v: u64) -> Self {
        SourceValue::Unsigned(v)
    }
}

impl From<f64> for SourceValue<'_> {
    fn from(v: f64) -> Self {
        SourceValue::Real(v)
    }
}

impl From<f32> for SourceValue<'_> {
    fn from(v: f32) -> Self {
        SourceValue::Real32(v)
    }
}

impl From<bool> for SourceValue<'_> {
    fn from(v: bool) -> Self {
        SourceValue::Boolean(v)
    }
}

impl<'a> From<&'a str> for SourceValue<'a> {
    fn from(v: &'a str) -> Self {
        SourceValue::Text(v)
    }
}

impl<'a> From<&'a [u8]> for SourceValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        SourceValue::Blob(v)
    }
}

impl From<DbTimestamp> for SourceValue<'_> {
    fn from(v: DbTimestamp) -> Self {
        SourceValue::Timestamp(v)
    }
}

impl<'a> From<&'a DbValue> for SourceValue<'a> {
    fn from(v: &'a DbValue) -> Self {
        v.as_source()
    }
}

/// Borrowed look at a typed value, as seen by the projector.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueView<'a> {
    /// Explicit null held by a present value (opaque destinations only).
    Null,
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Bytes(&'a [u8]),
    Text(&'a str),
    Timestamp(DbTimestamp),
    Opaque(OpaqueValue),
}

impl ValueView<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            ValueView::Null => Kind::Null,
            ValueView::Signed(_) => Kind::Signed,
            ValueView::Unsigned(_) => Kind::Unsigned,
            ValueView::Float(_) => Kind::Float,
            ValueView::Bool(_) => Kind::Bool,
            ValueView::Bytes(_) => Kind::Bytes,
            ValueView::Text(_) => Kind::Text,
            ValueView::Timestamp(_) => Kind::Temporal,
            ValueView::Opaque(_) => Kind::Opaque,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_source_borrows_payload() {
        let buffer = vec![1, 2, 3];
        let ptr = buffer.as_ptr();
        let payload = DbValue::Blob(buffer);
        match payload.as_source() {
            SourceValue::Blob(bytes) => assert_eq!(bytes.as_ptr(), ptr),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_source_to_db_value_copies_bytes() {
        let buffer = vec![0xFF, 0xFE];
        let owned = SourceValue::Blob(&buffer).to_db_value();
        assert_eq!(owned, DbValue::Blob(vec![0xFF, 0xFE]));
    }

    #[test]
    fn test_large_unsigned_becomes_opaque() {
        let owned = SourceValue::Unsigned(u64::MAX).to_db_value();
        match owned {
            DbValue::Opaque(value) => assert_eq!(value.downcast_ref::<u64>(), Some(&u64::MAX)),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_opaque_identity_equality() {
        let a = OpaqueValue::new(vec![1u8]);
        let b = a.clone();
        let c = OpaqueValue::new(vec![1u8]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is::<Vec<u8>>());
        assert!(a.type_name().contains("Vec<u8>"));
    }

    #[test]
    fn test_option_into_db_value() {
        assert_eq!(DbValue::from(None::<i64>), DbValue::Null);
        assert_eq!(DbValue::from(Some("x")), DbValue::Text("x".to_string()));
    }

    #[test]
    fn test_db_value_json() {
        let json = serde_json::to_value(DbValue::Blob(vec![0xFF, 0xFE])).unwrap();
        assert_eq!(json["type"], "blob");
        assert_eq!(json["value"], "fffe");

        let json = serde_json::to_value(DbValue::Null).unwrap();
        assert_eq!(json["type"], "null");
    }
}
