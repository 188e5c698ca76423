//! Outbound projection: typed value into a wire payload.

use crate::coerce::Slot;
use crate::error::ProjectionError;
use crate::shape::{can_widen, widen, WIDENING_ORDER};
use crate::timestamp::DbTimestamp;
use crate::value::{DbValue, OpaqueValue, ValueView};
use chrono::{DateTime, Utc};

/// A type that can be written as a storage value.
///
/// The provided `to_db_value` projects `view()`. Types with their own wire
/// representation override `to_db_value` instead.
pub trait ToDbValue {
    fn view(&self) -> ValueView<'_>;

    fn to_db_value(&self) -> Result<DbValue, ProjectionError> {
        project(self.view())
    }
}

/// Map a value view onto the closed payload set.
///
/// Integers widen to `i64`, floats to `f64`. Unsigned values above
/// `i64::MAX` fail rather than reinterpret their bit pattern. Values with no
/// direct shape try [`WIDENING_ORDER`] and pass through as opaque if nothing
/// applies.
pub fn project(view: ValueView<'_>) -> Result<DbValue, ProjectionError> {
    let value = match view {
        ValueView::Null => DbValue::Null,
        ValueView::Signed(v) => DbValue::Integer(v),
        ValueView::Unsigned(v) => match i64::try_from(v) {
            Ok(v) => DbValue::Integer(v),
            Err(_) => {
                return Err(ProjectionError::MagnitudeOverflow {
                    value: v,
                    limit: i64::MAX,
                })
            }
        },
        ValueView::Float(v) => DbValue::Real(v),
        ValueView::Bool(v) => DbValue::Boolean(v),
        ValueView::Bytes(v) => DbValue::Blob(v.to_vec()),
        ValueView::Text(v) => DbValue::Text(v.to_owned()),
        ValueView::Timestamp(ts) => {
            widen_first(&ValueView::Timestamp(ts)).unwrap_or(DbValue::Timestamp(ts))
        }
        ValueView::Opaque(value) => {
            let passthrough = DbValue::Opaque(value.clone());
            widen_first(&ValueView::Opaque(value)).unwrap_or(passthrough)
        }
    };
    Ok(value)
}

fn widen_first(view: &ValueView<'_>) -> Option<DbValue> {
    let kind = view.kind();
    WIDENING_ORDER
        .iter()
        .filter(|target| can_widen(kind, **target))
        .find_map(|target| widen(view, *target))
}

// ============================================================================
// Value types
// ============================================================================

macro_rules! impl_to_db_signed {
    ($($ty:ty),*) => {
        $(
            impl ToDbValue for $ty {
                fn view(&self) -> ValueView<'_> {
                    ValueView::Signed(*self as i64)
                }
            }
        )*
    };
}

macro_rules! impl_to_db_unsigned {
    ($($ty:ty),*) => {
        $(
            impl ToDbValue for $ty {
                fn view(&self) -> ValueView<'_> {
                    ValueView::Unsigned(*self as u64)
                }
            }
        )*
    };
}

impl_to_db_signed!(i8, i16, i32, i64, isize);
impl_to_db_unsigned!(u8, u16, u32, u64, usize);

impl ToDbValue for f32 {
    fn view(&self) -> ValueView<'_> {
        ValueView::Float(f64::from(*self))
    }
}

impl ToDbValue for f64 {
    fn view(&self) -> ValueView<'_> {
        ValueView::Float(*self)
    }
}

impl ToDbValue for bool {
    fn view(&self) -> ValueView<'_> {
        ValueView::Bool(*self)
    }
}

impl ToDbValue for str {
    fn view(&self) -> ValueView<'_> {
        ValueView::Text(self)
    }
}

impl ToDbValue for String {
    fn view(&self) -> ValueView<'_> {
        ValueView::Text(self)
    }
}

impl ToDbValue for [u8] {
    fn view(&self) -> ValueView<'_> {
        ValueView::Bytes(self)
    }
}

impl ToDbValue for Vec<u8> {
    fn view(&self) -> ValueView<'_> {
        ValueView::Bytes(self)
    }
}

impl ToDbValue for DbTimestamp {
    fn view(&self) -> ValueView<'_> {
        ValueView::Timestamp(*self)
    }
}

impl ToDbValue for DateTime<Utc> {
    fn view(&self) -> ValueView<'_> {
        ValueView::Timestamp(DbTimestamp::from(*self))
    }
}

impl ToDbValue for OpaqueValue {
    fn view(&self) -> ValueView<'_> {
        ValueView::Opaque(self.clone())
    }
}

impl ToDbValue for DbValue {
    fn view(&self) -> ValueView<'_> {
        match self {
            DbValue::Null => ValueView::Null,
            DbValue::Integer(v) => ValueView::Signed(*v),
            DbValue::Real(v) => ValueView::Float(*v),
            DbValue::Boolean(v) => ValueView::Bool(*v),
            DbValue::Blob(v) => ValueView::Bytes(v),
            DbValue::Text(v) => ValueView::Text(v),
            DbValue::Timestamp(v) => ValueView::Timestamp(*v),
            DbValue::Opaque(v) => ValueView::Opaque(v.clone()),
        }
    }
}

/// Explicit nulls (`Bytes(None)`, `Pointer(None)`) view as `Null`.
impl ToDbValue for Slot {
    fn view(&self) -> ValueView<'_> {
        match self {
            Slot::Int(v) => ValueView::Signed(*v),
            Slot::Uint(v) => ValueView::Unsigned(*v),
            Slot::Float(v) => ValueView::Float(*v),
            Slot::Bool(v) => ValueView::Bool(*v),
            Slot::Bytes(Some(v)) => ValueView::Bytes(v),
            Slot::Bytes(None) | Slot::Pointer(None) => ValueView::Null,
            Slot::Text(v) => ValueView::Text(v),
            Slot::Timestamp(v) => ValueView::Timestamp(*v),
            Slot::Opaque(v) => v.view(),
            Slot::Pointer(Some(inner)) => (**inner).view(),
        }
    }
}

impl<T: ToDbValue + ?Sized> ToDbValue for &T {
    fn view(&self) -> ValueView<'_> {
        (**self).view()
    }

    fn to_db_value(&self) -> Result<DbValue, ProjectionError> {
        (**self).to_db_value()
    }
}
