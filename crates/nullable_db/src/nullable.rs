//! Optional container that crosses the storage boundary.
//!
//! `Nullable<T>` is a thin wrapper around `Option<T>`. On read a null source
//! empties it; any other source is handed to `T`. On write an empty container
//! becomes [`DbValue::Null`] without consulting `T`.
//!
//! ```rust
//! use nullable_db::{Nullable, SourceValue};
//!
//! # fn main() -> Result<(), nullable_db::CoercionError> {
//! let mut age: Nullable<i32> = Nullable::none();
//! age.scan(SourceValue::Text("42"))?;
//! assert_eq!(age.get(), Some(&42));
//!
//! age.scan(SourceValue::Null)?;
//! assert!(!age.is_present());
//! # Ok(())
//! # }
//! ```

use crate::coerce::{FromDbValue, Slot};
use crate::error::{CoercionError, ProjectionError};
use crate::project::ToDbValue;
use crate::shape::Shape;
use crate::value::{DbValue, SourceValue, ValueView};
use serde::{Deserialize, Serialize};

/// A value that may be absent, readable from and writable to storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nullable<T>(Option<T>);

impl<T> Nullable<T> {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn some(value: T) -> Self {
        Self(Some(value))
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }

    /// Take the value out, leaving the container absent.
    pub fn take(&mut self) -> Option<T> {
        self.0.take()
    }
}

impl<T: FromDbValue> Nullable<T> {
    /// Read `src` into the container.
    ///
    /// A null source clears the container and succeeds. On error the previous
    /// contents are kept.
    pub fn scan(&mut self, src: SourceValue<'_>) -> Result<(), CoercionError> {
        if src.is_null() {
            self.0 = None;
            return Ok(());
        }
        self.0 = Some(T::scan(src)?);
        Ok(())
    }

    pub fn from_source(src: SourceValue<'_>) -> Result<Self, CoercionError> {
        let mut container = Self::none();
        container.scan(src)?;
        Ok(container)
    }
}

impl<T: ToDbValue> Nullable<T> {
    /// Produce the write payload. Absent is `DbValue::Null`.
    pub fn project(&self) -> Result<DbValue, ProjectionError> {
        match &self.0 {
            Some(value) => value.to_db_value(),
            None => Ok(DbValue::Null),
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.0
    }
}

impl<T: FromDbValue> FromDbValue for Nullable<T> {
    fn shape() -> Shape {
        Shape::pointer_to(T::shape())
    }

    fn from_slot(slot: Slot) -> Result<Self, CoercionError> {
        Option::<T>::from_slot(slot).map(Self)
    }

    fn scan(src: SourceValue<'_>) -> Result<Self, CoercionError> {
        Self::from_source(src)
    }
}

impl<T: ToDbValue> ToDbValue for Nullable<T> {
    fn view(&self) -> ValueView<'_> {
        match &self.0 {
            Some(value) => value.view(),
            None => ValueView::Null,
        }
    }

    fn to_db_value(&self) -> Result<DbValue, ProjectionError> {
        self.project()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::DbTimestamp;

    #[test]
    fn test_null_clears_container() {
        let mut value = Nullable::some(5i64);
        value.scan(SourceValue::Null).unwrap();
        assert!(!value.is_present());
        assert_eq!(value.get(), None);
    }

    #[test]
    fn test_failed_scan_keeps_previous_value() {
        let mut value = Nullable::some(5u8);
        let err = value.scan(SourceValue::Integer(300)).unwrap_err();
        assert!(matches!(err, CoercionError::ConversionFailed { .. }));
        assert_eq!(value.get(), Some(&5));
    }

    #[test]
    fn test_scan_marks_present() {
        let value = Nullable::<i32>::from_source(SourceValue::Text("42")).unwrap();
        assert!(value.is_present());
        assert_eq!(value.into_option(), Some(42));
    }

    #[test]
    fn test_absent_projects_null() {
        let value: Nullable<u64> = Nullable::none();
        assert_eq!(value.project().unwrap(), DbValue::Null);
    }

    #[test]
    fn test_present_projects_inner() {
        let value = Nullable::some(String::from("x"));
        assert_eq!(value.project().unwrap(), DbValue::Text("x".to_string()));

        let value = Nullable::some(u64::MAX);
        assert!(value.project().is_err());
    }

    #[test]
    fn test_nested_in_option() {
        let value = Option::<Nullable<i32>>::scan(SourceValue::Integer(1)).unwrap();
        assert_eq!(value, Some(Nullable::some(1)));
    }

    #[test]
    fn test_take_empties() {
        let mut value = Nullable::some(DbTimestamp::from_unix_nanos(0));
        assert!(value.take().is_some());
        assert!(!value.is_present());
    }

    #[test]
    fn test_serde_as_option() {
        let json = serde_json::to_string(&Nullable::some(3)).unwrap();
        assert_eq!(json, "3");
        let json = serde_json::to_string(&Nullable::<i32>::none()).unwrap();
        assert_eq!(json, "null");
        let back: Nullable<i32> = serde_json::from_str("7").unwrap();
        assert_eq!(back, Nullable::some(7));
    }

    #[test]
    fn test_default_is_absent() {
        let value: Nullable<String> = Nullable::default();
        assert!(!value.is_present());
        let from: Nullable<i32> = Some(2).into();
        let back: Option<i32> = from.into();
        assert_eq!(back, Some(2));
    }
}
