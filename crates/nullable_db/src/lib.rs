//! Optional-value adapter for the relational storage boundary.
//!
//! Converts between typed Rust values and the small closed set of values a
//! storage driver reads and writes:
//!
//! - **Inbound** ([`coerce`]): a borrowed [`SourceValue`] into any
//!   [`FromDbValue`] type, with bounded numeric parses so overflow fails
//!   instead of wrapping.
//! - **Outbound** ([`project`]): any [`ToDbValue`] type into a [`DbValue`]
//!   payload.
//! - [`Nullable<T>`] ties both together: a null source clears it, an absent
//!   container writes `Null`.
//!
//! # Usage
//!
//! ```rust
//! use nullable_db::{DbRow, DbValue, Nullable, ToDbValue};
//!
//! # fn main() -> Result<(), nullable_db::DbError> {
//! let row = DbRow::new(
//!     vec!["id".into(), "nickname".into()],
//!     vec![DbValue::Text("42".into()), DbValue::Null],
//! )?;
//!
//! let id: u16 = row.get(0)?;
//! let nickname: Nullable<String> = row.get_nullable(1)?;
//!
//! assert_eq!(id, 42);
//! assert_eq!(nickname.to_db_value()?, DbValue::Null);
//! # Ok(())
//! # }
//! ```
//!
//! Nothing in the conversion core logs or panics; every failure is a typed
//! error returned to the caller.

pub mod coerce;
mod error;
pub mod nullable;
pub mod project;
mod row;
pub mod shape;
mod timestamp;
mod value;

pub use coerce::{FromDbValue, Slot};
pub use error::{CoercionError, DbError, ParseFailure, ProjectionError, Result};
pub use nullable::Nullable;
pub use project::ToDbValue;
pub use row::DbRow;
pub use shape::{FloatWidth, IntWidth, Kind, Shape, ShapeParseError, WireKind};
pub use timestamp::{DbTimestamp, DbTimestampError};
pub use value::{DbValue, OpaqueValue, SourceValue, ValueView};
