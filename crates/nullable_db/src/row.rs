//! Row data as seen by a caller of the storage boundary.

use crate::coerce::FromDbValue;
use crate::error::{DbError, Result};
use crate::nullable::Nullable;
use crate::project::ToDbValue;
use crate::value::DbValue;
use tracing::debug_span;

/// Row data from a query result.
#[derive(Debug, Clone)]
pub struct DbRow {
    columns: Vec<String>,
    values: Vec<DbValue>,
}

impl DbRow {
    /// Create a new row with column names and values.
    pub fn new(columns: Vec<String>, values: Vec<DbValue>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(DbError::ColumnCount {
                columns: columns.len(),
                values: values.len(),
            });
        }
        Ok(Self { columns, values })
    }

    /// Build a row by projecting each value.
    pub fn from_values<I, S, V>(cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: ToDbValue,
    {
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for (name, value) in cells {
            columns.push(name.into());
            values.push(value.to_db_value()?);
        }
        Ok(Self { columns, values })
    }

    /// Get a value by column index.
    pub fn get<T: FromDbValue>(&self, index: usize) -> Result<T> {
        let value = self.get_raw(index).ok_or(DbError::ColumnIndex {
            index,
            len: self.values.len(),
        })?;
        let span = debug_span!("read_column", index, kind = %value.kind());
        let _enter = span.enter();
        Ok(T::scan(value.as_source())?)
    }

    /// Get a value by column name.
    pub fn get_by_name<T: FromDbValue>(&self, name: &str) -> Result<T> {
        let index = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DbError::column_not_found(name))?;
        self.get(index)
    }

    /// Get a possibly-null value by column index.
    pub fn get_nullable<T: FromDbValue>(&self, index: usize) -> Result<Nullable<T>> {
        self.get(index)
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Get the raw DbValue at an index.
    pub fn get_raw(&self, index: usize) -> Option<&DbValue> {
        self.values.get(index)
    }
}
