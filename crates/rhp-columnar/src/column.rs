#![forbid(unsafe_code)]

use crate::error::{ColumnarError, Result};
use crate::types::{ColumnType, Value};
use geo_types::Geometry;
use std::sync::Arc;

/// Column storage: one typed vector per column, `None` for nulls.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Number(Vec<Option<f64>>),
    Integer(Vec<Option<i64>>),
    String(Vec<Option<Arc<str>>>),
    Boolean(Vec<Option<bool>>),
    Geometry(Vec<Option<Arc<Geometry<f64>>>>),
}

impl Column {
    pub fn empty(column_type: ColumnType) -> Self {
        Self::with_capacity(column_type, 0)
    }

    pub fn with_capacity(column_type: ColumnType, capacity: usize) -> Self {
        match column_type {
            ColumnType::Number => Self::Number(Vec::with_capacity(capacity)),
            ColumnType::Integer => Self::Integer(Vec::with_capacity(capacity)),
            ColumnType::String => Self::String(Vec::with_capacity(capacity)),
            ColumnType::Boolean => Self::Boolean(Vec::with_capacity(capacity)),
            ColumnType::Geometry => Self::Geometry(Vec::with_capacity(capacity)),
        }
    }

    /// Build a column of `column_type` from loose values, checking each one.
    pub fn from_values(
        name: &str,
        column_type: ColumnType,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        let values = values.into_iter();
        let mut column = Self::with_capacity(column_type, values.size_hint().0);
        for value in values {
            column.push(name, value)?;
        }
        Ok(column)
    }

    pub fn numbers(values: impl IntoIterator<Item = f64>) -> Self {
        Self::Number(values.into_iter().map(Some).collect())
    }

    pub fn integers(values: impl IntoIterator<Item = i64>) -> Self {
        Self::Integer(values.into_iter().map(Some).collect())
    }

    pub fn strings<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::String(
            values
                .into_iter()
                .map(|s| Some(Arc::<str>::from(s.as_ref())))
                .collect(),
        )
    }

    pub fn booleans(values: impl IntoIterator<Item = bool>) -> Self {
        Self::Boolean(values.into_iter().map(Some).collect())
    }

    pub fn geometries(values: impl IntoIterator<Item = Geometry<f64>>) -> Self {
        Self::Geometry(values.into_iter().map(|g| Some(Arc::new(g))).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Number(v) => v.len(),
            Self::Integer(v) => v.len(),
            Self::String(v) => v.len(),
            Self::Boolean(v) => v.len(),
            Self::Geometry(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Number(_) => ColumnType::Number,
            Self::Integer(_) => ColumnType::Integer,
            Self::String(_) => ColumnType::String,
            Self::Boolean(_) => ColumnType::Boolean,
            Self::Geometry(_) => ColumnType::Geometry,
        }
    }

    /// Value at `row`, or [`Value::Null`] when out of range or null.
    pub fn get(&self, row: usize) -> Value {
        match self {
            Self::Number(v) => v.get(row).copied().flatten().map(Value::Number),
            Self::Integer(v) => v.get(row).copied().flatten().map(Value::Integer),
            Self::String(v) => v.get(row).cloned().flatten().map(Value::String),
            Self::Boolean(v) => v.get(row).copied().flatten().map(Value::Boolean),
            Self::Geometry(v) => v.get(row).cloned().flatten().map(Value::Geometry),
        }
        .unwrap_or(Value::Null)
    }

    #[inline]
    pub fn is_null(&self, row: usize) -> bool {
        self.get(row).is_null()
    }

    #[inline]
    pub fn get_str(&self, row: usize) -> Option<&str> {
        match self {
            Self::String(v) => v.get(row).and_then(|v| v.as_deref()),
            _ => None,
        }
    }

    #[inline]
    pub fn get_geometry(&self, row: usize) -> Option<&Geometry<f64>> {
        match self {
            Self::Geometry(v) => v.get(row).and_then(|v| v.as_deref()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(move |row| self.get(row))
    }

    /// Append one value. Nulls are accepted by every column type; integers widen into number
    /// columns.
    pub fn push(&mut self, name: &str, value: Value) -> Result<()> {
        match (self, value) {
            (Self::Number(v), Value::Null) => v.push(None),
            (Self::Integer(v), Value::Null) => v.push(None),
            (Self::String(v), Value::Null) => v.push(None),
            (Self::Boolean(v), Value::Null) => v.push(None),
            (Self::Geometry(v), Value::Null) => v.push(None),
            (Self::Number(v), Value::Number(n)) => v.push((!n.is_nan()).then_some(n)),
            (Self::Number(v), Value::Integer(i)) => v.push(Some(i as f64)),
            (Self::Integer(v), Value::Integer(i)) => v.push(Some(i)),
            (Self::String(v), Value::String(s)) => v.push(Some(s)),
            (Self::Boolean(v), Value::Boolean(b)) => v.push(Some(b)),
            (Self::Geometry(v), Value::Geometry(g)) => v.push(Some(g)),
            (column, other) => {
                return Err(ColumnarError::TypeMismatch {
                    column: name.to_string(),
                    expected: column.column_type(),
                    actual: other.kind().to_string(),
                })
            }
        }
        Ok(())
    }
}
