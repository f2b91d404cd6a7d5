#![forbid(unsafe_code)]

use crate::column::Column;
use crate::error::{ColumnarError, Result};
use crate::types::{ColumnSchema, ColumnType, Crs, Value};
use std::collections::HashMap;

/// Row labels of a [`GeoFrame`].
///
/// A frame without an explicit index is positionally indexed (`0..row_count`).
#[derive(Clone, Debug, PartialEq)]
pub struct RowIndex {
    pub name: Option<String>,
    pub values: Column,
}

impl RowIndex {
    pub fn new(name: Option<String>, values: Column) -> Self {
        Self { name, values }
    }

    pub fn named(name: impl Into<String>, values: Column) -> Self {
        Self {
            name: Some(name.into()),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeoFrame {
    schema: Vec<ColumnSchema>,
    columns: Vec<Column>,
    column_index: HashMap<String, usize>,
    rows: usize,
    index: Option<RowIndex>,
    crs: Option<Crs>,
}

impl GeoFrame {
    /// Build a frame from named columns. All columns must have the same length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Column)>) -> Result<Self> {
        let mut frame = Self::empty(0);
        let mut first = true;
        for (name, column) in columns {
            let name = name.into();
            if first {
                frame.rows = column.len();
                first = false;
            }
            if frame.column_index.contains_key(&name) {
                return Err(ColumnarError::DuplicateColumn(name));
            }
            frame.push_column(name, column)?;
        }
        Ok(frame)
    }

    fn empty(rows: usize) -> Self {
        Self {
            schema: Vec::new(),
            columns: Vec::new(),
            column_index: HashMap::new(),
            rows,
            index: None,
            crs: None,
        }
    }

    fn push_column(&mut self, name: String, column: Column) -> Result<()> {
        if column.len() != self.rows {
            return Err(ColumnarError::LengthMismatch {
                column: name,
                expected: self.rows,
                actual: column.len(),
            });
        }
        let idx = self.columns.len();
        self.schema
            .push(ColumnSchema::new(name.clone(), column.column_type()));
        self.column_index.insert(name, idx);
        self.columns.push(column);
        Ok(())
    }

    fn rebuild_column_index(&mut self) {
        self.column_index = self
            .schema
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.name.clone(), idx))
            .collect();
    }

    pub fn schema(&self) -> &[ColumnSchema] {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.schema.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        let idx = *self.column_index.get(name)?;
        self.columns.get(idx)
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column(name).map(Column::column_type)
    }

    pub fn value(&self, row: usize, column: &str) -> Option<Value> {
        if row >= self.rows {
            return None;
        }
        Some(self.column(column)?.get(row))
    }

    pub fn index(&self) -> Option<&RowIndex> {
        self.index.as_ref()
    }

    /// Label of `row`; positional when the frame has no explicit index.
    pub fn index_value(&self, row: usize) -> Option<Value> {
        if row >= self.rows {
            return None;
        }
        Some(match &self.index {
            Some(index) => index.values.get(row),
            None => Value::Integer(row as i64),
        })
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    pub fn with_crs(&self, crs: Crs) -> Self {
        let mut out = self.clone();
        out.crs = Some(crs);
        out
    }

    /// Assign a column: replace it in place when `name` already exists, append it otherwise.
    pub fn with_column(&self, name: impl Into<String>, column: Column) -> Result<Self> {
        let name = name.into();
        let mut out = self.clone();
        match out.column_index.get(&name).copied() {
            Some(idx) => {
                if column.len() != out.rows {
                    return Err(ColumnarError::LengthMismatch {
                        column: name,
                        expected: out.rows,
                        actual: column.len(),
                    });
                }
                out.schema[idx].column_type = column.column_type();
                out.columns[idx] = column;
            }
            None => out.push_column(name, column)?,
        }
        Ok(out)
    }

    pub fn without_column(&self, name: &str) -> Result<Self> {
        let idx = *self
            .column_index
            .get(name)
            .ok_or_else(|| ColumnarError::UnknownColumn(name.to_string()))?;
        let mut out = self.clone();
        out.schema.remove(idx);
        out.columns.remove(idx);
        out.rebuild_column_index();
        Ok(out)
    }

    /// Move column `name` into the row index. Any previous index is dropped.
    pub fn set_index(&self, name: &str) -> Result<Self> {
        let column = self
            .column(name)
            .cloned()
            .ok_or_else(|| ColumnarError::UnknownColumn(name.to_string()))?;
        let mut out = self.without_column(name)?;
        out.index = Some(RowIndex::named(name, column));
        Ok(out)
    }

    pub fn with_index(&self, index: RowIndex) -> Result<Self> {
        let actual = index.len();
        if actual != self.rows {
            return Err(ColumnarError::LengthMismatch {
                column: index.name.unwrap_or_else(|| "<index>".to_string()),
                expected: self.rows,
                actual,
            });
        }
        let mut out = self.clone();
        out.index = Some(index);
        Ok(out)
    }

    /// Move the index back into the first column position. An unnamed index becomes `index`.
    /// Frames without an explicit index get a positional `index` column.
    pub fn reset_index(&self) -> Result<Self> {
        let (name, values) = match &self.index {
            Some(index) => (
                index.name.clone().unwrap_or_else(|| "index".to_string()),
                index.values.clone(),
            ),
            None => (
                "index".to_string(),
                Column::integers((0..self.rows).map(|r| r as i64)),
            ),
        };
        if self.has_column(&name) {
            return Err(ColumnarError::DuplicateColumn(name));
        }
        let mut out = self.clone();
        out.index = None;
        out.schema
            .insert(0, ColumnSchema::new(name, values.column_type()));
        out.columns.insert(0, values);
        out.rebuild_column_index();
        Ok(out)
    }

    /// Row `row` as values in schema order.
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.rows {
            return None;
        }
        Some(self.columns.iter().map(|c| c.get(row)).collect())
    }
}

/// Row-at-a-time construction of a [`GeoFrame`].
#[derive(Debug)]
pub struct GeoFrameBuilder {
    schema: Vec<ColumnSchema>,
    columns: Vec<Column>,
    rows: usize,
    crs: Option<Crs>,
}

impl GeoFrameBuilder {
    pub fn new(schema: Vec<ColumnSchema>) -> Self {
        let columns = schema
            .iter()
            .map(|c| Column::empty(c.column_type))
            .collect();
        Self {
            schema,
            columns,
            rows: 0,
            crs: None,
        }
    }

    pub fn crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    /// Append a row. On error the builder is left unchanged.
    pub fn append_row(&mut self, row: &[Value]) -> Result<()> {
        if row.len() != self.schema.len() {
            return Err(ColumnarError::SchemaMismatch {
                expected: self.schema.len(),
                actual: row.len(),
            });
        }
        for (schema, value) in self.schema.iter().zip(row) {
            let compatible = match (schema.column_type, value.column_type()) {
                (_, None) => true,
                (ColumnType::Number, Some(ColumnType::Integer)) => true,
                (expected, Some(actual)) => expected == actual,
            };
            if !compatible {
                return Err(ColumnarError::TypeMismatch {
                    column: schema.name.clone(),
                    expected: schema.column_type,
                    actual: value.kind().to_string(),
                });
            }
        }
        for ((schema, column), value) in self.schema.iter().zip(&mut self.columns).zip(row) {
            column.push(&schema.name, value.clone())?;
        }
        self.rows += 1;
        Ok(())
    }

    pub fn finalize(self) -> Result<GeoFrame> {
        let mut frame = GeoFrame::from_columns(
            self.schema
                .into_iter()
                .map(|c| c.name)
                .zip(self.columns)
                .collect(),
        )?;
        // A schema with no columns still carries its row count.
        frame.rows = self.rows;
        frame.crs = self.crs;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> GeoFrame {
        GeoFrame::from_columns(vec![
            ("lat", Column::numbers([50.0, 51.0])),
            ("lng", Column::numbers([14.0, 15.0])),
            ("name", Column::strings(["a", "b"])),
        ])
        .unwrap()
    }

    #[test]
    fn with_column_replaces_in_place() {
        let frame = sample();
        let out = frame
            .with_column("lat", Column::numbers([1.0, 2.0]))
            .unwrap();
        assert_eq!(
            out.column_names().collect::<Vec<_>>(),
            vec!["lat", "lng", "name"]
        );
        assert_eq!(out.value(1, "lat"), Some(Value::Number(2.0)));
        // receiver untouched
        assert_eq!(frame.value(1, "lat"), Some(Value::Number(51.0)));
    }

    #[test]
    fn with_column_checks_length() {
        let err = sample()
            .with_column("extra", Column::numbers([1.0]))
            .unwrap_err();
        assert_eq!(
            err,
            ColumnarError::LengthMismatch {
                column: "extra".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn set_index_moves_column() {
        let out = sample().set_index("name").unwrap();
        assert!(!out.has_column("name"));
        assert_eq!(out.index().unwrap().name.as_deref(), Some("name"));
        assert_eq!(out.index_value(1), Some(Value::from("b")));
        assert_eq!(out.value(0, "lng"), Some(Value::Number(14.0)));
    }

    #[test]
    fn reset_index_restores_column_first() {
        let out = sample().set_index("name").unwrap().reset_index().unwrap();
        assert_eq!(
            out.column_names().collect::<Vec<_>>(),
            vec!["name", "lat", "lng"]
        );
        assert!(out.index().is_none());
    }

    #[test]
    fn positional_index_by_default() {
        let frame = sample();
        assert_eq!(frame.index_value(1), Some(Value::Integer(1)));
        assert_eq!(frame.index_value(2), None);
    }

    #[test]
    fn builder_rejects_bad_rows_without_partial_append() {
        let mut builder = GeoFrameBuilder::new(vec![
            ColumnSchema::new("lat", ColumnType::Number),
            ColumnSchema::new("name", ColumnType::String),
        ]);
        builder.append_row(&[50.0.into(), "a".into()]).unwrap();
        assert!(builder.append_row(&[51.0.into()]).is_err());
        assert!(builder.append_row(&[51.0.into(), 3.0.into()]).is_err());
        let frame = builder.finalize().unwrap();
        assert_eq!(frame.row_count(), 1);
        assert_eq!(frame.column("name").unwrap().len(), 1);
    }
}
