//! Row mapper: gather per-row inputs from a frame and apply a per-row function with
//! all-or-nothing semantics.
//!
//! Inputs are gathered for every row before any backend call is made, so a missing value fails
//! the call without spending work on the rows before it. The output has exactly one entry per
//! input row, in row order.

use crate::backend::GeoPoint;
use crate::cell::{CellCode, GridShape};
use crate::error::{Result, RhpError};
use rhp_columnar::{ColumnType, ColumnarError, GeoFrame, Value};

/// Where per-row inputs come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowSource<'a> {
    /// Numeric latitude/longitude columns.
    Coordinates { lat: &'a str, lng: &'a str },
    /// A geometry column of points (`x` = longitude, `y` = latitude).
    PointGeometry { column: &'a str },
}

pub(crate) const CELL_INDEX: &str = "cell-code index";

/// Apply `f` to every input in order. The first error aborts the whole batch.
pub fn map_rows<I, T, F>(inputs: &[I], f: F) -> Result<Vec<T>>
where
    F: FnMut(&I) -> Result<T>,
{
    inputs.iter().map(f).collect()
}

/// Gather one point per row from coordinate columns or a point geometry column.
pub fn collect_points(frame: &GeoFrame, source: RowSource<'_>) -> Result<Vec<GeoPoint>> {
    match source {
        RowSource::Coordinates { lat, lng } => {
            let lats = numeric_values(frame, lat)?;
            let lngs = numeric_values(frame, lng)?;
            Ok(lats
                .into_iter()
                .zip(lngs)
                .map(|(lat, lng)| GeoPoint::new(lat, lng))
                .collect())
        }
        RowSource::PointGeometry { column } => {
            let values = frame
                .column(column)
                .ok_or_else(|| RhpError::missing(column, None))?;
            if values.column_type() != ColumnType::Geometry {
                return Err(type_mismatch(
                    column,
                    ColumnType::Geometry,
                    values.column_type(),
                ));
            }
            (0..frame.row_count())
                .map(|row| match values.get_geometry(row) {
                    Some(geo_types::Geometry::Point(p)) => Ok(GeoPoint::from(*p)),
                    Some(_) => Err(RhpError::Table(ColumnarError::TypeMismatch {
                        column: column.to_string(),
                        expected: ColumnType::Geometry,
                        actual: format!("non-point geometry at row {row}"),
                    })),
                    None => Err(RhpError::missing(column, Some(row))),
                })
                .collect()
        }
    }
}

fn numeric_values(frame: &GeoFrame, name: &str) -> Result<Vec<f64>> {
    let column = frame
        .column(name)
        .ok_or_else(|| RhpError::missing(name, None))?;
    match column.column_type() {
        ColumnType::Number | ColumnType::Integer => {}
        other => return Err(type_mismatch(name, ColumnType::Number, other)),
    }
    (0..frame.row_count())
        .map(|row| {
            column
                .get(row)
                .as_f64()
                .ok_or_else(|| RhpError::missing(name, Some(row)))
        })
        .collect()
}

fn type_mismatch(column: &str, expected: ColumnType, actual: ColumnType) -> RhpError {
    RhpError::Table(ColumnarError::TypeMismatch {
        column: column.to_string(),
        expected,
        actual: format!("{actual:?}"),
    })
}

/// Raw index labels, one per row. Fails when the frame has no explicit index or a label is null.
pub fn collect_index_labels(frame: &GeoFrame) -> Result<Vec<Value>> {
    let index = frame
        .index()
        .ok_or_else(|| RhpError::missing(CELL_INDEX, None))?;
    (0..frame.row_count())
        .map(|row| {
            let value = index.values.get(row);
            if value.is_null() {
                Err(RhpError::missing(CELL_INDEX, Some(row)))
            } else {
                Ok(value)
            }
        })
        .collect()
}

/// Parsed cell codes from the row index, one per row.
pub fn collect_codes(frame: &GeoFrame, shape: &GridShape) -> Result<Vec<CellCode>> {
    let labels = collect_index_labels(frame)?;
    let codes = map_rows(&labels, |label| match label {
        Value::String(code) => CellCode::parse(code, shape),
        other => Err(RhpError::MalformedCode {
            code: other.to_string(),
            reason: "index label is not a string".to_string(),
        }),
    })?;
    log::trace!("collected {} cell codes from index", codes.len());
    Ok(codes)
}
