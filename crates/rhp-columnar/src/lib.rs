//! Typed in-memory tables for geospatial row data.
//!
//! This crate focuses on:
//! - Column-oriented storage with one typed, nullable vector per column.
//! - An optional named row index, so derived tables can be keyed by cell codes.
//! - A geometry column type backed by `geo-types`.
//! - A coordinate reference system attribute carried on the table.
//!
//! Every transforming operation on [`GeoFrame`] returns a new frame; the receiver is never
//! mutated.

#![forbid(unsafe_code)]

mod column;
mod error;
mod frame;
mod types;

pub use crate::column::Column;
pub use crate::error::{ColumnarError, Result};
pub use crate::frame::{GeoFrame, GeoFrameBuilder, RowIndex};
pub use crate::types::{ColumnSchema, ColumnType, Crs, Value};
