#![forbid(unsafe_code)]

use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    #[default]
    Number,
    Integer,
    String,
    Boolean,
    Geometry,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// A single scalar cell of a [`crate::GeoFrame`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Number(f64),
    Integer(i64),
    String(Arc<str>),
    Boolean(bool),
    Geometry(Arc<Geometry<f64>>),
}

impl Value {
    /// `NaN` numbers count as missing, matching how dataframe libraries encode nulls in float
    /// columns.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::Null => None,
            Value::Number(_) => Some(ColumnType::Number),
            Value::Integer(_) => Some(ColumnType::Integer),
            Value::String(_) => Some(ColumnType::String),
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::Geometry(_) => Some(ColumnType::Geometry),
        }
    }

    /// Numeric view of the value. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) if !n.is_nan() => Some(*n),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&Geometry<f64>> {
        match self {
            Value::Geometry(g) => Some(g.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Geometry(_) => "geometry",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<Geometry<f64>> for Value {
    fn from(value: Geometry<f64>) -> Self {
        Value::Geometry(Arc::new(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Geometry(g) => write!(f, "{g:?}"),
        }
    }
}

/// Coordinate reference system attached to a table.
///
/// Stored as an authority string such as `EPSG:4326`. The authority prefix is upper-cased on
/// construction so `epsg:4326` and `EPSG:4326` compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Crs(Arc<str>);

impl Crs {
    pub fn new(code: &str) -> Self {
        let code = code.trim();
        let normalized = match code.split_once(':') {
            Some((authority, rest)) => format!("{}:{}", authority.to_ascii_uppercase(), rest),
            None => code.to_string(),
        };
        Self(Arc::from(normalized))
    }

    pub fn epsg(code: u32) -> Self {
        Self(Arc::from(format!("EPSG:{code}")))
    }

    /// Geographic WGS84 (longitude/latitude in degrees).
    pub fn wgs84() -> Self {
        Self::epsg(4326)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Crs {
    fn from(value: String) -> Self {
        Crs::new(&value)
    }
}

impl From<Crs> for String {
    fn from(value: Crs) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
