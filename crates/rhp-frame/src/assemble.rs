//! Table assembler: turn per-row results into columns of a new frame.
//!
//! Every function takes the source frame by reference and returns a fresh one. Columns that
//! already exist are replaced at their position; new ones are appended after the existing
//! columns.

use crate::backend::GeoPoint;
use crate::cell::CellCode;
use crate::error::Result;
use geo_types::Geometry;
use rhp_columnar::{Column, Crs, GeoFrame};

/// Attach a derived column, replacing any column of the same name.
pub fn with_derived(frame: &GeoFrame, name: &str, column: Column) -> Result<GeoFrame> {
    if frame.has_column(name) {
        log::debug!("replacing existing column {name:?}");
    }
    log::trace!(
        "assembling {:?} column {name:?} ({} rows)",
        column.column_type(),
        column.len()
    );
    Ok(frame.with_column(name, column)?)
}

/// Attach cell codes as column `name`, then move it into the row index when `set_index` is set.
pub fn with_cell_index(
    frame: &GeoFrame,
    name: &str,
    codes: &[CellCode],
    set_index: bool,
) -> Result<GeoFrame> {
    let out = with_derived(frame, name, code_column(codes))?;
    if !set_index {
        return Ok(out);
    }
    Ok(out.set_index(name)?)
}

/// Write centroid latitudes and longitudes into `lat_col` and `lng_col`.
pub fn with_centroids(
    frame: &GeoFrame,
    lat_col: &str,
    lng_col: &str,
    points: &[GeoPoint],
) -> Result<GeoFrame> {
    let lats = Column::numbers(points.iter().map(|p| p.lat));
    let lngs = Column::numbers(points.iter().map(|p| p.lng));
    let out = with_derived(frame, lat_col, lats)?;
    with_derived(&out, lng_col, lngs)
}

/// Write a geometry column. A CRS already on the frame is kept; otherwise `default_crs` is
/// attached.
pub fn with_geometries(
    frame: &GeoFrame,
    name: &str,
    geometries: Vec<Geometry<f64>>,
    default_crs: &Crs,
) -> Result<GeoFrame> {
    let crs = frame.crs().cloned().unwrap_or_else(|| default_crs.clone());
    let out = with_derived(frame, name, Column::geometries(geometries))?;
    Ok(out.with_crs(crs))
}

pub fn code_column(codes: &[CellCode]) -> Column {
    Column::strings(codes.iter().map(CellCode::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::GridShape;
    use geo_types::Point;
    use pretty_assertions::assert_eq;
    use rhp_columnar::Value;

    fn frame() -> GeoFrame {
        GeoFrame::from_columns(vec![
            ("lat", Column::numbers([50.0, 51.0])),
            ("lng", Column::numbers([14.0, 15.0])),
            ("name", Column::strings(["a", "b"])),
        ])
        .unwrap()
    }

    fn codes() -> Vec<CellCode> {
        let shape = GridShape::new(['N', 'O'], 9, 15);
        ["N01", "N02"]
            .iter()
            .map(|c| CellCode::parse(c, &shape).unwrap())
            .collect()
    }

    #[test]
    fn cell_index_moves_codes_into_index() {
        let out = with_cell_index(&frame(), "rhp_02", &codes(), true).unwrap();
        let index = out.index().unwrap();
        assert_eq!(index.name.as_deref(), Some("rhp_02"));
        assert_eq!(index.values, Column::strings(["N01", "N02"]));
        assert!(!out.has_column("rhp_02"));
        assert_eq!(
            out.column_names().collect::<Vec<_>>(),
            vec!["lat", "lng", "name"]
        );
    }

    #[test]
    fn cell_index_can_stay_a_column() {
        let out = with_cell_index(&frame(), "rhp_02", &codes(), false).unwrap();
        assert!(out.index().is_none());
        assert_eq!(out.value(1, "rhp_02"), Some(Value::from("N02")));
    }

    #[test]
    fn centroids_replace_in_place() {
        let points = [GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)];
        let out = with_centroids(&frame(), "lat", "lng", &points).unwrap();
        assert_eq!(
            out.column_names().collect::<Vec<_>>(),
            vec!["lat", "lng", "name"]
        );
        assert_eq!(out.column("lat"), Some(&Column::numbers([1.0, 3.0])));
        assert_eq!(out.column("lng"), Some(&Column::numbers([2.0, 4.0])));
        assert_eq!(out.column("name"), frame().column("name"));
    }

    #[test]
    fn geometries_keep_existing_crs() {
        let geoms = || {
            vec![
                Geometry::Point(Point::new(14.0, 50.0)),
                Geometry::Point(Point::new(15.0, 51.0)),
            ]
        };
        let defaulted = with_geometries(&frame(), "geometry", geoms(), &Crs::wgs84()).unwrap();
        assert_eq!(defaulted.crs(), Some(&Crs::wgs84()));

        let projected = frame().with_crs(Crs::epsg(3857));
        let kept = with_geometries(&projected, "geometry", geoms(), &Crs::wgs84()).unwrap();
        assert_eq!(kept.crs(), Some(&Crs::epsg(3857)));
    }

    #[test]
    fn wrong_length_is_a_table_error() {
        let err = with_derived(&frame(), "x", Column::numbers([1.0])).unwrap_err();
        assert!(matches!(err, crate::RhpError::Table(_)));
    }
}
