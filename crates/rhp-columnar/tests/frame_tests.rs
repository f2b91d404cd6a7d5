use geo_types::{Geometry, Point};
use pretty_assertions::assert_eq;
use rhp_columnar::{
    Column, ColumnSchema, ColumnType, ColumnarError, Crs, GeoFrame, GeoFrameBuilder, RowIndex,
    Value,
};

fn points_frame() -> GeoFrame {
    let mut builder = GeoFrameBuilder::new(vec![
        ColumnSchema::new("site", ColumnType::String),
        ColumnSchema::new("geometry", ColumnType::Geometry),
    ])
    .crs(Crs::wgs84());
    for (site, x, y) in [("a", 14.0, 50.0), ("b", 15.0, 51.0), ("c", 16.0, 52.0)] {
        builder
            .append_row(&[
                Value::from(site),
                Value::from(Geometry::Point(Point::new(x, y))),
            ])
            .unwrap();
    }
    builder.finalize().unwrap()
}

#[test]
fn crs_survives_derivations() {
    let frame = points_frame();
    let derived = frame
        .with_column("score", Column::integers([1, 2, 3]))
        .unwrap()
        .set_index("site")
        .unwrap();
    assert_eq!(derived.crs(), Some(&Crs::wgs84()));
    assert_eq!(derived.row_count(), 3);
    assert_eq!(derived.column_type("geometry"), Some(ColumnType::Geometry));
}

#[test]
fn row_order_is_preserved() {
    let frame = points_frame();
    let sites: Vec<Value> = frame.column("site").unwrap().iter().collect();
    assert_eq!(sites, vec!["a".into(), "b".into(), "c".into()]);
    assert_eq!(
        frame.row(2).unwrap()[1]
            .as_geometry()
            .map(|g| matches!(g, Geometry::Point(p) if p.x() == 16.0)),
        Some(true)
    );
}

#[test]
fn duplicate_columns_are_rejected() {
    let err = GeoFrame::from_columns(vec![
        ("a", Column::numbers([1.0])),
        ("a", Column::numbers([2.0])),
    ])
    .unwrap_err();
    assert_eq!(err, ColumnarError::DuplicateColumn("a".to_string()));
}

#[test]
fn explicit_index_must_match_row_count() {
    let frame = points_frame();
    let err = frame
        .with_index(RowIndex::named("code", Column::strings(["N1"])))
        .unwrap_err();
    assert_eq!(
        err,
        ColumnarError::LengthMismatch {
            column: "code".to_string(),
            expected: 3,
            actual: 1,
        }
    );

    let unnamed = frame
        .with_index(RowIndex::new(None, Column::integers([1, 2])))
        .unwrap_err();
    assert_eq!(
        unnamed,
        ColumnarError::LengthMismatch {
            column: "<index>".to_string(),
            expected: 3,
            actual: 2,
        }
    );

    let labels = Column::strings(["N1", "N2", "N3"]);
    let indexed = frame.with_index(RowIndex::named("code", labels)).unwrap();
    assert_eq!(indexed.index_value(2), Some(Value::from("N3")));
}

#[test]
fn unknown_columns_error() {
    let frame = points_frame();
    assert_eq!(
        frame.set_index("missing").unwrap_err(),
        ColumnarError::UnknownColumn("missing".to_string())
    );
    assert_eq!(frame.value(0, "missing"), None);
}
