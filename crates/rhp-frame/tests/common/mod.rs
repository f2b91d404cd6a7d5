#![allow(dead_code)]

use rhp_columnar::{Column, GeoFrame, RowIndex};
use rhp_frame::{
    AreaUnit, BackendError, BoundaryGeometry, CellCode, DggsBackend, GeoPoint, GridShape,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Plate-carrée quadtree: base cell `A` is the western hemisphere, `B` the eastern one, and each
/// level splits a cell into four children numbered `0 1 / 2 3` from the north-west corner.
/// Areas are in square degrees (scaled by 10^6 for `M2`).
#[derive(Debug)]
pub struct FakeBackend {
    shape: GridShape,
    calls: AtomicUsize,
}

impl FakeBackend {
    pub const MAX_RESOLUTION: u8 = 6;

    pub fn new() -> Self {
        Self {
            shape: GridShape::new(['A', 'B'], 4, Self::MAX_RESOLUTION),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of backend calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// `(west, east, south, north)` of a cell.
    pub fn bounds(code: &CellCode) -> (f64, f64, f64, f64) {
        let mut chars = code.as_str().chars();
        let (mut west, mut east) = match chars.next() {
            Some('A') => (-180.0, 0.0),
            _ => (0.0, 180.0),
        };
        let (mut south, mut north) = (-90.0, 90.0);
        for c in chars {
            let digit = c.to_digit(10).unwrap_or(0);
            let mid_x = (west + east) / 2.0;
            let mid_y = (south + north) / 2.0;
            if digit % 2 == 0 {
                east = mid_x;
            } else {
                west = mid_x;
            }
            if digit / 2 == 0 {
                south = mid_y;
            } else {
                north = mid_y;
            }
        }
        (west, east, south, north)
    }

    fn code(&self, operation: &'static str, code: String) -> Result<CellCode, BackendError> {
        CellCode::parse(&code, &self.shape).map_err(|e| BackendError::new(operation, e))
    }
}

impl DggsBackend for FakeBackend {
    fn shape(&self) -> &GridShape {
        &self.shape
    }

    fn encode(&self, point: GeoPoint, resolution: u8) -> Result<CellCode, BackendError> {
        self.record();
        if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
            return Err(BackendError::new("encode", "coordinate out of range"));
        }
        let (mut west, mut east, base) = if point.lng < 0.0 {
            (-180.0, 0.0, 'A')
        } else {
            (0.0, 180.0, 'B')
        };
        let (mut south, mut north) = (-90.0, 90.0);
        let mut code = base.to_string();
        for _ in 0..resolution {
            let mid_x = (west + east) / 2.0;
            let mid_y = (south + north) / 2.0;
            let col = u8::from(point.lng >= mid_x);
            let row = u8::from(point.lat < mid_y);
            if col == 0 {
                east = mid_x;
            } else {
                west = mid_x;
            }
            if row == 0 {
                south = mid_y;
            } else {
                north = mid_y;
            }
            code.push(char::from(b'0' + row * 2 + col));
        }
        self.code("encode", code)
    }

    fn decode(&self, code: &CellCode) -> Result<GeoPoint, BackendError> {
        self.record();
        let (west, east, south, north) = Self::bounds(code);
        Ok(GeoPoint::new((south + north) / 2.0, (west + east) / 2.0))
    }

    fn boundary(&self, code: &CellCode) -> Result<BoundaryGeometry, BackendError> {
        self.record();
        let (west, east, south, north) = Self::bounds(code);
        Ok(BoundaryGeometry::new(vec![
            GeoPoint::new(north, west),
            GeoPoint::new(north, east),
            GeoPoint::new(south, east),
            GeoPoint::new(south, west),
        ]))
    }

    fn area(&self, code: &CellCode, unit: AreaUnit) -> Result<f64, BackendError> {
        self.record();
        let (west, east, south, north) = Self::bounds(code);
        let square_degrees = (east - west) * (north - south);
        Ok(match unit {
            AreaUnit::Km2 => square_degrees,
            AreaUnit::M2 => square_degrees * 1.0e6,
        })
    }

    fn center_child(&self, code: &CellCode, resolution: u8) -> Result<CellCode, BackendError> {
        self.record();
        let extra = usize::from(resolution).saturating_sub(usize::from(code.resolution()));
        self.code("center_child", format!("{code}{}", "3".repeat(extra)))
    }
}

pub fn coordinates_frame() -> GeoFrame {
    GeoFrame::from_columns(vec![
        ("lat", Column::numbers([50.0, -10.0, 0.0])),
        ("lng", Column::numbers([14.0, -100.0, 0.0])),
        ("name", Column::strings(["prague", "pacific", "null island"])),
    ])
    .unwrap()
}

/// Frame indexed by `codes` under `rhp_02`, with one attribute column.
pub fn indexed_frame(codes: &[&str]) -> GeoFrame {
    GeoFrame::from_columns(vec![(
        "value",
        Column::integers((0..codes.len()).map(|i| i as i64)),
    )])
    .unwrap()
    .with_index(RowIndex::named("rhp_02", Column::strings(codes.iter().copied())))
    .unwrap()
}
