use crate::cell::{CellCode, GridShape};
use crate::error::BackendError;
use geo_types::{Coord, LineString, Point, Polygon};
use std::fmt;

pub use rhp_grid::AreaUnit;

/// Latitude/longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lng, p.lat)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        GeoPoint::new(p.y(), p.x())
    }
}

/// Closed ring approximating a cell's footprint, in backend vertex order.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryGeometry {
    ring: Vec<GeoPoint>,
}

impl BoundaryGeometry {
    /// The ring is closed by repeating the first vertex when the backend did not.
    pub fn new(mut ring: Vec<GeoPoint>) -> Self {
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last()) {
            if first != *last {
                ring.push(first);
            }
        }
        Self { ring }
    }

    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        let exterior: LineString<f64> = self
            .ring
            .iter()
            .map(|p| Coord { x: p.lng, y: p.lat })
            .collect();
        Polygon::new(exterior, Vec::new())
    }
}

/// Capabilities the bridge needs from a discrete global grid.
///
/// Implementations must be stateless per call; the same backend may serve several tables from
/// different threads. Failures are reported as [`BackendError`] wrapping the backend's own error.
pub trait DggsBackend: fmt::Debug + Send + Sync {
    /// Alphabet, branching factor and depth of the codes this backend produces.
    fn shape(&self) -> &GridShape;

    fn encode(&self, point: GeoPoint, resolution: u8) -> Result<CellCode, BackendError>;

    /// Cell centroid.
    fn decode(&self, code: &CellCode) -> Result<GeoPoint, BackendError>;

    fn boundary(&self, code: &CellCode) -> Result<BoundaryGeometry, BackendError>;

    /// Surface area of the cell.
    fn area(&self, code: &CellCode, unit: AreaUnit) -> Result<f64, BackendError>;

    /// Ancestor at `resolution`. Codes nest by prefix, so the default truncates.
    fn parent(&self, code: &CellCode, resolution: u8) -> Result<CellCode, BackendError> {
        code.ancestor(i32::from(resolution))
            .map_err(|e| BackendError::new("parent", e))
    }

    /// Central descendant at `resolution`.
    fn center_child(&self, code: &CellCode, resolution: u8) -> Result<CellCode, BackendError>;

    fn is_valid(&self, code: &str) -> bool {
        CellCode::parse(code, self.shape())
            .is_ok_and(|c| c.resolution() <= self.shape().max_resolution())
    }
}
