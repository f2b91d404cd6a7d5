//! [`DggsBackend`] over the rHEALPix grid from `rhp-grid`.

use crate::backend::{AreaUnit, BoundaryGeometry, DggsBackend, GeoPoint};
use crate::cell::{CellCode, GridShape};
use crate::error::BackendError;
use rhp_grid::{CellAddress, GridConfig, RhealpixGrid};

#[derive(Debug, Clone)]
pub struct RhealpixBackend {
    grid: RhealpixGrid,
    shape: GridShape,
}

impl Default for RhealpixBackend {
    /// WGS84, `n_side = 3`, polar squares above/below `O`.
    fn default() -> Self {
        Self::from_grid(RhealpixGrid::default())
    }
}

impl RhealpixBackend {
    pub fn new(config: GridConfig) -> Result<Self, BackendError> {
        let grid = RhealpixGrid::new(config).map_err(|e| BackendError::new("configure", e))?;
        Ok(Self::from_grid(grid))
    }

    pub fn from_grid(grid: RhealpixGrid) -> Self {
        let children = grid.n_side() * grid.n_side();
        let shape = GridShape::new(grid.base_cells(), children, grid.max_resolution());
        Self { grid, shape }
    }

    pub fn grid(&self) -> &RhealpixGrid {
        &self.grid
    }

    fn address(
        &self,
        operation: &'static str,
        code: &CellCode,
    ) -> Result<CellAddress, BackendError> {
        self.grid
            .parse(code.as_str())
            .map_err(|e| BackendError::new(operation, e))
    }

    fn code(
        &self,
        operation: &'static str,
        address: &CellAddress,
    ) -> Result<CellCode, BackendError> {
        CellCode::parse(&address.to_string(), &self.shape)
            .map_err(|e| BackendError::new(operation, e))
    }
}

impl DggsBackend for RhealpixBackend {
    fn shape(&self) -> &GridShape {
        &self.shape
    }

    fn encode(&self, point: GeoPoint, resolution: u8) -> Result<CellCode, BackendError> {
        let address = self
            .grid
            .cell_at(point.lng, point.lat, usize::from(resolution))
            .map_err(|e| BackendError::new("encode", e))?;
        self.code("encode", &address)
    }

    fn decode(&self, code: &CellCode) -> Result<GeoPoint, BackendError> {
        let address = self.address("decode", code)?;
        let (lng, lat) = self
            .grid
            .centroid(&address)
            .map_err(|e| BackendError::new("decode", e))?;
        Ok(GeoPoint::new(lat, lng))
    }

    fn boundary(&self, code: &CellCode) -> Result<BoundaryGeometry, BackendError> {
        let address = self.address("boundary", code)?;
        let vertices = self
            .grid
            .vertices(&address)
            .map_err(|e| BackendError::new("boundary", e))?;
        Ok(BoundaryGeometry::new(
            vertices
                .iter()
                .map(|&(lng, lat)| GeoPoint::new(lat, lng))
                .collect(),
        ))
    }

    fn area(&self, code: &CellCode, unit: AreaUnit) -> Result<f64, BackendError> {
        let address = self.address("area", code)?;
        self.grid
            .cell_area(&address, unit)
            .map_err(|e| BackendError::new("area", e))
    }

    fn parent(&self, code: &CellCode, resolution: u8) -> Result<CellCode, BackendError> {
        let address = self.address("parent", code)?;
        let parent = self
            .grid
            .parent(&address, usize::from(resolution))
            .map_err(|e| BackendError::new("parent", e))?;
        self.code("parent", &parent)
    }

    fn center_child(&self, code: &CellCode, resolution: u8) -> Result<CellCode, BackendError> {
        let address = self.address("center_child", code)?;
        let child = self
            .grid
            .center_child(&address, usize::from(resolution))
            .map_err(|e| BackendError::new("center_child", e))?;
        self.code("center_child", &child)
    }

    fn is_valid(&self, code: &str) -> bool {
        self.grid.is_valid(code)
    }
}
