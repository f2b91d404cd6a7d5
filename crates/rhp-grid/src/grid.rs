use crate::cell::{CellAddress, BASE_CELLS};
use crate::config::{AreaUnit, GridConfig};
use crate::error::{GridError, Result};
use crate::projection::{rhealpix_forward, rhealpix_inverse};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// An rHEALPix grid: conversions between geographic points and cell addresses.
///
/// Coordinates are `(lng, lat)` in degrees on the configured ellipsoid. All operations are pure
/// and the grid can be shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct RhealpixGrid {
    config: GridConfig,
    /// Authalic radius, metres.
    radius_m: f64,
}

impl Default for RhealpixGrid {
    fn default() -> Self {
        let config = GridConfig::default();
        let radius_m = config.ellipsoid.authalic_radius_m();
        Self { config, radius_m }
    }
}

impl RhealpixGrid {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let radius_m = config.ellipsoid.authalic_radius_m();
        log::debug!(
            "rHEALPix grid: n_side={} north_square={} south_square={} radius={radius_m:.3}m",
            config.n_side,
            config.north_square,
            config.south_square
        );
        Ok(Self { config, radius_m })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn n_side(&self) -> u8 {
        self.config.n_side
    }

    pub fn max_resolution(&self) -> u8 {
        self.config.max_resolution
    }

    pub fn base_cells(&self) -> &'static [char] {
        &BASE_CELLS
    }

    pub fn parse(&self, address: &str) -> Result<CellAddress> {
        let cell = CellAddress::parse(address, self.config.n_side)?;
        self.check_resolution(cell.resolution())?;
        Ok(cell)
    }

    pub fn is_valid(&self, address: &str) -> bool {
        self.parse(address).is_ok()
    }

    fn check_resolution(&self, resolution: usize) -> Result<()> {
        if resolution > usize::from(self.config.max_resolution) {
            return Err(GridError::ResolutionOutOfRange {
                resolution,
                max: self.config.max_resolution,
            });
        }
        Ok(())
    }

    /// Upper-left planar corner of a resolution-0 square (unit sphere).
    fn base_origin(&self, base: u8) -> (f64, f64) {
        let north_x = -PI + FRAC_PI_2 * f64::from(self.config.north_square);
        let south_x = -PI + FRAC_PI_2 * f64::from(self.config.south_square);
        match base {
            0 => (north_x, 3.0 * FRAC_PI_4),
            5 => (south_x, -FRAC_PI_4),
            b => (-PI + FRAC_PI_2 * f64::from(b - 1), FRAC_PI_4),
        }
    }

    fn base_at(&self, x: f64, y: f64) -> u8 {
        if y > FRAC_PI_4 {
            0
        } else if y < -FRAC_PI_4 {
            5
        } else {
            1 + (((x + PI) / FRAC_PI_2).floor() as i64).clamp(0, 3) as u8
        }
    }

    /// Upper-left corner and side length of `cell` in the unit-sphere plane.
    fn planar_square(&self, cell: &CellAddress) -> (f64, f64, f64) {
        let n = u32::from(self.config.n_side);
        let (mut x0, mut y0) = self.base_origin(cell.base());
        let mut side = FRAC_PI_2;
        for &d in cell.digits() {
            side /= f64::from(n);
            let (row, col) = (u32::from(d) / n, u32::from(d) % n);
            x0 += side * f64::from(col);
            y0 -= side * f64::from(row);
        }
        (x0, y0, side)
    }

    fn to_geographic(&self, x: f64, y: f64) -> (f64, f64) {
        let (lam, beta) =
            rhealpix_inverse(x, y, self.config.north_square, self.config.south_square);
        let phi = self.config.ellipsoid.from_authalic(beta);
        (lam.to_degrees(), phi.to_degrees())
    }

    /// Cell containing `(lng, lat)` at `resolution`.
    pub fn cell_at(&self, lng: f64, lat: f64, resolution: usize) -> Result<CellAddress> {
        self.check_resolution(resolution)?;
        if !lng.is_finite() || !lat.is_finite() || lat.abs() > 90.0 {
            return Err(GridError::InvalidCoordinate { lng, lat });
        }
        let beta = self.config.ellipsoid.to_authalic(lat.to_radians());
        let (x, y) = rhealpix_forward(
            lng.to_radians(),
            beta,
            self.config.north_square,
            self.config.south_square,
        );

        let n = i64::from(self.config.n_side);
        let base = self.base_at(x, y);
        let (mut x0, mut y0) = self.base_origin(base);
        let mut side = FRAC_PI_2;
        let mut digits = Vec::with_capacity(resolution);
        for _ in 0..resolution {
            side /= n as f64;
            let col = (((x - x0) / side).floor() as i64).clamp(0, n - 1);
            let row = (((y0 - y) / side).floor() as i64).clamp(0, n - 1);
            digits.push((row * n + col) as u8);
            x0 += side * col as f64;
            y0 -= side * row as f64;
        }
        Ok(CellAddress::new(base, digits))
    }

    /// Cell centre as `(lng, lat)`: the inverse projection of the planar square's centre.
    pub fn centroid(&self, cell: &CellAddress) -> Result<(f64, f64)> {
        self.check_resolution(cell.resolution())?;
        let (x0, y0, side) = self.planar_square(cell);
        Ok(self.to_geographic(x0 + side / 2.0, y0 - side / 2.0))
    }

    /// Cell corners as `(lng, lat)`, in the order upper-left, upper-right, lower-right,
    /// lower-left of the planar square. The ring is not closed.
    pub fn vertices(&self, cell: &CellAddress) -> Result<[(f64, f64); 4]> {
        self.check_resolution(cell.resolution())?;
        let (x0, y0, side) = self.planar_square(cell);
        Ok([
            self.to_geographic(x0, y0),
            self.to_geographic(x0 + side, y0),
            self.to_geographic(x0 + side, y0 - side),
            self.to_geographic(x0, y0 - side),
        ])
    }

    /// Area of any cell at `resolution`. The grid is equal-area, so the address is only needed
    /// for its resolution.
    pub fn cell_area(&self, cell: &CellAddress, unit: AreaUnit) -> Result<f64> {
        self.check_resolution(cell.resolution())?;
        let children = f64::from(self.config.n_side).powi(2);
        let base_area = 4.0 * PI * self.radius_m * self.radius_m / 6.0;
        Ok(unit.convert_m2(base_area / children.powi(cell.resolution() as i32)))
    }

    pub fn parent(&self, cell: &CellAddress, resolution: usize) -> Result<CellAddress> {
        cell.ancestor(resolution)
            .ok_or(GridError::ResolutionOutOfRange {
                resolution,
                max: cell.resolution() as u8,
            })
    }

    /// Descendant at `resolution` whose square contains the centre of `cell`.
    pub fn center_child(&self, cell: &CellAddress, resolution: usize) -> Result<CellAddress> {
        self.check_resolution(resolution)?;
        if resolution < cell.resolution() {
            return Err(GridError::ResolutionOutOfRange {
                resolution,
                max: self.config.max_resolution,
            });
        }
        let n = self.config.n_side;
        let center = (n / 2) * n + n / 2;
        let mut child = cell.clone();
        while child.resolution() < resolution {
            child = child.child(center);
        }
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_origin_is_in_q() {
        let grid = RhealpixGrid::default();
        assert_eq!(grid.cell_at(0.0, 0.0, 1).unwrap().to_string(), "Q3");
    }

    #[test]
    fn planar_square_of_base_cells() {
        let grid = RhealpixGrid::default();
        let (x0, y0, side) = grid.planar_square(&grid.parse("N").unwrap());
        assert_eq!((x0, y0, side), (-PI, 3.0 * FRAC_PI_4, FRAC_PI_2));
        let (x0, y0, _) = grid.planar_square(&grid.parse("R").unwrap());
        assert!((x0 - FRAC_PI_2).abs() < 1e-12);
        assert!((y0 - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn center_child_for_even_n_side() {
        let grid = RhealpixGrid::new(GridConfig {
            n_side: 2,
            ..GridConfig::default()
        })
        .unwrap();
        let cell = grid.parse("O1").unwrap();
        assert_eq!(grid.center_child(&cell, 3).unwrap().to_string(), "O133");
    }
}
