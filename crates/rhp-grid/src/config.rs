//! Grid configuration types.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Reference surface the grid is built on.
///
/// Ellipsoids are handled through their authalic sphere: latitudes are converted to authalic
/// latitudes before projecting, so every cell at a resolution keeps the same area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ellipsoid {
    #[default]
    Wgs84,
    Sphere { radius_m: f64 },
}

impl Ellipsoid {
    fn eccentricity(&self) -> f64 {
        match self {
            Ellipsoid::Wgs84 => (WGS84_F * (2.0 - WGS84_F)).sqrt(),
            Ellipsoid::Sphere { .. } => 0.0,
        }
    }

    /// `q(φ)` from Snyder, "Map Projections: A Working Manual", eq. 3-12.
    fn q(e: f64, phi: f64) -> f64 {
        let s = phi.sin();
        let es = e * s;
        (1.0 - e * e) * (s / (1.0 - es * es) - (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln())
    }

    /// Radius of the sphere with the same surface area, in metres.
    pub fn authalic_radius_m(&self) -> f64 {
        match self {
            Ellipsoid::Sphere { radius_m } => *radius_m,
            Ellipsoid::Wgs84 => {
                let qp = Self::q(self.eccentricity(), std::f64::consts::FRAC_PI_2);
                WGS84_A * (qp / 2.0).sqrt()
            }
        }
    }

    /// Geodetic latitude (radians) to authalic latitude (radians).
    pub fn to_authalic(&self, phi: f64) -> f64 {
        let e = self.eccentricity();
        if e == 0.0 {
            return phi;
        }
        let qp = Self::q(e, std::f64::consts::FRAC_PI_2);
        (Self::q(e, phi) / qp).clamp(-1.0, 1.0).asin()
    }

    /// Authalic latitude (radians) back to geodetic latitude (radians), Snyder eq. 3-18.
    pub fn from_authalic(&self, beta: f64) -> f64 {
        let e = self.eccentricity();
        if e == 0.0 {
            return beta;
        }
        let e2 = e * e;
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        beta + (e2 / 3.0 + 31.0 * e4 / 180.0 + 517.0 * e6 / 5040.0) * (2.0 * beta).sin()
            + (23.0 * e4 / 360.0 + 251.0 * e6 / 3780.0) * (4.0 * beta).sin()
            + (761.0 * e6 / 45360.0) * (6.0 * beta).sin()
    }
}

/// Unit for cell areas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    #[default]
    #[serde(rename = "km^2")]
    Km2,
    #[serde(rename = "m^2")]
    M2,
}

impl AreaUnit {
    pub fn convert_m2(&self, area_m2: f64) -> f64 {
        match self {
            AreaUnit::M2 => area_m2,
            AreaUnit::Km2 => area_m2 / 1.0e6,
        }
    }
}

/// Configuration of an rHEALPix grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Children per cell side. Cells have `n_side²` children, addressed with one decimal digit,
    /// so only 2 and 3 are accepted.
    /// Default: 3
    pub n_side: u8,

    /// Equatorial square (0-3) the north polar square sits above.
    pub north_square: u8,

    /// Equatorial square (0-3) the south polar square sits below.
    pub south_square: u8,

    pub ellipsoid: Ellipsoid,

    /// Deepest resolution served.
    /// Default: 15 (sub-metre cells on WGS84)
    pub max_resolution: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            n_side: 3,
            north_square: 0,
            south_square: 0,
            ellipsoid: Ellipsoid::Wgs84,
            max_resolution: 15,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if !(2..=3).contains(&self.n_side) {
            return Err(GridError::InvalidConfig(format!(
                "n_side must be 2 or 3, got {}",
                self.n_side
            )));
        }
        if self.north_square > 3 || self.south_square > 3 {
            return Err(GridError::InvalidConfig(format!(
                "polar squares must be in 0..=3, got north={} south={}",
                self.north_square, self.south_square
            )));
        }
        if let Ellipsoid::Sphere { radius_m } = self.ellipsoid {
            if !(radius_m.is_finite() && radius_m > 0.0) {
                return Err(GridError::InvalidConfig(format!(
                    "sphere radius must be positive, got {radius_m}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig =
            serde_json::from_str(json).map_err(|e| GridError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
