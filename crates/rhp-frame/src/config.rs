//! Accessor configuration.

use crate::backend::AreaUnit;
use crate::error::{Result, RhpError};
use rhp_columnar::Crs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Latitude column read by encoding and written by decoding.
    /// Default: "lat"
    pub lat_col: String,

    /// Longitude column read by encoding and written by decoding.
    /// Default: "lng"
    pub lng_col: String,

    /// Point geometry column used for encoding when the coordinate columns are absent, and the
    /// column boundaries and centroid points are written to.
    /// Default: "geometry"
    pub geometry_col: String,

    /// Make the encoded cell-code column the row index.
    /// Default: true
    pub set_index: bool,

    /// CRS attached to geometry results when the input frame has none.
    /// Default: EPSG:4326
    pub default_crs: Crs,

    /// Default: km^2
    pub area_unit: AreaUnit,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            lat_col: "lat".to_string(),
            lng_col: "lng".to_string(),
            geometry_col: "geometry".to_string(),
            set_index: true,
            default_crs: Crs::wgs84(),
            area_unit: AreaUnit::Km2,
        }
    }
}

impl FrameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RhpError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            FrameConfig::from_json(r#"{"lat_col": "latitude", "area_unit": "m^2"}"#).unwrap();
        assert_eq!(config.lat_col, "latitude");
        assert_eq!(config.lng_col, "lng");
        assert_eq!(config.area_unit, AreaUnit::M2);
        assert_eq!(config.default_crs, Crs::wgs84());
    }

    #[test]
    fn bad_json_is_a_config_error() {
        assert!(matches!(
            FrameConfig::from_json(r#"{"set_index": "yes"}"#),
            Err(RhpError::Config(_))
        ));
    }
}
