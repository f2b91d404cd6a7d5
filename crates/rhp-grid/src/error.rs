//! Error types for grid operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Requested resolution is above the grid's maximum.
    #[error("resolution {resolution} out of range (max {max})")]
    ResolutionOutOfRange { resolution: usize, max: u8 },

    /// Malformed cell address.
    #[error("invalid cell address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Non-finite or out-of-range coordinate.
    #[error("invalid coordinate (lng={lng}, lat={lat})")]
    InvalidCoordinate { lng: f64, lat: f64 },

    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
