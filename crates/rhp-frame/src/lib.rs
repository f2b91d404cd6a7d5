//! rHEALPix cell indexing for tabular geographic data.
//!
//! `rhp-frame` maps rows of a [`GeoFrame`] through a discrete global grid: coordinates become
//! cell codes, cell codes become centroids, footprints, ancestors and areas. Every operation
//! covers the whole table and returns a new one with the same rows in the same order; a single
//! bad row fails the call.
//!
//! ```no_run
//! use rhp_columnar::{Column, GeoFrame};
//! use rhp_frame::{RhealpixBackend, RhpFrameExt};
//!
//! # fn main() -> rhp_frame::Result<()> {
//! let backend = RhealpixBackend::default();
//! let frame = GeoFrame::from_columns(vec![
//!     ("lat", Column::numbers([50.0, 51.0])),
//!     ("lng", Column::numbers([14.0, 15.0])),
//! ])?;
//!
//! let cells = frame.rhp(&backend).geo_to_rhp(9)?;
//! let parents = cells.rhp(&backend).rhp_to_parent(Some(5))?;
//! # let _ = parents;
//! # Ok(())
//! # }
//! ```
//!
//! The grid itself sits behind [`DggsBackend`]; [`RhealpixBackend`] adapts the `rhp-grid`
//! implementation, and any other grid with prefix-nested codes can be plugged in.

#![forbid(unsafe_code)]

mod accessor;
mod assemble;
pub mod backend;
pub mod cell;
mod config;
mod error;
pub mod mapper;
mod naming;
mod rhealpix;

pub use accessor::{RhpAccessor, RhpFrameExt};
pub use backend::{AreaUnit, BoundaryGeometry, DggsBackend, GeoPoint};
pub use cell::{ancestor, base_cell, resolution_of, CellCode, GridShape};
pub use config::FrameConfig;
pub use error::{BackendError, Result, RhpError};
pub use naming::{column_name, resolution_column, Operation};
pub use rhealpix::RhealpixBackend;

pub use rhp_columnar::{Column, Crs, GeoFrame};
