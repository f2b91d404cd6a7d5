//! rHEALPix discrete global grid.
//!
//! The rHEALPix DGGS maps the (authalic) sphere onto six planar squares with the equal-area
//! HEALPix projection, folding the polar triangles into a north (`N`) and a south (`S`) square
//! next to the four equatorial squares `O`, `P`, `Q`, `R`. Each square is recursively divided
//! into `n_side × n_side` children, numbered row-major from the upper-left corner, so a cell
//! address is a base-cell letter followed by one digit per resolution level.
//!
//! ```text
//!  ┌───┐
//!  │ N │
//!  ├───┼───┬───┬───┐
//!  │ O │ P │ Q │ R │
//!  ├───┼───┴───┴───┘
//!  │ S │
//!  └───┘
//! ```
//!
//! (layout shown for `north_square = south_square = 0`)
//!
//! # Modules
//!
//! - [`config`]: grid and ellipsoid configuration
//! - [`cell`]: cell addresses
//! - [`projection`]: HEALPix / rHEALPix projection and authalic latitude
//! - `grid`: the [`RhealpixGrid`] operations
//! - [`error`]: error types

#![forbid(unsafe_code)]

pub mod cell;
pub mod config;
pub mod error;
mod grid;
pub mod projection;

pub use cell::{CellAddress, BASE_CELLS};
pub use config::{AreaUnit, Ellipsoid, GridConfig};
pub use error::{GridError, Result};
pub use grid::RhealpixGrid;
