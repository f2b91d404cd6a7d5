//! Named DGGS operations on a [`GeoFrame`].
//!
//! Each operation validates its parameters, gathers the per-row inputs, drives the backend over
//! every row and assembles a new frame. Any failure aborts the whole call; the source frame is
//! never modified.

use crate::assemble;
use crate::backend::{AreaUnit, DggsBackend, GeoPoint};
use crate::cell::CellCode;
use crate::config::FrameConfig;
use crate::error::{Result, RhpError};
use crate::mapper::{self, RowSource};
use crate::naming::{column_name, Operation};
use geo_types::{Geometry, Point};
use rhp_columnar::{Column, GeoFrame, Value};

/// Adds [`RhpAccessor`] to frames.
pub trait RhpFrameExt {
    fn rhp<'a>(&'a self, backend: &'a dyn DggsBackend) -> RhpAccessor<'a>;
}

impl RhpFrameExt for GeoFrame {
    fn rhp<'a>(&'a self, backend: &'a dyn DggsBackend) -> RhpAccessor<'a> {
        RhpAccessor::new(self, backend)
    }
}

#[derive(Debug, Clone)]
pub struct RhpAccessor<'a> {
    frame: &'a GeoFrame,
    backend: &'a dyn DggsBackend,
    config: FrameConfig,
}

impl<'a> RhpAccessor<'a> {
    pub fn new(frame: &'a GeoFrame, backend: &'a dyn DggsBackend) -> Self {
        Self {
            frame,
            backend,
            config: FrameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FrameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Encode every row's coordinates into a cell code at `resolution`.
    ///
    /// Coordinates come from the configured latitude/longitude columns, or from the point
    /// geometry column when either of those is absent. The codes land in `rhp_{resolution:02}`,
    /// which becomes the row index unless `set_index` is off.
    pub fn geo_to_rhp(&self, resolution: i32) -> Result<GeoFrame> {
        self.enter("geo_to_rhp", resolution);
        let resolution = self.backend.shape().validate_resolution(resolution)?;
        let points = mapper::collect_points(self.frame, self.point_source())?;
        let codes = mapper::map_rows(&points, |point| {
            Ok(self.backend.encode(*point, resolution)?)
        })?;
        let name = column_name(Operation::Encode { resolution });
        let out = assemble::with_cell_index(self.frame, &name, &codes, self.config.set_index)?;
        self.done("geo_to_rhp", &out);
        Ok(out)
    }

    /// Centroid of each indexed cell, written to the latitude/longitude columns.
    pub fn rhp_to_geo(&self) -> Result<GeoFrame> {
        self.enter("rhp_to_geo", "-");
        let points = self.centroids()?;
        let out = assemble::with_centroids(
            self.frame,
            &self.config.lat_col,
            &self.config.lng_col,
            &points,
        )?;
        self.done("rhp_to_geo", &out);
        Ok(out)
    }

    /// Centroid of each indexed cell as a point in the geometry column.
    pub fn rhp_to_geo_point(&self) -> Result<GeoFrame> {
        self.enter("rhp_to_geo_point", "-");
        let geometries = self
            .centroids()?
            .into_iter()
            .map(|p| Geometry::Point(Point::from(p)))
            .collect();
        let out = assemble::with_geometries(
            self.frame,
            &self.config.geometry_col,
            geometries,
            &self.config.default_crs,
        )?;
        self.done("rhp_to_geo_point", &out);
        Ok(out)
    }

    /// Footprint polygon of each indexed cell in the geometry column.
    pub fn rhp_to_geo_boundary(&self) -> Result<GeoFrame> {
        self.enter("rhp_to_geo_boundary", "-");
        let codes = self.codes()?;
        let geometries = mapper::map_rows(&codes, |code| {
            Ok(Geometry::Polygon(self.backend.boundary(code)?.to_polygon()))
        })?;
        let out = assemble::with_geometries(
            self.frame,
            &self.config.geometry_col,
            geometries,
            &self.config.default_crs,
        )?;
        self.done("rhp_to_geo_boundary", &out);
        Ok(out)
    }

    /// Ancestor of each indexed cell at `resolution`, or the direct parent when `None`.
    pub fn rhp_to_parent(&self, resolution: Option<i32>) -> Result<GeoFrame> {
        self.enter("rhp_to_parent", format_args!("{resolution:?}"));
        let target = resolution
            .map(|r| self.backend.shape().validate_resolution(r))
            .transpose()?;
        let codes = self.codes()?;
        let parents = mapper::map_rows(&codes, |code| match target {
            Some(target) => code.ancestor(i32::from(target)),
            None if code.resolution() == 0 => Err(RhpError::invalid_resolution(
                -1,
                format!("{code} is a base cell and has no parent"),
            )),
            None => code.ancestor(i32::from(code.resolution()) - 1),
        })?;
        let name = column_name(Operation::Ancestor { resolution: target });
        let out = assemble::with_derived(self.frame, &name, assemble::code_column(&parents))?;
        self.done("rhp_to_parent", &out);
        Ok(out)
    }

    /// Central descendant of each indexed cell at `resolution`, or one level finer when `None`.
    pub fn rhp_to_center_child(&self, resolution: Option<i32>) -> Result<GeoFrame> {
        self.enter("rhp_to_center_child", format_args!("{resolution:?}"));
        let shape = self.backend.shape();
        let target = resolution
            .map(|r| shape.validate_resolution(r))
            .transpose()?;
        let codes = self.codes()?;
        let children = mapper::map_rows(&codes, |code| {
            let current = i32::from(code.resolution());
            let target = match target {
                Some(target) if i32::from(target) < current => {
                    return Err(RhpError::invalid_resolution(
                        target,
                        format!("{code} is already at resolution {current}"),
                    ))
                }
                Some(target) => target,
                None => shape.validate_resolution(current + 1)?,
            };
            Ok(self.backend.center_child(code, target)?)
        })?;
        let name = column_name(Operation::CenterChild);
        let out = assemble::with_derived(self.frame, &name, assemble::code_column(&children))?;
        self.done("rhp_to_center_child", &out);
        Ok(out)
    }

    pub fn rhp_get_resolution(&self) -> Result<GeoFrame> {
        self.enter("rhp_get_resolution", "-");
        let codes = self.codes()?;
        let column = Column::integers(codes.iter().map(|c| i64::from(c.resolution())));
        let name = column_name(Operation::Resolution);
        let out = assemble::with_derived(self.frame, &name, column)?;
        self.done("rhp_get_resolution", &out);
        Ok(out)
    }

    pub fn rhp_get_base_cell(&self) -> Result<GeoFrame> {
        self.enter("rhp_get_base_cell", "-");
        let codes = self.codes()?;
        let column = Column::strings(codes.iter().map(|c| c.base_cell().to_string()));
        let name = column_name(Operation::BaseCell);
        let out = assemble::with_derived(self.frame, &name, column)?;
        self.done("rhp_get_base_cell", &out);
        Ok(out)
    }

    /// Whether each index label is a valid cell code. Malformed and null labels are `false`.
    pub fn rhp_is_valid(&self) -> Result<GeoFrame> {
        self.enter("rhp_is_valid", "-");
        let index = self
            .frame
            .index()
            .ok_or_else(|| RhpError::missing(mapper::CELL_INDEX, None))?;
        let backend = self.backend;
        let valid = |label: Value| label.as_str().is_some_and(|code| backend.is_valid(code));
        let column = Column::booleans(index.values.iter().map(valid));
        let name = column_name(Operation::IsValid);
        let out = assemble::with_derived(self.frame, &name, column)?;
        self.done("rhp_is_valid", &out);
        Ok(out)
    }

    /// Cell area in the configured unit.
    pub fn cell_area(&self) -> Result<GeoFrame> {
        self.cell_area_in(self.config.area_unit)
    }

    pub fn cell_area_in(&self, unit: AreaUnit) -> Result<GeoFrame> {
        self.enter("cell_area", format_args!("{unit:?}"));
        let codes = self.codes()?;
        let areas = mapper::map_rows(&codes, |code| Ok(self.backend.area(code, unit)?))?;
        let name = column_name(Operation::Area);
        let out = assemble::with_derived(self.frame, &name, Column::numbers(areas))?;
        self.done("cell_area", &out);
        Ok(out)
    }

    fn point_source(&self) -> RowSource<'_> {
        let FrameConfig {
            lat_col,
            lng_col,
            geometry_col,
            ..
        } = &self.config;
        let has_coordinates = self.frame.has_column(lat_col) && self.frame.has_column(lng_col);
        if !has_coordinates && self.frame.has_column(geometry_col) {
            RowSource::PointGeometry {
                column: geometry_col.as_str(),
            }
        } else {
            RowSource::Coordinates {
                lat: lat_col.as_str(),
                lng: lng_col.as_str(),
            }
        }
    }

    fn codes(&self) -> Result<Vec<CellCode>> {
        mapper::collect_codes(self.frame, self.backend.shape())
    }

    fn centroids(&self) -> Result<Vec<GeoPoint>> {
        let codes = self.codes()?;
        mapper::map_rows(&codes, |code| Ok(self.backend.decode(code)?))
    }

    fn enter(&self, operation: &str, params: impl std::fmt::Display) {
        log::debug!("{operation}({params}) over {} rows", self.frame.row_count());
    }

    fn done(&self, operation: &str, out: &GeoFrame) {
        log::debug!(
            "{operation} done: {} rows, {} columns",
            out.row_count(),
            out.column_count()
        );
    }
}
