//! Cell code model.
//!
//! A cell code is one base-cell symbol followed by one digit per resolution level, so a code's
//! resolution is its length minus one and every ancestor is a prefix. The alphabet and the
//! number of children per cell belong to the backend and arrive here as a [`GridShape`].

use crate::error::{Result, RhpError};
use std::fmt;
use std::sync::Arc;

/// Code shape advertised by a DGGS backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridShape {
    base_cells: Vec<char>,
    children: u8,
    max_resolution: u8,
}

impl GridShape {
    /// `children` is the branching factor per level; child digits are `0..children`, so it must
    /// be between 1 and 10.
    pub fn new(base_cells: impl Into<Vec<char>>, children: u8, max_resolution: u8) -> Self {
        Self {
            base_cells: base_cells.into(),
            children: children.clamp(1, 10),
            max_resolution,
        }
    }

    pub fn base_cells(&self) -> &[char] {
        &self.base_cells
    }

    pub fn children(&self) -> u8 {
        self.children
    }

    pub fn max_resolution(&self) -> u8 {
        self.max_resolution
    }

    /// Check a caller-supplied resolution against `0..=max_resolution`.
    pub fn validate_resolution(&self, resolution: i32) -> Result<u8> {
        if resolution < 0 {
            return Err(RhpError::invalid_resolution(
                resolution,
                "resolution must be non-negative",
            ));
        }
        if resolution > i32::from(self.max_resolution) {
            return Err(RhpError::invalid_resolution(
                resolution,
                format!("backend supports resolutions up to {}", self.max_resolution),
            ));
        }
        Ok(resolution as u8)
    }
}

/// A well-formed cell code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCode(Arc<str>);

impl CellCode {
    pub fn parse(code: &str, shape: &GridShape) -> Result<Self> {
        let malformed = |reason: String| RhpError::MalformedCode {
            code: code.to_string(),
            reason,
        };
        let mut chars = code.chars();
        let base = chars
            .next()
            .ok_or_else(|| malformed("empty code".to_string()))?;
        if !shape.base_cells.contains(&base) {
            return Err(malformed(format!("unknown base cell {base:?}")));
        }
        for c in chars {
            match c.to_digit(10) {
                Some(d) if d < u32::from(shape.children) => {}
                _ => return Err(malformed(format!("invalid digit {c:?}"))),
            }
        }
        // Base symbols and digits are single-byte in every supported alphabet; anything longer
        // than a u8 resolution cannot come from a backend.
        if code.chars().count() - 1 > usize::from(u8::MAX) {
            return Err(malformed("code too long".to_string()));
        }
        Ok(Self(Arc::from(code)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolution(&self) -> u8 {
        (self.0.chars().count() - 1) as u8
    }

    pub fn base_cell(&self) -> char {
        self.0.chars().next().unwrap_or_default()
    }

    /// Prefix of length `target + 1`.
    pub fn ancestor(&self, target: i32) -> Result<CellCode> {
        let resolution = self.resolution();
        if target < 0 {
            return Err(RhpError::invalid_resolution(
                target,
                "resolution must be non-negative",
            ));
        }
        if target > i32::from(resolution) {
            return Err(RhpError::invalid_resolution(
                target,
                format!("{} has resolution {resolution}", self.0),
            ));
        }
        let end = self
            .0
            .char_indices()
            .nth(target as usize + 1)
            .map_or(self.0.len(), |(i, _)| i);
        Ok(CellCode(Arc::from(&self.0[..end])))
    }

    /// Whether `self` is `other` or one of its ancestors.
    pub fn contains(&self, other: &CellCode) -> bool {
        other.0.starts_with(self.0.as_ref())
    }
}

impl fmt::Display for CellCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CellCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn resolution_of(code: &str, shape: &GridShape) -> Result<u8> {
    Ok(CellCode::parse(code, shape)?.resolution())
}

pub fn ancestor(code: &str, target: i32, shape: &GridShape) -> Result<CellCode> {
    CellCode::parse(code, shape)?.ancestor(target)
}

pub fn base_cell(code: &str, shape: &GridShape) -> Result<char> {
    Ok(CellCode::parse(code, shape)?.base_cell())
}
