//! Cell addresses.

use crate::error::{GridError, Result};
use std::fmt;

/// Resolution-0 cells, in planar layout order: north square, the four equatorial squares from
/// west to east, south square.
pub const BASE_CELLS: [char; 6] = ['N', 'O', 'P', 'Q', 'R', 'S'];

/// A parsed rHEALPix cell address: base cell plus one child digit per resolution level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    base: u8,
    digits: Vec<u8>,
}

impl CellAddress {
    pub(crate) fn new(base: u8, digits: Vec<u8>) -> Self {
        Self { base, digits }
    }

    /// Parse an address for a grid with `n_side × n_side` children per cell.
    pub fn parse(address: &str, n_side: u8) -> Result<Self> {
        let invalid = |reason: String| GridError::InvalidAddress {
            address: address.to_string(),
            reason,
        };
        let mut chars = address.chars();
        let first = chars
            .next()
            .ok_or_else(|| invalid("empty address".to_string()))?;
        let base = BASE_CELLS
            .iter()
            .position(|&c| c == first)
            .ok_or_else(|| invalid(format!("unknown base cell {first:?}")))?;
        let children = u32::from(n_side) * u32::from(n_side);
        let digits = chars
            .map(|c| match c.to_digit(10) {
                Some(d) if d < children => Ok(d as u8),
                _ => Err(invalid(format!("invalid child digit {c:?}"))),
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self::new(base as u8, digits))
    }

    /// Index into [`BASE_CELLS`].
    pub fn base(&self) -> u8 {
        self.base
    }

    pub fn base_cell(&self) -> char {
        BASE_CELLS[usize::from(self.base)]
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn resolution(&self) -> usize {
        self.digits.len()
    }

    /// Ancestor at `resolution`, or `None` if it is finer than this cell.
    pub fn ancestor(&self, resolution: usize) -> Option<Self> {
        (resolution <= self.digits.len())
            .then(|| Self::new(self.base, self.digits[..resolution].to_vec()))
    }

    pub(crate) fn child(&self, digit: u8) -> Self {
        let mut digits = self.digits.clone();
        digits.push(digit);
        Self::new(self.base, digits)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_cell())?;
        for d in &self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let cell = CellAddress::parse("N0485", 3).unwrap();
        assert_eq!(cell.base_cell(), 'N');
        assert_eq!(cell.resolution(), 4);
        assert_eq!(cell.to_string(), "N0485");
    }

    #[test]
    fn digits_limited_by_n_side() {
        assert!(CellAddress::parse("Q8", 3).is_ok());
        assert!(CellAddress::parse("Q9", 3).is_err());
        assert!(CellAddress::parse("Q4", 2).is_err());
        assert!(CellAddress::parse("", 3).is_err());
        assert!(CellAddress::parse("X1", 3).is_err());
        assert!(CellAddress::parse("N1a", 3).is_err());
    }

    #[test]
    fn ancestor_truncates() {
        let cell = CellAddress::parse("P12345", 3).unwrap();
        assert_eq!(cell.ancestor(2).unwrap().to_string(), "P12");
        assert_eq!(cell.ancestor(0).unwrap().to_string(), "P");
        assert!(cell.ancestor(6).is_none());
    }
}
