//! Names of the columns the accessor writes.
//!
//! Coordinate and geometry column names are caller-controlled through
//! [`crate::FrameConfig`]; everything else is derived here.

/// A column-producing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Cell code at a resolution (coordinates to cell).
    Encode { resolution: u8 },
    /// Ancestor at a resolution, or the direct parent when `None`.
    Ancestor { resolution: Option<u8> },
    Resolution,
    BaseCell,
    IsValid,
    CenterChild,
    Area,
}

pub fn resolution_column(resolution: u8) -> String {
    format!("rhp_{resolution:02}")
}

pub fn column_name(operation: Operation) -> String {
    match operation {
        Operation::Encode { resolution } => resolution_column(resolution),
        Operation::Ancestor { resolution } => match resolution {
            Some(resolution) => resolution_column(resolution),
            None => "rhp_parent".to_string(),
        },
        Operation::Resolution => "rhp_resolution".to_string(),
        Operation::BaseCell => "rhp_base_cell".to_string(),
        Operation::IsValid => "rhp_is_valid".to_string(),
        Operation::CenterChild => "rhp_center_child".to_string(),
        Operation::Area => "rhp_cell_area".to_string(),
    }
}
