//! Grid-subsystem error type.

use thiserror::Error;

use wh_core::Cell;

/// Errors produced by `wh-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: i32, height: i32 },

    #[error("aisle {name:?} from {from} to {to} is not a straight segment")]
    NotStraight { name: String, from: Cell, to: Cell },

    #[error("name {0:?} is used by more than one dock, station, or aisle")]
    DuplicateName(String),

    #[error("cell {cell} cannot be swapped: {reason}")]
    NotSwappable { cell: Cell, reason: &'static str },
}

pub type GridResult<T> = Result<T, GridError>;
