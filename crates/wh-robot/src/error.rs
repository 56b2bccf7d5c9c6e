use thiserror::Error;

use wh_core::{Cell, RobotId};

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("spawn cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("cell {cell} is already occupied by {by}")]
    Occupied { cell: Cell, by: RobotId },

    #[error("robot {0} not found")]
    NotFound(RobotId),
}

pub type RobotResult<T> = Result<T, RobotError>;
