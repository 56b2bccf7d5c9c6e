use thiserror::Error;
use wh_robot::RobotError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match robot count {expected}")]
    RobotCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("robot error: {0}")]
    Robot(#[from] RobotError),
}

pub type SimResult<T> = Result<T, SimError>;
