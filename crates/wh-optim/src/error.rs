use thiserror::Error;
use wh_grid::GridError;
use wh_robot::RobotError;
use wh_sim::SimError;

#[derive(Debug, Error)]
pub enum OptimError {
    #[error("optimizer configuration error: {0}")]
    Config(String),

    #[error("{requested} robots requested but the layout has {docks} docks and {stations} stations")]
    TooManyRobots {
        requested: usize,
        docks:     usize,
        stations:  usize,
    },

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("robot error: {0}")]
    Robot(#[from] RobotError),

    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
}

pub type OptimResult<T> = Result<T, OptimError>;
