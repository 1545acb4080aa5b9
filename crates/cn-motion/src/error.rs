use cn_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotionError {
    #[error("an animation needs at least one waypoint")]
    NoWaypoints,

    #[error("steps_per_segment must be > 0")]
    ZeroSteps,

    #[error("agent {0:?} is already moving")]
    AlreadyMoving(AgentId),

    #[error("agent {0:?} does not exist")]
    UnknownAgent(AgentId),
}

pub type MotionResult<T> = Result<T, MotionError>;
