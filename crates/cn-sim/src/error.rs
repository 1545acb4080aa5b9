use cn_agent::AgentError;
use cn_core::{AgentId, CoreError, NodeId};
use cn_graph::GraphError;
use cn_motion::MotionError;
use cn_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// A route request named a node outside the graph.
    #[error("{node} is out of range for a graph of {node_count} nodes")]
    InvalidNode { node: NodeId, node_count: usize },

    #[error("timetable of agent {agent:?} is invalid: {source}")]
    InvalidTimetable {
        agent:  AgentId,
        #[source]
        source: ScheduleError,
    },

    #[error("agent {0:?} does not exist")]
    AgentNotFound(AgentId),

    /// An ad-hoc route was requested for an agent that is still moving.
    #[error("agent {0:?} is already moving")]
    AgentBusy(AgentId),

    /// A reset named a clock time outside `00:00 ..= 24:00`.
    #[error("invalid clock time: {0}")]
    InvalidTime(#[from] CoreError),

    #[error("the simulation has not been started")]
    NotRunning,

    #[error("the simulated day has ended")]
    DayEnded,

    #[error("routing error: {0}")]
    Graph(#[from] GraphError),

    #[error("agent state error: {0}")]
    Agent(#[from] AgentError),

    #[error("animation error: {0}")]
    Motion(#[from] MotionError),
}

pub type SimResult<T> = Result<T, SimError>;
